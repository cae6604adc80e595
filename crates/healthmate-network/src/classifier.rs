//! 응답 분류기.
//!
//! 전송 결과(상태 코드 + 모호한 본문)를 `Outcome` 하나로 정규화한다.
//! 판정 순서:
//!
//! 1. 전송 미완료 → `NetworkError`
//! 2. HTTP 401 → `AuthRequired` (토큰 삭제 + 로그인 이동 1회)
//! 3. 4xx → `ClientError`, 5xx → `ServerError`, 2xx 외 나머지 → `ClientError`
//! 4. 2xx 본문: `code == 성공 코드` → `Success(data)`, `code == 401` → `AuthRequired`,
//!    그 밖의 `code` → `ClientError`, `code` 없음 → `Success(본문 전체)`
//!
//! 분류는 절대 실패하지 않는다. 성공이 아닌 결과의 메시지는 항상 비어 있지 않다.

use healthmate_core::error::CoreError;
use healthmate_core::models::envelope::{RawBody, AUTH_REQUIRED_CODE, ENVELOPE_SUCCESS_CODE};
use healthmate_core::models::outcome::Outcome;
use healthmate_core::ports::token_store::TokenStore;
use healthmate_core::ports::transport::TransportResponse;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::navigation::NavigationGuard;

const DEFAULT_AUTH_MESSAGE: &str = "login required";
const DEFAULT_NETWORK_MESSAGE: &str = "network error";

/// 응답 분류기
pub struct ResponseClassifier {
    success_code: i64,
    token_store: Arc<dyn TokenStore>,
    navigation: Arc<NavigationGuard>,
}

impl ResponseClassifier {
    pub fn new(token_store: Arc<dyn TokenStore>, navigation: Arc<NavigationGuard>) -> Self {
        Self {
            success_code: ENVELOPE_SUCCESS_CODE,
            token_store,
            navigation,
        }
    }

    /// 비즈니스 성공 코드 지정 (백엔드 버전별 설정)
    pub fn with_success_code(mut self, success_code: i64) -> Self {
        self.success_code = success_code;
        self
    }

    pub fn success_code(&self) -> i64 {
        self.success_code
    }

    /// 전송 결과 분류
    pub fn classify(&self, result: Result<TransportResponse, CoreError>) -> Outcome {
        let outcome = match result {
            Err(e) => {
                warn!("전송 실패: {e}");
                Outcome::NetworkError(network_message(e))
            }
            Ok(response) => self.classify_response(&response),
        };
        debug!(kind = outcome.kind(), "응답 분류");
        outcome
    }

    fn classify_response(&self, response: &TransportResponse) -> Outcome {
        let status = response.status;
        let body = RawBody::parse(&response.body);

        match status {
            401 => self.auth_required(body.message().map(str::to_string)),
            400..=499 => Outcome::ClientError {
                status,
                message: resolve_message(&body, || format!("request error ({status})")),
            },
            500..=599 => Outcome::ServerError {
                status,
                message: resolve_message(&body, || format!("request error ({status})")),
            },
            200..=299 => self.classify_body(status, body),
            _ => Outcome::ClientError {
                status,
                message: resolve_message(&body, || format!("unexpected status ({status})")),
            },
        }
    }

    fn classify_body(&self, status: u16, body: RawBody) -> Outcome {
        let message = body.message().map(str::to_string);
        match body {
            RawBody::Enveloped { code, data, .. } => match code.as_i64() {
                Some(c) if c == self.success_code => Outcome::Success(data),
                Some(AUTH_REQUIRED_CODE) => self.auth_required(message),
                _ => Outcome::ClientError {
                    status,
                    message: message.unwrap_or_else(|| format!("business error (code {code})")),
                },
            },
            RawBody::Raw(value) => Outcome::Success(value),
            RawBody::Text(text) => Outcome::Unclassified(Value::String(text)),
        }
    }

    /// 재인증 처리: 토큰 삭제(멱등) + 로그인 이동 요청(단일 실행)
    fn auth_required(&self, message: Option<String>) -> Outcome {
        match self.token_store.clear() {
            Ok(true) => info!("인증 만료, 저장된 토큰 삭제"),
            Ok(false) => debug!("인증 만료, 삭제할 토큰 없음"),
            Err(e) => warn!("토큰 삭제 실패: {e}"),
        }
        self.navigation.request_login_navigation();

        Outcome::AuthRequired(message.unwrap_or_else(|| DEFAULT_AUTH_MESSAGE.to_string()))
    }
}

/// 메시지 결정: `msg` → `message` → 생성 메시지
fn resolve_message(body: &RawBody, fallback: impl FnOnce() -> String) -> String {
    body.message().map(str::to_string).unwrap_or_else(fallback)
}

fn network_message(error: CoreError) -> String {
    let message = match error {
        CoreError::Network(message) => message,
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        DEFAULT_NETWORK_MESSAGE.to_string()
    } else {
        message
    }
}
