//! HTTP REST API 클라이언트.
//!
//! 요청 빌더 → 전송 → 응답 분류기를 조합해 `Outcome`을 반환한다.
//! 재시도는 하지 않는다. 필요하면 호출 측에서 `Outcome`을 보고 결정한다.

use healthmate_core::error::CoreError;
use healthmate_core::models::endpoint::Endpoint;
use healthmate_core::models::outcome::Outcome;
use healthmate_core::models::request::{HttpMethod, RequestDescriptor};
use healthmate_core::ports::token_store::TokenStore;
use healthmate_core::ports::transport::Transport;
use std::sync::Arc;
use tracing::{debug, info};

use crate::classifier::ResponseClassifier;
use crate::request_builder::RequestBuilder;

/// REST API 클라이언트
pub struct HttpApiClient {
    builder: Arc<RequestBuilder>,
    transport: Arc<dyn Transport>,
    classifier: Arc<ResponseClassifier>,
    token_store: Arc<dyn TokenStore>,
}

impl HttpApiClient {
    pub fn new(
        builder: Arc<RequestBuilder>,
        transport: Arc<dyn Transport>,
        classifier: Arc<ResponseClassifier>,
        token_store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            builder,
            transport,
            classifier,
            token_store,
        }
    }

    /// 요청 실행 후 결과 분류
    pub async fn request(&self, descriptor: &RequestDescriptor) -> Outcome {
        let request = self.builder.build(descriptor);
        debug!(method = %request.method, path = descriptor.path(), "API 요청");

        let result = self.transport.send(&request).await;
        self.classifier.classify(result)
    }

    /// 엔드포인트 카탈로그 항목으로 요청
    pub async fn request_endpoint(
        &self,
        method: HttpMethod,
        endpoint: &Endpoint,
        body: Option<serde_json::Value>,
    ) -> Outcome {
        let mut descriptor = RequestDescriptor::for_endpoint(method, endpoint);
        if let Some(body) = body {
            descriptor = descriptor.with_body(body);
        }
        self.request(&descriptor).await
    }

    /// 발급받은 토큰 저장 (로그인 흐름은 호출 측 책임)
    pub fn set_token(&self, token: &str) -> Result<(), CoreError> {
        self.token_store.set(token)?;
        info!("토큰 저장됨");
        Ok(())
    }

    /// 로그아웃 — 저장된 토큰 삭제
    pub fn logout(&self) -> Result<bool, CoreError> {
        let removed = self.token_store.clear()?;
        debug!(removed, "로그아웃 완료");
        Ok(removed)
    }

    /// 토큰 보유 여부
    pub fn is_authenticated(&self) -> bool {
        self.token_store.get().is_some()
    }
}
