//! 정규화된 요청 결과.

use serde_json::Value;

/// 요청 결과 — 전송/HTTP/비즈니스 계층의 응답을 하나로 정규화한 값
///
/// 성공이 아닌 모든 변형은 비어 있지 않은 메시지를 가진다.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 성공 (봉투의 `data` 또는 봉투가 아닌 본문 전체)
    Success(Value),
    /// 재로그인 필요 (HTTP 401 또는 비즈니스 코드 401)
    AuthRequired(String),
    /// 4xx 또는 비즈니스 실패
    ClientError { status: u16, message: String },
    /// 5xx
    ServerError { status: u16, message: String },
    /// 전송이 완료되지 않음 (연결 실패, 타임아웃)
    NetworkError(String),
    /// JSON이 아닌 2xx 본문 — 성공과 동등하게 취급
    Unclassified(Value),
}

impl Outcome {
    /// 성공 또는 성공 동등 결과인지
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_) | Outcome::Unclassified(_))
    }

    /// 성공 페이로드
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Outcome::Success(value) | Outcome::Unclassified(value) => Some(value),
            _ => None,
        }
    }

    /// 성공 페이로드 (소유권 이동)
    pub fn into_payload(self) -> Option<Value> {
        match self {
            Outcome::Success(value) | Outcome::Unclassified(value) => Some(value),
            _ => None,
        }
    }

    /// 사용자에게 보여줄 실패 메시지
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::AuthRequired(message)
            | Outcome::NetworkError(message)
            | Outcome::ClientError { message, .. }
            | Outcome::ServerError { message, .. } => Some(message),
            Outcome::Success(_) | Outcome::Unclassified(_) => None,
        }
    }

    /// HTTP 상태 코드 (상태 코드를 가진 변형만)
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::ClientError { status, .. } | Outcome::ServerError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// 로그용 변형 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::AuthRequired(_) => "auth_required",
            Outcome::ClientError { .. } => "client_error",
            Outcome::ServerError { .. } => "server_error",
            Outcome::NetworkError(_) => "network_error",
            Outcome::Unclassified(_) => "unclassified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unclassified_is_success_equivalent() {
        let outcome = Outcome::Unclassified(Value::String("plain".into()));
        assert!(outcome.is_success());
        assert_eq!(outcome.payload(), Some(&Value::String("plain".into())));
        assert_eq!(outcome.message(), None);
    }

    #[test]
    fn failure_accessors() {
        let outcome = Outcome::ServerError {
            status: 503,
            message: "request error (503)".into(),
        };
        assert!(!outcome.is_success());
        assert_eq!(outcome.status(), Some(503));
        assert_eq!(outcome.message(), Some("request error (503)"));
        assert_eq!(outcome.kind(), "server_error");
        assert!(outcome.into_payload().is_none());
    }

    #[test]
    fn success_payload() {
        let outcome = Outcome::Success(json!({"id": 1}));
        assert_eq!(outcome.into_payload(), Some(json!({"id": 1})));
    }
}
