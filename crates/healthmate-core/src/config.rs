//! 클라이언트 설정 구조체.
//!
//! 서버 URL, 타임아웃, 비즈니스 성공 코드, 토큰 저장 경로, 로그인 화면 식별자 등
//! 런타임 설정을 정의한다. 기본 URL은 프로세스 시작 시 한 번 결정되며 이후 변경되지 않는다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::envelope::ENVELOPE_SUCCESS_CODE;

/// 기본 URL 오버라이드 환경 변수
pub const BASE_URL_ENV: &str = "HEALTHMATE_BASE_URL";

/// 기본 API 서버 URL (버전 접두사 포함)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// 기본 로그인 화면 식별자
pub const DEFAULT_LOGIN_VIEW: &str = "/pages/login/login";

/// 최상위 클라이언트 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 서버 연결 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
}

// ============================================================
// 서버 설정
// ============================================================

/// 서버 연결 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API 서버 기본 URL (예: "https://api.example.com/api/v1")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (밀리초). SSE 스트림에는 적용하지 않는다.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 연결 타임아웃 (밀리초)
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// 봉투(`{code,msg,data}`)의 비즈니스 성공 코드.
    /// 백엔드 버전에 고정되는 값이며, 하나의 값만 성공으로 인정한다.
    #[serde(default = "default_success_code")]
    pub success_code: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            success_code: default_success_code(),
        }
    }
}

impl ServerConfig {
    /// 요청 타임아웃
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// 연결 타임아웃
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_success_code() -> i64 {
    ENVELOPE_SUCCESS_CODE
}

// ============================================================
// 인증 설정
// ============================================================

/// 인증 설정 — 토큰 저장 위치와 로그인 화면
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 토큰 파일 경로 (None이면 설정 디렉토리의 `token.json`)
    #[serde(default)]
    pub token_path: Option<PathBuf>,
    /// 재인증 시 이동할 로그인 화면 식별자
    #[serde(default = "default_login_view")]
    pub login_view: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_path: None,
            login_view: default_login_view(),
        }
    }
}

fn default_login_view() -> String {
    DEFAULT_LOGIN_VIEW.to_string()
}

impl ClientConfig {
    /// 환경 변수 오버라이드 적용
    ///
    /// `HEALTHMATE_BASE_URL`이 비어 있지 않으면 `server.base_url`을 대체한다.
    pub fn apply_env_overrides(&mut self) {
        self.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
    }

    fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.server.base_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.server.success_code, 200);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.auth.login_view, DEFAULT_LOGIN_VIEW);
        assert!(config.auth.token_path.is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"server":{"base_url":"https://api.test/api/v1"}}"#).unwrap();
        assert_eq!(config.server.base_url, "https://api.test/api/v1");
        assert_eq!(config.server.connect_timeout_ms, 10_000);
        assert_eq!(config.server.success_code, 200);
    }

    #[test]
    fn base_url_override() {
        let mut config = ClientConfig::default();
        config.apply_base_url_override(Some(" https://prod.test/api/v1 ".to_string()));
        assert_eq!(config.server.base_url, "https://prod.test/api/v1");
    }

    #[test]
    fn blank_override_ignored() {
        let mut config = ClientConfig::default();
        config.apply_base_url_override(Some("   ".to_string()));
        config.apply_base_url_override(None);
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
    }
}
