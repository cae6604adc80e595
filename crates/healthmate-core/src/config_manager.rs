//! 설정 파일 관리.
//!
//! 플랫폼별 설정 디렉토리에 JSON 파일로 설정을 저장/로드한다.
//! 설정은 프로세스 시작 시 한 번 확정되며, 이후 핫 리로드는 지원하지 않는다.

use crate::config::ClientConfig;
use crate::error::CoreError;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.json";

/// 토큰 파일 이름
const TOKEN_FILE_NAME: &str = "token.json";

/// 설정 관리자
///
/// 설정 파일 로드(없으면 기본값으로 생성) 후 환경 변수 오버라이드를 적용한다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 확정된 설정
    config: ClientConfig,
    /// 설정 파일 경로
    config_path: PathBuf,
}

impl ConfigManager {
    /// 플랫폼 기본 경로에서 설정 로드
    pub fn new() -> Result<Self, CoreError> {
        let config_path = Self::config_dir()?.join(CONFIG_FILE_NAME);
        Self::with_path(config_path)
    }

    /// 지정된 경로에서 설정 로드
    ///
    /// 설정 파일이 없으면 기본 설정을 생성하고 저장한다.
    pub fn with_path(config_path: PathBuf) -> Result<Self, CoreError> {
        let mut config = Self::load_or_create(&config_path)?;
        config.apply_env_overrides();
        debug!(base_url = %config.server.base_url, "설정 확정");

        Ok(Self {
            config,
            config_path,
        })
    }

    /// 현재 설정 참조
    pub fn get(&self) -> &ClientConfig {
        &self.config
    }

    /// 설정 소유권 반환
    pub fn into_config(self) -> ClientConfig {
        self.config
    }

    /// 설정 파일 경로 반환
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// 토큰 파일 경로 — 설정값이 없으면 설정 파일과 같은 디렉토리의 `token.json`
    pub fn token_path(&self) -> PathBuf {
        match &self.config.auth.token_path {
            Some(path) => path.clone(),
            None => self
                .config_path
                .parent()
                .map(|dir| dir.join(TOKEN_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(TOKEN_FILE_NAME)),
        }
    }

    /// 플랫폼별 설정 디렉토리 경로
    pub fn config_dir() -> Result<PathBuf, CoreError> {
        ProjectDirs::from("org", "health", "healthmate")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| CoreError::Config("홈 디렉토리를 찾을 수 없습니다".to_string()))
    }

    fn load_or_create(path: &Path) -> Result<ClientConfig, CoreError> {
        if path.exists() {
            return Self::load_from_file(path);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Config(format!(
                        "설정 디렉토리 생성 실패: {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let default_config = ClientConfig::default();
        Self::save_to_file(path, &default_config)?;
        info!("기본 설정 파일 생성: {}", path.display());
        Ok(default_config)
    }

    fn load_from_file(path: &Path) -> Result<ClientConfig, CoreError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("설정 파일 읽기 실패: {}: {}", path.display(), e))
        })?;

        let config: ClientConfig = serde_json::from_str(&content).map_err(|e| {
            CoreError::Config(format!("설정 파일 파싱 실패: {}: {}", path.display(), e))
        })?;

        debug!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    fn save_to_file(path: &Path, config: &ClientConfig) -> Result<(), CoreError> {
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| CoreError::Config(format!("설정 직렬화 실패: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            CoreError::Config(format!("설정 파일 저장 실패: {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let manager = ConfigManager::with_path(config_path.clone()).unwrap();
        assert!(config_path.exists());
        assert_eq!(manager.get().server.success_code, 200);
        assert_eq!(manager.config_path(), config_path.as_path());
    }

    #[test]
    fn loads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"server":{"request_timeout_ms":5000},"auth":{"login_view":"/pages/auth/login"}}"#,
        )
        .unwrap();

        let manager = ConfigManager::with_path(config_path).unwrap();
        assert_eq!(manager.get().server.request_timeout_ms, 5000);
        assert_eq!(manager.get().auth.login_view, "/pages/auth/login");
    }

    #[test]
    fn broken_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "{ not json").unwrap();

        let err = ConfigManager::with_path(config_path).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn token_path_defaults_next_to_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let manager = ConfigManager::with_path(config_path).unwrap();
        assert_eq!(manager.token_path(), temp_dir.path().join("token.json"));
    }

    #[test]
    fn token_path_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let custom = temp_dir.path().join("secrets").join("t.json");
        fs::write(
            &config_path,
            serde_json::json!({ "auth": { "token_path": custom } }).to_string(),
        )
        .unwrap();

        let manager = ConfigManager::with_path(config_path).unwrap();
        assert_eq!(manager.token_path(), custom);
    }
}
