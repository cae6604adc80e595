//! 인증 토큰 저장소.
//!
//! 베어러 토큰 단일 슬롯을 관리한다. 토큰 발급(로그인/캡차)은 다루지 않는다.

use healthmate_core::error::CoreError;
use healthmate_core::ports::token_store::TokenStore;
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 현재 토큰 키
const TOKEN_KEY: &str = "token";

/// 이전 클라이언트 버전이 쓰던 키 (읽기 우선순위 순)
const LEGACY_TOKEN_KEYS: [&str; 2] = ["Authorization", "access_token"];

/// 메모리 토큰 저장소 — 테스트/일회성 세션용
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 토큰이 들어 있는 저장소
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(normalize_token(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set(&self, token: &str) -> Result<(), CoreError> {
        *self.token.write() = normalize_token(token);
        Ok(())
    }

    fn clear(&self) -> Result<bool, CoreError> {
        Ok(self.token.write().take().is_some())
    }
}

/// 파일 토큰 저장소 — JSON 키-값 파일, write-through
///
/// `token` 키를 우선 읽고, 없으면 이전 버전 키(`Authorization`, `access_token`)를 읽는다.
/// 저장 시 이전 버전 키는 제거된다.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl FileTokenStore {
    /// 파일 열기 (없으면 빈 저장소)
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let entries = Self::load(&path)?;
        debug!(path = %path.display(), "토큰 저장소 열림");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Map<String, Value>, CoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(CoreError::Storage(format!(
                    "토큰 파일 읽기 실패: {}: {e}",
                    path.display()
                )))
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                warn!(path = %path.display(), "토큰 파일 형식 오류, 빈 저장소로 시작");
                Ok(Map::new())
            }
        }
    }

    fn persist(&self, entries: &Map<String, Value>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Storage(format!(
                        "토큰 디렉토리 생성 실패: {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).map_err(|e| {
            CoreError::Storage(format!("토큰 파일 저장 실패: {}: {e}", self.path.display()))
        })
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let entries = self.entries.lock();
        std::iter::once(TOKEN_KEY)
            .chain(LEGACY_TOKEN_KEYS)
            .filter_map(|key| entries.get(key).and_then(Value::as_str))
            .find_map(normalize_token)
    }

    fn set(&self, token: &str) -> Result<(), CoreError> {
        let Some(token) = normalize_token(token) else {
            return self.clear().map(|_| ());
        };

        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        for key in LEGACY_TOKEN_KEYS {
            next.remove(key);
        }
        next.insert(TOKEN_KEY.to_string(), Value::String(token));
        self.persist(&next)?;
        *entries = next;
        debug!("토큰 저장 완료");
        Ok(())
    }

    fn clear(&self) -> Result<bool, CoreError> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        let removed = std::iter::once(TOKEN_KEY)
            .chain(LEGACY_TOKEN_KEYS)
            .fold(false, |removed, key| next.remove(key).is_some() || removed);

        if !removed {
            return Ok(false);
        }

        self.persist(&next)?;
        *entries = next;
        debug!("토큰 삭제 완료");
        Ok(true)
    }
}

/// 공백 제거, `Bearer ` 접두사 제거. 빈 토큰은 None.
fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let token = match trimmed.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => trimmed[7..].trim(),
        _ => trimmed,
    };
    (!token.is_empty()).then(|| token.to_string())
}
