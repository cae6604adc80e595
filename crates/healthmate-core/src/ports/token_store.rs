//! 인증 토큰 저장소 포트.
//!
//! 구현: `healthmate-network` crate (`FileTokenStore`, `MemoryTokenStore`)

use crate::error::CoreError;

/// 베어러 토큰 단일 슬롯
///
/// 인증 헤더의 유일한 출처. 동시 접근에 안전해야 한다.
pub trait TokenStore: Send + Sync {
    /// 저장된 토큰 (없으면 미인증)
    fn get(&self) -> Option<String>;

    /// 토큰 저장
    fn set(&self, token: &str) -> Result<(), CoreError>;

    /// 토큰 삭제 — 멱등. 실제로 삭제된 토큰이 있었으면 `true`.
    fn clear(&self) -> Result<bool, CoreError>;
}
