//! 화면 이동 포트.
//!
//! UI 프레임워크가 구현한다. CLI에서는 `healthmate-app`의 콘솔 구현을 쓴다.

use crate::error::CoreError;

/// 화면 이동
pub trait Navigator: Send + Sync {
    /// 현재 표시 중인 화면 식별자
    fn current_view(&self) -> Option<String>;

    /// 화면 스택을 비우고 지정 화면으로 교체
    fn relaunch(&self, view: &str) -> Result<(), CoreError>;
}
