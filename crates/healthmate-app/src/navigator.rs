//! 콘솔 화면 이동기.
//!
//! CLI에는 화면 스택이 없으므로 이동 요청을 안내 문구로 바꾸고
//! 현재 화면 상태만 기억한다.

use healthmate_core::error::CoreError;
use healthmate_core::ports::navigator::Navigator;
use parking_lot::Mutex;
use tracing::warn;

/// `Navigator` 포트의 콘솔 구현
#[derive(Default)]
pub struct ConsoleNavigator {
    current: Mutex<Option<String>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }
}

impl Navigator for ConsoleNavigator {
    fn current_view(&self) -> Option<String> {
        self.current.lock().clone()
    }

    fn relaunch(&self, view: &str) -> Result<(), CoreError> {
        warn!(view, "로그인 필요");
        eprintln!("로그인이 필요합니다. `healthmate token set <TOKEN>`으로 토큰을 저장하세요.");
        *self.current.lock() = Some(view.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaunch_updates_current_view() {
        let nav = ConsoleNavigator::new();
        assert!(nav.current_view().is_none());
        nav.relaunch("/pages/login/login").unwrap();
        assert_eq!(nav.current_view().as_deref(), Some("/pages/login/login"));
    }
}
