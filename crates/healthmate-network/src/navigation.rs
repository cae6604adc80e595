//! 로그인 화면 이동 단일 실행(single-flight) 게이트.
//!
//! 동시에 진행 중인 여러 요청이 모두 401을 받아도 로그인 화면 이동은 한 번만 일어난다.
//! 잠금 없이 atomic 플래그 하나로 동작하며, 어떤 호출도 다른 호출을 기다리지 않는다.

use healthmate_core::ports::navigator::Navigator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 로그인 이동 게이트
pub struct NavigationGuard {
    navigator: Arc<dyn Navigator>,
    login_view: String,
    /// 이동이 이미 요청되었고 아직 로그인 화면에 도달하지 않음
    issued: AtomicBool,
}

impl NavigationGuard {
    pub fn new(navigator: Arc<dyn Navigator>, login_view: impl Into<String>) -> Self {
        Self {
            navigator,
            login_view: login_view.into(),
            issued: AtomicBool::new(false),
        }
    }

    /// 로그인 화면 이동 요청
    ///
    /// 현재 화면이 이미 로그인 화면이거나 이동이 대기 중이면 아무것도 하지 않는다.
    /// 실제로 이동을 수행했으면 `true`.
    pub fn request_login_navigation(&self) -> bool {
        if self.is_on_login_view() {
            debug!("이미 로그인 화면, 이동 생략");
            return false;
        }

        if self
            .issued
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("로그인 이동 대기 중, 중복 요청 무시");
            return false;
        }

        match self.navigator.relaunch(&self.login_view) {
            Ok(()) => {
                info!(view = %self.login_view, "로그인 화면으로 이동");
                true
            }
            Err(e) => {
                // 다음 401에서 다시 시도할 수 있도록 해제
                self.issued.store(false, Ordering::Release);
                warn!("로그인 화면 이동 실패: {e}");
                false
            }
        }
    }

    /// 로그인 화면에 도달했을 때 UI 프레임워크가 호출한다
    pub fn on_login_view_entered(&self) {
        if self.issued.swap(false, Ordering::AcqRel) {
            debug!("로그인 화면 도달, 이동 게이트 해제");
        }
    }

    /// 이동이 대기 중인지
    pub fn is_pending(&self) -> bool {
        self.issued.load(Ordering::Acquire)
    }

    pub fn login_view(&self) -> &str {
        &self.login_view
    }

    fn is_on_login_view(&self) -> bool {
        self.navigator
            .current_view()
            .is_some_and(|view| same_view(&view, &self.login_view))
    }
}

/// 선행 `/` 차이는 무시하고 비교
fn same_view(a: &str, b: &str) -> bool {
    a.trim_start_matches('/') == b.trim_start_matches('/')
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use healthmate_core::error::CoreError;
    use parking_lot::Mutex;

    /// 이동 기록용 테스트 내비게이터
    #[derive(Default)]
    pub(crate) struct RecordingNavigator {
        pub current: Mutex<Option<String>>,
        pub relaunches: Mutex<Vec<String>>,
        pub fail: AtomicBool,
    }

    impl RecordingNavigator {
        pub fn on(view: &str) -> Self {
            let nav = Self::default();
            *nav.current.lock() = Some(view.to_string());
            nav
        }

        pub fn relaunch_count(&self) -> usize {
            self.relaunches.lock().len()
        }
    }

    impl Navigator for RecordingNavigator {
        fn current_view(&self) -> Option<String> {
            self.current.lock().clone()
        }

        fn relaunch(&self, view: &str) -> Result<(), CoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(CoreError::Internal("navigation failed".into()));
            }
            self.relaunches.lock().push(view.to_string());
            Ok(())
        }
    }

    const LOGIN: &str = "/pages/login/login";

    #[test]
    fn first_request_navigates() {
        let nav = Arc::new(RecordingNavigator::on("/pages/index/index"));
        let guard = NavigationGuard::new(nav.clone(), LOGIN);

        assert!(guard.request_login_navigation());
        assert!(guard.is_pending());
        assert_eq!(*nav.relaunches.lock(), vec![LOGIN.to_string()]);
    }

    #[test]
    fn repeated_requests_while_pending_are_noops() {
        let nav = Arc::new(RecordingNavigator::on("/pages/index/index"));
        let guard = NavigationGuard::new(nav.clone(), LOGIN);

        assert!(guard.request_login_navigation());
        assert!(!guard.request_login_navigation());
        assert!(!guard.request_login_navigation());
        assert_eq!(nav.relaunch_count(), 1);
    }

    #[test]
    fn already_on_login_view() {
        let nav = Arc::new(RecordingNavigator::on("pages/login/login"));
        let guard = NavigationGuard::new(nav.clone(), LOGIN);

        assert!(!guard.request_login_navigation());
        assert!(!guard.is_pending());
        assert_eq!(nav.relaunch_count(), 0);
    }

    #[test]
    fn reset_when_login_view_entered() {
        let nav = Arc::new(RecordingNavigator::on("/pages/plan/list"));
        let guard = NavigationGuard::new(nav.clone(), LOGIN);

        assert!(guard.request_login_navigation());
        guard.on_login_view_entered();
        assert!(!guard.is_pending());

        // 로그인 후 다른 화면에서 다시 401
        assert!(guard.request_login_navigation());
        assert_eq!(nav.relaunch_count(), 2);
    }

    #[test]
    fn failed_navigation_releases_gate() {
        let nav = Arc::new(RecordingNavigator::on("/pages/index/index"));
        nav.fail.store(true, Ordering::SeqCst);
        let guard = NavigationGuard::new(nav.clone(), LOGIN);

        assert!(!guard.request_login_navigation());
        assert!(!guard.is_pending());

        nav.fail.store(false, Ordering::SeqCst);
        assert!(guard.request_login_navigation());
    }

    #[test]
    fn concurrent_requests_navigate_once() {
        let nav = Arc::new(RecordingNavigator::on("/pages/index/index"));
        let guard = Arc::new(NavigationGuard::new(nav.clone(), LOGIN));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let guard = guard.clone();
                std::thread::spawn(move || guard.request_login_navigation())
            })
            .collect();
        let navigated = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|navigated| *navigated)
            .count();

        assert_eq!(navigated, 1);
        assert_eq!(nav.relaunch_count(), 1);
    }
}
