//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! `healthmate-network`가 어댑터를 구현하며, 호출 측에서 `Arc<dyn T>`로 주입한다.
//! 전역 상태를 두지 않으므로 테스트마다 독립 인스턴스를 만들 수 있다.

pub mod navigator;
pub mod token_store;
pub mod transport;
