//! # healthmate-core
//!
//! HEALTHMATE 클라이언트 전송 계층의 도메인 모델, 포트(trait) 정의, 에러 타입.
//!
//! ## 구조
//!
//! - [`models`] — 요청 기술자, 응답 봉투 판별, 정규화된 결과(`Outcome`), 엔드포인트 카탈로그
//! - [`ports`] — 전송, 토큰 저장소, 화면 이동 포트 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 클라이언트 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/생성)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
