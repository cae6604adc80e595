//! 도메인 모델.
//!
//! 요청/응답 경계의 데이터 구조. 도메인 페이로드(복약 계획 등)는
//! `serde_json::Value`로 불투명하게 다룬다.

pub mod endpoint;
pub mod envelope;
pub mod outcome;
pub mod request;
