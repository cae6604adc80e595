//! # healthmate-network
//!
//! HEALTHMATE 백엔드 HTTP/SSE 네트워크 어댑터.
//! 요청 조립(기본 URL, Bearer 인증, GET 쿼리 직렬화), reqwest 전송,
//! 응답 봉투 분류, 401 처리(토큰 삭제 + 로그인 화면 단일 이동),
//! SSE 증분 디코딩을 담당한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use healthmate_network::auth::FileTokenStore;
//! use healthmate_network::stack::ApiStack;
//!
//! let stack = ApiStack::from_config(&config, token_store, navigator)?;
//! let outcome = stack.http.request(&RequestDescriptor::get("/med/today")).await;
//! ```

pub mod auth;
pub mod classifier;
pub mod http_client;
pub mod navigation;
pub mod request_builder;
pub mod sse_client;
pub mod sse_decoder;
pub mod stack;
pub mod transport;
