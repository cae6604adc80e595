//! HTTP 전송 포트.
//!
//! 구현: `healthmate-network` crate (reqwest)

use async_trait::async_trait;
use futures::stream::BoxStream;
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::models::request::HttpRequest;

/// SSE 응답 본문 청크 스트림. 청크 경계는 프레임 경계와 무관하다.
pub type ByteChunkStream = BoxStream<'static, Result<Vec<u8>, CoreError>>;

/// 완료된 전송 결과 (상태 코드, 원시 본문, 헤더)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// 소문자 헤더 이름 → 값
    pub headers: BTreeMap<String, String>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: BTreeMap::new(),
        }
    }
}

/// HTTP 전송
#[async_trait]
pub trait Transport: Send + Sync {
    /// 요청 전송
    ///
    /// 상태 코드와 관계없이 응답을 받으면 `Ok`. 전송 자체가 완료되지 않았으면
    /// (연결 실패, 타임아웃) `Err(CoreError::Network)`.
    async fn send(&self, request: &HttpRequest) -> Result<TransportResponse, CoreError>;

    /// 스트림 모드로 요청을 열고 본문 청크 스트림 반환
    ///
    /// 2xx가 아니면 청크를 내보내기 전에 `Err(CoreError::StreamOpen)`으로 실패한다.
    async fn open_stream(&self, request: &HttpRequest) -> Result<ByteChunkStream, CoreError>;
}
