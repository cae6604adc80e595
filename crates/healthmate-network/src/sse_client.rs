//! SSE(Server-Sent Events) 스트림 클라이언트.
//!
//! 요청 빌더로 스트림 요청을 만들고, 전송 계층에서 연 바이트 스트림을
//! `SseDecoder`로 이벤트 시퀀스로 바꾼다. 자동 재연결은 하지 않는다.

use futures::stream::StreamExt;
use healthmate_core::error::CoreError;
use healthmate_core::models::request::RequestDescriptor;
use healthmate_core::ports::transport::Transport;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::request_builder::RequestBuilder;
use crate::sse_decoder::{decode_events, SseEventStream};

/// SSE 스트림 클라이언트
pub struct SseStreamClient {
    builder: Arc<RequestBuilder>,
    transport: Arc<dyn Transport>,
}

impl SseStreamClient {
    pub fn new(builder: Arc<RequestBuilder>, transport: Arc<dyn Transport>) -> Self {
        Self { builder, transport }
    }

    /// 스트림을 열고 지연 이벤트 스트림 반환
    ///
    /// 열기에 실패하면(비-2xx, 연결 실패) 이벤트 없이 즉시 에러를 반환한다.
    /// 다시 읽으려면 새로 열어야 한다.
    pub async fn open(&self, descriptor: &RequestDescriptor) -> Result<SseEventStream, CoreError> {
        let request = self.builder.build_stream(descriptor);
        info!(path = descriptor.path(), "SSE 연결 시작");

        let chunks = self.transport.open_stream(&request).await?;
        debug!("SSE 연결 수립됨");
        Ok(decode_events(chunks))
    }

    /// 스트림을 끝까지 읽으며 이벤트마다 콜백 호출
    ///
    /// 수신 순서대로 콜백을 부르고, 전달한 이벤트 수를 반환한다.
    pub async fn stream<F>(
        &self,
        descriptor: &RequestDescriptor,
        mut on_event: F,
    ) -> Result<usize, CoreError>
    where
        F: FnMut(Value) + Send,
    {
        let mut events = self.open(descriptor).await?;
        let mut delivered = 0usize;

        while let Some(event) = events.next().await {
            match event {
                Ok(value) => {
                    on_event(value);
                    delivered += 1;
                }
                Err(e) => {
                    warn!(delivered, "SSE 스트림 에러: {e}");
                    return Err(e);
                }
            }
        }

        info!(delivered, "SSE 스트림 종료");
        Ok(delivered)
    }
}
