//! reqwest 기반 HTTP 전송.
//!
//! `Transport` 포트 구현. 상태 코드 해석은 하지 않으며(분류기의 몫),
//! 스트림 열기만 2xx 여부를 확인한다.

use async_trait::async_trait;
use futures::stream::StreamExt;
use healthmate_core::config::ServerConfig;
use healthmate_core::error::CoreError;
use healthmate_core::models::request::{HttpMethod, HttpRequest};
use healthmate_core::ports::transport::{ByteChunkStream, Transport, TransportResponse};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// reqwest 전송 — `Transport` 포트 구현
pub struct ReqwestTransport {
    /// 일반 요청용 (전체 타임아웃 적용)
    client: reqwest::Client,
    /// 스트림용 (연결 타임아웃만 적용)
    stream_client: reqwest::Client,
}

impl ReqwestTransport {
    /// 새 전송 생성
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        let stream_client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("스트림 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            stream_client,
        })
    }

    /// 서버 설정으로 생성
    pub fn from_config(config: &ServerConfig) -> Result<Self, CoreError> {
        Self::new(config.request_timeout(), config.connect_timeout())
    }

    fn prepare(
        client: &reqwest::Client,
        request: &HttpRequest,
    ) -> Result<reqwest::RequestBuilder, CoreError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        Ok(builder)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<TransportResponse, CoreError> {
        debug!(method = %request.method, url = %request.url, "요청 전송");

        let resp = Self::prepare(&self.client, request)?
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("요청 전송 실패: {e}")))?;

        let status = resp.status().as_u16();
        let headers = collect_headers(resp.headers());
        let body = resp
            .bytes()
            .await
            .map_err(|e| CoreError::Network(format!("응답 본문 읽기 실패: {e}")))?;

        debug!(status, bytes = body.len(), "응답 수신");
        Ok(TransportResponse {
            status,
            body: body.to_vec(),
            headers,
        })
    }

    async fn open_stream(&self, request: &HttpRequest) -> Result<ByteChunkStream, CoreError> {
        debug!(method = %request.method, url = %request.url, "스트림 열기");

        let resp = Self::prepare(&self.stream_client, request)?
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("스트림 연결 실패: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_else(|e| {
                warn!("응답 본문 읽기 실패: {e}");
                String::new()
            });
            let message = if text.trim().is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                text
            };
            return Err(CoreError::StreamOpen {
                status: status.as_u16(),
                message,
            });
        }

        let chunks = resp.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| CoreError::Network(format!("스트림 읽기 실패: {e}")))
        });
        Ok(chunks.boxed())
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
