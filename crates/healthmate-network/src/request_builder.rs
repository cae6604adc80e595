//! 요청 봉투 빌더.
//!
//! 요청 기술자에 기본 URL, 기본 헤더, 베어러 인증 헤더를 붙여 완성된 요청을 만든다.
//! 순수 조합이며 부수 효과가 없다.

use healthmate_core::models::request::{HttpRequest, RequestDescriptor};
use healthmate_core::ports::token_store::TokenStore;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;
use url::form_urlencoded;

const CONTENT_TYPE_JSON: &str = "application/json";
const ACCEPT_EVENT_STREAM: &str = "text/event-stream";

/// 요청 빌더 — 기본 URL은 생성 시 고정
pub struct RequestBuilder {
    base_url: String,
    token_store: Arc<dyn TokenStore>,
}

impl RequestBuilder {
    pub fn new(base_url: &str, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 일반 JSON 요청 생성
    pub fn build(&self, descriptor: &RequestDescriptor) -> HttpRequest {
        self.compose(descriptor, BTreeMap::new())
    }

    /// SSE 스트림 요청 생성 (`accept: text/event-stream` 추가)
    pub fn build_stream(&self, descriptor: &RequestDescriptor) -> HttpRequest {
        let mut defaults = BTreeMap::new();
        defaults.insert("accept".to_string(), ACCEPT_EVENT_STREAM.to_string());
        self.compose(descriptor, defaults)
    }

    fn compose(
        &self,
        descriptor: &RequestDescriptor,
        mut headers: BTreeMap<String, String>,
    ) -> HttpRequest {
        headers.insert("content-type".to_string(), CONTENT_TYPE_JSON.to_string());
        headers.extend(
            descriptor
                .extra_headers()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        if let Some(token) = self.token_store.get() {
            headers.insert("authorization".to_string(), format!("Bearer {token}"));
        }

        let mut url = self.join(descriptor.path());
        let method = descriptor.method();
        let body = match descriptor.body() {
            Some(Value::Object(fields)) if method.sends_query() => {
                append_query(&mut url, fields);
                None
            }
            Some(other) if method.sends_query() => {
                warn!(%method, "객체가 아닌 {method} 데이터 무시: {other}");
                None
            }
            other => other.cloned(),
        };

        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    fn join(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') || path.starts_with('?') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// 객체 필드를 쿼리 문자열로 추가. `null`은 생략, 중첩 값은 JSON 문자열.
fn append_query(url: &mut String, fields: &serde_json::Map<String, Value>) {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        match value {
            Value::Null => continue,
            Value::String(s) => serializer.append_pair(key, s),
            other => serializer.append_pair(key, &other.to_string()),
        };
    }

    let query = serializer.finish();
    if query.is_empty() {
        return;
    }
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&query);
}
