//! 네트워크 어댑터 와이어링.
//!
//! 설정 하나와 호스트 어댑터(토큰 저장소, 화면 이동기)로부터
//! REST 클라이언트와 SSE 클라이언트를 조립한다. 두 클라이언트는
//! 같은 요청 빌더, 같은 토큰 저장소, 같은 로그인 이동 게이트를 공유한다.

use healthmate_core::config::ClientConfig;
use healthmate_core::error::CoreError;
use healthmate_core::ports::navigator::Navigator;
use healthmate_core::ports::token_store::TokenStore;
use healthmate_core::ports::transport::Transport;
use std::sync::Arc;
use tracing::info;

use crate::classifier::ResponseClassifier;
use crate::http_client::HttpApiClient;
use crate::navigation::NavigationGuard;
use crate::request_builder::RequestBuilder;
use crate::sse_client::SseStreamClient;
use crate::transport::ReqwestTransport;

/// 조립된 API 클라이언트 묶음
pub struct ApiStack {
    pub http: HttpApiClient,
    pub sse: SseStreamClient,
    pub navigation: Arc<NavigationGuard>,
    pub token_store: Arc<dyn TokenStore>,
}

impl ApiStack {
    /// 설정으로 reqwest 전송을 만들어 조립
    pub fn from_config(
        config: &ClientConfig,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, CoreError> {
        let transport = Arc::new(ReqwestTransport::from_config(&config.server)?);
        Ok(Self::with_transport(config, token_store, navigator, transport))
    }

    /// 주어진 전송으로 조립 (테스트, 다른 전송 구현용)
    pub fn with_transport(
        config: &ClientConfig,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let builder = Arc::new(RequestBuilder::new(
            &config.server.base_url,
            token_store.clone(),
        ));
        let navigation = Arc::new(NavigationGuard::new(
            navigator,
            config.auth.login_view.clone(),
        ));
        let classifier = Arc::new(
            ResponseClassifier::new(token_store.clone(), navigation.clone())
                .with_success_code(config.server.success_code),
        );

        info!(
            base_url = builder.base_url(),
            success_code = config.server.success_code,
            "API 클라이언트 초기화"
        );

        Self {
            http: HttpApiClient::new(
                builder.clone(),
                transport.clone(),
                classifier,
                token_store.clone(),
            ),
            sse: SseStreamClient::new(builder, transport),
            navigation,
            token_store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::navigation::tests::RecordingNavigator;
    use healthmate_core::models::outcome::Outcome;
    use healthmate_core::models::request::RequestDescriptor;
    use serde_json::json;

    #[tokio::test]
    async fn configured_success_code_is_used() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/articles")
            .with_status(200)
            .with_body(r#"{"code":0,"data":[1,2]}"#)
            .create_async()
            .await;

        let mut config = ClientConfig::default();
        config.server.base_url = server.url();
        config.server.success_code = 0;

        let stack = ApiStack::from_config(
            &config,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(RecordingNavigator::on("/pages/index/index")),
        )
        .unwrap();

        let outcome = stack.http.request(&RequestDescriptor::get("/articles")).await;
        assert_eq!(outcome, Outcome::Success(json!([1, 2])));
    }

    #[tokio::test]
    async fn http_and_sse_share_token_store() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ai/chat-messages")
            .match_header("authorization", "Bearer shared")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body("data: {\"answer\":\"ok\"}\n\n")
            .create_async()
            .await;

        let mut config = ClientConfig::default();
        config.server.base_url = server.url();
        let stack = ApiStack::from_config(
            &config,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(RecordingNavigator::on("/pages/index/index")),
        )
        .unwrap();

        stack.http.set_token("shared").unwrap();
        let mut answers = Vec::new();
        let delivered = stack
            .sse
            .stream(&RequestDescriptor::post("/ai/chat-messages"), |e| {
                answers.push(e["answer"].clone())
            })
            .await
            .unwrap();
        assert_eq!(delivered, 1);
        assert_eq!(answers, vec![json!("ok")]);
        mock.assert_async().await;
    }
}
