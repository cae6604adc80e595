//! CLI 하위 명령 실행.
//!
//! 각 명령은 출력 대상을 인자로 받고, 성공 여부(`bool`)를 돌려준다.
//! 종료 코드 결정은 `main`의 몫이다.

use anyhow::{Context, Result};
use healthmate_core::models::endpoint::Endpoint;
use healthmate_core::models::outcome::Outcome;
use healthmate_core::models::request::{HttpMethod, RequestDescriptor};
use healthmate_core::ports::token_store::TokenStore;
use healthmate_network::stack::ApiStack;
use serde_json::{json, Value};
use std::io::Write;
use tracing::{debug, info};

/// `call` — 임의 API 호출 후 결과 출력
pub async fn call(
    stack: &ApiStack,
    method: HttpMethod,
    path: &str,
    body: Option<&str>,
    out: &mut impl Write,
) -> Result<bool> {
    let mut descriptor = RequestDescriptor::new(method, path);
    if let Some(raw) = body {
        let value: Value = serde_json::from_str(raw).context("--body는 JSON이어야 합니다")?;
        descriptor = descriptor.with_body(value);
    }

    let outcome = stack.http.request(&descriptor).await;
    write_outcome(&outcome, out)?;
    Ok(outcome.is_success())
}

/// `chat` — AI 대화 스트림을 열고 답변 조각을 도착 순서대로 출력
pub async fn chat(
    stack: &ApiStack,
    message: &str,
    conversation_id: Option<&str>,
    out: &mut (impl Write + Send),
) -> Result<bool> {
    let descriptor = RequestDescriptor::for_endpoint(HttpMethod::Post, &Endpoint::AiChatMessages)
        .with_body(chat_body(message, conversation_id));

    let mut ok = true;
    let mut conversation = None;
    let mut write_error = None;

    let delivered = stack
        .sse
        .stream(&descriptor, |event| {
            if let Some(id) = event.get("conversation_id").and_then(Value::as_str) {
                conversation = Some(id.to_string());
            }
            let result = match event.get("event").and_then(Value::as_str) {
                Some("error") => {
                    ok = false;
                    let text = event
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("stream error");
                    writeln!(out, "\n[error] {text}")
                }
                _ => match event.get("answer").and_then(Value::as_str) {
                    Some(answer) => write!(out, "{answer}").and_then(|_| out.flush()),
                    None => Ok(()),
                },
            };
            if let Err(e) = result {
                write_error.get_or_insert(e);
            }
        })
        .await
        .context("대화 스트림 실패")?;

    if let Some(e) = write_error {
        return Err(e).context("출력 실패");
    }
    writeln!(out)?;

    debug!(delivered, "대화 스트림 완료");
    if let Some(id) = conversation {
        info!(conversation_id = %id, "대화 ID");
    }
    Ok(ok)
}

/// AI 대화 요청 본문
fn chat_body(message: &str, conversation_id: Option<&str>) -> Value {
    json!({
        "query": message,
        "response_mode": "streaming",
        "conversation_id": conversation_id.unwrap_or_default(),
        "inputs": {},
    })
}

/// `token set`
pub fn token_set(store: &dyn TokenStore, token: &str, out: &mut impl Write) -> Result<bool> {
    store.set(token).context("토큰 저장 실패")?;
    match store.get() {
        Some(saved) => writeln!(out, "토큰 저장됨: {}", mask_token(&saved))?,
        None => writeln!(out, "빈 토큰, 저장된 토큰 삭제됨")?,
    }
    Ok(true)
}

/// `token clear`
pub fn token_clear(store: &dyn TokenStore, out: &mut impl Write) -> Result<bool> {
    let removed = store.clear().context("토큰 삭제 실패")?;
    if removed {
        writeln!(out, "토큰 삭제됨")?;
    } else {
        writeln!(out, "저장된 토큰 없음")?;
    }
    Ok(true)
}

/// `token show` — 앞뒤 4자만 노출
pub fn token_show(store: &dyn TokenStore, out: &mut impl Write) -> Result<bool> {
    match store.get() {
        Some(token) => {
            writeln!(out, "{}", mask_token(&token))?;
            Ok(true)
        }
        None => {
            writeln!(out, "저장된 토큰 없음")?;
            Ok(false)
        }
    }
}

fn write_outcome(outcome: &Outcome, out: &mut impl Write) -> Result<()> {
    match outcome {
        Outcome::Success(data) | Outcome::Unclassified(data) => {
            writeln!(out, "{}", serde_json::to_string_pretty(data)?)?;
        }
        other => {
            let status = other
                .status()
                .map(|s| format!(" ({s})"))
                .unwrap_or_default();
            writeln!(
                out,
                "[{}]{status} {}",
                other.kind(),
                other.message().unwrap_or_default()
            )?;
        }
    }
    Ok(())
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}
