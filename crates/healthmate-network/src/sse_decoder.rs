//! SSE(Server-Sent Events) 스트림 디코더.
//!
//! 임의 경계로 잘린 바이트 청크를 받아 프레임 경계(빈 줄)를 복원하고
//! 각 `data:` 줄을 JSON 이벤트로 파싱한다.
//!
//! - 청크 경계에서 잘린 UTF-8 멀티바이트 문자는 다음 청크까지 보관한다.
//! - `\r\n` 줄바꿈은 `\n`으로 정규화한다.
//! - 한 프레임 안의 `data:` 줄은 각각 독립된 페이로드로 파싱한다 (연결하지 않음).
//! - JSON이 아닌 페이로드와 빈 `data:` 줄은 조용히 버린다.
//! - 스트림 종료 시 구분자 없이 남은 프레임은 버린다.

use futures::stream::{self, BoxStream, StreamExt};
use healthmate_core::error::CoreError;
use healthmate_core::ports::transport::ByteChunkStream;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

/// 이벤트 구분자 (빈 줄)
const FRAME_SEPARATOR: &str = "\n\n";

/// 데이터 필드 접두사
const DATA_PREFIX: &str = "data:";

/// 디코딩된 SSE 이벤트 스트림
///
/// 열린 이후 읽기 에러가 나면 그 에러를 한 번 내보내고 끝난다.
pub type SseEventStream = BoxStream<'static, Result<Value, CoreError>>;

/// 증분 SSE 디코더
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// 아직 완성되지 않은 UTF-8 바이트
    pending: Vec<u8>,
    /// 아직 구분자를 만나지 않은 텍스트
    buffer: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 청크를 입력하고, 이번 청크로 완성된 프레임의 이벤트를 순서대로 반환
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Value> {
        self.push_bytes(chunk);
        if self.buffer.contains('\r') {
            self.buffer = self.buffer.replace("\r\n", "\n");
        }
        self.drain_frames()
    }

    /// 스트림 종료 — 미완성 프레임 폐기
    pub fn finish(&mut self) {
        if !self.buffer.trim().is_empty() || !self.pending.is_empty() {
            debug!(
                text_len = self.buffer.len(),
                pending_bytes = self.pending.len(),
                "스트림 종료, 미완성 프레임 폐기"
            );
        }
        self.buffer.clear();
        self.pending.clear();
    }

    /// UTF-8 증분 디코딩. 잘못된 바이트는 U+FFFD로 치환한다.
    fn push_bytes(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);

        let mut start = 0;
        while start < self.pending.len() {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    start = self.pending.len();
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    let valid = std::str::from_utf8(&self.pending[start..valid_end]);
                    self.buffer.push_str(valid.unwrap_or_default());
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            start = valid_end + len;
                        }
                        // 다음 청크에서 이어지는 멀티바이트 문자
                        None => {
                            start = valid_end;
                            break;
                        }
                    }
                }
            }
        }
        self.pending.drain(..start);
    }

    fn drain_frames(&mut self) -> Vec<Value> {
        let mut events = Vec::new();
        let mut consumed = 0;
        while let Some(offset) = self.buffer[consumed..].find(FRAME_SEPARATOR) {
            let end = consumed + offset;
            events.extend(parse_frame(&self.buffer[consumed..end]));
            consumed = end + FRAME_SEPARATOR.len();
        }
        self.buffer.drain(..consumed);
        events
    }
}

/// 프레임 하나를 이벤트 목록으로 파싱
pub fn parse_frame(frame: &str) -> Vec<Value> {
    frame
        .split('\n')
        .filter_map(|line| line.strip_prefix(DATA_PREFIX))
        .map(str::trim)
        .filter(|payload| !payload.is_empty())
        .filter_map(|payload| match serde_json::from_str::<Value>(payload) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("JSON이 아닌 SSE 데이터 무시: {e}");
                None
            }
        })
        .collect()
}

struct DecodeState {
    source: ByteChunkStream,
    decoder: SseDecoder,
    ready: VecDeque<Value>,
    finished: bool,
}

/// 바이트 청크 스트림을 지연 이벤트 스트림으로 변환
///
/// 다음 청크를 기다리는 것이 유일한 대기 지점이다. 타임아웃은 전송 계층의 몫이다.
pub fn decode_events(source: ByteChunkStream) -> SseEventStream {
    let state = DecodeState {
        source,
        decoder: SseDecoder::new(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                return Some((Ok(event), state));
            }
            if state.finished {
                return None;
            }

            match state.source.next().await {
                Some(Ok(chunk)) => {
                    let events = state.decoder.feed(&chunk);
                    state.ready.extend(events);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    state.decoder.finish();
                    return Some((Err(e), state));
                }
                None => {
                    state.finished = true;
                    state.decoder.finish();
                }
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feed_all(chunks: &[&[u8]]) -> Vec<Value> {
        let mut decoder = SseDecoder::new();
        let mut events = Vec::new();
        for chunk in chunks {
            events.extend(decoder.feed(chunk));
        }
        decoder.finish();
        events
    }

    fn source(chunks: Vec<Result<Vec<u8>, CoreError>>) -> ByteChunkStream {
        stream::iter(chunks).boxed()
    }

    #[test]
    fn json_split_across_chunks() {
        let events = feed_all(&[b"data: {\"a\":1}\n\n", b"data: {\"b", b"\":2}\n\n"]);
        assert_eq!(events, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn non_json_is_dropped() {
        assert!(feed_all(&[b"data: not-json\n\n"]).is_empty());
        let events = feed_all(&[b"data: not-json\n\ndata: {\"ok\":true}\n\n"]);
        assert_eq!(events, vec![json!({"ok": true})]);
    }

    #[test]
    fn multibyte_char_split_at_boundary() {
        let text = "data: {\"answer\":\"안녕하세요 💊\"}\n\n".as_bytes();
        // 한글 첫 글자(3바이트) 중간에서 자름
        let split = text.iter().position(|b| *b >= 0x80).unwrap() + 1;
        let events = feed_all(&[&text[..split], &text[split..]]);
        assert_eq!(events, vec![json!({"answer": "안녕하세요 💊"})]);
    }

    #[test]
    fn every_single_byte_boundary() {
        let text = "data: {\"msg\":\"服药提醒 ✓\"}\n\ndata: {\"n\":2}\n\n".as_bytes();
        let chunks: Vec<&[u8]> = text.chunks(1).collect();
        let events = feed_all(&chunks);
        assert_eq!(events, vec![json!({"msg": "服药提醒 ✓"}), json!({"n": 2})]);
    }

    #[test]
    fn invalid_utf8_becomes_replacement() {
        let events = feed_all(&[b"data: \"a\xFFb\"\n\n"]);
        assert_eq!(events, vec![json!("a\u{FFFD}b")]);
    }

    #[test]
    fn blank_data_and_other_fields_skipped() {
        let events = feed_all(&[b": keep-alive\n\nevent: message\ndata:\ndata:   \nid: 3\n\n"]);
        assert!(events.is_empty());
    }

    #[test]
    fn each_data_line_is_independent() {
        let events = feed_all(&[b"data: {\"a\":1}\ndata: {\"b\":2}\n\n"]);
        assert_eq!(events, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn multiple_frames_in_one_chunk_keep_order() {
        let events = feed_all(&[b"data: 1\n\ndata: 2\n\ndata: 3\n\ndata: 4"]);
        assert_eq!(events, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn crlf_separators() {
        let events = feed_all(&[b"data: {\"a\":1}\r\n\r", b"\ndata: {\"b\":2}\r\n\r\n"]);
        assert_eq!(events, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn data_prefix_without_space() {
        assert_eq!(parse_frame("data:{\"x\":0}"), vec![json!({"x": 0})]);
    }

    #[test]
    fn truncated_trailing_frame_discarded() {
        let mut decoder = SseDecoder::new();
        assert_eq!(decoder.feed(b"data: {\"a\":1}\n\ndata: {\"b\":2}"), vec![json!({"a": 1})]);
        decoder.finish();
        assert!(decoder.feed(b"\n\n").is_empty());
    }

    #[tokio::test]
    async fn stream_yields_in_order_then_ends() {
        let events: Vec<_> = decode_events(source(vec![
            Ok(b"data: {\"event\":\"message\",\"answer\":\"Hel".to_vec()),
            Ok(b"lo\"}\n\ndata: {\"event\":\"message_end\"}\n\n".to_vec()),
            Ok(b"data: {\"partial\":".to_vec()),
        ]))
        .collect()
        .await;

        let events: Vec<Value> = events.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            events,
            vec![
                json!({"event": "message", "answer": "Hello"}),
                json!({"event": "message_end"}),
            ]
        );
    }

    #[tokio::test]
    async fn read_error_after_events() {
        let mut events = decode_events(source(vec![
            Ok(b"data: 1\n\n".to_vec()),
            Err(CoreError::Network("connection reset".into())),
            Ok(b"data: 2\n\n".to_vec()),
        ]));

        assert_eq!(events.next().await.unwrap().unwrap(), json!(1));
        assert!(matches!(events.next().await, Some(Err(CoreError::Network(_)))));
        assert!(events.next().await.is_none());
    }

    #[test]
    fn empty_source() {
        let events: Vec<_> = tokio_test::block_on(decode_events(source(vec![])).collect());
        assert!(events.is_empty());
    }
}
