//! 응답 봉투(`{code, msg, data}`) 판별.
//!
//! 응답 본문은 봉투일 수도, 원시 JSON일 수도, JSON이 아닐 수도 있다.
//! 분류 전에 [`RawBody::parse`]로 한 번 판별한다.

use serde_json::{Map, Value};

/// 비즈니스 성공 코드 (백엔드 `Result` 래퍼 기준, 버전 고정)
///
/// `0`을 성공으로 쓰던 리비전도 있었으나 두 값을 동시에 허용하지 않는다.
pub const ENVELOPE_SUCCESS_CODE: i64 = 200;

/// 재인증이 필요함을 뜻하는 비즈니스 코드
pub const AUTH_REQUIRED_CODE: i64 = 401;

/// 판별된 응답 본문
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    /// `code` 필드를 가진 JSON 객체
    Enveloped {
        /// 원본 `code` 값 (정수가 아닐 수도 있음)
        code: Value,
        msg: Option<String>,
        message: Option<String>,
        /// `data` 필드 (없으면 `null`)
        data: Value,
    },
    /// 봉투가 아닌 JSON (빈 본문은 `null`)
    Raw(Value),
    /// JSON이 아닌 본문
    Text(String),
}

impl RawBody {
    /// 본문 바이트 판별
    pub fn parse(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return RawBody::Raw(Value::Null);
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) if map.contains_key("code") => Self::from_envelope(map),
            Ok(value) => RawBody::Raw(value),
            Err(_) => RawBody::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }

    fn from_envelope(mut map: Map<String, Value>) -> Self {
        let msg = text_field(&map, "msg");
        let message = text_field(&map, "message");
        let code = map.remove("code").unwrap_or(Value::Null);
        let data = map.remove("data").unwrap_or(Value::Null);
        RawBody::Enveloped {
            code,
            msg,
            message,
            data,
        }
    }

    /// 정수 비즈니스 코드 (봉투가 아니거나 정수가 아니면 None)
    pub fn code(&self) -> Option<i64> {
        match self {
            RawBody::Enveloped { code, .. } => code.as_i64(),
            _ => None,
        }
    }

    /// 본문이 제공하는 메시지: `msg` → `message` 순서. 빈 문자열은 없는 것으로 본다.
    pub fn message(&self) -> Option<&str> {
        match self {
            RawBody::Enveloped { msg, message, .. } => msg.as_deref().or(message.as_deref()),
            RawBody::Raw(Value::Object(map)) => non_empty_str(map, "msg")
                .or_else(|| non_empty_str(map, "message")),
            _ => None,
        }
    }
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    non_empty_str(map, key).map(str::to_string)
}
