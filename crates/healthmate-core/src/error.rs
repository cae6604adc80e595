//! HEALTHMATE 핵심 에러 타입.
//!
//! 분류 결과(`Outcome`)로 표현되지 않는 하드 실패만 여기에 속한다.
//! 응답 분류는 절대 에러를 반환하지 않는다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 네트워크 에러 (연결 실패, 타임아웃, 응답 없음)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// SSE 스트림 열기 실패 (비-2xx 응답)
    #[error("스트림 열기 실패 ({status}): {message}")]
    StreamOpen {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 또는 생성된 메시지
        message: String,
    },

    /// 토큰 저장소 에러
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}
