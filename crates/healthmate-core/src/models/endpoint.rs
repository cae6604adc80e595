//! 엔드포인트 카탈로그.
//!
//! 논리적 작업 이름 → URL 경로 템플릿. 기본 URL에 이미 `/api/v1` 접두사가
//! 포함되어 있으므로 여기의 경로는 접두사 없이 정의한다.

use url::form_urlencoded;

/// 백엔드 엔드포인트
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    // 인증
    Captcha,
    Login,
    Register,

    // 복약 계획
    MedPlans,
    MedPlanDetail(String),
    MedPlanRemind(String),

    // 오늘 복약
    MedToday,

    // 복약 기록
    MedRecords,
    MedRecordMark(String),
    MedRecordAdjust(String),

    // 약품 목록
    MedDrugs,
    MedDrugDetail(String),

    // 위챗 구독
    WechatSubscribeConfig,
    WechatSubscribeReport,

    // 건강 아티클
    Articles,
    ArticleDetail(String),

    // AI 대화
    AiChatMessages,
    AiConversations,
    AiMessages,
}

impl Endpoint {
    /// 경로 파라미터가 치환된 URL 경로
    pub fn path(&self) -> String {
        match self {
            Endpoint::Captcha => "/auth/captcha".to_string(),
            Endpoint::Login => "/auth/login".to_string(),
            Endpoint::Register => "/auth/register".to_string(),
            Endpoint::MedPlans => "/med/plans".to_string(),
            Endpoint::MedPlanDetail(id) => format!("/med/plans/{}", encode_segment(id)),
            Endpoint::MedPlanRemind(id) => format!("/med/plans/{}/remind", encode_segment(id)),
            Endpoint::MedToday => "/med/today".to_string(),
            Endpoint::MedRecords => "/med/records".to_string(),
            Endpoint::MedRecordMark(id) => format!("/med/records/{}/mark", encode_segment(id)),
            Endpoint::MedRecordAdjust(id) => {
                format!("/med/records/{}/adjust", encode_segment(id))
            }
            Endpoint::MedDrugs => "/med/drugs".to_string(),
            Endpoint::MedDrugDetail(id) => format!("/med/drugs/{}", encode_segment(id)),
            Endpoint::WechatSubscribeConfig => "/wechat/subscribe/config".to_string(),
            Endpoint::WechatSubscribeReport => "/wechat/subscribe/report".to_string(),
            Endpoint::Articles => "/articles".to_string(),
            Endpoint::ArticleDetail(id) => format!("/articles/{}", encode_segment(id)),
            Endpoint::AiChatMessages => "/ai/chat-messages".to_string(),
            Endpoint::AiConversations => "/ai/conversations".to_string(),
            Endpoint::AiMessages => "/ai/messages".to_string(),
        }
    }

    /// SSE 스트림 응답을 반환하는 엔드포인트인지
    pub fn is_streaming(&self) -> bool {
        matches!(self, Endpoint::AiChatMessages)
    }
}

/// 경로 세그먼트에 들어갈 ID를 퍼센트 인코딩 (공백은 `%20`)
fn encode_segment(raw: &str) -> String {
    // byte_serialize는 리터럴 '+'를 %2B로 바꾸므로 남은 '+'는 모두 공백이다
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_paths() {
        assert_eq!(Endpoint::Login.path(), "/auth/login");
        assert_eq!(Endpoint::MedToday.path(), "/med/today");
        assert_eq!(Endpoint::AiChatMessages.path(), "/ai/chat-messages");
    }

    #[test]
    fn id_substitution() {
        assert_eq!(Endpoint::MedPlanRemind("42".into()).path(), "/med/plans/42/remind");
        assert_eq!(
            Endpoint::MedRecordAdjust("r-9".into()).path(),
            "/med/records/r-9/adjust"
        );
    }

    #[test]
    fn id_is_percent_encoded() {
        assert_eq!(Endpoint::ArticleDetail("a/b c".into()).path(), "/articles/a%2Fb%20c");
    }

    #[test]
    fn only_chat_streams() {
        assert!(Endpoint::AiChatMessages.is_streaming());
        assert!(!Endpoint::AiConversations.is_streaming());
    }
}
