//! Story mode: scripted scenarios that override the default persona

use serde::{Deserialize, Serialize};

/// Override bundle active for the duration of a story conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryContext {
    /// Replaces the default persona instruction
    pub system_prompt: String,
    /// Pre-authored first companion line, shown without a model call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_message: Option<String>,
}

impl StoryContext {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            opening_message: None,
        }
    }

    pub fn with_opening_message(mut self, message: impl Into<String>) -> Self {
        self.opening_message = Some(message.into());
        self
    }
}

/// A built-in story scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryScenario {
    pub id: &'static str,
    pub title: &'static str,
    pub genre: &'static str,
    pub description: &'static str,
    pub system_prompt: &'static str,
    pub opening_message: &'static str,
}

impl StoryScenario {
    pub fn context(&self) -> StoryContext {
        StoryContext::new(self.system_prompt).with_opening_message(self.opening_message)
    }
}

const CATALOG: &[StoryScenario] = &[
    StoryScenario {
        id: "story_1",
        title: "신비한 숲의 모험",
        genre: "판타지",
        description: "길을 잃은 당신, 숲의 요정을 만났다. 그녀와 함께 숲을 탈출할 수 있을까?",
        system_prompt: "당신은 신비한 숲의 요정 '에리아'입니다. 숲에 들어온 낯선 인간(사용자)을 발견했습니다. 호기심 반, 경계심 반으로 말을 걸어보세요.",
        opening_message: "여긴 인간이 들어올 수 없는 곳이야. ...넌 누구니?",
    },
    StoryScenario {
        id: "story_2",
        title: "2077 사이버 탐정",
        genre: "SF / 미스터리",
        description: "네온 사인이 번쩍이는 미래 도시. AI 파트너와 함께 의문의 살인 사건을 해결하라.",
        system_prompt: "당신은 최첨단 AI 파트너 '비트'입니다. 형사(사용자)와 함께 현장을 조사 중입니다. 냉철하고 분석적인 말투를 사용하세요.",
        opening_message: "탐정님, 현장 스캔이 완료되었습니다. 특이한 생체 반응이 감지됩니다. 확인하시겠습니까?",
    },
    StoryScenario {
        id: "story_3",
        title: "고등학교 첫사랑",
        genre: "로맨스",
        description: "새학기 첫 날, 옆 자리에 앉은 전학생이 나에게 말을 걸어온다.",
        system_prompt: "당신은 오늘 전학 온 고등학생 '수진'입니다. 옆 자리에 앉은 짝꿍(사용자)에게 수줍게 인사를 건네보세요. 명랑하고 친근한 말투.",
        opening_message: "안녕? 나 오늘 전학 왔어! 교과서 좀 같이 봐도 될까?",
    },
];

/// All built-in scenarios
pub fn story_catalog() -> &'static [StoryScenario] {
    CATALOG
}

pub fn find_story(id: &str) -> Option<&'static StoryScenario> {
    CATALOG.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(story_catalog().len(), 3);
        let story = find_story("story_2").unwrap();
        let ctx = story.context();
        assert!(ctx.system_prompt.contains("비트"));
        assert_eq!(ctx.opening_message.as_deref(), Some(story.opening_message));
        assert!(find_story("story_9").is_none());
    }

    #[test]
    fn test_context_builder() {
        let ctx = StoryContext::new("You are a pirate.");
        assert!(ctx.opening_message.is_none());
        let ctx = ctx.with_opening_message("Ahoy!");
        assert_eq!(ctx.opening_message.as_deref(), Some("Ahoy!"));
    }
}
