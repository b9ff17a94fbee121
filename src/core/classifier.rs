//! Title classification into the strict and wide tiers.
//!
//! Every check is a case-insensitive substring test against the title. A
//! short keyword such as `ai` also matches inside longer words; the keyword
//! lists are tuned with that in mind.

use crate::domain::model::Tier;

/// 角色關鍵字，命中即視為 strict
pub const FUNCTION_KEYWORDS: &[&str] = &[
    "prompt engineer",
    "content engineer",
    "ai content",
    "ai writer",
    "content strategist",
    "ux",
    "user experience",
    "product design",
    "interaction design",
];

/// 設計類關鍵字另外需要 AI 字詞才算數
pub const DESIGN_KEYWORDS: &[&str] = &["ux", "user experience", "product design", "interaction design"];

pub const STRICT_AI_KEYWORDS: &[&str] = &[
    "ai",
    "ml",
    "llm",
    "gpt",
    "claude",
    "artificial intelligence",
    "machine learning",
];

pub const WIDE_AI_KEYWORDS: &[&str] = &[
    "ai",
    "ml",
    "llm",
    "gpt",
    "claude",
    "genai",
    "generative ai",
    "artificial intelligence",
    "machine learning",
];

pub const ROLE_ANCHORS: &[&str] = &[
    "product",
    "manager",
    "pm",
    "platform",
    "tooling",
    "integration",
    "integrations",
    "solutions",
    "solution",
    "architect",
    "architecture",
    "experience",
    "developer",
    "content",
    "documentation",
    "design",
    "designer",
    "ux",
    "collaboration",
    "human-ai",
];

/// 深度 ML 基礎設施類職缺，不列入 wide
pub const EXCLUSIONS: &[&str] = &[
    "fraud",
    "ads",
    "ranking",
    "relevance",
    "recommendation",
    "infra",
    "infrastructure",
    "risk",
    "security",
    "platform security",
    "ml feature platform",
    "feature platform",
    "acceleration",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

pub fn is_strict_match(title: &str) -> bool {
    let title_lower = title.to_lowercase();

    FUNCTION_KEYWORDS
        .iter()
        .filter(|kw| title_lower.contains(*kw))
        .any(|kw| !DESIGN_KEYWORDS.contains(kw) || contains_any(&title_lower, STRICT_AI_KEYWORDS))
}

pub fn is_wide_match(title: &str) -> bool {
    let title_lower = title.to_lowercase();

    contains_any(&title_lower, WIDE_AI_KEYWORDS)
        && contains_any(&title_lower, ROLE_ANCHORS)
        && !contains_any(&title_lower, EXCLUSIONS)
}

/// strict 先判斷，其次 wide；都不符合回傳 `None`
pub fn classify(title: &str) -> Option<Tier> {
    if is_strict_match(title) {
        Some(Tier::Strict)
    } else if is_wide_match(title) {
        Some(Tier::Wide)
    } else {
        None
    }
}
