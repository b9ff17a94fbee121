use serde::{Deserialize, Serialize};
use std::fmt;

pub const LOCATION_NOT_SPECIFIED: &str = "Not specified";
pub const POSTED_DATE_RECENT: &str = "Recent";

/// 分級：strict 優先於 wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Wide,
    Strict,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Strict => write!(f, "strict"),
            Tier::Wide => write!(f, "wide"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(alias = "greenhouse")]
    Greenhouse,
    #[serde(alias = "lever")]
    Lever,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Greenhouse => write!(f, "Greenhouse"),
            Source::Lever => write!(f, "Lever"),
        }
    }
}

/// 一個職缺來源：URL 樣板中的 `{company}` 會被替換成公司 slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSource {
    pub kind: Source,
    pub url_template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer_template: Option<String>,
    pub companies: Vec<String>,
}

impl BoardSource {
    pub fn url_for(&self, company: &str) -> String {
        self.url_template.replace("{company}", company)
    }

    pub fn referer_for(&self, company: &str) -> Option<String> {
        self.referer_template
            .as_ref()
            .map(|template| template.replace("{company}", company))
    }
}

/// Greenhouse 給 ISO-8601 字串，Lever 給 epoch 毫秒
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostedDate {
    EpochMillis(i64),
    Text(String),
}

impl Default for PostedDate {
    fn default() -> Self {
        PostedDate::Text(POSTED_DATE_RECENT.to_string())
    }
}

impl PostedDate {
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => match n.as_i64() {
                Some(ms) => PostedDate::EpochMillis(ms),
                None => n
                    .as_f64()
                    .map(|ms| PostedDate::EpochMillis(ms as i64))
                    .unwrap_or_default(),
            },
            Some(serde_json::Value::String(s)) if !s.is_empty() => PostedDate::Text(s.clone()),
            _ => PostedDate::default(),
        }
    }
}

/// 分類前的職缺，只在 fetcher 與 classifier 之間流動
#[derive(Debug, Clone, PartialEq)]
pub struct RawPosting {
    pub title: String,
    pub location: String,
    pub employment_type: Option<String>,
    pub url: String,
    pub posted_date: PostedDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    pub url: String,
    pub source: Source,
    pub posted_date: PostedDate,
    pub tier: Tier,
}

impl JobPosting {
    pub fn from_raw(raw: RawPosting, company: &str, source: Source, tier: Tier) -> Self {
        Self {
            title: raw.title,
            company: company.to_string(),
            location: raw.location,
            employment_type: raw.employment_type,
            url: raw.url,
            source,
            posted_date: raw.posted_date,
            tier,
        }
    }

    /// 去重鍵：小寫的 (title, company)
    pub fn dedup_key(&self) -> (String, String) {
        (self.title.to_lowercase(), self.company.to_lowercase())
    }
}

/// 把公司 slug 轉成顯示用名稱，每段字母的首字大寫
pub fn display_company(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut at_word_start = true;
    for c in slug.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub jobs: Vec<JobPosting>,
    pub report_text: String,
    pub json_output: String,
    pub csv_output: Option<String>,
}

impl TransformResult {
    pub fn count_tier(&self, tier: Tier) -> usize {
        self.jobs.iter().filter(|job| job.tier == tier).count()
    }

    pub fn company_count(&self) -> usize {
        let mut companies: Vec<&str> = self.jobs.iter().map(|j| j.company.as_str()).collect();
        companies.sort_unstable();
        companies.dedup();
        companies.len()
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_paths: Vec<String>,
    pub report_text: String,
    pub total_jobs: usize,
    pub strict_jobs: usize,
    pub wide_jobs: usize,
    pub company_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering_strict_dominates() {
        assert!(Tier::Strict > Tier::Wide);
        assert_eq!(Tier::Wide.max(Tier::Strict), Tier::Strict);
    }

    #[test]
    fn test_board_source_expands_templates() {
        let source = BoardSource {
            kind: Source::Greenhouse,
            url_template: "https://boards-api.greenhouse.io/v1/boards/{company}/jobs".to_string(),
            referer_template: Some("https://boards.greenhouse.io/{company}".to_string()),
            companies: vec!["figma".to_string()],
        };
        assert_eq!(
            source.url_for("figma"),
            "https://boards-api.greenhouse.io/v1/boards/figma/jobs"
        );
        assert_eq!(
            source.referer_for("figma").as_deref(),
            Some("https://boards.greenhouse.io/figma")
        );
    }

    #[test]
    fn test_display_company() {
        assert_eq!(display_company("anthropic"), "Anthropic");
        assert_eq!(display_company("open-ai"), "Open-Ai");
        assert_eq!(display_company("PLAID"), "Plaid");
    }

    #[test]
    fn test_posted_date_from_json() {
        let ms = serde_json::json!(1709640000000i64);
        assert_eq!(
            PostedDate::from_json(Some(&ms)),
            PostedDate::EpochMillis(1709640000000)
        );

        let iso = serde_json::json!("2024-03-05T12:00:00Z");
        assert_eq!(
            PostedDate::from_json(Some(&iso)),
            PostedDate::Text("2024-03-05T12:00:00Z".to_string())
        );

        assert_eq!(PostedDate::from_json(None), PostedDate::default());
        assert_eq!(
            PostedDate::from_json(Some(&serde_json::Value::Null)),
            PostedDate::Text("Recent".to_string())
        );
    }

    #[test]
    fn test_job_posting_serialized_field_names() {
        let job = JobPosting {
            title: "Prompt Engineer".to_string(),
            company: "Anthropic".to_string(),
            location: "Remote".to_string(),
            employment_type: None,
            url: "https://boards.greenhouse.io/anthropic/jobs/1".to_string(),
            source: Source::Greenhouse,
            posted_date: PostedDate::EpochMillis(1),
            tier: Tier::Strict,
        };

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["tier"], "strict");
        assert_eq!(value["source"], "Greenhouse");
        assert_eq!(value["posted_date"], 1);
        assert!(value.get("employment_type").is_none());
    }
}
