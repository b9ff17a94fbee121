use crate::domain::model::{BoardSource, PostedDate, RawPosting, Source, LOCATION_NOT_SPECIFIED};
use crate::utils::error::{Result, SearchError};
use rand::seq::SliceRandom;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.107 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.2 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/92.0.902.55",
];

const BODY_PREFIX_CHARS: usize = 300;

/// 對職缺看板 API 發出單次 GET，不重試
pub struct JobBoardClient {
    client: Client,
    user_agents: Vec<String>,
    timeout: Duration,
}

impl JobBoardClient {
    pub fn new(user_agents: Vec<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            user_agents,
            timeout,
        }
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENTS[0])
    }

    pub async fn fetch(&self, source: &BoardSource, company: &str) -> Result<Value> {
        let url = source.url_for(company);
        tracing::info!("🌐 Fetching: {}", url);

        let mut request = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .header(reqwest::header::USER_AGENT, self.pick_user_agent());

        // Lever 不帶 Accept 標頭
        if source.kind == Source::Greenhouse {
            request = request.header(reqwest::header::ACCEPT, "application/json");
        }
        if let Some(referer) = source.referer_for(company) {
            request = request.header(reqwest::header::REFERER, referer);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Requested: {}", url);
        tracing::debug!("Final URL: {}", response.url());
        tracing::debug!("Status: {}", status);

        let body = response.text().await?;

        if status != StatusCode::OK {
            let body_prefix: String = body.chars().take(BODY_PREFIX_CHARS).collect();
            return Err(SearchError::HttpStatusError {
                url,
                status: status.as_u16(),
                body_prefix,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// 依來源格式把回應轉成未分類的職缺，缺標題的項目直接略過
pub fn parse_postings(kind: Source, body: &Value) -> Result<Vec<RawPosting>> {
    match kind {
        Source::Greenhouse => {
            let object = body
                .as_object()
                .ok_or_else(|| malformed(kind, "expected a JSON object"))?;
            match object.get("jobs") {
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(Value::Array(items)) => {
                    Ok(items.iter().filter_map(parse_greenhouse_posting).collect())
                }
                Some(_) => Err(malformed(kind, "'jobs' is not an array")),
            }
        }
        Source::Lever => {
            let items = body
                .as_array()
                .ok_or_else(|| malformed(kind, "expected a JSON array"))?;
            Ok(items.iter().filter_map(parse_lever_posting).collect())
        }
    }
}

/// 回應中列出的職缺數，不論是否有標題
pub fn listed_count(kind: Source, body: &Value) -> usize {
    match kind {
        Source::Greenhouse => body
            .get("jobs")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0),
        Source::Lever => body.as_array().map(Vec::len).unwrap_or(0),
    }
}

fn malformed(kind: Source, message: &str) -> SearchError {
    SearchError::MalformedResponseError {
        board: kind.to_string(),
        message: message.to_string(),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn parse_greenhouse_posting(job: &Value) -> Option<RawPosting> {
    let title = non_empty_str(job.get("title"))?;
    let location = non_empty_str(job.get("location").and_then(|l| l.get("name")))
        .unwrap_or_else(|| LOCATION_NOT_SPECIFIED.to_string());

    Some(RawPosting {
        title,
        location,
        employment_type: None,
        url: non_empty_str(job.get("absolute_url")).unwrap_or_default(),
        posted_date: PostedDate::from_json(job.get("updated_at")),
    })
}

fn parse_lever_posting(job: &Value) -> Option<RawPosting> {
    let title = non_empty_str(job.get("text"))?;
    let categories = job.get("categories");
    let location = non_empty_str(categories.and_then(|c| c.get("location")))
        .unwrap_or_else(|| LOCATION_NOT_SPECIFIED.to_string());

    Some(RawPosting {
        title,
        location,
        employment_type: non_empty_str(categories.and_then(|c| c.get("commitment"))),
        url: non_empty_str(job.get("hostedUrl")).unwrap_or_default(),
        posted_date: PostedDate::from_json(job.get("createdAt")),
    })
}
