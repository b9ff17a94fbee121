use crate::domain::model::{JobPosting, PostedDate, Tier, POSTED_DATE_RECENT};
use crate::utils::error::{Result, SearchError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

const RULE_WIDTH: usize = 80;
const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Serialize)]
struct JobsFile<'a> {
    jobs: &'a [JobPosting],
}

fn tier_heading(tier: Tier) -> &'static str {
    match tier {
        Tier::Strict => "STRICT MATCHES",
        Tier::Wide => "WIDE-NET MATCHES",
    }
}

/// 把 posted_date 轉成顯示用字串，無法解析時原樣輸出
pub fn format_posted_date(date: &PostedDate) -> String {
    match date {
        PostedDate::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_else(|| ms.to_string()),
        PostedDate::Text(text) => {
            if text == POSTED_DATE_RECENT {
                return text.clone();
            }
            parse_iso_date(text)
                .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
                .unwrap_or_else(|| text.clone())
        }
    }
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(naive, "%Y-%m-%d").ok()
}

/// 依公司名稱排序分組，組內保留原始順序
fn group_by_company<'a>(jobs: &'a [JobPosting], tier: Tier) -> BTreeMap<&'a str, Vec<&'a JobPosting>> {
    let mut grouped: BTreeMap<&str, Vec<&JobPosting>> = BTreeMap::new();
    for job in jobs.iter().filter(|job| job.tier == tier) {
        grouped.entry(job.company.as_str()).or_default().push(job);
    }
    grouped
}

/// Renders the text report. Output depends only on `jobs` and `date`.
pub fn render_report(jobs: &[JobPosting], date: NaiveDate) -> String {
    let strict_count = jobs.iter().filter(|j| j.tier == Tier::Strict).count();
    let wide_count = jobs.len() - strict_count;

    let mut lines = vec![
        "=".repeat(RULE_WIDTH),
        format!("AI JOB SEARCH RESULTS - {}", date.format("%B %d, %Y")),
        "=".repeat(RULE_WIDTH),
        String::new(),
        format!("Found {} matching positions!", jobs.len()),
        format!("Strict matches: {}", strict_count),
        format!("Wide-net matches: {}", wide_count),
        String::new(),
    ];

    if jobs.is_empty() {
        lines.push("No jobs found matching your criteria.".to_string());
        lines.push(String::new());
    }

    for (tier, count) in [(Tier::Strict, strict_count), (Tier::Wide, wide_count)] {
        if count == 0 {
            continue;
        }

        lines.push("#".repeat(RULE_WIDTH));
        lines.push(format!("{} ({})", tier_heading(tier), count));
        lines.push("#".repeat(RULE_WIDTH));

        for (company, company_jobs) in group_by_company(jobs, tier) {
            lines.push(String::new());
            lines.push("─".repeat(RULE_WIDTH));
            lines.push(company.to_uppercase());
            lines.push("─".repeat(RULE_WIDTH));
            for job in company_jobs {
                lines.push(format!("• {}", job.title));
                lines.push(format!("   Location: {}", job.location));
                if let Some(employment_type) = &job.employment_type {
                    lines.push(format!("   Type: {}", employment_type));
                }
                lines.push(format!("   Posted: {}", format_posted_date(&job.posted_date)));
                lines.push(format!("   Apply: {}", job.url));
                lines.push(String::new());
            }
        }
    }

    lines.push("=".repeat(RULE_WIDTH));
    lines.push(format!("Total: {} jobs found", jobs.len()));
    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n")
}

pub fn render_json(jobs: &[JobPosting]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JobsFile { jobs })?)
}

pub fn render_csv(jobs: &[JobPosting]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "title",
        "company",
        "location",
        "employment_type",
        "url",
        "source",
        "posted_date",
        "tier",
    ])?;

    for job in jobs {
        let posted_date = match &job.posted_date {
            PostedDate::EpochMillis(ms) => ms.to_string(),
            PostedDate::Text(text) => text.clone(),
        };
        let source = job.source.to_string();
        let tier = job.tier.to_string();
        writer.write_record([
            job.title.as_str(),
            job.company.as_str(),
            job.location.as_str(),
            job.employment_type.as_deref().unwrap_or(""),
            job.url.as_str(),
            source.as_str(),
            posted_date.as_str(),
            tier.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SearchError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| SearchError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
