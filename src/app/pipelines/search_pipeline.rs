use crate::core::aggregator::deduplicate;
use crate::core::classifier::classify;
use crate::core::fetcher::{self, JobBoardClient};
use crate::core::report;
use crate::core::{ConfigProvider, Pipeline, Storage, TransformResult};
use crate::domain::model::{display_company, BoardSource, JobPosting};
use crate::utils::error::Result;
use chrono::{DateTime, Local};
use std::path::Path;
use std::time::Duration;

/// 依序查詢每個來源的每家公司，分類、去重後輸出報告
pub struct JobSearchPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: JobBoardClient,
    run_time: DateTime<Local>,
}

impl<S: Storage, C: ConfigProvider> JobSearchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = JobBoardClient::new(
            config.user_agents().to_vec(),
            Duration::from_secs(config.timeout_seconds()),
        );
        Self {
            storage,
            config,
            client,
            run_time: Local::now(),
        }
    }

    /// 固定執行時間，檔名與報告日期都由它決定
    pub fn with_run_time(mut self, run_time: DateTime<Local>) -> Self {
        self.run_time = run_time;
        self
    }

    pub fn run_timestamp(&self) -> String {
        self.run_time.format("%Y%m%d_%H%M%S").to_string()
    }

    fn wants_format(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }

    async fn search_company(&self, source: &BoardSource, company: &str) -> Result<Vec<JobPosting>> {
        let body = self.client.fetch(source, company).await?;
        let listed = fetcher::listed_count(source.kind, &body);
        tracing::info!("   ✅ {}: API working, {} jobs listed", company, listed);

        let display_name = display_company(company);
        let matches: Vec<JobPosting> = fetcher::parse_postings(source.kind, &body)?
            .into_iter()
            .filter_map(|raw| {
                classify(&raw.title)
                    .map(|tier| JobPosting::from_raw(raw, &display_name, source.kind, tier))
            })
            .collect();

        if !matches.is_empty() {
            tracing::info!("   Found {} matching jobs", matches.len());
        }
        Ok(matches)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for JobSearchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<JobPosting>> {
        let mut postings = Vec::new();
        let delay = Duration::from_millis(self.config.request_delay_ms());
        let mut first_request = true;

        for source in self.config.sources() {
            tracing::info!("🔎 Searching {} job boards...", source.kind);

            for company in &source.companies {
                // 請求之間固定間隔
                if !first_request && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                first_request = false;

                match self.search_company(source, company).await {
                    Ok(found) => postings.extend(found),
                    Err(e) => {
                        tracing::warn!("❌ Error with {}/{}: {}", source.kind, company, e);
                    }
                }
            }
        }

        tracing::info!("📊 Extracted {} matching postings", postings.len());
        Ok(postings)
    }

    async fn transform(&self, data: Vec<JobPosting>) -> Result<TransformResult> {
        let before = data.len();
        let jobs = deduplicate(data);
        tracing::info!(
            "🔧 Deduplicated {} postings into {} unique jobs",
            before,
            jobs.len()
        );

        let report_text = report::render_report(&jobs, self.run_time.date_naive());
        let json_output = report::render_json(&jobs)?;
        let csv_output = if self.wants_format("csv") {
            Some(report::render_csv(&jobs)?)
        } else {
            None
        };

        Ok(TransformResult {
            jobs,
            report_text,
            json_output,
            csv_output,
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<Vec<String>> {
        let stem = format!("{}_{}", self.config.file_prefix(), self.run_timestamp());
        let mut files: Vec<(String, &str)> = Vec::new();

        if self.wants_format("json") {
            files.push((format!("{}.json", stem), result.json_output.as_str()));
        }
        if self.wants_format("txt") {
            files.push((format!("{}.txt", stem), result.report_text.as_str()));
        }
        if let Some(csv_output) = &result.csv_output {
            files.push((format!("{}.csv", stem), csv_output.as_str()));
        }

        let mut output_paths = Vec::with_capacity(files.len());
        for (file_name, content) in files {
            tracing::debug!("Writing {} ({} bytes)", file_name, content.len());
            self.storage.write_file(&file_name, content.as_bytes()).await?;
            output_paths.push(
                Path::new(self.config.output_path())
                    .join(&file_name)
                    .display()
                    .to_string(),
            );
        }

        tracing::info!("💾 Saved {} output files", output_paths.len());
        Ok(output_paths)
    }
}
