use crate::core::Pipeline;
use crate::domain::model::{RunSummary, Tier};
use crate::utils::error::Result;

pub struct SearchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting AI job search");

        // Extract
        let postings = self.pipeline.extract().await?;

        // Transform
        let result = self.pipeline.transform(postings).await?;
        tracing::info!(
            "Classified {} jobs ({} strict, {} wide)",
            result.jobs.len(),
            result.count_tier(Tier::Strict),
            result.count_tier(Tier::Wide)
        );

        // Load
        let output_paths = self.pipeline.load(&result).await?;
        for path in &output_paths {
            tracing::info!("📁 Output saved to: {}", path);
        }

        Ok(RunSummary {
            total_jobs: result.jobs.len(),
            strict_jobs: result.count_tier(Tier::Strict),
            wide_jobs: result.count_tier(Tier::Wide),
            company_count: result.company_count(),
            output_paths,
            report_text: result.report_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report;
    use crate::domain::model::{JobPosting, PostedDate, Source, TransformResult};
    use std::sync::Mutex;

    struct StubPipeline {
        postings: Vec<JobPosting>,
        loaded: Mutex<Option<usize>>,
    }

    fn posting(title: &str, tier: Tier) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            employment_type: None,
            url: String::new(),
            source: Source::Lever,
            posted_date: PostedDate::default(),
            tier,
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<JobPosting>> {
            Ok(self.postings.clone())
        }

        async fn transform(&self, data: Vec<JobPosting>) -> Result<TransformResult> {
            Ok(TransformResult {
                report_text: format!("{} jobs", data.len()),
                json_output: report::render_json(&data)?,
                csv_output: None,
                jobs: data,
            })
        }

        async fn load(&self, result: &TransformResult) -> Result<Vec<String>> {
            *self.loaded.lock().unwrap() = Some(result.jobs.len());
            Ok(vec!["out/job_results.json".to_string()])
        }
    }

    #[tokio::test]
    async fn test_run_summarises_pipeline_output() {
        let pipeline = StubPipeline {
            postings: vec![
                posting("Prompt Engineer", Tier::Strict),
                posting("AI Product Manager", Tier::Wide),
            ],
            loaded: Mutex::new(None),
        };
        let engine = SearchEngine::new(pipeline);

        let summary = engine.run().await.unwrap();

        assert_eq!(summary.total_jobs, 2);
        assert_eq!(summary.strict_jobs, 1);
        assert_eq!(summary.wide_jobs, 1);
        assert_eq!(summary.company_count, 1);
        assert_eq!(summary.report_text, "2 jobs");
        assert_eq!(summary.output_paths, vec!["out/job_results.json".to_string()]);
        assert_eq!(*engine.pipeline.loaded.lock().unwrap(), Some(2));
    }
}
