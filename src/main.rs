use clap::Parser;
use job_radar::utils::error::ErrorSeverity;
use job_radar::utils::{logger, validation::Validate};
use job_radar::{AgentConfig, CliConfig, JobSearchPipeline, LocalStorage, SearchEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting job-radar");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if cli.dry_run {
        perform_dry_run(&config);
        return Ok(());
    }

    let storage = LocalStorage::new(config.output.output_path.clone());
    let pipeline = JobSearchPipeline::new(storage, config);
    let engine = SearchEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!("\n{}", summary.report_text);
            println!();
            for path in &summary.output_paths {
                println!("📁 Saved to {}", path);
            }

            if summary.total_jobs > 0 {
                println!(
                    "\nQuick Summary: {} jobs across {} companies ({} strict, {} wide)",
                    summary.total_jobs,
                    summary.company_count,
                    summary.strict_jobs,
                    summary.wide_jobs
                );
            } else {
                println!("\nRun this daily to catch new postings!");
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Job search failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn perform_dry_run(config: &AgentConfig) {
    tracing::info!("🔍 DRY RUN MODE - no requests will be sent");
    println!(
        "Would query {} boards (timeout {}s, {}ms between requests):",
        config.company_count(),
        config.http.timeout_seconds,
        config.http.delay_ms
    );
    for source in &config.sources {
        for company in &source.companies {
            println!("  [{}] {}", source.kind, source.url_for(company));
        }
    }
    println!(
        "Output: {} ({})",
        config.output.output_path,
        config.output.formats.join(", ")
    );
}
