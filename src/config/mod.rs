pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
use std::path::PathBuf;
use toml_config::AgentConfig;

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "job-radar"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Polls Greenhouse and Lever job boards for AI content, UX and product roles")
)]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<PathBuf>,

    /// Directory where the result files are written
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_path: Option<String>,

    /// Pause between requests, in milliseconds
    #[cfg_attr(feature = "cli", arg(long))]
    pub delay_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[cfg_attr(feature = "cli", arg(long))]
    pub timeout_seconds: Option<u64>,

    /// Output formats (json, txt, csv)
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub format: Vec<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub json_logs: bool,

    /// Show which boards would be queried without fetching anything
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,
}

impl CliConfig {
    /// 載入配置檔 (若有) 並套用命令列覆蓋
    pub fn resolve(&self) -> crate::Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::from_file(path)?,
            None => AgentConfig::default(),
        };

        if let Some(output_path) = &self.output_path {
            config.output.output_path = output_path.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.http.delay_ms = delay_ms;
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            config.http.timeout_seconds = timeout_seconds;
        }
        if !self.format.is_empty() {
            config.output.formats = self.format.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let cli = CliConfig::default();
        let config = cli.resolve().unwrap();
        assert_eq!(config.http.delay_ms, 1500);
        assert_eq!(config.output.output_path, ".");
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let cli = CliConfig {
            output_path: Some("/tmp/out".to_string()),
            delay_ms: Some(0),
            timeout_seconds: Some(3),
            format: vec!["json".to_string(), "csv".to_string()],
            ..CliConfig::default()
        };
        let config = cli.resolve().unwrap();
        assert_eq!(config.output.output_path, "/tmp/out");
        assert_eq!(config.http.delay_ms, 0);
        assert_eq!(config.http.timeout_seconds, 3);
        assert!(config.wants_format("csv"));
        assert!(!config.wants_format("txt"));
    }

    #[test]
    fn test_resolve_missing_file_fails() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/job-radar.toml")),
            ..CliConfig::default()
        };
        assert!(cli.resolve().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_cli_flags() {
        let cli = CliConfig::parse_from([
            "job-radar",
            "--delay-ms",
            "0",
            "--format",
            "json,csv",
            "--dry-run",
        ]);
        assert_eq!(cli.delay_ms, Some(0));
        assert_eq!(cli.format, vec!["json".to_string(), "csv".to_string()]);
        assert!(cli.dry_run);
        assert!(cli.config.is_none());
    }
}
