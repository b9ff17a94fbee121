use crate::core::fetcher::DEFAULT_USER_AGENTS;
use crate::core::ConfigProvider;
use crate::domain::model::{BoardSource, Source};
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_OUTPUT_FORMATS: &[&str] = &["json", "txt", "csv"];

const MAX_DELAY_MS: u64 = 60_000;
const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "default_sources")]
    pub sources: Vec<BoardSource>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub formats: Vec<String>,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_delay_ms() -> u64 {
    1500
}

fn default_user_agents() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_output_formats() -> Vec<String> {
    vec!["json".to_string(), "txt".to_string()]
}

fn default_file_prefix() -> String {
    "job_results".to_string()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 內建的公司清單，Greenhouse 先於 Lever
pub fn default_sources() -> Vec<BoardSource> {
    vec![
        BoardSource {
            kind: Source::Greenhouse,
            url_template: "https://boards-api.greenhouse.io/v1/boards/{company}/jobs".to_string(),
            referer_template: Some("https://boards.greenhouse.io/{company}".to_string()),
            companies: to_strings(&[
                "anthropic", "figma", "canva", "discord", "airtable", "reddit", "facebook",
            ]),
        },
        BoardSource {
            kind: Source::Lever,
            url_template: "https://api.lever.co/v0/postings/{company}?mode=json".to_string(),
            referer_template: None,
            companies: to_strings(&["shopify", "grammarly", "retool", "plaid"]),
        },
    ]
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            delay_ms: default_delay_ms(),
            user_agents: default_user_agents(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            formats: default_output_formats(),
            file_prefix: default_file_prefix(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            sources: default_sources(),
            output: OutputConfig::default(),
        }
    }
}

impl AgentConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SearchError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range(
            "http.timeout_seconds",
            self.http.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validation::validate_range("http.delay_ms", self.http.delay_ms, 0, MAX_DELAY_MS)?;

        if self.sources.is_empty() {
            return Err(SearchError::MissingConfigError {
                field: "sources".to_string(),
            });
        }

        for source in &self.sources {
            if !source.url_template.contains("{company}") {
                return Err(SearchError::InvalidConfigValueError {
                    field: "sources.url_template".to_string(),
                    value: source.url_template.clone(),
                    reason: "Template must contain a {company} placeholder".to_string(),
                });
            }
            for company in &source.companies {
                validation::validate_non_empty_string("sources.companies", company)?;
                validation::validate_url("sources.url_template", &source.url_for(company))?;
                if let Some(referer) = source.referer_for(company) {
                    validation::validate_url("sources.referer_template", &referer)?;
                }
            }
        }

        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_non_empty_string("output.file_prefix", &self.output.file_prefix)?;
        validation::validate_allowed_values(
            "output.formats",
            &self.output.formats,
            SUPPORTED_OUTPUT_FORMATS,
        )?;

        Ok(())
    }

    pub fn company_count(&self) -> usize {
        self.sources.iter().map(|s| s.companies.len()).sum()
    }

    pub fn wants_format(&self, format: &str) -> bool {
        self.output.formats.iter().any(|f| f == format)
    }
}

impl ConfigProvider for AgentConfig {
    fn sources(&self) -> &[BoardSource] {
        &self.sources
    }

    fn timeout_seconds(&self) -> u64 {
        self.http.timeout_seconds
    }

    fn request_delay_ms(&self) -> u64 {
        self.http.delay_ms
    }

    fn user_agents(&self) -> &[String] {
        &self.http.user_agents
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn file_prefix(&self) -> &str {
        &self.output.file_prefix
    }
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_matches_builtin_behaviour() {
        let config = AgentConfig::default();

        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.request_delay_ms(), 1500);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].kind, Source::Greenhouse);
        assert_eq!(config.sources[1].kind, Source::Lever);
        assert_eq!(config.company_count(), 11);
        assert_eq!(config.output_formats(), &["json".to_string(), "txt".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AgentConfig::from_toml_str("").unwrap();
        assert_eq!(config.company_count(), 11);
        assert_eq!(config.file_prefix(), "job_results");
    }

    #[test]
    fn test_parse_custom_sources() {
        let toml_content = r#"
[http]
timeout_seconds = 5
delay_ms = 0

[[sources]]
kind = "lever"
url_template = "https://api.lever.co/v0/postings/{company}?mode=json"
companies = ["acme", "globex"]

[output]
output_path = "./reports"
formats = ["json", "txt", "csv"]
"#;

        let config = AgentConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.request_delay_ms(), 0);
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].kind, Source::Lever);
        assert_eq!(config.sources[0].referer_template, None);
        assert!(config.wants_format("csv"));
        assert!(!config.user_agents().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("JOB_RADAR_TEST_OUTPUT", "/tmp/job-radar");

        let toml_content = r#"
[output]
output_path = "${JOB_RADAR_TEST_OUTPUT}"
"#;

        let config = AgentConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/job-radar");

        std::env::remove_var("JOB_RADAR_TEST_OUTPUT");
    }

    #[test]
    fn test_config_validation() {
        let missing_placeholder = r#"
[[sources]]
kind = "greenhouse"
url_template = "https://boards-api.greenhouse.io/v1/boards/jobs"
companies = ["acme"]
"#;
        let config = AgentConfig::from_toml_str(missing_placeholder).unwrap();
        assert!(config.validate().is_err());

        let bad_format = r#"
[output]
formats = ["xml"]
"#;
        let config = AgentConfig::from_toml_str(bad_format).unwrap();
        assert!(config.validate().is_err());

        let mut config = AgentConfig::default();
        config.http.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = AgentConfig::default();
        config.sources.clear();
        assert!(matches!(
            config.validate(),
            Err(SearchError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_source_kind_is_rejected() {
        let toml_content = r#"
[[sources]]
kind = "workday"
url_template = "https://example.com/{company}"
companies = ["acme"]
"#;
        assert!(AgentConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[http]
delay_ms = 250
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AgentConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.request_delay_ms(), 250);
        assert_eq!(config.timeout_seconds(), 10);
    }
}
