use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}: {body_prefix}")]
    HttpStatusError {
        url: String,
        status: u16,
        body_prefix: String,
    },

    #[error("Unexpected response shape from {board}: {message}")]
    MalformedResponseError { board: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SearchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::ApiError(_) | SearchError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            SearchError::MalformedResponseError { .. }
            | SearchError::SerializationError(_)
            | SearchError::CsvError(_) => ErrorCategory::Data,
            SearchError::IoError(_) => ErrorCategory::Storage,
            SearchError::ConfigValidationError { .. }
            | SearchError::InvalidConfigValueError { .. }
            | SearchError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一公司失敗只會被跳過
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            SearchError::ApiError(e) if e.is_timeout() => {
                "The job board did not answer in time".to_string()
            }
            SearchError::ApiError(_) => "Could not reach the job board API".to_string(),
            SearchError::HttpStatusError { status, .. } => {
                format!("The job board answered with HTTP {}", status)
            }
            SearchError::MalformedResponseError { .. } | SearchError::SerializationError(_) => {
                "The job board returned data in an unexpected format".to_string()
            }
            SearchError::CsvError(_) => "Failed to build the CSV export".to_string(),
            SearchError::IoError(e) => format!("Failed to write results: {}", e),
            SearchError::ConfigValidationError { field, .. }
            | SearchError::InvalidConfigValueError { field, .. }
            | SearchError::MissingConfigError { field } => {
                format!("Configuration problem in '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the company slug",
            ErrorCategory::Data => "The API schema may have changed; run with --verbose for details",
            ErrorCategory::Storage => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
