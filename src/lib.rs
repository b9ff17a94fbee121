pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::storage::LocalStorage;
pub use crate::app::pipelines::search_pipeline::JobSearchPipeline;
pub use crate::config::{toml_config::AgentConfig, CliConfig};
pub use crate::core::engine::SearchEngine;
pub use crate::domain::model::{JobPosting, RunSummary, Source, Tier};
pub use crate::utils::error::{Result, SearchError};
