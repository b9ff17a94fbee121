pub mod aggregator;
pub mod classifier;
pub mod engine;
pub mod fetcher;
pub mod report;

pub use crate::domain::model::{JobPosting, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
