//! Error types for each stage of the pipeline.
//!
//! Crawl and summarization errors are always absorbed at category or item
//! scope; only [`ArtifactError`] and [`ConfigError`] reach `main`.

use thiserror::Error;

/// Failures while fetching or extracting one category page.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Failures of the learned summarization path.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("learned model is unavailable")]
    Unavailable,
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("inference endpoint returned HTTP {0}")]
    Status(u16),
    #[error("model returned an empty summary")]
    EmptyOutput,
    #[error("inference slot closed")]
    SlotClosed,
}

/// Failures reading or writing JSON artifacts. Fatal for the run.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact JSON failed for {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures loading or validating the pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
