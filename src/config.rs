//! Pipeline configuration loaded from an optional YAML file.
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! working configuration. CLI flags are applied on top with
//! [`PipelineConfig::apply_cli`].
//!
//! ```yaml
//! crawler:
//!   request_timeout_secs: 20
//!   concurrent: true
//! summarizer:
//!   sentences: 2
//!   batch_size: 8
//!   workers: 4
//! model:
//!   endpoint: https://api-inference.huggingface.co/models/facebook/bart-large-cnn
//!   max_length: 130
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Identifying User-Agent sent with every category request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Top-level configuration, one section per pipeline concern.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub crawler: CrawlerConfig,
    pub summarizer: SummarizerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// User-Agent sent with every category request.
    pub user_agent: String,
    /// Per-request timeout for category pages.
    pub request_timeout_secs: u64,
    /// Run the site crawlers concurrently instead of one after another.
    pub concurrent: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
            concurrent: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Sentences kept by the extractive fallback.
    pub sentences: usize,
    /// Documents per batch.
    pub batch_size: usize,
    /// Batches processed at the same time.
    pub workers: usize,
    /// Concurrent calls allowed into the learned model.
    pub inference_slots: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            sentences: 2,
            batch_size: 8,
            workers: 4,
            inference_slots: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Summarization inference endpoint. No endpoint means extractive only.
    pub endpoint: Option<String>,
    /// Bearer token sent with inference requests.
    pub api_token: Option<String>,
    /// Per-request timeout for inference calls.
    pub timeout_secs: u64,
    /// Send one probe request at startup; failure disables the model for the run.
    pub warmup: bool,
    /// Retries per item before falling back to the extractive path.
    pub max_retries: usize,
    /// First backoff delay; doubles on every retry.
    pub retry_base_delay_ms: u64,
    /// Generation length band, see [`crate::summarizer::learned::GenerationParams`].
    pub min_length: usize,
    pub max_length: usize,
    pub num_beams: usize,
    pub length_penalty: f32,
    pub early_stopping: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token: None,
            timeout_secs: 60,
            warmup: true,
            max_retries: 2,
            retry_base_delay_ms: 500,
            min_length: 30,
            max_length: 130,
            num_beams: 2,
            length_penalty: 1.0,
            early_stopping: true,
        }
    }
}

impl PipelineConfig {
    /// Load from `path` when given, otherwise start from defaults.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(Path::new(path)).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Command-line values win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.model_endpoint {
            self.model.endpoint = Some(endpoint.clone());
        }
        if let Some(token) = &cli.model_token {
            self.model.api_token = Some(token.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.summarizer;
        for (name, value) in [
            ("summarizer.sentences", s.sentences),
            ("summarizer.batch_size", s.batch_size),
            ("summarizer.workers", s.workers),
            ("summarizer.inference_slots", s.inference_slots),
            ("model.max_length", self.model.max_length),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        if self.model.min_length > self.model.max_length {
            return Err(ConfigError::Invalid(format!(
                "model.min_length ({}) exceeds model.max_length ({})",
                self.model.min_length, self.model.max_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.summarizer.sentences, 2);
        assert_eq!(config.summarizer.batch_size, 8);
        assert_eq!(config.summarizer.workers, 4);
        assert_eq!(config.model.max_length, 130);
        assert_eq!(config.model.min_length, 30);
        assert!(config.model.endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "summarizer:\n  batch_size: 3\nmodel:\n  endpoint: http://localhost:8080/summarize\n";
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.summarizer.batch_size, 3);
        assert_eq!(config.summarizer.workers, 4);
        assert_eq!(
            config.model.endpoint.as_deref(),
            Some("http://localhost:8080/summarize")
        );
        assert_eq!(config.crawler.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(PipelineConfig::from_yaml("  \n").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "crawler:\n  concurrent: false\n  request_timeout_secs: 5").unwrap();
        let config = PipelineConfig::load(file.path().to_str()).unwrap();
        assert!(!config.crawler.concurrent);
        assert_eq!(config.crawler.request_timeout_secs, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PipelineConfig::load(Some("/nonexistent/pipeline.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let mut config = PipelineConfig::default();
        config.summarizer.batch_size = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid config: summarizer.batch_size must be at least 1");
    }

    #[test]
    fn test_validate_rejects_inverted_length_band() {
        let mut config = PipelineConfig::default();
        config.model.min_length = 200;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_endpoint() {
        let cli = Cli::parse_from([
            "vnnews_digest",
            "--model-endpoint",
            "http://127.0.0.1:9000/summarize",
        ]);
        let mut config = PipelineConfig::default();
        config.apply_cli(&cli);
        assert_eq!(
            config.model.endpoint.as_deref(),
            Some("http://127.0.0.1:9000/summarize")
        );
    }
}
