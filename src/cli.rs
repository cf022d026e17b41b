//! Command-line interface definitions.
//!
//! Model credentials can also be provided through environment variables.

use clap::{Parser, ValueEnum};

/// Which part of the pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// Crawl every source, then summarize the fresh items.
    All,
    /// Crawl and write the raw artifacts only.
    Crawl,
    /// Summarize the existing `raw_news.json`.
    Summarize,
}

/// Crawl Vietnamese news sites and summarize every article.
///
/// ```sh
/// vnnews_digest -d ./data
/// vnnews_digest -d ./data --stage summarize --model-endpoint http://localhost:8080/summarize
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the JSON artifacts
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Optional path to a YAML pipeline config
    #[arg(short, long)]
    pub config: Option<String>,

    /// Pipeline stage to run
    #[arg(long, value_enum, default_value_t = Stage::All)]
    pub stage: Stage,

    /// Summarization inference endpoint
    #[arg(long, env = "SUMMARIZER_ENDPOINT")]
    pub model_endpoint: Option<String>,

    /// Bearer token for the inference endpoint
    #[arg(long, env = "SUMMARIZER_API_TOKEN", hide_env_values = true)]
    pub model_token: Option<String>,
}
