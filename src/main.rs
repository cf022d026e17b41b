//! # vnnews_digest
//!
//! Crawls the category pages of six Vietnamese news sites, collects article
//! teasers, and summarizes each one into a short digest.
//!
//! ## Usage
//!
//! ```sh
//! vnnews_digest -d ./data
//! vnnews_digest -d ./data --stage crawl
//! SUMMARIZER_ENDPOINT=http://localhost:8080/summarize vnnews_digest --stage summarize
//! ```
//!
//! ## Architecture
//!
//! 1. **Crawl**: every source's category pages, concurrently by default
//! 2. **Aggregate**: concatenate per-source items and group them by category
//! 3. **Summarize**: learned model when reachable, TF-IDF extractive otherwise,
//!    in bounded concurrent batches that keep input order
//! 4. **Output**: `raw_news*.json` after crawling, `processed_news.json` after
//!    summarizing

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod summarizer;
mod text;
mod utils;

use cli::{Cli, Stage};
use config::PipelineConfig;
use models::RawNewsItem;
use outputs::json;
use summarizer::Summarizer;
use summarizer::batch::BatchSummarizationEngine;
use summarizer::learned::{HttpSummarizer, RetryModel, Throttled};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("vnnews_digest starting up");

    let args = Cli::parse();
    debug!(data_dir = %args.data_dir, stage = ?args.stage, config = ?args.config, "Parsed CLI arguments");

    let mut config = PipelineConfig::load(args.config.as_deref())?;
    config.apply_cli(&args);
    config.validate()?;

    if let Err(e) = ensure_writable_dir(&args.data_dir).await {
        error!(
            path = %args.data_dir,
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // ---- Crawl ----
    let mut crawled: Option<Vec<RawNewsItem>> = None;
    if matches!(args.stage, Stage::All | Stage::Crawl) {
        let client = scrapers::build_client(&config.crawler)?;
        let crawlers = scrapers::all_crawlers();
        let results = scrapers::crawl_all(&crawlers, &client, config.crawler.concurrent).await;
        let result = aggregate::aggregate(results);
        info!(
            items = result.items.len(),
            categories = result.by_category.len(),
            "Crawl finished"
        );
        for category in result.category_names() {
            debug!(%category, "Category present");
        }

        json::write_crawl_artifacts(&result, &args.data_dir).await?;
        crawled = Some(result.items);
    }

    // ---- Summarize ----
    if matches!(args.stage, Stage::All | Stage::Summarize) {
        let items = match crawled {
            Some(items) => items,
            None => json::read_raw_items(&args.data_dir).await?,
        };

        let model = RetryModel::new(
            Throttled::new(
                HttpSummarizer::connect(&config.model).await,
                config.summarizer.inference_slots,
            ),
            config.model.max_retries,
            Duration::from_millis(config.model.retry_base_delay_ms),
        );
        let summarizer = Summarizer::new(model, &config.summarizer);
        let engine = BatchSummarizationEngine::new(summarizer, &config.summarizer);

        let processed = pipeline::summarize_items(&engine, items).await;
        json::write_processed(&processed, &args.data_dir).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
