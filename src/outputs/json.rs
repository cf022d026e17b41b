//! JSON artifact reading and writing.
//!
//! Writes are atomic: the JSON goes to a hidden sibling file which is then
//! renamed over the target, so readers see either the previous artifact or
//! the new one.

use crate::aggregate::CrawlResult;
use crate::error::ArtifactError;
use crate::models::{RawNewsItem, SummarizedNewsItem};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

pub const RAW_ARTIFACT: &str = "raw_news.json";
pub const PROCESSED_ARTIFACT: &str = "processed_news.json";

const CATEGORY_PREFIX: &str = "raw_news_";

/// `raw_news_<category>.json` with spaces replaced by underscores.
pub fn category_artifact(category: &str) -> String {
    format!("{CATEGORY_PREFIX}{}.json", category.replace(' ', "_"))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ArtifactError + '_ {
    move |source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    }
}

async fn write_atomic<T: Serialize + ?Sized>(
    dir: &Path,
    name: &str,
    value: &T,
) -> Result<PathBuf, ArtifactError> {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Json {
        path: path.display().to_string(),
        source,
    })?;

    let tmp = dir.join(format!(".{name}.tmp"));
    fs::write(&tmp, json).await.map_err(io_error(&tmp))?;
    if let Err(source) = fs::rename(&tmp, &path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(io_error(&path)(source));
    }
    Ok(path)
}

/// Remove category artifacts left by earlier runs that this run did not
/// rewrite, so the category files always match `raw_news.json`.
async fn remove_stale_categories(dir: &Path, written: &HashSet<String>) -> Result<(), ArtifactError> {
    let mut entries = fs::read_dir(dir).await.map_err(io_error(dir))?;
    while let Some(entry) = entries.next_entry().await.map_err(io_error(dir))? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(CATEGORY_PREFIX) || !name.ends_with(".json") || written.contains(&name) {
            continue;
        }
        match fs::remove_file(entry.path()).await {
            Ok(()) => info!(file = %name, "Removed stale category artifact"),
            Err(e) => warn!(file = %name, error = %e, "Failed to remove stale category artifact"),
        }
    }
    Ok(())
}

/// Write one artifact per category, then the all-items artifact.
///
/// Category artifacts from earlier runs whose category produced nothing
/// this time are removed afterwards.
///
/// # Errors
///
/// Any failed write is returned and aborts the remaining writes. Artifacts
/// already replaced stay replaced; the others keep their previous content.
#[instrument(level = "info", skip_all, fields(%data_dir, items = result.items.len()))]
pub async fn write_crawl_artifacts(result: &CrawlResult, data_dir: &str) -> Result<(), ArtifactError> {
    let dir = Path::new(data_dir);
    let mut written = HashSet::new();
    for (category, items) in &result.by_category {
        let name = category_artifact(category);
        let path = write_atomic(dir, &name, items).await?;
        info!(%category, count = items.len(), path = %path.display(), "Wrote category artifact");
        written.insert(name);
    }
    let path = write_atomic(dir, RAW_ARTIFACT, &result.items).await?;
    info!(path = %path.display(), "Wrote raw news artifact");

    remove_stale_categories(dir, &written).await
}

#[instrument(level = "info", skip_all, fields(%data_dir, items = items.len()))]
pub async fn write_processed(items: &[SummarizedNewsItem], data_dir: &str) -> Result<(), ArtifactError> {
    let path = write_atomic(Path::new(data_dir), PROCESSED_ARTIFACT, items).await?;
    info!(path = %path.display(), "Wrote processed news artifact");
    Ok(())
}

#[instrument(level = "info", skip_all, fields(%data_dir))]
pub async fn read_raw_items(data_dir: &str) -> Result<Vec<RawNewsItem>, ArtifactError> {
    let path = Path::new(data_dir).join(RAW_ARTIFACT);
    let raw = fs::read_to_string(&path).await.map_err(io_error(&path))?;
    let items: Vec<RawNewsItem> = serde_json::from_str(&raw).map_err(|source| ArtifactError::Json {
        path: path.display().to_string(),
        source,
    })?;
    info!(count = items.len(), "Loaded raw news artifact");
    Ok(items)
}
