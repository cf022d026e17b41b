//! Data models for crawled and summarized news items.
//!
//! - [`RawNewsItem`]: one article teaser as extracted from a category page
//! - [`SummarizedNewsItem`]: a raw item enriched with its summary
//!
//! Field names match the JSON artifacts consumed by the serving layer.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// An article as discovered on a source's category page.
///
/// `title` is never empty and `link` is absolute; `description` holds at
/// most [`crate::text::MAX_WORDS`] words.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawNewsItem {
    /// Headline text, whitespace-flattened.
    pub title: String,
    /// Absolute `http`/`https` article URL.
    pub link: String,
    /// Teaser text; empty when the page has none.
    #[serde(default)]
    pub description: String,
    /// Shared category label, e.g. `"thời sự"`.
    pub category: String,
    /// Human-readable source name, e.g. `"VnExpress"`.
    pub source: String,
    /// Extraction time.
    pub timestamp: DateTime<Local>,
}

impl RawNewsItem {
    /// Text handed to the summarizer: the title, then the description if any.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // title "Bão số 3", description "Gió mạnh cấp 12."
    /// assert_eq!(item.document(), "Bão số 3 Gió mạnh cấp 12.");
    /// ```
    pub fn document(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.description)
        }
    }
}

/// A raw item with the summary derived from its own title and description.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SummarizedNewsItem {
    pub title: String,
    /// Same link as the raw item it came from.
    pub link: String,
    /// Non-empty, ends in `.`, `!` or `?`.
    pub summary: String,
    pub description: String,
    pub category: String,
    pub source: String,
    pub timestamp: DateTime<Local>,
}

impl SummarizedNewsItem {
    /// Attach `summary` to `item`, keeping every raw field as it was.
    pub fn from_raw(item: RawNewsItem, summary: String) -> Self {
        Self {
            title: item.title,
            link: item.link,
            summary,
            description: item.description,
            category: item.category,
            source: item.source,
            timestamp: item.timestamp,
        }
    }
}

#[cfg(test)]
pub(crate) fn raw_item(title: &str, description: &str, category: &str, source: &str) -> RawNewsItem {
    RawNewsItem {
        title: title.to_string(),
        link: format!("https://example.vn/{}", title.to_lowercase().replace(' ', "-")),
        description: description.to_string(),
        category: category.to_string(),
        source: source.to_string(),
        timestamp: Local::now(),
    }
}
