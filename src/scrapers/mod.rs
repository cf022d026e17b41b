//! News source crawlers sharing one control flow and failure policy.
//!
//! Each source implements [`SiteCrawler`]: a fixed category map plus
//! page-to-item extraction. [`crawl`] drives any crawler the same way:
//!
//! 1. For each `(category, url)` in map order, fetch the page
//! 2. Extract items from the body
//! 3. Concatenate the per-category results
//!
//! A failed fetch or extraction skips that category only.
//!
//! # Supported Sources
//!
//! | Source | Module | Article container |
//! |--------|--------|-------------------|
//! | VnExpress | [`vnexpress`] | `article.item-news` |
//! | Tuổi Trẻ | [`tuoitre`] | `div.news-item` |
//! | Thanh Niên | [`thanhnien`] | `article.story` |
//! | Dân Trí | [`dantri`] | `article.article-item` |
//! | Zing News | [`zingnews`] | `article.article-item` |
//! | VTV News | [`vtv`] | `div.item-news` |

pub mod dantri;
pub mod thanhnien;
pub mod tuoitre;
pub mod vnexpress;
pub mod vtv;
pub mod zingnews;

use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::models::RawNewsItem;
use crate::text::{self, MAX_WORDS};
use chrono::Local;
use futures::future::join_all;
use itertools::Itertools;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Ordered `(category label, category page URL)` pairs.
///
/// Labels come from the shared label space (`"thời sự"`, `"thể thao"`, ...)
/// whatever slug the source uses in its own URLs.
pub type CategoryMap = Vec<(String, String)>;

/// Capabilities a news source provides to the shared [`crawl`] loop.
///
/// Implementors own the markup knowledge for their source and nothing else:
/// fetching, failure isolation and concatenation live in [`crawl`].
pub trait SiteCrawler: Send + Sync {
    /// Human-readable source name stamped on every item.
    fn source(&self) -> &str;

    /// Category pages to crawl, in crawl order.
    fn category_map(&self) -> CategoryMap;

    /// Extract every well-formed article teaser from one category page.
    ///
    /// # Arguments
    ///
    /// * `html` - The raw body of the category page
    /// * `category` - Shared category label stamped on every item
    ///
    /// # Returns
    ///
    /// The items in page order. Malformed entries are dropped, not reported.
    ///
    /// # Errors
    ///
    /// Returns an error when the page cannot be processed at all (for
    /// example an invalid selector). [`crawl`] logs it and skips the category.
    fn extract(&self, html: &str, category: &str) -> Result<Vec<RawNewsItem>, CrawlError>;
}

/// The per-source markup description used by [`SiteLayout::extract`].
///
/// Sources differ only in these values and their category maps.
#[derive(Debug, Clone, Copy)]
pub struct SiteLayout {
    /// Source name stamped on every item, e.g. `"VnExpress"`.
    pub source: &'static str,
    /// Base for resolving relative article links.
    pub base_url: &'static str,
    /// CSS selector for one article teaser container.
    pub article: &'static str,
    /// Element holding the title link, searched inside the article.
    /// Only the first match is considered.
    pub title: &'static str,
    /// The link itself, searched inside the title element.
    pub title_link: &'static str,
    /// Teaser text, searched inside the article. Optional in the markup.
    pub description: &'static str,
}

fn parse_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|e| CrawlError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).join(" ")
}

/// Build an owned [`CategoryMap`] from a static table.
///
/// # Examples
///
/// ```ignore
/// let map = category_map(&[("thời sự", "https://vnexpress.net/thoi-su")]);
/// assert_eq!(map[0].0, "thời sự");
/// ```
pub fn category_map(entries: &[(&str, &str)]) -> CategoryMap {
    entries
        .iter()
        .map(|(category, url)| (category.to_string(), url.to_string()))
        .collect()
}

impl SiteLayout {
    /// Extract article teasers from `html` using this layout.
    ///
    /// An entry is dropped silently when it has no title link, the link has
    /// no `href`, the title text is empty, or the link does not resolve to an
    /// `http`/`https` URL. Descriptions longer than [`MAX_WORDS`] words are
    /// cut at the word level.
    ///
    /// # Errors
    ///
    /// [`CrawlError::Selector`] or [`CrawlError::BaseUrl`] when the layout
    /// itself is invalid.
    pub fn extract(&self, html: &str, category: &str) -> Result<Vec<RawNewsItem>, CrawlError> {
        let base = Url::parse(self.base_url)?;
        let article_selector = parse_selector(self.article)?;
        let title_selector = parse_selector(self.title)?;
        let link_selector = parse_selector(self.title_link)?;
        let description_selector = parse_selector(self.description)?;

        let document = Html::parse_document(html);
        let mut items = Vec::new();

        for article in document.select(&article_selector) {
            let Some(anchor) = article
                .select(&title_selector)
                .next()
                .and_then(|title| title.select(&link_selector).next())
            else {
                continue;
            };
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let title = element_text(anchor);
            if title.is_empty() {
                continue;
            }
            let link = match base.join(href.trim()) {
                Ok(link) => link,
                Err(e) => {
                    debug!(source = self.source, href, error = %e, "Unresolvable article link");
                    continue;
                }
            };
            if !matches!(link.scheme(), "http" | "https") {
                debug!(source = self.source, href, "Skipping non-web article link");
                continue;
            }

            let mut description = article
                .select(&description_selector)
                .next()
                .map(element_text)
                .unwrap_or_default();
            if text::word_count(&description) > MAX_WORDS {
                description = text::truncate(&description, MAX_WORDS);
            }

            items.push(RawNewsItem {
                title,
                link: link.to_string(),
                description,
                category: category.to_string(),
                source: self.source.to_string(),
                timestamp: Local::now(),
            });
        }

        Ok(items)
    }
}

/// HTTP client carrying the identifying User-Agent for every request.
///
/// One client is shared by every crawler so connections are pooled across
/// sources. `request_timeout_secs` bounds each page fetch.
pub fn build_client(config: &CrawlerConfig) -> Result<Client, CrawlError> {
    Ok(Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?)
}

/// Every supported source, in invocation order.
pub fn all_crawlers() -> Vec<Box<dyn SiteCrawler>> {
    vec![
        Box::new(vnexpress::VnExpress),
        Box::new(tuoitre::TuoiTre),
        Box::new(thanhnien::ThanhNien),
        Box::new(dantri::DanTri),
        Box::new(zingnews::ZingNews),
        Box::new(vtv::VtvNews),
    ]
}

async fn fetch_page(client: &Client, url: &str) -> Result<String, CrawlError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}

/// Crawl every category of one source.
///
/// Categories are fetched in map order, one after another. A failed fetch
/// (transport error or non-success status) or a failed extraction is logged
/// and that category contributes no items; the next category still runs.
///
/// # Returns
///
/// All items of all successful categories, concatenated in map order.
#[instrument(level = "info", skip_all, fields(source = crawler.source()))]
pub async fn crawl<C: SiteCrawler + ?Sized>(crawler: &C, client: &Client) -> Vec<RawNewsItem> {
    let mut items = Vec::new();

    for (category, url) in crawler.category_map() {
        let body = match fetch_page(client, &url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(%category, %url, error = %e, "Category fetch failed; skipping");
                continue;
            }
        };

        match crawler.extract(&body, &category) {
            Ok(found) => {
                info!(%category, count = found.len(), "Crawled category");
                items.extend(found);
            }
            Err(e) => {
                error!(%category, %url, error = %e, "Category extraction failed; skipping");
            }
        }
    }

    info!(count = items.len(), "Crawled source");
    items
}

/// Run every crawler, returning one result per crawler in invocation order.
///
/// With `concurrent` the crawlers are polled together, so a slow source does
/// not hold back the others. The result order is the slice order either way.
#[instrument(level = "info", skip_all, fields(crawlers = crawlers.len(), concurrent = concurrent))]
pub async fn crawl_all(
    crawlers: &[Box<dyn SiteCrawler>],
    client: &Client,
    concurrent: bool,
) -> Vec<Vec<RawNewsItem>> {
    if concurrent {
        return join_all(crawlers.iter().map(|crawler| crawl(crawler.as_ref(), client))).await;
    }
    let mut results = Vec::with_capacity(crawlers.len());
    for crawler in crawlers {
        results.push(crawl(crawler.as_ref(), client).await);
    }
    results
}
