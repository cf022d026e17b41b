//! Zing News category crawler.
//!
//! The title link is nested one level deeper than on other sources: it is
//! the link inside the first `<p>` of `header.article-header`. When that
//! paragraph has no link the entry is dropped, even if a later one does.

use super::{CategoryMap, SiteCrawler, SiteLayout, category_map};
use crate::error::CrawlError;
use crate::models::RawNewsItem;

const LAYOUT: SiteLayout = SiteLayout {
    source: "Zing News",
    base_url: "https://zingnews.vn",
    article: "article.article-item",
    title: "header.article-header p",
    title_link: "a",
    description: "p.article-summary",
};

const CATEGORIES: &[(&str, &str)] = &[
    ("thời sự", "https://zingnews.vn/thoi-su.html"),
    ("thế giới", "https://zingnews.vn/the-gioi.html"),
    ("kinh doanh", "https://zingnews.vn/kinh-doanh-tai-chinh.html"),
    ("giải trí", "https://zingnews.vn/giai-tri.html"),
    ("thể thao", "https://zingnews.vn/the-thao.html"),
    ("khoa học", "https://zingnews.vn/khoa-hoc.html"),
    ("giáo dục", "https://zingnews.vn/giao-duc.html"),
];

/// Crawler for `zingnews.vn`.
pub struct ZingNews;

impl SiteCrawler for ZingNews {
    fn source(&self) -> &str {
        LAYOUT.source
    }

    fn category_map(&self) -> CategoryMap {
        category_map(CATEGORIES)
    }

    fn extract(&self, html: &str, category: &str) -> Result<Vec<RawNewsItem>, CrawlError> {
        LAYOUT.extract(html, category)
    }
}
