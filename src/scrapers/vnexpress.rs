//! VnExpress category crawler.
//!
//! Teasers are `article.item-news` cards; the title link sits in
//! `h3.title-news` and the lead in `p.description`. Links are usually
//! absolute already.

use super::{CategoryMap, SiteCrawler, SiteLayout, category_map};
use crate::error::CrawlError;
use crate::models::RawNewsItem;

const LAYOUT: SiteLayout = SiteLayout {
    source: "VnExpress",
    base_url: "https://vnexpress.net",
    article: "article.item-news",
    title: "h3.title-news",
    title_link: "a",
    description: "p.description",
};

const CATEGORIES: &[(&str, &str)] = &[
    ("thời sự", "https://vnexpress.net/thoi-su"),
    ("thế giới", "https://vnexpress.net/the-gioi"),
    ("kinh doanh", "https://vnexpress.net/kinh-doanh"),
    ("giải trí", "https://vnexpress.net/giai-tri"),
    ("thể thao", "https://vnexpress.net/the-thao"),
    ("khoa học", "https://vnexpress.net/khoa-hoc"),
    ("giáo dục", "https://vnexpress.net/giao-duc"),
];

/// Crawler for `vnexpress.net`.
pub struct VnExpress;

impl SiteCrawler for VnExpress {
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
