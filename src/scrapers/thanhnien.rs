//! Thanh Niên category crawler.
//!
//! Category slugs differ from the shared labels, e.g. `kinh doanh` maps to
//! `/tai-chinh-kinh-doanh/`.

use super::{CategoryMap, SiteCrawler, SiteLayout, category_map};
use crate::error::CrawlError;
use crate::models::RawNewsItem;

const LAYOUT: SiteLayout = SiteLayout {
    source: "Thanh Niên",
    base_url: "https://thanhnien.vn",
    article: "article.story",
    title: "h2.story__title",
    title_link: "a",
    description: "div.story__description",
};

const CATEGORIES: &[(&str, &str)] = &[
    ("thời sự", "https://thanhnien.vn/thoi-su/"),
    ("thế giới", "https://thanhnien.vn/the-gioi/"),
    ("kinh doanh", "https://thanhnien.vn/tai-chinh-kinh-doanh/"),
    ("giải trí", "https://thanhnien.vn/giai-tri/"),
    ("thể thao", "https://thanhnien.vn/the-thao/"),
    ("khoa học", "https://thanhnien.vn/khoa-hoc-cong-nghe/"),
    ("giáo dục", "https://thanhnien.vn/giao-duc/"),
];

/// Crawler for `thanhnien.vn`.
pub struct ThanhNien;

impl SiteCrawler for ThanhNien {
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
