//! Tuổi Trẻ category crawler.

use super::{CategoryMap, SiteCrawler, SiteLayout, category_map};
use crate::error::CrawlError;
use crate::models::RawNewsItem;

const LAYOUT: SiteLayout = SiteLayout {
    source: "Tuổi Trẻ",
    base_url: "https://tuoitre.vn",
    article: "div.news-item",
    title: "h3.title-news",
    title_link: "a",
    description: "div.description",
};

const CATEGORIES: &[(&str, &str)] = &[
    ("thời sự", "https://tuoitre.vn/thoi-su.htm"),
    ("thế giới", "https://tuoitre.vn/the-gioi.htm"),
    ("kinh doanh", "https://tuoitre.vn/kinh-doanh.htm"),
    ("giải trí", "https://tuoitre.vn/giai-tri.htm"),
    ("thể thao", "https://tuoitre.vn/the-thao.htm"),
    ("khoa học", "https://tuoitre.vn/khoa-hoc.htm"),
    ("giáo dục", "https://tuoitre.vn/giao-duc.htm"),
];

/// Crawler for `tuoitre.vn`.
pub struct TuoiTre;

impl SiteCrawler for TuoiTre {
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
