//! VTV News category crawler.

use super::{CategoryMap, SiteCrawler, SiteLayout, category_map};
use crate::error::CrawlError;
use crate::models::RawNewsItem;

const LAYOUT: SiteLayout = SiteLayout {
    source: "VTV News",
    base_url: "https://vtv.vn",
    article: "div.item-news",
    title: "h3.title",
    title_link: "a",
    description: "div.sapo",
};

const CATEGORIES: &[(&str, &str)] = &[
    ("thời sự", "https://vtv.vn/thoi-su.htm"),
    ("thế giới", "https://vtv.vn/the-gioi.htm"),
    ("kinh doanh", "https://vtv.vn/kinh-te.htm"),
    ("giải trí", "https://vtv.vn/van-hoa-giai-tri.htm"),
    ("thể thao", "https://vtv.vn/the-thao.htm"),
    ("khoa học", "https://vtv.vn/khoa-hoc-cong-nghe.htm"),
    ("giáo dục", "https://vtv.vn/giao-duc.htm"),
];

/// Crawler for `vtv.vn`.
pub struct VtvNews;

impl SiteCrawler for VtvNews {
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
