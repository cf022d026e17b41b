//! Dân Trí category crawler. `thời sự` is served from the `xa-hoi` section.

use super::{CategoryMap, SiteCrawler, SiteLayout, category_map};
use crate::error::CrawlError;
use crate::models::RawNewsItem;

const LAYOUT: SiteLayout = SiteLayout {
    source: "Dân Trí",
    base_url: "https://dantri.com.vn",
    article: "article.article-item",
    title: "h3.article-title",
    title_link: "a",
    description: "div.article-excerpt",
};

const CATEGORIES: &[(&str, &str)] = &[
    ("thời sự", "https://dantri.com.vn/xa-hoi.htm"),
    ("thế giới", "https://dantri.com.vn/the-gioi.htm"),
    ("kinh doanh", "https://dantri.com.vn/kinh-doanh.htm"),
    ("giải trí", "https://dantri.com.vn/giai-tri.htm"),
    ("thể thao", "https://dantri.com.vn/the-thao.htm"),
    ("khoa học", "https://dantri.com.vn/khoa-hoc-cong-nghe.htm"),
    ("giáo dục", "https://dantri.com.vn/giao-duc-huong-nghiep.htm"),
];

/// Crawler for `dantri.com.vn`.
pub struct DanTri;

impl SiteCrawler for DanTri {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_article_items() {
        let html = r#"
            <div class="article list">
              <article class="article-item">
                <div class="article-thumb"><a href="/xa-hoi/anh.htm"><img src="x.jpg"></a></div>
                <div class="article-content">
                  <h3 class="article-title"><a href="/xa-hoi/cau-moi-thong-xe-20250506.htm">Cầu mới thông xe</a></h3>
                  <div class="article-excerpt">Cây cầu dài 2 km nối hai bờ sông.</div>
                </div>
              </article>
            </div>"#;
        let items = DanTri.extract(html, "thời sự").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Cầu mới thông xe");
        assert_eq!(items[0].link, "https://dantri.com.vn/xa-hoi/cau-moi-thong-xe-20250506.htm");
        assert_eq!(items[0].description, "Cây cầu dài 2 km nối hai bờ sông.");
    }
}
