//! Merging per-crawler results into the crawl-stage hand-off.
//!
//! Items from different sources are never deduplicated against each other.

use crate::models::RawNewsItem;
use std::collections::HashMap;

/// Output of one crawl pass: every item, plus the same items per category.
#[derive(Debug, Default)]
pub struct CrawlResult {
    pub items: Vec<RawNewsItem>,
    /// Categories in first-seen order.
    pub by_category: Vec<(String, Vec<RawNewsItem>)>,
}

impl CrawlResult {
    /// Category labels in first-seen order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.by_category.iter().map(|(category, _)| category.as_str())
    }
}

/// Concatenate crawler outputs in invocation order and group by category.
///
/// # Arguments
///
/// * `results` - One item list per crawler, in crawler invocation order
///
/// # Returns
///
/// A [`CrawlResult`] whose `items` is the plain concatenation and whose
/// `by_category` groups those same items, preserving their order.
pub fn aggregate(results: Vec<Vec<RawNewsItem>>) -> CrawlResult {
    let items: Vec<RawNewsItem> = results.into_iter().flatten().collect();

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut by_category: Vec<(String, Vec<RawNewsItem>)> = Vec::new();
    for item in &items {
        let slot = *positions.entry(item.category.as_str()).or_insert_with(|| {
            by_category.push((item.category.clone(), Vec::new()));
            by_category.len() - 1
        });
        by_category[slot].1.push(item.clone());
    }

    CrawlResult { items, by_category }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::raw_item;

    #[test]
    fn test_concatenates_in_crawler_order() {
        let result = aggregate(vec![
            vec![raw_item("A1", "", "thời sự", "VnExpress")],
            vec![],
            vec![
                raw_item("B1", "", "thể thao", "Dân Trí"),
                raw_item("B2", "", "thời sự", "Dân Trí"),
            ],
        ]);
        let titles: Vec<&str> = result.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A1", "B1", "B2"]);
    }

    #[test]
    fn test_groups_by_first_seen_category() {
        let result = aggregate(vec![
            vec![
                raw_item("A1", "", "thế giới", "VnExpress"),
                raw_item("A2", "", "thời sự", "VnExpress"),
            ],
            vec![raw_item("B1", "", "thế giới", "VTV News")],
        ]);
        assert_eq!(result.category_names().collect::<Vec<_>>(), vec!["thế giới", "thời sự"]);
        let world: Vec<&str> = result.by_category[0].1.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(world, vec!["A1", "B1"]);
    }

    #[test]
    fn test_keeps_same_story_from_two_sources() {
        let result = aggregate(vec![
            vec![raw_item("Bão số 3", "", "thời sự", "VnExpress")],
            vec![raw_item("Bão số 3", "", "thời sự", "Tuổi Trẻ")],
        ]);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.by_category[0].1.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(vec![]);
        assert!(result.items.is_empty());
        assert!(result.by_category.is_empty());
    }
}
