//! Summarize stage: raw items in, summarized items out.

use crate::models::{RawNewsItem, SummarizedNewsItem};
use crate::summarizer::Summary;
use crate::summarizer::batch::BatchSummarizationEngine;
use crate::summarizer::learned::LearnedModel;
use tracing::{info, instrument};

/// Summarize `items` in order. Each item's document is its title, plus its
/// description when it has one.
#[instrument(level = "info", skip_all, fields(items = items.len()))]
pub async fn summarize_items<M: LearnedModel>(
    engine: &BatchSummarizationEngine<M>,
    items: Vec<RawNewsItem>,
) -> Vec<SummarizedNewsItem> {
    let documents: Vec<String> = items.iter().map(RawNewsItem::document).collect();
    let summaries = engine.process(&documents).await;

    let learned = summaries.iter().filter(|s| matches!(s, Summary::Learned(_))).count();
    let extractive = summaries.len() - learned;
    let empty = summaries.iter().filter(|s| s.text().trim_end_matches('.').is_empty()).count();
    info!(learned, extractive, empty, "Summarization finished");

    items
        .into_iter()
        .zip(summaries)
        .map(|(item, summary)| SummarizedNewsItem::from_raw(item, summary.into_text()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummarizerConfig;
    use crate::models::raw_item;
    use crate::summarizer::Summarizer;
    use crate::summarizer::tests::ScriptedModel;

    fn engine(available: bool) -> BatchSummarizationEngine<ScriptedModel> {
        let config = SummarizerConfig {
            batch_size: 2,
            workers: 2,
            ..SummarizerConfig::default()
        };
        BatchSummarizationEngine::new(Summarizer::new(ScriptedModel { available }, &config), &config)
    }

    #[tokio::test]
    async fn test_extractive_end_to_end() {
        let items = vec![raw_item("A", "S1. S2. S3. S4.", "thời sự", "VnExpress")];
        let out = summarize_items(&engine(false), items).await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].summary, "A S1. S2.");
        assert!(out[0].summary.ends_with('.'));
        assert_eq!(out[0].description, "S1. S2. S3. S4.");
    }

    #[tokio::test]
    async fn test_items_keep_order_and_metadata() {
        let items: Vec<RawNewsItem> = (0..5)
            .map(|i| raw_item(&format!("Tin {i}"), "", "thể thao", "Dân Trí"))
            .collect();
        let links: Vec<String> = items.iter().map(|i| i.link.clone()).collect();

        let out = summarize_items(&engine(true), items).await;
        let out_links: Vec<String> = out.iter().map(|i| i.link.clone()).collect();
        assert_eq!(out_links, links);
        for item in &out {
            assert_eq!(item.summary, "learned Tin.");
            assert_eq!(item.category, "thể thao");
            assert_eq!(item.source, "Dân Trí");
        }
    }

    #[tokio::test]
    async fn test_empty_items() {
        assert!(summarize_items(&engine(true), Vec::new()).await.is_empty());
    }
}
