//! Batch summarization with bounded concurrency.
//!
//! Documents are split into contiguous batches. Up to `workers` batches run
//! at once; inside a batch documents are summarized one after another.
//! Each batch result carries its batch index and the final merge orders by
//! that index, so output order always matches input order whatever order
//! batches complete in.

use super::learned::LearnedModel;
use super::{Summarizer, Summary};
use crate::config::SummarizerConfig;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, instrument};

/// Runs a [`Summarizer`] over many documents in order-preserving batches.
///
/// # Examples
///
/// ```ignore
/// let engine = BatchSummarizationEngine::new(summarizer, &config.summarizer);
/// let summaries = engine.process(&documents).await;
/// assert_eq!(summaries.len(), documents.len());
/// ```
pub struct BatchSummarizationEngine<M> {
    summarizer: Summarizer<M>,
    /// Documents per batch; the last batch may be shorter.
    batch_size: usize,
    /// Batches in flight at once.
    workers: usize,
}

impl<M: LearnedModel> BatchSummarizationEngine<M> {
    /// `batch_size` and `workers` are clamped to at least one.
    pub fn new(summarizer: Summarizer<M>, config: &SummarizerConfig) -> Self {
        Self {
            summarizer,
            batch_size: config.batch_size.max(1),
            workers: config.workers.max(1),
        }
    }

    /// Summarize every document; the i-th output belongs to the i-th input.
    #[instrument(level = "info", skip_all, fields(total = documents.len(), batch_size = self.batch_size, workers = self.workers))]
    pub async fn process(&self, documents: &[String]) -> Vec<Summary> {
        let total = documents.len();
        let processed = AtomicUsize::new(0);
        let processed = &processed;

        let mut batches: Vec<(usize, Vec<Summary>)> = stream::iter(documents.chunks(self.batch_size).enumerate())
            .map(|(batch_index, batch)| async move {
                let offset = batch_index * self.batch_size;
                let mut summaries = Vec::with_capacity(batch.len());
                for (i, document) in batch.iter().enumerate() {
                    let summary = self.summarizer.summarize(offset + i, document).await;
                    debug!(index = offset + i, model = summary.model(), "Summarized document");
                    summaries.push(summary);
                }
                let done = processed.fetch_add(batch.len(), Ordering::SeqCst) + batch.len();
                info!(batch = batch_index, processed = done, total, "Processed batch");
                (batch_index, summaries)
            })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        batches.sort_by_key(|(batch_index, _)| *batch_index);
        batches.into_iter().flat_map(|(_, summaries)| summaries).collect()
    }
}
