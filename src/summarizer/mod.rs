//! Text summarization with a learned model and a deterministic fallback.
//!
//! Every document goes through the same steps:
//!
//! 1. **Prepare**: normalize and bound to [`crate::text::MAX_WORDS`] words
//! 2. **Summarize**: the learned model when available, otherwise (or when the
//!    call fails for this document) the TF-IDF extractive summarizer
//! 3. **Finalize**: normalize again and end with sentence punctuation
//!
//! The outcome records which path produced it, see [`Summary`].

pub mod batch;
pub mod extractive;
pub mod learned;

use crate::config::SummarizerConfig;
use crate::text;
use crate::utils::truncate_for_log;
use extractive::ExtractiveSummarizer;
use learned::LearnedModel;
use tracing::{error, info, warn};

/// A finalized summary tagged with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Produced by the learned model.
    Learned(String),
    /// Produced by the TF-IDF fallback, either because the model is
    /// unavailable or because it failed for this document.
    Extractive(String),
}

impl Summary {
    /// The finalized summary text, whatever path produced it.
    pub fn text(&self) -> &str {
        match self {
            Summary::Learned(text) | Summary::Extractive(text) => text,
        }
    }

    /// Consume the summary, keeping only its text.
    pub fn into_text(self) -> String {
        match self {
            Summary::Learned(text) | Summary::Extractive(text) => text,
        }
    }

    /// Path label for logs: `"learned"` or `"extractive"`.
    pub fn model(&self) -> &'static str {
        match self {
            Summary::Learned(_) => "learned",
            Summary::Extractive(_) => "extractive",
        }
    }
}

/// Per-document summarization with per-call fallback isolation.
///
/// Concurrency limits on the model belong to the model itself, see
/// [`learned::Throttled`].
pub struct Summarizer<M> {
    model: M,
    /// Availability as reported once at construction.
    use_model: bool,
    extractive: ExtractiveSummarizer,
}

impl<M: LearnedModel> Summarizer<M> {
    /// The model's availability is checked once here and never again.
    pub fn new(model: M, config: &SummarizerConfig) -> Self {
        let use_model = model.available();
        if use_model {
            info!("Using learned summarization model");
        } else {
            warn!("Learned summarization model unavailable; every item uses the extractive summarizer");
        }
        Self {
            model,
            use_model,
            extractive: ExtractiveSummarizer::new(config.sentences),
        }
    }

    /// Summarize one document.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the document in its run, used in logs
    /// * `document` - Raw title + description text
    ///
    /// # Returns
    ///
    /// A finalized [`Summary`]. A model failure for this document falls back
    /// to the extractive path for this document only.
    pub async fn summarize(&self, index: usize, document: &str) -> Summary {
        let prepared = text::prepare(document);

        if self.use_model {
            match self.model.summarize(&prepared).await {
                Ok(summary) => return Summary::Learned(text::finalize_summary(&summary)),
                Err(e) => {
                    warn!(
                        index,
                        error = %e,
                        document = %truncate_for_log(&prepared, 80),
                        "Learned summarization failed; using extractive fallback for this item"
                    );
                }
            }
        }

        let extracted = self.extract(index, prepared).await;
        Summary::Extractive(text::finalize_summary(&extracted))
    }

    /// TF-IDF scoring is CPU-bound, so it runs on the blocking pool.
    async fn extract(&self, index: usize, prepared: String) -> String {
        let extractive = self.extractive;
        let fallback = prepared.clone();
        match tokio::task::spawn_blocking(move || extractive.summarize(&prepared)).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(index, error = %e, "Extractive worker failed; keeping prepared text");
                fallback
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::SummarizeError;

    /// Echoes a marker summary; fails for documents containing `FAIL`.
    pub(crate) struct ScriptedModel {
        pub available: bool,
    }

    impl LearnedModel for ScriptedModel {
        fn available(&self) -> bool {
            self.available
        }

        async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
            if text.contains("FAIL") {
                return Err(SummarizeError::Status(500));
            }
            let head = text.split_whitespace().next().unwrap_or_default();
            Ok(format!("learned {head}"))
        }
    }

    fn config() -> SummarizerConfig {
        SummarizerConfig::default()
    }

    #[tokio::test]
    async fn test_unavailable_model_uses_extractive() {
        let summarizer = Summarizer::new(ScriptedModel { available: false }, &config());
        let summary = summarizer.summarize(0, "A S1. S2. S3. S4.").await;
        assert_eq!(summary, Summary::Extractive("A S1. S2.".to_string()));
        assert_eq!(summary.model(), "extractive");
    }

    #[tokio::test]
    async fn test_learned_summary_is_finalized() {
        let summarizer = Summarizer::new(ScriptedModel { available: true }, &config());
        let summary = summarizer.summarize(0, "Hà Nội mưa lớn. Đường ngập.").await;
        assert_eq!(summary, Summary::Learned("learned Hà.".to_string()));
    }

    #[tokio::test]
    async fn test_inference_failure_falls_back_for_that_item() {
        let summarizer = Summarizer::new(ScriptedModel { available: true }, &config());
        let document = "FAIL một. Hai ba bốn năm. Sáu.";
        let summary = summarizer.summarize(3, document).await;
        let expected = text::finalize_summary(
            &ExtractiveSummarizer::new(2).summarize(&text::prepare(document)),
        );
        assert_eq!(summary, Summary::Extractive(expected));

        let next = summarizer.summarize(4, "Tin tiếp theo.").await;
        assert!(matches!(next, Summary::Learned(_)));
    }

    #[tokio::test]
    async fn test_summary_text_accessors() {
        let summary = Summary::Learned("Xong.".to_string());
        assert_eq!(summary.text(), "Xong.");
        assert_eq!(summary.into_text(), "Xong.");
    }
}
