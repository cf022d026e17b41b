//! TF-IDF sentence scoring for model-free extractive summaries.
//!
//! Each sentence is treated as one document. Term weights follow the usual
//! smoothed formulation: raw term count times `ln((1 + n) / (1 + df)) + 1`,
//! with every sentence vector L2-normalized. A sentence scores the sum of
//! its weights. The output is fully deterministic.

use crate::text::{self, MAX_WORDS};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// Terms are runs of two or more word characters.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("static regex is valid"));

/// Vocabulary cap for the term-weight matrix.
pub const MAX_FEATURES: usize = 500;

/// Model-free summarizer selecting verbatim sentences by TF-IDF score.
///
/// The struct is `Copy` so it can be moved onto a blocking thread per call.
#[derive(Debug, Clone, Copy)]
pub struct ExtractiveSummarizer {
    /// Target sentence count `k`.
    sentences: usize,
    /// Vocabulary cap, [`MAX_FEATURES`] unless a test lowers it.
    max_features: usize,
}

impl ExtractiveSummarizer {
    /// Create a summarizer keeping `sentences` sentences per summary.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let summarizer = ExtractiveSummarizer::new(2);
    /// assert_eq!(summarizer.summarize("S1. S2. S3. S4."), "S1. S2.");
    /// ```
    pub fn new(sentences: usize) -> Self {
        Self {
            sentences,
            max_features: MAX_FEATURES,
        }
    }

    /// Select the `k` highest-scoring sentences and join them in source order.
    ///
    /// Text with `k` or fewer sentences is returned unchanged. Longer text is
    /// cut to [`MAX_WORDS`] words before scoring. Ties in score go to the
    /// earlier sentence.
    ///
    /// # Returns
    ///
    /// The selected sentences joined by single spaces, not yet finalized
    /// (see [`text::finalize_summary`]).
    pub fn summarize(&self, text: &str) -> String {
        if text::split_sentences(text).len() <= self.sentences {
            return text.to_string();
        }

        let bounded = text::truncate(text, MAX_WORDS);
        let sentences = text::split_sentences(&bounded);
        let scores = score_sentences(&sentences, self.max_features);

        let mut selected: Vec<usize> = (0..sentences.len())
            .sorted_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)))
            .take(self.sentences)
            .collect();
        selected.sort_unstable();

        selected.into_iter().map(|i| sentences[i]).join(" ")
    }
}

fn tokenize(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sum of L2-normalized TF-IDF weights per sentence.
fn score_sentences(sentences: &[&str], max_features: usize) -> Vec<f64> {
    let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s)).collect();

    let mut term_totals: HashMap<&str, usize> = HashMap::new();
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for tokens in &tokenized {
        for token in tokens {
            *term_totals.entry(token.as_str()).or_default() += 1;
        }
        for token in tokens.iter().map(String::as_str).unique() {
            *doc_freq.entry(token).or_default() += 1;
        }
    }

    // Most frequent terms first; alphabetical among equals.
    let vocabulary: HashMap<&str, usize> = term_totals
        .iter()
        .sorted_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then(ta.cmp(tb)))
        .take(max_features)
        .enumerate()
        .map(|(index, (term, _))| (*term, index))
        .collect();

    let n = sentences.len() as f64;
    let mut idf = vec![0.0; vocabulary.len()];
    for (term, &index) in &vocabulary {
        let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
        idf[index] = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
    }

    tokenized
        .iter()
        .map(|tokens| {
            // Ordered so the float sums below are identical on every call.
            let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
            for token in tokens {
                if let Some(&index) = vocabulary.get(token.as_str()) {
                    *counts.entry(index).or_default() += 1.0;
                }
            }
            let weights: Vec<f64> = counts
                .iter()
                .map(|(&index, &count)| count * idf[index])
                .collect();
            let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm == 0.0 {
                0.0
            } else {
                weights.iter().sum::<f64>() / norm
            }
        })
        .collect()
}
