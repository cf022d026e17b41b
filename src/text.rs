//! Text normalization shared by ingestion and summarization.
//!
//! All functions are pure: malformed or empty input yields empty output.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Word bound applied to descriptions at ingestion and to summarizer input.
pub const MAX_WORDS: usize = 500;

// Word characters (accented Vietnamese letters included), whitespace and `. , ! ? -`.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?\-]+").expect("static regex is valid"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Compose the text (NFKC), replace disallowed character runs with a space,
/// collapse whitespace and trim.
///
/// Kept characters are word characters (accented letters included),
/// whitespace and `. , ! ? -`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("  Giá vàng «tăng»  mạnh!! "), "Giá vàng tăng mạnh!!");
/// ```
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    let filtered = DISALLOWED.replace_all(&composed, " ");
    WHITESPACE.replace_all(&filtered, " ").trim().to_string()
}

/// Keep the first `max_words` whitespace-separated tokens, joined by single spaces.
///
/// Tokens are kept as they are; the text is not re-normalized.
///
/// # Arguments
///
/// * `text` - The text to bound
/// * `max_words` - Maximum number of words to keep
///
/// # Returns
///
/// At most `max_words` whole words. No partial word is ever emitted.
pub fn truncate(text: &str, max_words: usize) -> String {
    text.split_whitespace().take(max_words).join(" ")
}

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split into trimmed, non-empty sentences (Unicode sentence boundaries).
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Input preparation for either summarizer: normalize, then bound the length.
///
/// The result holds at most [`MAX_WORDS`] words, which is the input
/// contract of both summarizers.
pub fn prepare(text: &str) -> String {
    let normalized = normalize(text);
    if word_count(&normalized) > MAX_WORDS {
        truncate(&normalized, MAX_WORDS)
    } else {
        normalized
    }
}

/// Normalize a summary and make sure it ends in `.`, `!` or `?`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(finalize_summary("Mưa lớn ở Hà Nội"), "Mưa lớn ở Hà Nội.");
/// assert_eq!(finalize_summary("Thắng rồi!"), "Thắng rồi!");
/// ```
pub fn finalize_summary(summary: &str) -> String {
    let mut cleaned = normalize(summary);
    if !cleaned.ends_with(['.', '!', '?']) {
        cleaned.push('.');
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_composes_vietnamese() {
        // "ờ" written as o + combining horn + combining grave.
        let decomposed = "tho\u{31b}\u{300}i su\u{31b}\u{323}";
        assert_eq!(normalize(decomposed), "thời sự");
    }

    #[test]
    fn test_normalize_removes_symbols_and_collapses_space() {
        assert_eq!(
            normalize("  Giá vàng «tăng» mạnh!!  (cập nhật)\n\n"),
            "Giá vàng tăng mạnh!! cập nhật"
        );
        assert_eq!(normalize("Hà Nội - 30°C, nắng."), "Hà Nội - 30 C, nắng.");
    }

    #[test]
    fn test_normalize_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("@#$%^&*"), "");
    }

    #[test]
    fn test_truncate_word_boundary() {
        let text = (1..=600).map(|i| format!("w{i}")).join(" ");
        let truncated = truncate(&text, MAX_WORDS);
        assert_eq!(word_count(&truncated), 500);
        assert!(truncated.ends_with("w500"));
    }

    #[test]
    fn test_truncate_short_text_is_rejoined() {
        assert_eq!(truncate("một  hai\tba", 10), "một hai ba");
        assert_eq!(truncate("", 10), "");
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Câu một. Câu hai! Câu ba? ");
        assert_eq!(sentences, vec!["Câu một.", "Câu hai!", "Câu ba?"]);
    }

    #[test]
    fn test_prepare_bounds_length() {
        let text = (0..700).map(|_| "từ").join(" ");
        assert_eq!(word_count(&prepare(&text)), MAX_WORDS);
    }

    #[test]
    fn test_finalize_summary_adds_period() {
        assert_eq!(finalize_summary("Thị trường chứng khoán tăng"), "Thị trường chứng khoán tăng.");
        assert_eq!(finalize_summary("Có thật không?"), "Có thật không?");
        assert_eq!(finalize_summary("Kết thúc.  "), "Kết thúc.");
    }
}
