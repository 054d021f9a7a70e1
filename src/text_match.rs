/*!
 * Text normalization and similarity scoring.
 *
 * Block texts from the transcript document and word texts from the timing
 * record disagree on casing, punctuation, and whitespace, so every comparison
 * in the diff and timing lookup goes through `normalize_text` first.
 * Similarity is normalized Levenshtein distance; token overlap is kept as
 * a cheaper signal for containment-style matches in the timing store.
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize text for content comparison: lowercase, strip punctuation,
/// collapse runs of whitespace, trim.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD_REGEX.replace_all(&lowered, "");
    WHITESPACE_REGEX
        .replace_all(stripped.trim(), " ")
        .into_owned()
}

/// Similarity scorer over normalized text.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    /// Threshold for `matches` (0.0-1.0, higher = stricter)
    threshold: f32,
}

impl Default for TextMatcher {
    fn default() -> Self {
        Self { threshold: 0.8 }
    }
}

impl TextMatcher {
    /// Create a matcher with a custom threshold, clamped to [0, 1].
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether two already-normalized strings score at or above the threshold.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        self.similarity(a, b) >= self.threshold
    }

    /// Similarity between two strings (0.0-1.0), as normalized Levenshtein
    /// distance. Inputs are expected to be normalized already.
    pub fn similarity(&self, a: &str, b: &str) -> f32 {
        if a.is_empty() && b.is_empty() {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let distance = levenshtein_distance(a, b);
        let max_len = a.chars().count().max(b.chars().count());

        1.0 - (distance as f32 / max_len as f32)
    }
}

/// Fraction of tokens shared between two normalized strings, relative to the
/// longer one. 1.0 means every token of the longer side appears in the other.
pub fn token_overlap(a: &str, b: &str) -> f32 {
    let a_tokens: HashSet<&str> = a.split_whitespace().collect();
    let b_tokens: HashSet<&str> = b.split_whitespace().collect();
    let total = a.split_whitespace().count().max(b.split_whitespace().count());
    if total == 0 {
        return 0.0;
    }

    let shared = a_tokens.intersection(&b_tokens).count();

    shared as f32 / total as f32
}

/// Levenshtein distance with the two-row optimization.
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr_row[0] = i;

        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
