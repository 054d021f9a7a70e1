/*!
 * Word-level timing record and the timing store built over it.
 *
 * The timing record is the source of truth for every extracted cut: the
 * transcript document's own timestamps are advisory and may have been
 * mangled by the editor, so cut extraction resolves time ranges exclusively
 * through `TimingStore::lookup`.
 *
 * The record arrives as WhisperX-style JSON:
 * `{"segments": [{"start", "end", "text", "words": [{"word", "start", "end"}]}]}`.
 * Segments without word lists degrade to one pseudo-word spanning the
 * segment, which keeps segment-level matching alive at coarser granularity.
 */

use serde::Deserialize;

use crate::errors::AppError;
use crate::text_match::{normalize_text, token_overlap};
use crate::transcript::TimeRange;

/// Gap between consecutive words that starts a new candidate span.
const PAUSE_THRESHOLD_SECS: f64 = 1.0;

/// Word-count cap per candidate span.
const MAX_WORDS_PER_SPAN: usize = 30;

/// Minimum word-overlap score for a fuzzy span match.
const MIN_OVERLAP_SCORE: f32 = 0.5;

/// One word of the timing record, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl TimedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WhisperDocument {
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: Option<f64>,
    end: Option<f64>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    words: Vec<WhisperWord>,
}

#[derive(Debug, Deserialize)]
struct WhisperWord {
    word: String,
    start: Option<f64>,
    end: Option<f64>,
}

/// A successful timing lookup: the recovered range and its confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingMatch {
    pub range: TimeRange,
    pub score: f32,
}

/// A candidate span of consecutive words sharing one comparison key.
#[derive(Debug, Clone)]
struct SpanEntry {
    start: f64,
    end: f64,
    normalized: String,
}

/// One normalized token of the flattened word stream, pointing back at the
/// word that produced it.
#[derive(Debug, Clone)]
struct TokenEntry {
    token: String,
    word_idx: usize,
}

/// Read-only index over the word-level timing record.
///
/// Built once per run and passed by reference wherever timestamps must be
/// recovered. Identical input always yields identical spans; ties are broken
/// by earliest start time.
#[derive(Debug)]
pub struct TimingStore {
    words: Vec<TimedWord>,
    tokens: Vec<TokenEntry>,
    spans: Vec<SpanEntry>,
}

impl TimingStore {
    /// Build the store from an ordered word sequence, grouping words into
    /// candidate spans on pauses longer than one second or every 30 words.
    pub fn build(words: Vec<TimedWord>) -> Self {
        let mut tokens = Vec::new();
        for (idx, word) in words.iter().enumerate() {
            for token in normalize_text(&word.text).split_whitespace() {
                tokens.push(TokenEntry {
                    token: token.to_string(),
                    word_idx: idx,
                });
            }
        }

        let mut spans = Vec::new();
        let mut run: Vec<&TimedWord> = Vec::new();
        for word in &words {
            if let Some(last) = run.last() {
                let gap = word.start - last.end;
                if gap > PAUSE_THRESHOLD_SECS || run.len() >= MAX_WORDS_PER_SPAN {
                    spans.push(Self::span_from_run(&run));
                    run.clear();
                }
            }
            run.push(word);
        }
        if !run.is_empty() {
            spans.push(Self::span_from_run(&run));
        }
        spans.retain(|span| !span.normalized.is_empty());

        Self {
            words,
            tokens,
            spans,
        }
    }

    /// Parse a WhisperX-style JSON document into a store.
    pub fn from_whisper_json(content: &str) -> Result<Self, AppError> {
        let document: WhisperDocument = serde_json::from_str(content)?;

        let mut words = Vec::new();
        for segment in document.segments {
            let timed: Vec<TimedWord> = segment
                .words
                .iter()
                .filter_map(|w| match (w.start, w.end) {
                    (Some(start), Some(end)) => Some(TimedWord::new(w.word.trim(), start, end)),
                    _ => None,
                })
                .collect();

            if !timed.is_empty() {
                words.extend(timed);
            } else if let (Some(start), Some(end)) = (segment.start, segment.end) {
                // No word timestamps; fall back to one pseudo-word per segment
                words.push(TimedWord::new(segment.text.trim(), start, end));
            }
        }

        Ok(Self::build(words))
    }

    fn span_from_run(run: &[&TimedWord]) -> SpanEntry {
        let text = run
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        SpanEntry {
            start: run[0].start,
            end: run[run.len() - 1].end,
            normalized: normalize_text(&text),
        }
    }

    /// Number of words in the record.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// End of the last word; the record's total covered duration.
    pub fn total_duration(&self) -> f64 {
        self.words
            .iter()
            .map(|w| w.end)
            .fold(0.0f64, |acc, end| acc.max(end))
    }

    /// Recover the authoritative time range for a normalized block text.
    ///
    /// An exact contiguous token-run match wins and returns the tightest
    /// word-level range at full confidence. Otherwise candidate spans are
    /// scored by word overlap for containment matches, best score first and
    /// earliest start on ties; scores below 0.5 return `None`.
    pub fn lookup(&self, normalized: &str) -> Option<TimingMatch> {
        if normalized.is_empty() {
            return None;
        }

        if let Some(range) = self.exact_token_run(normalized) {
            return Some(TimingMatch { range, score: 1.0 });
        }

        let mut best: Option<TimingMatch> = None;
        for span in &self.spans {
            if span.normalized == normalized {
                return Some(TimingMatch {
                    range: TimeRange::new(span.start, span.end),
                    score: 1.0,
                });
            }

            let contained = span.normalized.contains(normalized)
                || normalized.contains(&span.normalized);
            if !contained {
                continue;
            }

            let score = token_overlap(normalized, &span.normalized);
            let better = match best {
                Some(current) => score > current.score,
                None => true,
            };
            if better {
                best = Some(TimingMatch {
                    range: TimeRange::new(span.start, span.end),
                    score,
                });
            }
        }

        best.filter(|m| m.score >= MIN_OVERLAP_SCORE)
    }

    /// Earliest contiguous run of word tokens equal to the query tokens.
    fn exact_token_run(&self, normalized: &str) -> Option<TimeRange> {
        let query: Vec<&str> = normalized.split_whitespace().collect();
        if query.is_empty() || self.tokens.len() < query.len() {
            return None;
        }

        for window_start in 0..=(self.tokens.len() - query.len()) {
            let window = &self.tokens[window_start..window_start + query.len()];
            if window
                .iter()
                .zip(query.iter())
                .all(|(entry, q)| entry.token == *q)
            {
                let first = &self.words[window[0].word_idx];
                let last = &self.words[window[window.len() - 1].word_idx];
                return Some(TimeRange::new(first.start, last.end));
            }
        }

        None
    }
}
