/*!
 * Error and warning types for the srtcut application.
 *
 * Fatal errors use thiserror enums. Per-block problems (malformed blocks,
 * failed timing lookups) are never fatal: they are collected as `RunWarning`
 * values and returned alongside the result, so a single corrupted block
 * cannot prevent cuts from being computed for the rest of the transcript.
 */

use thiserror::Error;

/// Errors that stop a run before any cuts are produced.
#[derive(Error, Debug)]
pub enum AppError {
    /// Margin must be non-negative; rejected before any processing
    #[error("Invalid margin: {0} (must be >= 0)")]
    InvalidMargin(f64),

    /// Similarity threshold outside [0, 1]
    #[error("Invalid match threshold: {0} (must be in 0.0..=1.0)")]
    InvalidThreshold(f32),

    /// The timing record is empty but the diff found deletions to extract
    #[error("Timing record is empty but {0} deleted block(s) need timestamps")]
    EmptyTimingRecord(usize),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Malformed JSON input (timing record or automatic cutlist)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

/// Recoverable per-block problems, reported at the end of the run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWarning {
    /// A transcript block had a malformed or non-monotonic time range
    MalformedTimeRange {
        /// Block index as written (or assigned) in the document
        index: usize,
        /// The offending timestamp line
        line: String,
    },
    /// A block group had no recognizable timestamp line at all
    MissingTimeRange { index: usize },
    /// An unparseable block was excluded from diff classification
    UnparseableBlock { index: usize, text: String },
    /// A block's text normalized to nothing; counted Kept
    EmptyBlockText { index: usize },
    /// A deleted block's text had no confident match in the timing record
    LookupFailed { index: usize, text: String },
    /// A block matched the timing record only below full confidence
    LowConfidenceMatch { index: usize, score: f32 },
}

impl std::fmt::Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunWarning::MalformedTimeRange { index, line } => {
                write!(f, "Block {}: malformed time range '{}'", index, line)
            }
            RunWarning::MissingTimeRange { index } => {
                write!(f, "Block {}: no timestamp line found", index)
            }
            RunWarning::UnparseableBlock { index, text } => {
                write!(
                    f,
                    "Block {}: unparseable; excluded from cut extraction: \"{}\"",
                    index,
                    truncated(text)
                )
            }
            RunWarning::EmptyBlockText { index } => {
                write!(f, "Block {}: text is empty after normalization", index)
            }
            RunWarning::LookupFailed { index, text } => {
                write!(
                    f,
                    "Block {}: no confident match in timing record, skipping cut: \"{}\"",
                    index,
                    truncated(text)
                )
            }
            RunWarning::LowConfidenceMatch { index, score } => {
                write!(f, "Block {}: matched timing record at {:.2} confidence", index, score)
            }
        }
    }
}

fn truncated(text: &str) -> String {
    const MAX: usize = 60;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let short: String = text.chars().take(MAX).collect();
        format!("{}...", short)
    }
}
