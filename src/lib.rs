/*!
 * # srtcut - transcript edits to timeline cuts
 *
 * A Rust library that turns a human's transcript edits into precise video
 * timeline cuts. Given the immutable word-level timing record from a
 * speech-recognition backend and an edited copy of the readable transcript,
 * it determines which blocks were deleted, recovers their authoritative time
 * ranges from the timing record (never trusting edited timestamps), merges
 * them with automatic cut ranges from an external detector, and emits one
 * ordered, non-overlapping, margin-adjusted cut list plus its keep-list
 * complement.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and validation
 * - `transcript`: Transcript document model and tolerant SRT parsing
 * - `timing`: Word-level timing record and the timing store
 * - `text_match`: Normalization and similarity scoring
 * - `diff`: Content-identity diff of original vs. edited transcripts
 * - `cutlist`: Cut extraction, margin expansion, interval merge, keep list
 * - `summary`: Aggregate run statistics
 * - `export`: Cut list handoff to auto-editor
 * - `app_controller`: Main pipeline controller
 * - `errors`: Error and warning types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod cutlist;
pub mod diff;
pub mod errors;
pub mod export;
pub mod summary;
pub mod text_match;
pub mod timing;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::{Config, ExportTarget};
pub use app_controller::{Controller, RunReport};
pub use cutlist::{Cut, CutSource, MergedCut};
pub use diff::{diff_blocks, BlockStatus, DiffResult};
pub use errors::{AppError, RunWarning};
pub use summary::Summary;
pub use timing::{TimedWord, TimingStore};
pub use transcript::{parse_transcript, TimeRange, TranscriptBlock};
