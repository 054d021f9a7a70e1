/*!
 * Run orchestration: load inputs, thread them through parse, diff, extract,
 * merge, and summarize, and collect every warning along the way.
 *
 * The controller owns the validated configuration. All inputs are fully
 * loaded before the core starts; everything the core produces is a value,
 * so independent videos can be processed concurrently by independent
 * controllers without shared state.
 */

use std::path::Path;

use log::{info, warn};

use crate::app_config::Config;
use crate::cutlist::{extract_cuts, keep_list, merge_cuts, parse_auto_cuts, Cut, MergedCut};
use crate::diff::{diff_blocks, DiffResult};
use crate::errors::{AppError, RunWarning};
use crate::summary::{summarize, Summary};
use crate::text_match::TextMatcher;
use crate::timing::TimingStore;
use crate::transcript::{parse_transcript, TimeRange};

/// Everything one run produces.
#[derive(Debug)]
pub struct RunReport {
    /// Final ordered, non-overlapping cut list
    pub merged: Vec<MergedCut>,
    /// Complementary keep list within `[0, total_duration]`
    pub kept: Vec<TimeRange>,
    /// Transcript-derived cuts before merging (for reporting)
    pub transcript_cuts: Vec<Cut>,
    /// Automatic cuts before merging (for reporting)
    pub automatic_cuts: Vec<Cut>,
    /// Aggregate statistics
    pub summary: Summary,
    /// Every recoverable problem encountered, in pipeline order
    pub warnings: Vec<RunWarning>,
}

/// Main controller driving one transcript pair through the pipeline.
pub struct Controller {
    config: Config,
}

impl Controller {
    /// Create a controller from a validated configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the pipeline from file paths.
    pub fn run_files(
        &self,
        original_path: &Path,
        edited_path: &Path,
        timing_path: &Path,
        auto_cuts_path: Option<&Path>,
    ) -> Result<RunReport, AppError> {
        let original = std::fs::read_to_string(original_path)?;
        let edited = std::fs::read_to_string(edited_path)?;
        let timing_json = std::fs::read_to_string(timing_path)?;
        let store = TimingStore::from_whisper_json(&timing_json)?;

        let automatic_cuts = match auto_cuts_path {
            Some(path) => parse_auto_cuts(&std::fs::read_to_string(path)?)?,
            None => Vec::new(),
        };

        self.run(&original, &edited, &store, automatic_cuts)
    }

    /// Run the pipeline over already-loaded inputs.
    pub fn run(
        &self,
        original_content: &str,
        edited_content: &str,
        store: &TimingStore,
        automatic_cuts: Vec<Cut>,
    ) -> Result<RunReport, AppError> {
        if self.config.margin < 0.0 {
            return Err(AppError::InvalidMargin(self.config.margin));
        }
        if !(0.0..=1.0).contains(&self.config.match_threshold) {
            return Err(AppError::InvalidThreshold(self.config.match_threshold));
        }

        let mut warnings = Vec::new();

        let (original_blocks, parse_warnings) = parse_transcript(original_content);
        warnings.extend(parse_warnings);
        let (edited_blocks, edited_warnings) = parse_transcript(edited_content);
        // Malformed edited blocks still participate in matching by text;
        // their warnings are reported all the same.
        warnings.extend(edited_warnings);

        info!(
            "Parsed {} original / {} edited block(s), timing record has {} word(s)",
            original_blocks.len(),
            edited_blocks.len(),
            store.word_count()
        );

        let matcher = TextMatcher::new(self.config.match_threshold);
        let diff = diff_blocks(&original_blocks, &edited_blocks, &matcher);
        warnings.extend(diff.warnings.iter().cloned());

        let transcript_cuts = self.extract(&diff, store, &mut warnings)?;

        let total_duration = store.total_duration();
        let merged = merge_cuts(
            &transcript_cuts,
            &automatic_cuts,
            self.config.margin,
            total_duration,
        )?;
        let kept = keep_list(&merged, total_duration);

        let summary = summarize(
            total_duration,
            &transcript_cuts,
            &automatic_cuts,
            &merged,
            diff.deleted_count(),
            self.config.margin,
        )?;

        if !warnings.is_empty() {
            warn!("Run finished with {} warning(s)", warnings.len());
        }
        info!(
            "Cut list: {} range(s), {:.3}s removed of {:.3}s ({:.1}% reduced)",
            merged.len(),
            summary.removed_duration,
            total_duration,
            summary.percent_reduced * 100.0
        );

        Ok(RunReport {
            merged,
            kept,
            transcript_cuts,
            automatic_cuts,
            summary,
            warnings,
        })
    }

    fn extract(
        &self,
        diff: &DiffResult,
        store: &TimingStore,
        warnings: &mut Vec<RunWarning>,
    ) -> Result<Vec<Cut>, AppError> {
        let deleted = diff.deleted_blocks();
        if deleted.is_empty() {
            info!("No deleted blocks found, nothing to cut from the transcript");
            return Ok(Vec::new());
        }

        if store.is_empty() {
            return Err(AppError::EmptyTimingRecord(deleted.len()));
        }

        let extraction = extract_cuts(&deleted, store);
        warnings.extend(extraction.warnings);
        Ok(extraction.cuts)
    }
}
