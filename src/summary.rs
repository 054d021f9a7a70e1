/*!
 * Aggregate statistics over a finished run.
 *
 * The reporter is a pure function of the pre-merge cut lists and the merged
 * result. Per-source durations are measured with the same margin expansion
 * the merge applied, so overlap between sources is attributed to both for
 * reporting but only subtracted once from the final duration.
 */

use serde::Serialize;

use crate::cutlist::{merge_cuts, keep_list, Cut, MergedCut};
use crate::errors::AppError;

/// Read-only statistics snapshot for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Total input duration in seconds
    pub total_duration: f64,
    /// Duration removed attributable to transcript edits (margin-expanded)
    pub transcript_cut_duration: f64,
    /// Duration removed attributable to the automatic detector (margin-expanded)
    pub automatic_cut_duration: f64,
    /// Duration claimed by both sources
    pub overlap_duration: f64,
    /// Total duration removed by the merged cut list
    pub removed_duration: f64,
    /// Duration surviving into the export
    pub final_duration: f64,
    /// `1 - final/total`, in [0, 1]
    pub percent_reduced: f64,
    /// Number of blocks the diff classified Deleted
    pub deleted_block_count: usize,
    /// Number of ranges in the merged cut list
    pub merged_cut_count: usize,
}

/// Compute the run summary.
///
/// `transcript_cuts` and `automatic_cuts` are the pre-merge lists; `merged`
/// is the final merge output for the same margin.
pub fn summarize(
    total_duration: f64,
    transcript_cuts: &[Cut],
    automatic_cuts: &[Cut],
    merged: &[MergedCut],
    deleted_block_count: usize,
    margin: f64,
) -> Result<Summary, AppError> {
    let transcript_only = merge_cuts(transcript_cuts, &[], margin, total_duration)?;
    let automatic_only = merge_cuts(automatic_cuts, &[], margin, total_duration)?;

    let transcript_cut_duration = covered(&transcript_only);
    let automatic_cut_duration = covered(&automatic_only);
    let removed_duration = covered(merged);

    // Inclusion-exclusion: anything counted by both sources but removed once
    let overlap_duration =
        (transcript_cut_duration + automatic_cut_duration - removed_duration).max(0.0);

    let final_duration: f64 = keep_list(merged, total_duration)
        .iter()
        .map(|range| range.duration())
        .sum();

    let percent_reduced = if total_duration > 0.0 {
        (1.0 - final_duration / total_duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Ok(Summary {
        total_duration,
        transcript_cut_duration,
        automatic_cut_duration,
        overlap_duration,
        removed_duration,
        final_duration,
        percent_reduced,
        deleted_block_count,
        merged_cut_count: merged.len(),
    })
}

fn covered(cuts: &[MergedCut]) -> f64 {
    cuts.iter().map(|c| c.duration()).sum()
}
