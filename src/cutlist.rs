/*!
 * Cut ranges: extraction from deleted blocks, margin expansion, and the
 * interval-union merge.
 *
 * The merge output is the unique minimal non-overlapping cover of all input
 * ranges, so it is invariant to input order and idempotent. The keep list is
 * the gap complement of the merged cuts within `[0, total_duration]`.
 */

use serde::Deserialize;

use log::{debug, warn};

use crate::errors::{AppError, RunWarning};
use crate::timing::TimingStore;
use crate::transcript::{TimeRange, TranscriptBlock};

/// Where a cut range came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutSource {
    /// Derived from a deleted transcript block
    Transcript,
    /// Supplied by an external detector (silence, motion)
    Automatic,
}

/// A time range slated for removal. Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut {
    pub start: f64,
    pub end: f64,
    pub source: CutSource,
}

impl Cut {
    pub fn new(start: f64, end: f64, source: CutSource) -> Self {
        Self { start, end, source }
    }

    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Union of the sources that contributed to a merged cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CutSources {
    pub transcript: bool,
    pub automatic: bool,
}

impl CutSources {
    fn from_source(source: CutSource) -> Self {
        match source {
            CutSource::Transcript => Self {
                transcript: true,
                automatic: false,
            },
            CutSource::Automatic => Self {
                transcript: false,
                automatic: true,
            },
        }
    }

    fn union(self, other: Self) -> Self {
        Self {
            transcript: self.transcript || other.transcript,
            automatic: self.automatic || other.automatic,
        }
    }
}

/// One range of the final, margin-expanded, overlap-resolved cut list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedCut {
    pub start: f64,
    pub end: f64,
    pub sources: CutSources,
}

impl MergedCut {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Result of cut extraction: the cuts plus per-block lookup warnings.
#[derive(Debug)]
pub struct ExtractionResult {
    pub cuts: Vec<Cut>,
    pub warnings: Vec<RunWarning>,
}

/// Recover authoritative time ranges for deleted blocks from the timing
/// store. Blocks with no confident match are skipped with a warning; the
/// blocks' own written timestamps are never consulted.
pub fn extract_cuts(deleted: &[&TranscriptBlock], store: &TimingStore) -> ExtractionResult {
    let mut cuts = Vec::new();
    let mut warnings = Vec::new();

    for block in deleted {
        match store.lookup(&block.normalized) {
            Some(found) => {
                if found.score < 1.0 {
                    warnings.push(RunWarning::LowConfidenceMatch {
                        index: block.index,
                        score: found.score,
                    });
                }
                debug!(
                    "Block {} resolved to {:.3}s-{:.3}s",
                    block.index, found.range.start, found.range.end
                );
                cuts.push(Cut::new(
                    found.range.start,
                    found.range.end,
                    CutSource::Transcript,
                ));
            }
            None => {
                warn!(
                    "No timing match for deleted block {}: \"{}\"",
                    block.index, block.text
                );
                warnings.push(RunWarning::LookupFailed {
                    index: block.index,
                    text: block.text.clone(),
                });
            }
        }
    }

    ExtractionResult { cuts, warnings }
}

/// Merge transcript and automatic cuts into an ordered, non-overlapping
/// cut list.
///
/// Every cut is first expanded by `margin` seconds on both ends and clamped
/// to `[0, total_duration]`; degenerate ranges are dropped, the rest are
/// sorted and swept left to right, unioning any range whose start falls at
/// or before the running range's end.
pub fn merge_cuts(
    transcript_cuts: &[Cut],
    automatic_cuts: &[Cut],
    margin: f64,
    total_duration: f64,
) -> Result<Vec<MergedCut>, AppError> {
    if margin < 0.0 {
        return Err(AppError::InvalidMargin(margin));
    }

    let mut expanded: Vec<(f64, f64, CutSources)> = transcript_cuts
        .iter()
        .chain(automatic_cuts.iter())
        .filter_map(|cut| {
            let start = (cut.start - margin).max(0.0);
            let end = (cut.end + margin).min(total_duration);
            if start < end {
                Some((start, end, CutSources::from_source(cut.source)))
            } else {
                None
            }
        })
        .collect();

    expanded.sort_by(|a, b| {
        a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
    });

    let mut merged: Vec<MergedCut> = Vec::new();
    for (start, end, sources) in expanded {
        match merged.last_mut() {
            Some(last) if start <= last.end => {
                last.end = last.end.max(end);
                last.sources = last.sources.union(sources);
            }
            _ => merged.push(MergedCut {
                start,
                end,
                sources,
            }),
        }
    }

    debug!(
        "Merged {} transcript + {} automatic cut(s) into {} range(s)",
        transcript_cuts.len(),
        automatic_cuts.len(),
        merged.len()
    );

    Ok(merged)
}

/// Gap complement of the merged cut list within `[0, total_duration]`.
/// Adjacent cuts that touch exactly produce no keep segment.
pub fn keep_list(merged: &[MergedCut], total_duration: f64) -> Vec<TimeRange> {
    let mut kept = Vec::new();
    let mut cursor = 0.0f64;

    for cut in merged {
        if cut.start > cursor {
            kept.push(TimeRange::new(cursor, cut.start));
        }
        cursor = cursor.max(cut.end);
    }

    if cursor < total_duration {
        kept.push(TimeRange::new(cursor, total_duration));
    }

    kept
}

/// Automatic cutlist file entry: either `[start, end]` or an object with
/// explicit fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AutoCutEntry {
    Pair([f64; 2]),
    Range { start: f64, end: f64 },
}

/// Load an automatic cutlist from its JSON document.
///
/// Zero-length and negative ranges are dropped here with a log warning; the
/// detector output is otherwise taken as-is.
pub fn parse_auto_cuts(content: &str) -> Result<Vec<Cut>, AppError> {
    let entries: Vec<AutoCutEntry> = serde_json::from_str(content)?;

    let mut cuts = Vec::new();
    for entry in entries {
        let (start, end) = match entry {
            AutoCutEntry::Pair([start, end]) => (start, end),
            AutoCutEntry::Range { start, end } => (start, end),
        };
        if start >= end {
            warn!("Dropping degenerate automatic cut {:.3}s-{:.3}s", start, end);
            continue;
        }
        cuts.push(Cut::new(start, end, CutSource::Automatic));
    }

    Ok(cuts)
}
