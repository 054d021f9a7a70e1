/*!
 * Content-identity diff between the original and edited transcripts.
 *
 * Alignment is by normalized text, never by block index or position: editors
 * renumber blocks and collapse blank lines, so positional identity cannot be
 * trusted. Every original block is classified exactly once as Kept, Deleted,
 * or Unparseable. Edited blocks are consumed as they match so duplicate
 * takes are not double-counted.
 */

use log::{debug, warn};

use crate::errors::RunWarning;
use crate::text_match::TextMatcher;
use crate::transcript::TranscriptBlock;

/// Classification of one original block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// A matching block still exists in the edited document
    Kept,
    /// No matching block remains; the block's time range becomes a cut
    Deleted,
    /// The block's time range was malformed; excluded from cutting
    Unparseable,
}

/// One original block together with its classification.
#[derive(Debug, Clone)]
pub struct DiffEntry {
    pub block: TranscriptBlock,
    pub status: BlockStatus,
}

/// Full diff result over the original document.
#[derive(Debug)]
pub struct DiffResult {
    /// One entry per original block, in document order
    pub entries: Vec<DiffEntry>,
    /// Warnings for unparseable and empty blocks
    pub warnings: Vec<RunWarning>,
}

impl DiffResult {
    /// The blocks classified Deleted, in document order.
    pub fn deleted_blocks(&self) -> Vec<&TranscriptBlock> {
        self.entries
            .iter()
            .filter(|e| e.status == BlockStatus::Deleted)
            .map(|e| &e.block)
            .collect()
    }

    pub fn deleted_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == BlockStatus::Deleted)
            .count()
    }

    pub fn kept_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == BlockStatus::Kept)
            .count()
    }

    pub fn unparseable_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == BlockStatus::Unparseable)
            .count()
    }
}

/// An edited block available for matching.
struct Candidate {
    position: usize,
    normalized: String,
    used: bool,
}

/// Classify every original block against the edited document.
///
/// Exact normalized matches are preferred; below that, similarity at or
/// above the matcher's threshold counts. When multiple edited blocks match
/// equally, the one closest to the original block's relative position wins,
/// which keeps near-duplicate takes from cross-matching.
pub fn diff_blocks(
    original: &[TranscriptBlock],
    edited: &[TranscriptBlock],
    matcher: &TextMatcher,
) -> DiffResult {
    let mut candidates: Vec<Candidate> = edited
        .iter()
        .enumerate()
        .map(|(position, block)| Candidate {
            position,
            normalized: block.normalized.clone(),
            used: false,
        })
        .collect();

    let mut entries = Vec::with_capacity(original.len());
    let mut warnings = Vec::new();
    let mut matched_count = 0usize;

    for block in original {
        if block.is_unparseable() {
            warnings.push(RunWarning::UnparseableBlock {
                index: block.index,
                text: block.text.clone(),
            });
            entries.push(DiffEntry {
                block: block.clone(),
                status: BlockStatus::Unparseable,
            });
            continue;
        }

        if block.normalized.is_empty() {
            // Nothing cuttable; counted Kept so it never becomes a cut
            warnings.push(RunWarning::EmptyBlockText { index: block.index });
            entries.push(DiffEntry {
                block: block.clone(),
                status: BlockStatus::Kept,
            });
            continue;
        }

        let status = match take_best_candidate(&mut candidates, block, matched_count, matcher) {
            Some(position) => {
                debug!(
                    "Block {} kept (matched edited block at position {})",
                    block.index, position
                );
                matched_count += 1;
                BlockStatus::Kept
            }
            None => {
                debug!("Block {} deleted: \"{}\"", block.index, block.normalized);
                BlockStatus::Deleted
            }
        };

        entries.push(DiffEntry {
            block: block.clone(),
            status,
        });
    }

    let deleted = entries
        .iter()
        .filter(|e| e.status == BlockStatus::Deleted)
        .count();
    if deleted > 0 {
        warn!("Diff found {} deleted block(s)", deleted);
    }

    DiffResult { entries, warnings }
}

/// Find and consume the best unused edited candidate for an original block.
///
/// Returns the candidate's position in the edited document, or `None` when
/// no candidate reaches the threshold.
fn take_best_candidate(
    candidates: &mut [Candidate],
    block: &TranscriptBlock,
    matched_count: usize,
    matcher: &TextMatcher,
) -> Option<usize> {
    // Exact matches first; among equals prefer the position closest to the
    // number of originals already matched (relative document order).
    let mut exact: Option<usize> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        if candidate.used || candidate.normalized != block.normalized {
            continue;
        }
        let replace = match exact {
            Some(best_idx) => {
                position_distance(candidates[best_idx].position, matched_count)
                    > position_distance(candidate.position, matched_count)
            }
            None => true,
        };
        if replace {
            exact = Some(idx);
        }
    }

    let chosen = exact.or_else(|| {
        // Fuzzy fallback: best similarity at or above threshold, position
        // proximity breaking score ties
        let mut best: Option<(usize, f32)> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            if candidate.used {
                continue;
            }
            let score = matcher.similarity(&block.normalized, &candidate.normalized);
            if score < matcher.threshold() {
                continue;
            }
            let replace = match best {
                Some((best_idx, best_score)) => {
                    score > best_score
                        || (score == best_score
                            && position_distance(candidate.position, matched_count)
                                < position_distance(candidates[best_idx].position, matched_count))
                }
                None => true,
            };
            if replace {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    });

    chosen.map(|idx| {
        candidates[idx].used = true;
        candidates[idx].position
    })
}

fn position_distance(position: usize, expected: usize) -> usize {
    position.abs_diff(expected)
}
