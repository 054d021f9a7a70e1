/*!
 * Tests for margin expansion, interval merge, and the keep list
 */

use srtcut::cutlist::{keep_list, merge_cuts, parse_auto_cuts, Cut, CutSource};

fn transcript_cut(start: f64, end: f64) -> Cut {
    Cut::new(start, end, CutSource::Transcript)
}

fn automatic_cut(start: f64, end: f64) -> Cut {
    Cut::new(start, end, CutSource::Automatic)
}

#[test]
fn test_merge_withAdjacentAfterMargin_shouldJoinRanges() {
    // 0.2s apart; 0.1s margin on both sides makes them touch
    let cuts = vec![transcript_cut(1.0, 2.0), transcript_cut(2.2, 3.0)];

    let merged = merge_cuts(&cuts, &[], 0.1, 10.0).unwrap();

    assert_eq!(merged.len(), 1);
    assert!((merged[0].start - 0.9).abs() < 1e-9);
    assert!((merged[0].end - 3.1).abs() < 1e-9);
}

#[test]
fn test_merge_mergingMergedOutputAgain_shouldBeStable() {
    let cuts = vec![
        transcript_cut(0.5, 2.0),
        automatic_cut(1.0, 3.0),
        transcript_cut(7.0, 8.0),
    ];

    let once = merge_cuts(&cuts, &[], 0.25, 10.0).unwrap();
    let as_cuts: Vec<Cut> = once
        .iter()
        .map(|m| transcript_cut(m.start, m.end))
        .collect();
    let twice = merge_cuts(&as_cuts, &[], 0.0, 10.0).unwrap();

    assert_eq!(once.len(), twice.len());
    for (a, b) in once.iter().zip(twice.iter()) {
        assert!((a.start - b.start).abs() < 1e-9);
        assert!((a.end - b.end).abs() < 1e-9);
    }
}

#[test]
fn test_merge_swappingArguments_shouldYieldSameCover() {
    let a = vec![transcript_cut(1.0, 2.5), transcript_cut(6.0, 6.5)];
    let b = vec![automatic_cut(2.0, 4.0)];

    let ab = merge_cuts(&a, &b, 0.2, 10.0).unwrap();
    let ba = merge_cuts(&b, &a, 0.2, 10.0).unwrap();

    assert_eq!(ab.len(), ba.len());
    for (x, y) in ab.iter().zip(ba.iter()) {
        assert!((x.start - y.start).abs() < 1e-9);
        assert!((x.end - y.end).abs() < 1e-9);
        assert_eq!(x.sources, y.sources);
    }
}

#[test]
fn test_merge_sourcesUnion_whenRangesFromBothSidesOverlap() {
    let merged = merge_cuts(
        &[transcript_cut(2.0, 4.0)],
        &[automatic_cut(3.9, 4.5)],
        0.0,
        10.0,
    )
    .unwrap();

    assert_eq!(merged.len(), 1);
    assert!(merged[0].sources.transcript && merged[0].sources.automatic);
}

#[test]
fn test_merge_outputIsStrictlyOrdered() {
    let cuts = vec![
        automatic_cut(8.0, 8.4),
        transcript_cut(0.2, 0.4),
        automatic_cut(4.0, 4.2),
        transcript_cut(2.0, 2.4),
    ];

    let merged = merge_cuts(&cuts, &[], 0.05, 10.0).unwrap();

    for pair in merged.windows(2) {
        assert!(pair[0].start < pair[1].start);
        assert!(pair[0].end <= pair[1].start);
    }
}

#[test]
fn test_merge_marginClampAtStart_shouldNeverGoNegative() {
    let merged = merge_cuts(&[transcript_cut(0.05, 1.0)], &[], 0.25, 10.0).unwrap();
    assert!(merged[0].start >= 0.0);
    assert!((merged[0].start - 0.0).abs() < 1e-9);
}

#[test]
fn test_keepList_withTouchingCuts_shouldEmitNoEmptySegment() {
    let merged = merge_cuts(
        &[transcript_cut(0.0, 5.0)],
        &[automatic_cut(5.0, 10.0)],
        0.0,
        10.0,
    )
    .unwrap();

    // The two cuts fuse at 5.0, leaving nothing to keep
    assert_eq!(merged.len(), 1);
    assert!(keep_list(&merged, 10.0).is_empty());
}

#[test]
fn test_parseAutoCuts_roundTripThroughMerge() {
    let cuts = parse_auto_cuts("[[1.0, 1.2], [1.1, 1.4]]").unwrap();

    let merged = merge_cuts(&[], &cuts, 0.0, 10.0).unwrap();

    assert_eq!(merged.len(), 1);
    assert!((merged[0].start - 1.0).abs() < 1e-9);
    assert!((merged[0].end - 1.4).abs() < 1e-9);
    assert!(merged[0].sources.automatic);
    assert!(!merged[0].sources.transcript);
}
