/*!
 * End-to-end tests driving the full pipeline from files on disk
 */

use srtcut::app_config::Config;
use srtcut::app_controller::Controller;
use srtcut::errors::{AppError, RunWarning};
use srtcut::export::{build_auto_editor_args, format_command};

use crate::common;

fn controller_with_margin(margin: f64) -> Controller {
    Controller::new(Config {
        margin,
        ..Default::default()
    })
}

#[test]
fn test_workflow_fullScenario_shouldProduceExpectedCutAndKeepLists() {
    let dir = common::create_temp_dir().unwrap();
    let original = common::create_test_file(dir.path(), "talk.srt.orig", common::ORIGINAL_SRT).unwrap();
    let edited = common::create_test_file(dir.path(), "talk.srt", common::EDITED_SRT).unwrap();
    let timing = common::create_test_file(dir.path(), "talk.json", common::TIMING_JSON).unwrap();
    let auto = common::create_test_file(dir.path(), "silence.json", common::AUTO_CUTS_JSON).unwrap();

    let report = controller_with_margin(0.1)
        .run_files(&original, &edited, &timing, Some(auto.as_path()))
        .unwrap();

    // Deleted "um filler" (2-4s) plus the silence blip (1.0-1.2s), margin 0.1
    assert_eq!(report.merged.len(), 2);
    assert!((report.merged[0].start - 0.9).abs() < 1e-9);
    assert!((report.merged[0].end - 1.3).abs() < 1e-9);
    assert!((report.merged[1].start - 1.9).abs() < 1e-9);
    assert!((report.merged[1].end - 4.1).abs() < 1e-9);

    assert_eq!(report.kept.len(), 3);
    assert!((report.kept[2].start - 4.1).abs() < 1e-9);
    assert!((report.kept[2].end - 10.0).abs() < 1e-9);

    assert_eq!(report.summary.deleted_block_count, 1);
    assert!(report.summary.percent_reduced > 0.0);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_workflow_withoutAutoCuts_shouldCutOnlyTranscriptDeletions() {
    let dir = common::create_temp_dir().unwrap();
    let original = common::create_test_file(dir.path(), "talk.srt.orig", common::ORIGINAL_SRT).unwrap();
    let edited = common::create_test_file(dir.path(), "talk.srt", common::EDITED_SRT).unwrap();
    let timing = common::create_test_file(dir.path(), "talk.json", common::TIMING_JSON).unwrap();

    let report = controller_with_margin(0.0)
        .run_files(&original, &edited, &timing, None)
        .unwrap();

    assert_eq!(report.merged.len(), 1);
    assert!((report.merged[0].start - 2.0).abs() < 1e-9);
    assert!((report.merged[0].end - 4.0).abs() < 1e-9);
    assert!(report.merged[0].sources.transcript);
    assert!(!report.merged[0].sources.automatic);
}

#[test]
fn test_workflow_withUneditedTranscript_shouldReportNothingToCut() {
    let dir = common::create_temp_dir().unwrap();
    let original = common::create_test_file(dir.path(), "talk.srt.orig", common::ORIGINAL_SRT).unwrap();
    let edited = common::create_test_file(dir.path(), "talk.srt", common::ORIGINAL_SRT).unwrap();
    let timing = common::create_test_file(dir.path(), "talk.json", common::TIMING_JSON).unwrap();

    let report = controller_with_margin(0.1)
        .run_files(&original, &edited, &timing, None)
        .unwrap();

    assert!(report.merged.is_empty());
    assert_eq!(report.kept.len(), 1);
    assert!((report.summary.final_duration - 10.0).abs() < 1e-9);
}

#[test]
fn test_workflow_withMissingFile_shouldReturnFileError() {
    let dir = common::create_temp_dir().unwrap();
    let edited = common::create_test_file(dir.path(), "talk.srt", common::EDITED_SRT).unwrap();
    let timing = common::create_test_file(dir.path(), "talk.json", common::TIMING_JSON).unwrap();
    let missing = dir.path().join("talk.srt.orig");

    let result = controller_with_margin(0.1).run_files(&missing, &edited, &timing, None);

    assert!(matches!(result, Err(AppError::File(_))));
}

#[test]
fn test_workflow_withCorruptedOriginalBlock_shouldIsolateAndContinue() {
    // The "um filler" block has end before start; it must not become a cut
    let corrupted = common::ORIGINAL_SRT.replace(
        "00:00:02,000 --> 00:00:04,000",
        "00:00:04,000 --> 00:00:02,000",
    );
    let dir = common::create_temp_dir().unwrap();
    let original = common::create_test_file(dir.path(), "talk.srt.orig", &corrupted).unwrap();
    let edited = common::create_test_file(dir.path(), "talk.srt", common::EDITED_SRT).unwrap();
    let timing = common::create_test_file(dir.path(), "talk.json", common::TIMING_JSON).unwrap();

    let report = controller_with_margin(0.1)
        .run_files(&original, &edited, &timing, None)
        .unwrap();

    assert!(report.merged.is_empty());
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, RunWarning::UnparseableBlock { .. })));
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, RunWarning::MalformedTimeRange { .. })));
}

#[test]
fn test_workflow_reportFeedsExportArgs() {
    let dir = common::create_temp_dir().unwrap();
    let original = common::create_test_file(dir.path(), "talk.srt.orig", common::ORIGINAL_SRT).unwrap();
    let edited = common::create_test_file(dir.path(), "talk.srt", common::EDITED_SRT).unwrap();
    let timing = common::create_test_file(dir.path(), "talk.json", common::TIMING_JSON).unwrap();

    let report = controller_with_margin(0.0)
        .run_files(&original, &edited, &timing, None)
        .unwrap();

    let args = build_auto_editor_args(&dir.path().join("talk.mp4"), &report.merged, None);
    let rendered = format_command(&args);

    assert!(rendered.starts_with("auto-editor"));
    assert!(rendered.contains("--cut-out 2s,4s"));
}
