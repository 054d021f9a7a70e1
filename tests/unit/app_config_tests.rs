/*!
 * Tests for configuration loading and validation
 */

use srtcut::app_config::{Config, ExportTarget};

use crate::common;

#[test]
fn test_fromFile_withValidJson_shouldLoad() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "cutconf.json",
        r#"{"margin": 0.25, "match_threshold": 0.9, "export": "resolve"}"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert!((config.margin - 0.25).abs() < 1e-9);
    assert!((config.match_threshold - 0.9).abs() < 0.001);
    assert_eq!(config.export, Some(ExportTarget::Resolve));
}

#[test]
fn test_fromFile_withNegativeMargin_shouldReject() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "cutconf.json", r#"{"margin": -1.0}"#).unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_fromFile_withMalformedJson_shouldError() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "cutconf.json", "{oops").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_fromFileOrDefault_withMissingFile_shouldUseDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let missing = dir.path().join("nope.json");

    let config = Config::from_file_or_default(&missing).unwrap();

    assert!((config.margin - 0.1).abs() < 1e-9);
    assert_eq!(config.export, None);
}

#[test]
fn test_exportTarget_serdeRoundTrip() {
    let json = serde_json::to_string(&ExportTarget::FinalCutPro).unwrap();
    assert_eq!(json, "\"final-cut-pro\"");
    let back: ExportTarget = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ExportTarget::FinalCutPro);
}
