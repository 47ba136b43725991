//! Trace loading and document output through the facade

use gcemit::{load_trace, write_document, Error, Exporter, MotionMode, TraceError};
use tempfile::TempDir;

const TRACE: &str = r#"[
    {"x": 0, "y": 0, "z": 0, "state": {"motion_mode": "initial"}},
    {"x": 0, "y": 0, "z": 5, "state": {"motion_mode": "rapid"}},
    {"x": 10, "y": 0, "z": 5, "i": 5, "state": {
        "motion_mode": "arc_cw", "plane": "xy", "feedrate": 300,
        "spindle_speed": 9000, "spindle_enabled": true, "spindle_clockwise": true
    }}
]"#;

#[test]
fn test_load_trace() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trace.json");
    std::fs::write(&path, TRACE).unwrap();

    let trace = load_trace(&path).unwrap();
    assert_eq!(trace.len(), 3);
    assert_eq!(trace[2].state.motion_mode, MotionMode::ArcCw);
    assert_eq!(trace[2].i, 5.0);
    assert_eq!(trace[2].rot, 1);
}

#[test]
fn test_missing_trace() {
    let dir = TempDir::new().unwrap();
    let err = load_trace(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::Trace(TraceError::Read { .. })));
}

#[test]
fn test_malformed_trace() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trace.json");
    std::fs::write(&path, r#"[{"x": 0, "y": 0, "z": 0, "state": {"plane": "xw"}}]"#).unwrap();

    let err = load_trace(&path).unwrap_err();
    assert!(err.is_trace_error());
    assert!(err.to_string().starts_with("Invalid trace"));
}

#[test]
fn test_document_json_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trace.json");
    std::fs::write(&path, TRACE).unwrap();

    let trace = load_trace(&path).unwrap();
    let document = Exporter::default().export(&trace).unwrap();

    let mut out = Vec::new();
    write_document(&document, &mut out, false).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with('\n'));
    assert_eq!(text.lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let blocks = value["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), document.len());
    assert_eq!(blocks[0][0]["kind"], "comment");
}
