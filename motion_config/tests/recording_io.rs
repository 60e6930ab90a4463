use std::fs;

use motion_config::{load_recording, load_recording_csv, load_recording_json};
use rstest::rstest;
use tempfile::tempdir;

#[rstest]
fn csv_rows_become_frames_and_blank_cells_are_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rec.csv");
    fs::write(&path, "x,y\n0.0,1.0\n0.5,\n1.0,3.0\n").unwrap();

    let frames = load_recording_csv(&path).unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0]["y"], 1.0);
    assert!(!frames[1].contains_key("y"));
    assert_eq!(frames[1]["x"], 0.5);
    assert_eq!(frames[2]["x"], 1.0);
}

#[rstest]
fn csv_rejects_duplicate_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rec.csv");
    fs::write(&path, "x,x\n1,2\n").unwrap();

    let err = load_recording_csv(&path).expect_err("duplicate header");
    assert!(format!("{err}").contains("repeats channel 'x'"));
}

#[rstest]
fn csv_reports_row_of_bad_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rec.csv");
    fs::write(&path, "x\n1.0\nabc\n").unwrap();

    let err = load_recording_csv(&path).expect_err("non-numeric cell");
    let msg = format!("{err}");
    assert!(msg.contains("row 3"), "{msg}");
    assert!(msg.contains("'x'"), "{msg}");
}

#[rstest]
fn csv_passes_nan_through_for_the_engine_to_reject() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rec.csv");
    fs::write(&path, "x\nNaN\n").unwrap();

    let frames = load_recording_csv(&path).unwrap();
    assert!(frames[0]["x"].is_nan());
}

#[rstest]
#[case("rec.json", "[{\"x\": 1.0}, {\"x\": 2.0}]")]
#[case("rec.csv", "x\n1.0\n2.0\n")]
fn load_recording_dispatches_on_extension(#[case] name: &str, #[case] body: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();

    let frames = load_recording(&path).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1]["x"], 2.0);
}

#[rstest]
fn json_missing_file_names_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = load_recording_json(&path).expect_err("missing file");
    assert!(format!("{err}").contains("nope.json"));
}
