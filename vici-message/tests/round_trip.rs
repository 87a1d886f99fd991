use std::path::PathBuf;

use pretty_assertions::assert_eq;
use vici_message::{parse, parse_file, write, write_file};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parse_write_parse_round_trip_preserves_tree_shape() {
    let first = parse_file(&fixture("fixtures/load-conn.json")).expect("initial parse");

    let written = write(&first).expect("write should succeed");
    let second = parse(&written).expect("re-parse should succeed");

    assert_eq!(first, second);
}

#[test]
fn parse_and_write_file_round_trip() {
    let out_dir = tempfile::tempdir().expect("tempdir should be created");
    let out_path = out_dir.path().join("roundtrip.json");

    let msg = parse_file(&fixture("fixtures/load-conn.json")).expect("parse should succeed");
    write_file(&msg, &out_path).expect("write_file should succeed");

    let reparsed = parse_file(&out_path).expect("parse_file should succeed");
    assert_eq!(msg, reparsed);
}
