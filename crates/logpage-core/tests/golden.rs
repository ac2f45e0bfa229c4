use std::fs;
use std::path::{Path, PathBuf};

use logpage_core::{Config, DumpFileSource, Report, decode_log_page};

fn golden_dir(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join(dir)
}

fn load_expected_report(dir: &str) -> Report {
    let expected_path = golden_dir(dir).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn load_config(dir: &str) -> Config {
    let path = golden_dir(dir).join("config.json");
    if path.exists() {
        Config::load(&path).expect("load config.json")
    } else {
        Config::default()
    }
}

fn run_golden(dir: &str) {
    let root = golden_dir(dir);
    let schema = fs::read_to_string(root.join("schema.h")).expect("read schema.h");
    let mut source = DumpFileSource::open(&root.join("dump.txt")).expect("open dump.txt");
    let expected = load_expected_report(dir);

    let options = load_config(dir).decode_options();
    let mut actual = decode_log_page(&schema, &mut source, &options).expect("decode log page");
    actual.generated_at = expected.generated_at.clone();
    actual.source = expected.source.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_vsmart() {
    run_golden("vsmart");
}

#[test]
fn golden_mixed_width_declared() {
    run_golden("mixed_width_declared");
}

#[test]
fn golden_big_endian() {
    run_golden("big_endian");
}

#[test]
fn golden_vsmart_copy_is_truncated_to_four_bytes() {
    let report = load_expected_report("vsmart");
    let copy = report.fields.last().expect("copy field");
    assert_eq!(copy.size, 8);
    assert_eq!(copy.bytes.len(), 8);
}

#[test]
fn golden_vsmart_text_output() {
    let report = load_expected_report("vsmart");
    let text = report.render_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "percentage_used     : 3");
    assert_eq!(lines[3], "gc_trigger_count_convftl: 17");
}
