use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use logpage_core::{Config, DumpFileSource, decode_log_page};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() || !path.join("dump.txt").exists() {
            continue;
        }
        regenerate_one(&path)?;
    }

    Ok(())
}

fn regenerate_one(dir: &Path) -> Result<(), String> {
    let schema_path = dir.join("schema.h");
    let schema = fs::read_to_string(&schema_path)
        .map_err(|err| format!("failed to read {}: {}", schema_path.display(), err))?;

    let config_path = dir.join("config.json");
    let config = if config_path.exists() {
        Config::load(&config_path).map_err(|err| err.to_string())?
    } else {
        Config::default()
    };

    // Reports record the dump path relative to the case directory.
    let mut source = DumpFileSource::open(&dir.join("dump.txt")).map_err(|err| err.to_string())?;
    let mut report = decode_log_page(&schema, &mut source, &config.decode_options())
        .map_err(|err| format!("decode failed for {}: {}", dir.display(), err))?;
    report.source = "file:dump.txt".to_string();

    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    let output = dir.join("expected_report.json");
    fs::write(&output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
