//! JSON configuration for the log source, dump format and decode modes.
//!
//! Every section is optional; missing values fall back to the nvme-cli
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::ByteOrder;
use crate::dump::{DumpError, DumpFormat};
use crate::pipeline::{DecodeOptions, GroupingMode};
use crate::source::NvmeConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid dump format: {0}")]
    Format(#[from] DumpError),
}

/// Top-level configuration.
///
/// # Examples
/// ```
/// use logpage_core::{Config, GroupingMode};
///
/// let config = Config::from_json_str(r#"{ "grouping": "declared", "nvme": { "sudo": false } }"#)?;
/// assert_eq!(config.grouping, GroupingMode::Declared);
/// assert!(!config.nvme.sudo);
/// assert_eq!(config.nvme.device, "/dev/nvme1n1");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub nvme: NvmeConfig,
    pub format: DumpFormat,
    pub grouping: GroupingMode,
    pub byte_order: ByteOrder,
}

impl Config {
    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.format.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            format: self.format,
            grouping: self.grouping,
            byte_order: self.byte_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{Config, ConfigError};
    use crate::decode::ByteOrder;
    use crate::pipeline::GroupingMode;

    #[test]
    fn empty_object_uses_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.nvme.log_id, 0xc0);
        assert_eq!(config.format.header_lines, 2);
    }

    #[test]
    fn full_config() {
        let config = Config::from_json_str(
            r#"{
                "nvme": { "program": "/usr/sbin/nvme", "device": "/dev/nvme0n1", "log_id": 2, "namespace": 0, "sudo": false },
                "format": { "header_lines": 1, "payload_columns": { "start": 8, "end": 56 } },
                "grouping": "declared",
                "byte_order": "big"
            }"#,
        )
        .unwrap();
        assert_eq!(config.nvme.program, "/usr/sbin/nvme");
        assert_eq!(config.nvme.log_id, 2);
        assert_eq!(config.format.payload_columns.as_range(), 8..56);

        let options = config.decode_options();
        assert_eq!(options.grouping, GroupingMode::Declared);
        assert_eq!(options.byte_order, ByteOrder::Big);
        assert_eq!(options.format.header_lines, 1);
    }

    #[test]
    fn unknown_grouping_rejected() {
        assert!(Config::from_json_str(r#"{ "grouping": "sparse" }"#).is_err());
    }

    #[test]
    fn load_rejects_invalid_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "format": {{ "payload_columns": {{ "start": 6, "end": 6 }} }} }}"#
        )
        .unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)));
    }

    #[test]
    fn load_reports_parse_error_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
