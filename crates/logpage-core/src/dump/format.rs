use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::error::DumpError;
use super::layout;

/// Character column window, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl ColumnRange {
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl Default for ColumnRange {
    fn default() -> Self {
        Self {
            start: layout::PAYLOAD_START_COLUMN,
            end: layout::PAYLOAD_END_COLUMN,
        }
    }
}

/// Shape of the hex dump produced by the log source.
///
/// # Examples
/// ```
/// use logpage_core::DumpFormat;
///
/// let format: DumpFormat = serde_json::from_str(r#"{ "header_lines": 1 }"#)?;
/// assert_eq!(format.header_lines, 1);
/// assert_eq!(format.payload_columns.as_range(), 6..54);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpFormat {
    /// Lines discarded before the first payload line.
    pub header_lines: usize,
    /// Hex token window within each payload line.
    pub payload_columns: ColumnRange,
}

impl DumpFormat {
    pub fn validate(&self) -> Result<(), DumpError> {
        let ColumnRange { start, end } = self.payload_columns;
        if start >= end {
            return Err(DumpError::InvalidColumns { start, end });
        }
        Ok(())
    }
}

impl Default for DumpFormat {
    fn default() -> Self {
        Self {
            header_lines: layout::HEADER_LINES,
            payload_columns: ColumnRange::default(),
        }
    }
}
