//! logpage core library for decoding device log pages.
//!
//! This crate implements the decode pipeline used by the CLI: a schema of
//! `__uN name;` declarations is planned into a byte layout, the padded page is
//! fetched from a [`LogSource`], the hex dump text is tokenized, tokens are
//! grouped per field and every group is decoded into an unsigned integer.
//! Parsing is side-effect free; process spawning and file access are isolated
//! in `source` modules.
//!
//! Invariants:
//! - Field order in the report is schema declaration order.
//! - The page length requested from the source is always a power of two.
//! - Malformed dump text fails with a descriptive error, never a panic.
//!
//! # Examples
//! ```
//! use logpage_core::{DecodeOptions, FnSource, decode_log_page};
//!
//! let dump = "Device:nvme1n1 log-id:192 namespace-id:0x1\n\
//!        0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f\n\
//! 0000: 01 00 00 00 02 00 00 00                         \"........\"\n";
//! let mut source = FnSource::new(|_request: &logpage_core::LogPageRequest| Ok(dump.to_string()));
//!
//! let report = decode_log_page("__u32 a; __u16 b;", &mut source, &DecodeOptions::default())?;
//! assert_eq!(report.fields[0].value, 1);
//! assert_eq!(report.fields[1].value, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod decode;
pub mod dump;
pub mod group;
mod pipeline;
pub mod planner;
pub mod schema;
mod source;

pub use config::{Config, ConfigError};
pub use decode::{ByteOrder, IntegerDecodeError, decode_group};
pub use dump::{ColumnRange, DumpError, DumpFormat, HexToken, extract_tokens};
pub use group::{ByteGroup, FIXED_GROUP_LEN, GroupError, group_declared, group_fixed};
pub use pipeline::{DecodeError, DecodeOptions, GroupingMode, decode_log_page, decode_with_layout};
pub use planner::{FieldSlot, RecordLayout, byte_size_for_bits, next_power_of_two, plan_layout};
pub use schema::{FieldDecl, Schema, UintWidth, parse_schema};
pub use source::{
    DumpFileSource, FnSource, LogPageRequest, LogSource, NvmeCliSource, NvmeConfig, SourceError,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used until the caller stamps the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";
/// Width of the name column in text output.
pub const NAME_COLUMN_WIDTH: usize = 20;

/// Decoded log page with fields in declaration order.
///
/// # Examples
/// ```
/// use logpage_core::{DecodeOptions, RecordLayout, make_stub_report};
///
/// let layout = RecordLayout::default();
/// let report = make_stub_report("file:dump.txt", &layout, &DecodeOptions::default());
/// assert_eq!(report.report_version, logpage_core::REPORT_VERSION);
/// assert!(report.fields.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the decode.
    pub generated_at: String,
    /// Human-readable description of the log source.
    pub source: String,
    /// Record sizes derived from the schema.
    pub layout: LayoutSummary,
    /// Grouping mode used to slice the token stream.
    pub grouping: GroupingMode,
    /// Byte order used to interpret each group.
    pub byte_order: ByteOrder,
    /// Decoded fields in declaration order.
    pub fields: Vec<FieldValue>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "logpage").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Sizes computed by the layout planner.
///
/// # Examples
/// ```
/// use logpage_core::LayoutSummary;
///
/// let summary = LayoutSummary {
///     total_size: 6,
///     padded_size: 8,
/// };
/// assert!(summary.padded_size.is_power_of_two());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSummary {
    /// Sum of all declared field sizes in bytes.
    pub total_size: usize,
    /// Page length requested from the source.
    pub padded_size: usize,
}

/// One decoded field.
///
/// `size` and `offset` describe the declaration; `bytes` is the group that was
/// actually decoded, which differs from the declaration in fixed grouping mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub size: usize,
    pub offset: usize,
    /// Lower-case hex of the decoded group, in page order.
    pub bytes: String,
    pub value: u64,
}

impl Report {
    /// Render one `name: value` line per field.
    ///
    /// # Examples
    /// ```
    /// use logpage_core::{DecodeOptions, FieldValue, RecordLayout, make_stub_report};
    ///
    /// let mut report = make_stub_report("test", &RecordLayout::default(), &DecodeOptions::default());
    /// report.fields.push(FieldValue {
    ///     name: "a".to_string(),
    ///     size: 4,
    ///     offset: 0,
    ///     bytes: "01000000".to_string(),
    ///     value: 1,
    /// });
    /// assert_eq!(report.render_text(), "a                   : 1\n");
    /// ```
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for field in &self.fields {
            let _ = writeln!(out, "{}", format_field_line(&field.name, field.value));
        }
        out
    }
}

/// Format a single output line: the name left-justified in a fixed-width
/// column, a colon, and the decimal value.
pub fn format_field_line(name: &str, value: u64) -> String {
    format!("{name:<width$}: {value}", width = NAME_COLUMN_WIDTH)
}

/// Build a report with base fields filled and no decoded values.
pub fn make_stub_report(source: &str, layout: &RecordLayout, options: &DecodeOptions) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "logpage".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        source: source.to_string(),
        layout: LayoutSummary {
            total_size: layout.total_size,
            padded_size: layout.padded_size,
        },
        grouping: options.grouping,
        byte_order: options.byte_order,
        fields: vec![],
    }
}
