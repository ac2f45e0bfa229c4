use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::decode::{ByteOrder, IntegerDecodeError, decode_group};
use crate::dump::{DumpError, DumpFormat, extract_tokens};
use crate::group::{FIXED_GROUP_LEN, GroupError, group_declared, group_fixed};
use crate::planner::{RecordLayout, plan_layout};
use crate::schema::parse_schema;
use crate::source::{LogPageRequest, LogSource, SourceError};
use crate::{FieldValue, Report, make_stub_report};

/// How the token stream is sliced into per-field groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Four tokens per field regardless of declared width.
    #[default]
    Fixed,
    /// Each field's declared size at its declared offset.
    Declared,
}

impl GroupingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Declared => "declared",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub format: DumpFormat,
    pub grouping: GroupingMode,
    pub byte_order: ByteOrder,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("log source error: {0}")]
    Source(#[from] SourceError),
    #[error("hex dump error: {0}")]
    Dump(#[from] DumpError),
    #[error("grouping error: {0}")]
    Group(#[from] GroupError),
    #[error("field '{field}': {source}")]
    Integer {
        field: String,
        source: IntegerDecodeError,
    },
    #[error("field '{field}' (#{index}) has no byte group: only {groups} groups in page")]
    MissingGroup {
        field: String,
        index: usize,
        groups: usize,
    },
}

/// Parse `schema_text`, fetch the padded page from `source` and decode every
/// declared field.
///
/// A schema without declarations yields a report with no fields and the
/// source is not queried.
///
/// # Errors
/// Returns `DecodeError` when the source fails, the dump text is malformed,
/// the page holds fewer groups than fields, or a group is not valid hex.
pub fn decode_log_page<S: LogSource>(
    schema_text: &str,
    source: &mut S,
    options: &DecodeOptions,
) -> Result<Report, DecodeError> {
    let schema = parse_schema(schema_text);
    let layout = plan_layout(&schema);
    decode_with_layout(&layout, source, options)
}

/// Decode a page for an already planned layout.
pub fn decode_with_layout<S: LogSource>(
    layout: &RecordLayout,
    source: &mut S,
    options: &DecodeOptions,
) -> Result<Report, DecodeError> {
    let mut report = make_stub_report(&source.describe(), layout, options);
    if layout.fields.is_empty() {
        warn!("schema declares no fields; nothing to decode");
        return Ok(report);
    }

    let request = LogPageRequest {
        length: layout.padded_size,
    };
    debug!(length = request.length, source = %report.source, "fetching log page");
    let text = source.fetch(&request)?;
    let tokens = extract_tokens(&text, &options.format)?;

    let groups = match options.grouping {
        GroupingMode::Fixed => group_fixed(&tokens, FIXED_GROUP_LEN),
        GroupingMode::Declared => group_declared(&tokens, layout)?,
    };
    if groups.len() < layout.fields.len() {
        let index = groups.len();
        return Err(DecodeError::MissingGroup {
            field: layout.fields[index].name.clone(),
            index,
            groups: groups.len(),
        });
    }
    if options.grouping == GroupingMode::Fixed && groups.len() > layout.fields.len() {
        debug!(
            unused = groups.len() - layout.fields.len(),
            "ignoring groups beyond the schema"
        );
    }

    for (slot, group) in layout.fields.iter().zip(&groups) {
        let value = decode_group(group, options.byte_order).map_err(|source| {
            DecodeError::Integer {
                field: slot.name.clone(),
                source,
            }
        })?;
        trace!(
            field = %slot.name,
            bytes = %group.to_hex(),
            value,
            grouping = options.grouping.as_str(),
            byte_order = options.byte_order.as_str(),
            "decoded field"
        );
        report.fields.push(FieldValue {
            name: slot.name.clone(),
            size: slot.size,
            offset: slot.offset,
            bytes: group.to_hex(),
            value,
        });
    }
    Ok(report)
}
