//! Partitioning of the token stream into per-field byte groups.
//!
//! Fixed grouping slices the stream into 4-token windows regardless of the
//! declared field widths, one window per field in order. Declared grouping
//! takes each field's own `offset..offset + size` range from the planned
//! layout.

use thiserror::Error;
use tracing::debug;

use crate::dump::HexToken;
use crate::planner::RecordLayout;

/// Tokens per group in fixed grouping mode.
pub const FIXED_GROUP_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("page too short for field '{field}': need {needed} bytes, got {actual}")]
    TooShort {
        field: String,
        needed: usize,
        actual: usize,
    },
}

/// Ordered hex tokens decoded as one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteGroup<'a> {
    tokens: &'a [HexToken],
}

impl<'a> ByteGroup<'a> {
    pub fn new(tokens: &'a [HexToken]) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &'a [HexToken] {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined without separators, lower-cased.
    pub fn to_hex(&self) -> String {
        self.tokens
            .iter()
            .map(|token| token.as_str().to_ascii_lowercase())
            .collect()
    }
}

/// Consecutive groups of `len` tokens; a shorter trailing remainder is dropped.
///
/// # Examples
/// ```
/// use logpage_core::{HexToken, group_fixed};
///
/// let tokens: Vec<HexToken> = ["01", "00", "00", "00", "02", "00"]
///     .into_iter()
///     .map(HexToken::new)
///     .collect();
/// let groups = group_fixed(&tokens, 4);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].to_hex(), "01000000");
/// ```
pub fn group_fixed(tokens: &[HexToken], len: usize) -> Vec<ByteGroup<'_>> {
    if len == 0 {
        return Vec::new();
    }
    let groups: Vec<_> = tokens.chunks_exact(len).map(ByteGroup::new).collect();
    debug!(
        tokens = tokens.len(),
        groups = groups.len(),
        dropped = tokens.len() % len,
        "grouped tokens in fixed windows"
    );
    groups
}

/// One group per layout field, taken at the field's offset and size.
///
/// # Errors
/// Returns `GroupError::TooShort` when the tokens end before a field does.
pub fn group_declared<'a>(
    tokens: &'a [HexToken],
    layout: &RecordLayout,
) -> Result<Vec<ByteGroup<'a>>, GroupError> {
    let groups = layout
        .fields
        .iter()
        .map(|slot| {
            let end = slot.offset + slot.size;
            tokens
                .get(slot.offset..end)
                .map(ByteGroup::new)
                .ok_or_else(|| GroupError::TooShort {
                    field: slot.name.clone(),
                    needed: end,
                    actual: tokens.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        tokens = tokens.len(),
        groups = groups.len(),
        "grouped tokens by declared layout"
    );
    Ok(groups)
}
