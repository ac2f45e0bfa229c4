//! Byte layout of a record: per-field sizes, prefix-sum offsets, total size
//! and the power-of-two length requested from the log source.

use tracing::debug;

use crate::schema::{Schema, UintWidth};

/// A field placed at its declared byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    pub name: String,
    pub size: usize,
    pub offset: usize,
}

/// Planned record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    pub fields: Vec<FieldSlot>,
    pub total_size: usize,
    pub padded_size: usize,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            total_size: 0,
            padded_size: next_power_of_two(0),
        }
    }
}

/// Byte size of an unsigned field of `bits` bits; unsupported widths map to 0.
///
/// # Examples
/// ```
/// use logpage_core::byte_size_for_bits;
///
/// assert_eq!(byte_size_for_bits(32), 4);
/// assert_eq!(byte_size_for_bits(12), 0);
/// ```
pub fn byte_size_for_bits(bits: u32) -> usize {
    UintWidth::from_bits(bits).map_or(0, UintWidth::size)
}

/// Smallest power of two greater than or equal to `n`.
///
/// Zero maps to 1 so the requested page length is never empty.
///
/// # Examples
/// ```
/// use logpage_core::next_power_of_two;
///
/// assert_eq!(next_power_of_two(0), 1);
/// assert_eq!(next_power_of_two(5), 8);
/// assert_eq!(next_power_of_two(16), 16);
/// ```
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Place every schema field at the running sum of the preceding sizes.
pub fn plan_layout(schema: &Schema) -> RecordLayout {
    let mut offset = 0;
    let fields: Vec<FieldSlot> = schema
        .fields
        .iter()
        .map(|decl| {
            let size = byte_size_for_bits(decl.bits());
            let slot = FieldSlot {
                name: decl.name.clone(),
                size,
                offset,
            };
            offset += size;
            slot
        })
        .collect();

    let total_size = offset;
    let padded_size = next_power_of_two(total_size);
    debug!(fields = fields.len(), total_size, padded_size, "planned layout");

    RecordLayout {
        fields,
        total_size,
        padded_size,
    }
}
