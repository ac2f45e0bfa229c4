use serde::{Deserialize, Serialize};

pub const TYPE_TAG_PREFIX: &str = "__u";
pub const TERMINATOR: char = ';';

/// Unsigned integer width class of a declared field.
///
/// # Examples
/// ```
/// use logpage_core::UintWidth;
///
/// assert_eq!(UintWidth::from_bits(16), Some(UintWidth::U16));
/// assert_eq!(UintWidth::U64.size(), 8);
/// assert_eq!(UintWidth::from_bits(128), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
}

impl UintWidth {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::U8),
            16 => Some(Self::U16),
            32 => Some(Self::U32),
            64 => Some(Self::U64),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
            Self::U64 => 64,
        }
    }

    /// Size in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }
}
