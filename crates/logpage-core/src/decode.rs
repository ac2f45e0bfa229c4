//! Unsigned integer decoding of byte groups.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::group::ByteGroup;

/// Widest group that fits the decoded representation.
pub const MAX_GROUP_BYTES: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Least-significant byte first.
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Little => "little",
            Self::Big => "big",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum IntegerDecodeError {
    #[error("invalid hex in group '{hex}': {source}")]
    InvalidHex {
        hex: String,
        source: hex::FromHexError,
    },
    #[error("empty byte group")]
    Empty,
    #[error("byte group too wide: {len} bytes, at most 8 supported")]
    TooWide { len: usize },
}

/// Decode a group of hex tokens as an unsigned integer.
///
/// # Examples
/// ```
/// use logpage_core::{ByteGroup, ByteOrder, HexToken, decode_group};
///
/// let tokens: Vec<HexToken> = ["ff", "ff", "ff", "ff"].into_iter().map(HexToken::new).collect();
/// let value = decode_group(&ByteGroup::new(&tokens), ByteOrder::Little)?;
/// assert_eq!(value, 4_294_967_295);
/// # Ok::<(), logpage_core::IntegerDecodeError>(())
/// ```
///
/// # Errors
/// Returns `IntegerDecodeError` for non-hex tokens, an empty group, or a
/// group wider than eight bytes.
pub fn decode_group(group: &ByteGroup<'_>, order: ByteOrder) -> Result<u64, IntegerDecodeError> {
    let hex = group.to_hex();
    let bytes = hex::decode(&hex).map_err(|source| IntegerDecodeError::InvalidHex {
        hex: hex.clone(),
        source,
    })?;
    bytes_to_u64(&bytes, order)
}

/// Interpret up to eight bytes as an unsigned integer.
pub fn bytes_to_u64(bytes: &[u8], order: ByteOrder) -> Result<u64, IntegerDecodeError> {
    if bytes.is_empty() {
        return Err(IntegerDecodeError::Empty);
    }
    if bytes.len() > MAX_GROUP_BYTES {
        return Err(IntegerDecodeError::TooWide { len: bytes.len() });
    }

    let mut buf = [0u8; MAX_GROUP_BYTES];
    Ok(match order {
        ByteOrder::Little => {
            buf[..bytes.len()].copy_from_slice(bytes);
            u64::from_le_bytes(buf)
        }
        ByteOrder::Big => {
            buf[MAX_GROUP_BYTES - bytes.len()..].copy_from_slice(bytes);
            u64::from_be_bytes(buf)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{ByteOrder, IntegerDecodeError, bytes_to_u64, decode_group};
    use crate::dump::HexToken;
    use crate::group::ByteGroup;

    fn decode(hex: &str, order: ByteOrder) -> Result<u64, IntegerDecodeError> {
        let tokens: Vec<HexToken> = hex.split_whitespace().map(HexToken::new).collect();
        decode_group(&ByteGroup::new(&tokens), order)
    }

    #[test]
    fn little_endian_one() {
        assert_eq!(decode("01 00 00 00", ByteOrder::Little), Ok(1));
    }

    #[test]
    fn little_endian_max_u32() {
        assert_eq!(decode("ff ff ff ff", ByteOrder::Little), Ok(4_294_967_295));
    }

    #[test]
    fn little_endian_round_trip() {
        let value = 0x1234_5678u32;
        let hex: Vec<String> = value
            .to_le_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        assert_eq!(decode(&hex.join(" "), ByteOrder::Little), Ok(value as u64));
    }

    #[test]
    fn big_endian() {
        assert_eq!(decode("00 00 01 00", ByteOrder::Big), Ok(256));
        assert_eq!(decode("01 00", ByteOrder::Big), Ok(256));
    }

    #[test]
    fn uppercase_hex_accepted() {
        assert_eq!(decode("E8 03", ByteOrder::Little), Ok(1000));
    }

    #[test]
    fn eight_byte_group() {
        assert_eq!(
            decode("00 00 00 00 01 00 00 00", ByteOrder::Little),
            Ok(4_294_967_296)
        );
    }

    #[test]
    fn invalid_hex_rejected() {
        let err = decode("zz 00 00 00", ByteOrder::Little).unwrap_err();
        assert!(matches!(err, IntegerDecodeError::InvalidHex { .. }));
        assert!(err.to_string().contains("zz000000"));
    }

    #[test]
    fn odd_length_token_rejected() {
        let err = decode("1 00 00 00", ByteOrder::Little).unwrap_err();
        assert!(matches!(err, IntegerDecodeError::InvalidHex { .. }));
    }

    #[test]
    fn empty_and_wide_groups() {
        assert_eq!(bytes_to_u64(&[], ByteOrder::Little), Err(IntegerDecodeError::Empty));
        assert_eq!(
            bytes_to_u64(&[0; 9], ByteOrder::Little),
            Err(IntegerDecodeError::TooWide { len: 9 })
        );
    }
}
