//! nvme-cli `get-log` hex dump geometry.
//!
//! ```text
//! Device:nvme1n1 log-id:192 namespace-id:0x1
//!        0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f
//! 0000: 01 00 00 00 02 00 00 00 00 00 00 00 00 00 00 00 "................"
//! ```

/// Banner line plus column header line.
pub const HEADER_LINES: usize = 2;
/// `"0000: "` offset column.
pub const PAYLOAD_START_COLUMN: usize = 6;
/// 16 tokens of `"xx "` after the offset column.
pub const PAYLOAD_END_COLUMN: usize = PAYLOAD_START_COLUMN + BYTES_PER_LINE * TOKEN_STRIDE;

pub const BYTES_PER_LINE: usize = 16;
pub const TOKEN_STRIDE: usize = 3;
