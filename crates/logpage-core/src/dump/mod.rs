//! Hex dump text decoding.
//!
//! The external tool renders the log page as a banner, a column header and one
//! line per 16 bytes: an offset column, the hex byte tokens and an ASCII
//! rendering. Only the hex column window is kept. The window and header line
//! count come from a [`DumpFormat`], defaults for nvme-cli live in `layout`,
//! and line access with bounds checks lives in `reader`.
//!
//! Errors report missing header lines, an empty payload, or lines that end
//! before the payload column.

pub mod error;
pub mod format;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::DumpError;
pub use format::{ColumnRange, DumpFormat};
pub use parser::{HexToken, extract_tokens};
