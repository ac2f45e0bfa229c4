use std::fmt;

use tracing::debug;

use super::error::DumpError;
use super::format::DumpFormat;
use super::reader::{DumpReader, read_window};

/// One whitespace-separated token from the hex column, normally two hex
/// characters. Tokens are validated when a group is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexToken(String);

impl HexToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract hex tokens from dump text in page order.
///
/// # Examples
/// ```
/// use logpage_core::{DumpFormat, extract_tokens};
///
/// let text = "banner\nheader\n0000: de ad be ef";
/// let tokens = extract_tokens(text, &DumpFormat::default())?;
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[0].as_str(), "de");
/// # Ok::<(), logpage_core::DumpError>(())
/// ```
///
/// # Errors
/// Returns `DumpError` when the format is invalid, the header or payload is
/// missing, or a payload line ends before the payload column.
pub fn extract_tokens(text: &str, format: &DumpFormat) -> Result<Vec<HexToken>, DumpError> {
    format.validate()?;
    let reader = DumpReader::new(text);
    let payload = reader.payload_lines(format.header_lines)?;

    let mut tokens = Vec::new();
    for (idx, line) in payload.iter().enumerate() {
        let line_no = format.header_lines + idx + 1;
        let window = read_window(line, line_no, format.payload_columns)?;
        tokens.extend(window.split_whitespace().map(HexToken::new));
    }

    debug!(
        lines = payload.len(),
        tokens = tokens.len(),
        "extracted hex tokens"
    );
    Ok(tokens)
}
