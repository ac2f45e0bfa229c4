use thiserror::Error;

/// Errors returned while extracting tokens from hex dump text.
///
/// # Examples
/// ```
/// use logpage_core::DumpError;
///
/// let err = DumpError::MissingHeader { needed: 2, actual: 1 };
/// assert!(err.to_string().contains("missing header lines"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DumpError {
    #[error("missing header lines: need {needed}, got {actual}")]
    MissingHeader { needed: usize, actual: usize },
    #[error("no payload lines after {header_lines} header lines")]
    NoPayload { header_lines: usize },
    #[error("line {line} too short: payload column starts at {needed}, line has {actual} characters")]
    LineTooShort {
        line: usize,
        needed: usize,
        actual: usize,
    },
    #[error("invalid payload columns: start {start} must be below end {end}")]
    InvalidColumns { start: usize, end: usize },
}
