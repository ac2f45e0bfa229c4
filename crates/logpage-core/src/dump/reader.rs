use super::error::DumpError;
use super::format::ColumnRange;

/// Line access over dump text with header and bounds checks.
pub struct DumpReader<'a> {
    lines: Vec<&'a str>,
}

impl<'a> DumpReader<'a> {
    /// Split trimmed `text` into lines, dropping a trailing `\r` on each.
    pub fn new(text: &'a str) -> Self {
        let trimmed = text.trim();
        let lines = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect()
        };
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines after the first `header_lines`; at least one must exist.
    pub fn payload_lines(&self, header_lines: usize) -> Result<&[&'a str], DumpError> {
        if self.lines.len() < header_lines {
            return Err(DumpError::MissingHeader {
                needed: header_lines,
                actual: self.lines.len(),
            });
        }
        let payload = &self.lines[header_lines..];
        if payload.is_empty() {
            return Err(DumpError::NoPayload { header_lines });
        }
        Ok(payload)
    }
}

/// Character window `columns` of `line`, truncated at the end of the line.
///
/// `line_no` is the 1-based line number used in errors.
pub fn read_window<'a>(
    line: &'a str,
    line_no: usize,
    columns: ColumnRange,
) -> Result<&'a str, DumpError> {
    let actual = line.chars().count();
    if actual <= columns.start {
        return Err(DumpError::LineTooShort {
            line: line_no,
            needed: columns.start + 1,
            actual,
        });
    }
    let start = byte_index(line, columns.start);
    let end = byte_index(line, columns.end);
    Ok(&line[start..end])
}

fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(idx, _)| idx)
}
