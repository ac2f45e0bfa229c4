use super::layout;

/// Character cursor over schema text.
///
/// Positions are byte offsets into the text and always sit on a character
/// boundary.
pub struct SchemaReader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> SchemaReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor to `pos`, clamped to the end of the text.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
    }

    /// Advance past the next type tag prefix and return where the tag starts.
    pub fn find_tag(&mut self) -> Option<usize> {
        let start = self.pos + self.rest().find(layout::TYPE_TAG_PREFIX)?;
        self.pos = start + layout::TYPE_TAG_PREFIX.len();
        Some(start)
    }

    /// Read one or more ASCII digits.
    pub fn read_digits(&mut self) -> Option<&'a str> {
        self.read_while(|c| c.is_ascii_digit())
    }

    /// Read one or more word characters (alphanumeric or `_`).
    pub fn read_word(&mut self) -> Option<&'a str> {
        self.read_while(|c| c.is_alphanumeric() || c == '_')
    }

    /// Skip whitespace and return how many characters were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        let skipped = self.read_while(char::is_whitespace);
        skipped.map_or(0, |s| s.chars().count())
    }

    /// Consume `expected` if it is the next character.
    pub fn consume(&mut self, expected: char) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !accept(c))
            .map_or(rest.len(), |(idx, _)| idx);
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }
}
