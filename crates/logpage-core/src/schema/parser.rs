use serde::{Deserialize, Serialize};
use tracing::debug;

use super::layout::{self, UintWidth};
use super::reader::SchemaReader;

/// A single `__uN name;` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub width: UintWidth,
    pub name: String,
}

impl FieldDecl {
    pub fn new(width: UintWidth, name: impl Into<String>) -> Self {
        Self {
            width,
            name: name.into(),
        }
    }

    pub fn bits(&self) -> u32 {
        self.width.bits()
    }
}

/// Ordered field declarations; order is decode order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldDecl>,
}

impl Schema {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Extract every field declaration from `text` in occurrence order.
///
/// Text that does not form a complete declaration with a recognized width is
/// skipped, so an input without declarations yields an empty schema.
///
/// # Examples
/// ```
/// use logpage_core::{UintWidth, parse_schema};
///
/// let schema = parse_schema("struct vsmart { __u32 percentage_used; __u64 copy; };");
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.fields[1].width, UintWidth::U64);
/// assert_eq!(schema.fields[1].name, "copy");
/// ```
pub fn parse_schema(text: &str) -> Schema {
    let mut reader = SchemaReader::new(text);
    let mut fields = Vec::new();

    while let Some(tag_start) = reader.find_tag() {
        match read_declaration(&mut reader) {
            Some(decl) => fields.push(decl),
            None => reader.seek(tag_start + 1),
        }
    }

    debug!(fields = fields.len(), "parsed schema");
    Schema { fields }
}

fn read_declaration(reader: &mut SchemaReader<'_>) -> Option<FieldDecl> {
    let digits = reader.read_digits()?;
    if reader.skip_whitespace() == 0 {
        return None;
    }
    let name = reader.read_word()?;
    if !reader.consume(layout::TERMINATOR) {
        return None;
    }

    let width = digits.parse().ok().and_then(UintWidth::from_bits);
    if width.is_none() {
        debug!(width = digits, name, "skipping declaration with unsupported width");
    }
    Some(FieldDecl::new(width?, name))
}

#[cfg(test)]
mod tests {
    use super::{FieldDecl, parse_schema};
    use crate::schema::UintWidth;

    #[test]
    fn parse_fields_in_declared_order() {
        let schema = parse_schema("__u32 a; __u16 b;");
        assert_eq!(
            schema.fields,
            vec![
                FieldDecl::new(UintWidth::U32, "a"),
                FieldDecl::new(UintWidth::U16, "b"),
            ]
        );
    }

    #[test]
    fn parse_all_supported_widths() {
        let schema = parse_schema("__u8 a;__u16 b;__u32 c;__u64 d;");
        let bits: Vec<u32> = schema.fields.iter().map(FieldDecl::bits).collect();
        assert_eq!(bits, vec![8, 16, 32, 64]);
    }

    #[test]
    fn parse_empty_when_no_declarations() {
        assert!(parse_schema("").is_empty());
        assert!(parse_schema("int x; char y;").is_empty());
    }

    #[test]
    fn parse_skips_non_declarations() {
        let text = "\
#define DEVICE_PE_CYCLE (8000)
struct vsmart {
\t__u32 percentage_used; /* percent */
\t__u64 copy;
};
void update_copy(__u64);
__u32 get_data_unit_read(void);
";
        let schema = parse_schema(text);
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["percentage_used", "copy"]);
    }

    #[test]
    fn parse_requires_whitespace_and_terminator() {
        assert!(parse_schema("__u32a;").is_empty());
        assert!(parse_schema("__u32 a").is_empty());
        assert!(parse_schema("__u32 a ;").is_empty());
        assert!(parse_schema("__u32 a[4];").is_empty());
    }

    #[test]
    fn parse_skips_unsupported_width() {
        let schema = parse_schema("__u128 big; __u24 odd; __u8 ok;");
        assert_eq!(schema.fields, vec![FieldDecl::new(UintWidth::U8, "ok")]);
    }

    #[test]
    fn parse_resumes_after_failed_tag() {
        let schema = parse_schema("___u16 x; __u__u8 y;");
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn parse_keeps_duplicate_names() {
        let schema = parse_schema("__u8 x; __u8 x;");
        assert_eq!(schema.len(), 2);
    }
}
