//! Schema declarations (`__u32 name;`) parsed into an ordered field list.
//!
//! The tokenizer recognizes a type tag with a bit-width, whitespace, an
//! identifier and a terminating `;`. Anything else in the text (comments,
//! `#define`s, prototypes, arrays) is skipped without error. Type tags and
//! the width table live in `layout`, cursor primitives in `reader`.

pub mod layout;
pub mod parser;
pub mod reader;

pub use layout::UintWidth;
pub use parser::{FieldDecl, Schema, parse_schema};
