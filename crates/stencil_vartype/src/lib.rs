//! parser for the type strings that describe fields of a record, e.g. `uint16`, `float32[2]`,
//! `char[16]` or `Vec3[MAX_POINTS]`.
//!
//! this crate knows nothing about byte widths or layouts, it only turns text into an [`Expr`].

mod error;
mod parser;
mod span;
mod tokenizer;

pub use error::{Error, Result};
pub use parser::{parse, parse_field, ArrayLen, Expr, FieldDecl};
pub use span::Span;
pub use tokenizer::{Token, TokenKind, Tokenizer};
