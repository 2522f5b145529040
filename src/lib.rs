//! doctree — pair documentation comments with the declarations that follow
//! them.
//!
//! Consumes the labeled node stream produced by a source lexer
//! (comment / data type / prototype / other) and builds a [`TokenTree`]:
//! one comment node per doc comment, holding its description, one token
//! per `@tag`, and the entries of the declaration paired with it.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;

pub use config::ParserConfig;
pub use error::ParseError;
pub use model::{CommentId, CommentNode, InputNode, Kind, TagToken, TokenTree};
pub use parser::{parse, ErrorMode, Parsed, Parser};
