//! Parse diagnostics.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A tag that needs a `{type}` (e.g. `@param`) had none.
    #[error("Missing argument type or argument description for @{tag} in {file} (comment #{comment})")]
    MissingTypeOrDescription {
        file: String,
        tag: String,
        /// Index of the comment node that owns the tag.
        comment: usize,
    },
}

impl ParseError {
    pub fn file(&self) -> &str {
        match self {
            ParseError::MissingTypeOrDescription { file, .. } => file,
        }
    }
}
