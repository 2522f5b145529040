//! Declaration extraction: flat name/value tokens for the paired comment.

use super::grammar;
use crate::model::TagToken;

/// One token per `name: value` entry of a data-type declaration.
pub fn data_type_tokens(raw: &str) -> Vec<TagToken> {
    grammar::data_entries(raw)
        .map(|(name, value)| TagToken::new(name, value))
        .collect()
}

/// One token per parameter of a prototype, labeled by parameter name with
/// the parameter's type (possibly empty) as content.
pub fn proto_tokens(raw: &str) -> Vec<TagToken> {
    grammar::proto_params(raw)
        .map(|(name, ty)| TagToken::new(name, ty))
        .collect()
}
