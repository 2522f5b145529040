//! Comment extraction: description plus one token per tag.

use super::grammar::{self, MARKER};
use super::Reporter;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::model::{CommentNode, TagToken};
use tracing::trace;

/// Label of the synthetic description token.
pub const DESCRIPTION: &str = "description";

/// Build the comment node for one raw comment. `comment` is the index the
/// node will get in the tree.
pub(crate) fn extract(
    raw: &str,
    comment: usize,
    config: &ParserConfig,
    reporter: &mut Reporter<'_>,
) -> Result<CommentNode> {
    let description =
        grammar::description(raw).unwrap_or_else(|| config.placeholder.clone());
    let mut node = CommentNode::new(TagToken::new(DESCRIPTION, description));

    for (label, content) in grammar::tags(raw) {
        let token = extract_tag(label, content, comment, config, reporter)?;
        trace!(tag = %token.label, content = %token.content, "tag");
        node.push(token);
    }

    Ok(node)
}

fn extract_tag(
    marked: &str,
    raw_content: &str,
    comment: usize,
    config: &ParserConfig,
    reporter: &mut Reporter<'_>,
) -> Result<TagToken> {
    let label = marked.trim_start_matches(MARKER);
    let content = grammar::clean(raw_content);
    let mut token = TagToken::new(label, "");

    token.description = grammar::tag_descriptions(&content).last();

    for (ty, name) in grammar::types(&content) {
        token.push_type(ty);
        if token.arg_name.is_none() && !name.is_empty() {
            token.arg_name = Some(name.to_string());
        }
    }
    // Only the absence of any type is checked; later annotations are not validated
    if token.types.is_none() && config.requires_type(label) {
        reporter.missing_type(label, comment)?;
    }

    for name in grammar::names(&content) {
        token.push_name(name);
    }

    token.content = content;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::error::ParseError;
    use crate::parser::ErrorMode;

    fn run(raw: &str) -> Result<CommentNode> {
        let mut reporter = Reporter::new("lib.js", ErrorMode::FailFast);
        extract(raw, 0, &ParserConfig::default(), &mut reporter)
    }

    #[test]
    fn description_comes_first() {
        let node = run("/** Adds two numbers\n@param {number} a first */").unwrap();
        assert_eq!(node.description().label, DESCRIPTION);
        assert_eq!(node.description().content, "Adds two numbers");
        assert_eq!(node.tags().len(), 1);
    }

    #[test]
    fn placeholder_without_description() {
        let node = run("/**\n * @param {number} a first\n */").unwrap();
        assert_eq!(node.description().content, "_no description provided_");
    }

    #[test]
    fn param_tag_fields() {
        let node = run("/** x\n * @param {number} a the first operand\n */").unwrap();
        let tag = &node.tags()[0];
        assert_eq!(tag.label, "param");
        assert_eq!(tag.content, "{number} a the first operand");
        assert_eq!(tag.types, Some(vec!["number".to_string()]));
        assert_eq!(tag.names, Some(vec!["a".to_string()]));
        assert_eq!(tag.arg_name.as_deref(), Some("a"));
        assert_eq!(tag.description.as_deref(), Some("the first operand"));
    }

    #[test]
    fn return_tag_has_no_name() {
        let node = run("/** x\n@return {number} sum */").unwrap();
        let tag = &node.tags()[0];
        assert_eq!(tag.label, "return");
        assert_eq!(tag.types, Some(vec!["number".to_string()]));
        assert_eq!(tag.names, None);
        assert_eq!(tag.description.as_deref(), Some("sum"));
    }

    #[test]
    fn multiple_types_and_names() {
        let node = run("/** x\n@property {string} id {number} key lookup key */").unwrap();
        let tag = &node.tags()[0];
        assert_eq!(
            tag.types,
            Some(vec!["string".to_string(), "number".to_string()])
        );
        assert_eq!(tag.names, Some(vec!["id".to_string(), "key".to_string()]));
        assert_eq!(tag.arg_name.as_deref(), Some("id"));
        assert_eq!(tag.description.as_deref(), Some("lookup key"));
    }

    #[test]
    fn optional_tags_degrade() {
        let node = run("/** x\n@deprecated\n@see other */").unwrap();
        let tags = node.tags();
        assert_eq!(tags[0].label, "deprecated");
        assert_eq!(tags[0].content, "");
        assert_eq!(tags[0].description, None);
        assert_eq!(tags[0].types, None);
        assert_eq!(tags[1].description.as_deref(), Some("other"));
    }

    #[test]
    fn missing_property_type_is_fatal() {
        let err = run("/** x\n@property bareName */").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingTypeOrDescription {
                file: "lib.js".to_string(),
                tag: "property".to_string(),
                comment: 0,
            }
        );
    }

    #[test]
    fn malformed_later_type_is_not_validated() {
        let node = run("/** x\n@param {number} a {str b desc */").unwrap();
        let tag = &node.tags()[0];
        assert_eq!(tag.types, Some(vec!["number".to_string()]));
        assert_eq!(tag.names, Some(vec!["a".to_string()]));
        assert_eq!(tag.arg_name.as_deref(), Some("a"));
    }

    #[test]
    fn custom_required_tags() {
        let config = ParserConfig {
            required_type_tags: vec!["arg".to_string()],
            ..Default::default()
        };
        let mut reporter = Reporter::new("lib.js", ErrorMode::FailFast);
        assert!(extract("/** x @param a */", 0, &config, &mut reporter).is_ok());
        assert!(extract("/** x @arg a */", 0, &config, &mut reporter).is_err());
    }
}
