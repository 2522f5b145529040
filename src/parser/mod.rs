//! Sequencer — pairs each comment with the declaration that follows it.
//!
//! One forward pass over the lexer's node stream:
//!
//! | node      | accepted in      | next state          |
//! |-----------|------------------|---------------------|
//! | COMMENT   | any state        | `FoundComment(id)`  |
//! | DATA_TYPE | `FoundComment`   | `LookingForComment` |
//! | PROTO     | `FoundComment`   | `LookingForComment` |
//!
//! Anything else leaves the state untouched.

pub mod comment;
pub mod declaration;
pub mod grammar;

use crate::config::ParserConfig;
use crate::error::{ParseError, Result};
use crate::model::{CommentId, InputNode, Kind, TokenTree};
use tracing::debug;

/// Sequencer state. The handle of the comment still open for pairing
/// travels with `FoundComment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Starting,
    FoundComment(CommentId),
    LookingForComment,
}

/// What to do when a required tag has no type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Abort the run on the first diagnostic.
    FailFast,
    /// Record the diagnostic and keep going.
    Collect,
}

/// Tree plus every diagnostic reported while building it.
#[derive(Debug, Default)]
pub struct Parsed {
    pub tree: TokenTree,
    pub diagnostics: Vec<ParseError>,
}

impl Parsed {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Routes diagnostics according to the run's [`ErrorMode`].
pub(crate) struct Reporter<'a> {
    file: &'a str,
    mode: ErrorMode,
    diagnostics: Vec<ParseError>,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(file: &'a str, mode: ErrorMode) -> Self {
        Self {
            file,
            mode,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn missing_type(&mut self, tag: &str, comment: usize) -> Result<()> {
        let err = ParseError::MissingTypeOrDescription {
            file: self.file.to_string(),
            tag: tag.to_string(),
            comment,
        };
        match self.mode {
            ErrorMode::FailFast => Err(err),
            ErrorMode::Collect => {
                self.diagnostics.push(err);
                Ok(())
            }
        }
    }
}

/// Parser for the node stream of one source file.
#[derive(Debug, Clone)]
pub struct Parser {
    file: String,
    config: ParserConfig,
}

impl Parser {
    /// `file` identifies the source in diagnostics.
    pub fn new(file: impl Into<String>) -> Self {
        Self::with_config(file, ParserConfig::default())
    }

    pub fn with_config(file: impl Into<String>, config: ParserConfig) -> Self {
        Self {
            file: file.into(),
            config,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Build the token tree, stopping at the first diagnostic.
    pub fn parse(&self, nodes: &[InputNode]) -> Result<TokenTree> {
        let mut reporter = Reporter::new(&self.file, ErrorMode::FailFast);
        self.generate(nodes, &mut reporter)
    }

    /// Build the token tree, collecting every diagnostic instead of stopping.
    pub fn parse_collecting(&self, nodes: &[InputNode]) -> Parsed {
        let mut reporter = Reporter::new(&self.file, ErrorMode::Collect);
        // Collect mode never returns Err from the reporter
        let tree = self.generate(nodes, &mut reporter).unwrap_or_default();
        Parsed {
            tree,
            diagnostics: reporter.diagnostics,
        }
    }

    fn generate(&self, nodes: &[InputNode], reporter: &mut Reporter<'_>) -> Result<TokenTree> {
        let mut tree = TokenTree::new();
        let mut state = State::Starting;

        for node in nodes {
            state = match (node.label, state) {
                (Kind::Comment, _) => {
                    let comment =
                        comment::extract(&node.content, tree.len(), &self.config, reporter)?;
                    let id = tree.push_comment(comment);
                    debug!(
                        file = %self.file,
                        comment = id.index(),
                        tags = tree.get(id).tags().len(),
                        "comment"
                    );
                    State::FoundComment(id)
                }
                (Kind::DataType, State::FoundComment(id)) => {
                    let tokens = declaration::data_type_tokens(&node.content);
                    debug!(file = %self.file, comment = id.index(), entries = tokens.len(), "data type");
                    tree.attach(id, tokens);
                    State::LookingForComment
                }
                (Kind::Proto, State::FoundComment(id)) => {
                    let tokens = declaration::proto_tokens(&node.content);
                    debug!(file = %self.file, comment = id.index(), params = tokens.len(), "prototype");
                    tree.attach(id, tokens);
                    State::LookingForComment
                }
                (Kind::DataType | Kind::Proto, state) => {
                    debug!(file = %self.file, ?state, "declaration without a comment, skipped");
                    state
                }
                (Kind::Other, state) => state,
            };
        }

        Ok(tree)
    }
}

/// Fail-fast parse with the default configuration.
pub fn parse(file: &str, nodes: &[InputNode]) -> Result<TokenTree> {
    Parser::new(file).parse(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagToken;

    fn labels(tokens: &[TagToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn comment_with_prototype() {
        let nodes = vec![
            InputNode::comment(
                "/** Adds two numbers\n@param {number} a first\n@param {number} b second\n@return {number} sum */",
            ),
            InputNode::proto("function add(a,b)"),
        ];
        let tree = parse("math.js", &nodes).unwrap();
        assert_eq!(tree.len(), 1);

        let children = tree.comments()[0].children();
        assert_eq!(
            labels(children),
            vec!["description", "param", "param", "return", "a", "b"]
        );
        assert_eq!(children[0].content, "Adds two numbers");

        assert_eq!(children[1].types, Some(vec!["number".to_string()]));
        assert_eq!(children[1].names, Some(vec!["a".to_string()]));
        assert_eq!(children[1].description.as_deref(), Some("first"));

        assert_eq!(children[2].names, Some(vec!["b".to_string()]));
        assert_eq!(children[2].description.as_deref(), Some("second"));

        assert_eq!(children[3].types, Some(vec!["number".to_string()]));
        assert_eq!(children[3].description.as_deref(), Some("sum"));
    }

    #[test]
    fn consecutive_comments_stay_independent() {
        let nodes = vec![
            InputNode::comment("/** First */"),
            InputNode::comment("/** Second\n@see First */"),
        ];
        let tree = parse("a.js", &nodes).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(labels(tree.comments()[0].children()), vec!["description"]);
        assert_eq!(
            labels(tree.comments()[1].children()),
            vec!["description", "see"]
        );
    }

    #[test]
    fn second_declaration_is_ignored() {
        let nodes = vec![
            InputNode::comment("/** Point */"),
            InputNode::data_type("var Point = { x: 0, y: 0 }"),
            InputNode::proto("function move(dx, dy)"),
        ];
        let tree = parse("a.js", &nodes).unwrap();
        assert_eq!(
            labels(tree.comments()[0].children()),
            vec!["description", "x", "y"]
        );
    }

    #[test]
    fn declaration_before_any_comment_is_ignored() {
        let nodes = vec![
            InputNode::proto("function early(a)"),
            InputNode::comment("/** Late */"),
        ];
        let tree = parse("a.js", &nodes).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.comments()[0].children().len(), 1);
    }

    #[test]
    fn other_nodes_keep_the_pairing_open() {
        let nodes = vec![
            InputNode::comment("/** Run */"),
            InputNode::new(Kind::Other, "\n\n"),
            InputNode::proto("function run(task)"),
        ];
        let tree = parse("a.js", &nodes).unwrap();
        assert_eq!(
            labels(tree.comments()[0].children()),
            vec!["description", "task"]
        );
    }

    #[test]
    fn comment_reopens_pairing() {
        let nodes = vec![
            InputNode::comment("/** One */"),
            InputNode::proto("function one(a)"),
            InputNode::comment("/** Two */"),
            InputNode::proto("function two(b)"),
        ];
        let tree = parse("a.js", &nodes).unwrap();
        assert_eq!(labels(tree.comments()[0].children()), vec!["description", "a"]);
        assert_eq!(labels(tree.comments()[1].children()), vec!["description", "b"]);
    }

    #[test]
    fn missing_type_aborts_run() {
        let nodes = vec![
            InputNode::comment("/** Fine\n@param {string} s text */"),
            InputNode::comment("/** Broken\n@property bareName */"),
        ];
        let err = parse("tasks.js", &nodes).unwrap_err();
        assert_eq!(err.file(), "tasks.js");
        assert!(err.to_string().contains("tasks.js"));
        assert!(err.to_string().contains("@property"));
    }

    #[test]
    fn collecting_reports_every_missing_type() {
        let nodes = vec![
            InputNode::comment("/** A\n@param a the a */"),
            InputNode::proto("function a(a)"),
            InputNode::comment("/** B\n@return nothing */"),
        ];
        let parsed = Parser::new("lib.js").parse_collecting(&nodes);
        assert!(!parsed.is_clean());
        assert_eq!(parsed.diagnostics.len(), 2);
        assert_eq!(
            parsed.diagnostics[1],
            ParseError::MissingTypeOrDescription {
                file: "lib.js".to_string(),
                tag: "return".to_string(),
                comment: 1,
            }
        );
        // offending tags are kept, without types
        let first = parsed.tree.comments()[0].children();
        assert_eq!(labels(first), vec!["description", "param", "a"]);
        assert_eq!(first[1].types, None);
    }

    #[test]
    fn custom_placeholder() {
        let config = ParserConfig {
            placeholder: "TODO".to_string(),
            ..Default::default()
        };
        let tree = Parser::with_config("a.js", config)
            .parse(&[InputNode::comment("/** @deprecated */")])
            .unwrap();
        assert_eq!(tree.comments()[0].description().content, "TODO");
    }
}
