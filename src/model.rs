//! Data model — the lexer's node stream in, the token tree out.

use serde::{Deserialize, Serialize};

/// Label attached to each node by the upstream lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    Comment,
    DataType,
    Proto,
    #[serde(other)]
    Other,
}

/// One labeled chunk of raw source text, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputNode {
    pub label: Kind,
    pub content: String,
}

impl InputNode {
    pub fn new(label: Kind, content: impl Into<String>) -> Self {
        Self {
            label,
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self::new(Kind::Comment, content)
    }

    pub fn data_type(content: impl Into<String>) -> Self {
        Self::new(Kind::DataType, content)
    }

    pub fn proto(content: impl Into<String>) -> Self {
        Self::new(Kind::Proto, content)
    }
}

/// A single extracted token: the description, one tag occurrence, or one
/// declaration entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagToken {
    /// Tag name without the `@` marker (`param`, `return`, ...), or the
    /// declared name for declaration entries.
    pub label: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Brace-delimited types, in order. Never `Some(vec![])`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Names following the types, in order. Never `Some(vec![])`.
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
}

impl TagToken {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn push_type(&mut self, ty: impl Into<String>) {
        self.types.get_or_insert_with(Vec::new).push(ty.into());
    }

    pub fn push_name(&mut self, name: impl Into<String>) {
        self.names.get_or_insert_with(Vec::new).push(name.into());
    }
}

/// Handle to a comment node inside a [`TokenTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CommentId(usize);

impl CommentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One documentation comment plus whatever declaration was paired with it.
///
/// The first child is always the description token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCommentNode")]
pub struct CommentNode {
    children: Vec<TagToken>,
}

#[derive(Deserialize)]
struct RawCommentNode {
    children: Vec<TagToken>,
}

impl TryFrom<RawCommentNode> for CommentNode {
    type Error = &'static str;

    fn try_from(raw: RawCommentNode) -> Result<Self, Self::Error> {
        if raw.children.is_empty() {
            return Err("comment node without a description token");
        }
        Ok(Self {
            children: raw.children,
        })
    }
}

impl CommentNode {
    pub fn new(description: TagToken) -> Self {
        Self {
            children: vec![description],
        }
    }

    pub(crate) fn push(&mut self, token: TagToken) {
        self.children.push(token);
    }

    /// Description first, then tags and declaration tokens in order.
    pub fn children(&self) -> &[TagToken] {
        &self.children
    }

    pub fn description(&self) -> &TagToken {
        &self.children[0]
    }

    /// Tag tokens and declaration tokens, without the description.
    pub fn tags(&self) -> &[TagToken] {
        &self.children[1..]
    }
}

/// Append-only tree handed to the generator. The root's children are
/// comment nodes in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTree {
    #[serde(rename = "children")]
    comments: Vec<CommentNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_comment(&mut self, node: CommentNode) -> CommentId {
        self.comments.push(node);
        CommentId(self.comments.len() - 1)
    }

    /// Append declaration tokens to the comment behind `id`.
    pub fn attach(&mut self, id: CommentId, tokens: impl IntoIterator<Item = TagToken>) {
        self.comments[id.0].children.extend(tokens);
    }

    pub fn get(&self, id: CommentId) -> &CommentNode {
        &self.comments[id.0]
    }

    pub fn comments(&self) -> &[CommentNode] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
