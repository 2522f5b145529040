//! Outline renderer — indented text view of the tree for humans.

use crate::render::Renderer;
use anyhow::Result;
use doctree::{TagToken, TokenTree};

pub struct OutlineRenderer;

impl Renderer for OutlineRenderer {
    fn render(&self, tree: &TokenTree) -> Result<String> {
        let mut out = String::new();
        for (i, comment) in tree.comments().iter().enumerate() {
            out.push_str(&format!("#{} {}\n", i, comment.description().content));
            for tag in comment.tags() {
                out.push_str(&format!("  {}\n", render_tag(tag)));
            }
        }
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

/// `label {type|type} name, name - text`
fn render_tag(tag: &TagToken) -> String {
    let mut line = tag.label.clone();
    if let Some(ref types) = tag.types {
        line.push_str(&format!(" {{{}}}", types.join("|")));
    }
    if let Some(ref names) = tag.names {
        line.push(' ');
        line.push_str(&names.join(", "));
    }
    let text = tag.description.as_deref().unwrap_or(&tag.content);
    if !text.is_empty() {
        line.push_str(" - ");
        line.push_str(text);
    }
    line
}
