//! JSON renderer — the tree exactly as the generator consumes it.

use crate::render::Renderer;
use anyhow::{Context, Result};
use doctree::TokenTree;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, tree: &TokenTree) -> Result<String> {
        let mut out = serde_json::to_string_pretty(tree).context("failed to serialize tree")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "tree.json"
    }
}
