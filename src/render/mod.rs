//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod outline;

use anyhow::{anyhow, Result};
use doctree::TokenTree;

/// Trait for rendering a token tree into a specific output format.
pub trait Renderer {
    fn render(&self, tree: &TokenTree) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "outline" | "text" => Ok(Box::new(outline::OutlineRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use json or outline", format)),
    }
}
