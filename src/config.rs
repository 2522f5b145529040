//! Parser configuration.

use serde::Deserialize;

/// Description used when a comment has no text before its first tag.
pub const DEFAULT_PLACEHOLDER: &str = "_no description provided_";

/// Tags that must carry a `{type}`.
pub const DEFAULT_REQUIRED_TYPE_TAGS: &[&str] = &["property", "return", "param"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    pub placeholder: String,
    pub required_type_tags: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            required_type_tags: DEFAULT_REQUIRED_TYPE_TAGS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl ParserConfig {
    /// Whether a tag label (marker already stripped) must declare a type.
    pub fn requires_type(&self, label: &str) -> bool {
        self.required_type_tags.iter().any(|t| t == label)
    }
}
