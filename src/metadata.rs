use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub(crate) const DEFAULT_LAYOUT: &str = "post";
pub(crate) const LAYOUT_CHOICES: [&str; 3] = [DEFAULT_LAYOUT, "page", "custom"];

/// Everything needed to write one post. Built per invocation, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRequest {
    pub title: String,
    /// Space separated.
    #[serde(default)]
    pub categories: String,
    /// Space separated.
    #[serde(default)]
    pub tags: String,
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default)]
    pub additional_options: Map<String, Value>,
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

impl PostRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            categories: String::new(),
            tags: String::new(),
            layout: default_layout(),
            additional_options: Map::new(),
        }
    }
}
