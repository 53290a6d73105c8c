//! Canvas configuration.
//!
//! Supplied by the embedding page as a JSON object. Every field is optional;
//! `{}` yields the defaults.

use crate::error::CanvasError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Register the built-in `image`, `text` and `sticker` tools.
    pub default_tools: bool,
    /// CSS class added to every rendered node element.
    pub node_class: Option<String>,
    /// Tool selected right after construction.
    pub initial_tool: Option<String>,
    /// Max level for the console logger (`"error"` .. `"trace"`, or `"off"`).
    pub log_level: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_tools: true,
            node_class: None,
            initial_tool: None,
            log_level: "info".to_string(),
        }
    }
}

impl CanvasConfig {
    /// Parse from JSON. Empty or whitespace-only input means defaults.
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| CanvasError::InvalidConfig(e.to_string()))
    }

    /// `log_level` as a `log` filter; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
