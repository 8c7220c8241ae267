//! Tree configuration

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Icon used when a node is added without one.
pub const DEFAULT_FALLBACK_ICON: &str = "icon-error";

/// Per-instance tree configuration, applied when the tree is built.
///
/// # Example
///
/// ```
/// use hierarchy_tree::TreeConfig;
///
/// let config = TreeConfig::default()
///     .with_full_row_highlight(true)
///     .with_multiple_selection(true);
/// assert!(!config.keyboard_shortcuts);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Highlight the whole row on selection, not just the label.
    ///
    /// Default: false
    pub full_row_highlight: bool,

    /// Let the widget install its keyboard bindings.
    ///
    /// Default: false
    pub keyboard_shortcuts: bool,

    /// Allow more than one node to be selected at once.
    ///
    /// Default: false
    pub multiple_selection: bool,

    /// Icon given to nodes inserted without one.
    ///
    /// Default: `"icon-error"`
    pub fallback_icon: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            full_row_highlight: false,
            keyboard_shortcuts: false,
            multiple_selection: false,
            fallback_icon: DEFAULT_FALLBACK_ICON.to_string(),
        }
    }
}

impl TreeConfig {
    /// Creates a new tree config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets whole-row highlighting.
    pub fn with_full_row_highlight(mut self, enabled: bool) -> Self {
        self.full_row_highlight = enabled;
        self
    }

    /// Sets keyboard shortcut handling.
    pub fn with_keyboard_shortcuts(mut self, enabled: bool) -> Self {
        self.keyboard_shortcuts = enabled;
        self
    }

    /// Sets multiple selection.
    pub fn with_multiple_selection(mut self, enabled: bool) -> Self {
        self.multiple_selection = enabled;
        self
    }

    /// Sets the fallback icon.
    pub fn with_fallback_icon(mut self, icon: impl Into<String>) -> Self {
        self.fallback_icon = icon.into();
        self
    }
}
