//! Persisted expand/collapse and selection state.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Snapshot of which nodes are open and selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Open node ids.
    #[serde(default)]
    pub opened: Vec<String>,
    /// Selected node ids in selection order.
    #[serde(default)]
    pub selected: Vec<String>,
}

impl ViewState {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check if nothing is open or selected.
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty() && self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let state = ViewState {
            opened: vec!["scripts".to_string()],
            selected: vec!["player.ts".to_string()],
        };
        assert_eq!(
            state.to_json().unwrap(),
            r#"{"opened":["scripts"],"selected":["player.ts"]}"#
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let state = ViewState::from_json(r#"{"opened":["a"]}"#).unwrap();
        assert_eq!(state.opened, vec!["a".to_string()]);
        assert!(state.selected.is_empty());
    }
}
