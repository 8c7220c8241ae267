//! Ordered node selection.

/// Selection mode for a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// At most one node selected.
    #[default]
    Single,
    /// Any number of nodes selected.
    Multi,
}

impl SelectionMode {
    /// Mode for the given `multiple` flag.
    pub fn from_multiple(multiple: bool) -> Self {
        if multiple { Self::Multi } else { Self::Single }
    }
}

/// Tracks selected node ids in the order they were selected.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub mode: SelectionMode,
    selected: Vec<String>,
}

impl Selection {
    /// Create an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: Vec::new(),
        }
    }

    /// Select `id` in addition to the current selection.
    ///
    /// In single mode this replaces the selection. Returns true if the
    /// selection changed.
    pub fn select(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            return false;
        }
        if self.mode == SelectionMode::Single {
            self.selected.clear();
        }
        self.selected.push(id.to_string());
        true
    }

    /// Replace the whole selection with `id`.
    pub fn select_only(&mut self, id: &str) {
        self.selected.clear();
        self.selected.push(id.to_string());
    }

    /// Toggle selection for `id`. Returns true if `id` is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.deselect(id) {
            false
        } else {
            self.select(id);
            true
        }
    }

    /// Remove `id` from the selection. Returns true if it was selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        self.selected.len() != before
    }

    /// Drop every id for which `keep` returns false.
    pub fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.selected.retain(keep);
    }

    /// Check if `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Clear all selections. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.selected.is_empty();
        self.selected.clear();
        had_any
    }

    /// Rename a selected id in place.
    pub fn rekey(&mut self, old: &str, new: &str) {
        for id in self.selected.iter_mut().filter(|s| *s == old) {
            *id = new.to_string();
        }
    }

    /// First selected id.
    pub fn first(&self) -> Option<&str> {
        self.selected.first().map(String::as_str)
    }

    /// All selected ids in selection order.
    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = Selection::new(SelectionMode::Single);
        selection.select("a");
        selection.select("b");
        assert_eq!(selection.ids(), ["b".to_string()]);
    }

    #[test]
    fn test_multi_mode_keeps_order() {
        let mut selection = Selection::new(SelectionMode::Multi);
        selection.select("c");
        selection.select("a");
        selection.select("b");
        assert!(!selection.select("a"));
        assert_eq!(selection.ids(), ["c", "a", "b"]);
        assert_eq!(selection.first(), Some("c"));
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new(SelectionMode::Multi);
        assert!(selection.toggle("a"));
        assert!(selection.toggle("b"));
        assert!(!selection.toggle("a"));
        assert_eq!(selection.ids(), ["b"]);
    }

    #[test]
    fn test_rekey() {
        let mut selection = Selection::new(SelectionMode::Multi);
        selection.select("j1_1");
        selection.rekey("j1_1", "copy");
        assert!(selection.is_selected("copy"));
        assert!(!selection.is_selected("j1_1"));
    }
}
