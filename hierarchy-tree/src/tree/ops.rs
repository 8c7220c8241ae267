//! Node operations of the hierarchy tree.

use log::{debug, warn};

use crate::error::{Result, TreeError};
use crate::node::TreeNode;
use crate::scope::InternalOp;
use crate::view_state::ViewState;
use crate::widget::BackingWidget;

use super::HierarchyTree;

impl<P, W> HierarchyTree<P, W>
where
    P: Clone + Send + Sync + 'static,
    W: BackingWidget<P>,
{
    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Insert `node` as the last child of `parent` (the root if `None`).
    ///
    /// Returns the node as materialized by the widget; a missing icon is
    /// replaced by the configured fallback.
    pub fn add(&mut self, mut node: TreeNode<P>, parent: Option<&str>) -> Result<TreeNode<P>> {
        if node.icon.is_none() {
            node.icon = Some(self.config.fallback_icon.clone());
        }
        let widget = self.built_mut()?;
        let id = widget
            .create_node(parent, node)
            .map_err(TreeError::from_widget)?;
        widget.get_node(&id).ok_or(TreeError::NotFound(id))
    }

    /// Delete a node and its whole subtree.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let widget = self.built_mut()?;
        if !widget.delete_node(id) {
            debug!("remove: node '{}' not found", id);
        }
        Ok(())
    }

    /// Delete every child of `root` (of the whole tree if `None`).
    pub fn clear(&mut self, root: Option<&str>) -> Result<()> {
        let widget = self.built_mut()?;
        for child in widget.children(root) {
            widget.delete_node(&child);
        }
        Ok(())
    }

    /// Look up a node.
    pub fn get(&self, id: &str) -> Option<TreeNode<P>> {
        self.widget.as_ref().and_then(|w| w.get_node(id))
    }

    /// Child nodes of `parent` in display order.
    pub fn children(&self, parent: Option<&str>) -> Vec<TreeNode<P>> {
        let Some(widget) = &self.widget else {
            return Vec::new();
        };
        widget
            .children(parent)
            .iter()
            .filter_map(|id| widget.get_node(id))
            .collect()
    }

    /// Total number of nodes at every depth, read from the widget.
    pub fn get_nodes_count(&self) -> usize {
        self.widget.as_ref().map(|w| w.flat_count()).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Select exactly `id`, unless it was the last id passed here.
    ///
    /// Selection events are not emitted. The cache only skips redundant
    /// calls; reads always go to the widget.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if self.current_selection.as_deref() == Some(id) {
            return Ok(());
        }
        let widget = self.widget.as_mut().ok_or(TreeError::NotBuilt)?;
        widget.deselect_all();
        widget.select_node(id);
        self.current_selection = Some(id.to_string());
        Ok(())
    }

    /// The first selected node.
    pub fn get_selected(&self) -> Option<TreeNode<P>> {
        let widget = self.widget.as_ref()?;
        let first = widget.selected().into_iter().next()?;
        widget.get_node(&first)
    }

    /// Every selected node, in the order the widget reports.
    pub fn get_all_selected(&self) -> Vec<TreeNode<P>> {
        let Some(widget) = &self.widget else {
            return Vec::new();
        };
        widget
            .selected()
            .iter()
            .filter_map(|id| widget.get_node(id))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Rename / move
    // -------------------------------------------------------------------------

    /// Set a node's label without notifying the rename handler.
    pub fn rename(&mut self, id: &str, label: &str) -> Result<()> {
        let widget = self.widget.as_mut().ok_or(TreeError::NotBuilt)?;
        // Keep earlier user events out of the suppression window.
        self.deferred.extend(widget.take_events());

        let _scope = self.op.enter(InternalOp::Renaming);
        let result = widget.rename_node(id, label);
        Self::settle(widget, &self.op, &mut self.deferred);
        result?;
        Ok(())
    }

    /// Reparent `id` under `parent` (the root if `None`) without notifying
    /// the drag handler, then expand the new parent.
    ///
    /// No-op if either node is absent or if `parent` lies inside `id`'s
    /// subtree.
    pub fn set_parent(&mut self, id: &str, parent: Option<&str>) -> Result<()> {
        let widget = self.widget.as_mut().ok_or(TreeError::NotBuilt)?;
        if widget.get_node(id).is_none() {
            return Ok(());
        }
        if let Some(p) = parent {
            if widget.get_node(p).is_none() {
                return Ok(());
            }
            if Self::is_within(widget, p, id) {
                warn!("set_parent: '{}' cannot move under its descendant '{}'", id, p);
                return Ok(());
            }
        }
        self.deferred.extend(widget.take_events());

        {
            let _scope = self.op.enter(InternalOp::Moving);
            let result = widget.move_node(id, parent);
            Self::settle(widget, &self.op, &mut self.deferred);
            result?;
        }

        if let Some(p) = parent {
            widget.open_node(p);
        }
        Ok(())
    }

    /// True if `candidate` is `ancestor` or one of its descendants.
    fn is_within(widget: &W, candidate: &str, ancestor: &str) -> bool {
        let mut current = Some(candidate.to_string());
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = widget.get_node(&id).and_then(|n| n.parent);
        }
        false
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Open a node so its children are visible.
    pub fn expand(&mut self, id: &str) -> Result<()> {
        self.built_mut()?.open_node(id);
        Ok(())
    }

    /// Close a node.
    pub fn collapse(&mut self, id: &str) -> Result<()> {
        self.built_mut()?.close_node(id);
        Ok(())
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.widget.as_ref().is_some_and(|w| w.is_open(id))
    }

    /// Show only nodes whose label contains `query` (case-insensitive),
    /// with their ancestors and children. An empty query shows everything.
    pub fn search(&mut self, query: &str) -> Result<()> {
        self.built_mut()?.search(query);
        Ok(())
    }

    /// Ids of the rendered rows in display order.
    pub fn visible_ids(&self) -> Vec<String> {
        self.widget.as_ref().map(|w| w.visible()).unwrap_or_default()
    }

    /// Snapshot of open and selected nodes.
    pub fn view_state(&self) -> ViewState {
        match &self.widget {
            Some(widget) => ViewState {
                opened: widget.opened(),
                selected: widget.selected(),
            },
            None => ViewState::default(),
        }
    }

    /// Re-open and re-select the nodes of `state` that still exist.
    ///
    /// Open nodes not listed in `state` stay open.
    pub fn restore_view_state(&mut self, state: &ViewState) -> Result<()> {
        let widget = self.widget.as_mut().ok_or(TreeError::NotBuilt)?;
        for id in &state.opened {
            widget.open_node(id);
        }
        widget.deselect_all();
        for id in &state.selected {
            widget.select_node(id);
        }
        self.current_selection = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::focus::FocusRegistry;
    use crate::tree::MemoryTree;

    use super::*;

    fn tree() -> MemoryTree<u32> {
        let mut tree = MemoryTree::new("test").with_registry(Arc::new(FocusRegistry::new()));
        tree.build("container", crate::MemoryWidget::new()).unwrap();
        tree
    }

    #[test]
    fn test_unbuilt_tree_is_inert() {
        let mut tree: MemoryTree<u32> = MemoryTree::new("inert");
        assert!(matches!(
            tree.add(TreeNode::new("a", "A", 0), None),
            Err(TreeError::NotBuilt)
        ));
        assert!(tree.get("a").is_none());
        assert_eq!(tree.get_nodes_count(), 0);
        assert!(tree.get_all_selected().is_empty());
    }

    #[test]
    fn test_add_applies_fallback_icon() {
        let mut tree = tree();
        let node = tree.add(TreeNode::new("a", "A", 0), None).unwrap();
        assert_eq!(node.icon.as_deref(), Some("icon-error"));
        let node = tree
            .add(TreeNode::new("b", "B", 0).with_icon("icon-script"), None)
            .unwrap();
        assert_eq!(node.icon.as_deref(), Some("icon-script"));
    }

    #[test]
    fn test_is_within() {
        let mut tree = tree();
        tree.add(TreeNode::new("a", "A", 0), None).unwrap();
        tree.add(TreeNode::new("b", "B", 0), Some("a")).unwrap();
        tree.add(TreeNode::new("c", "C", 0), Some("b")).unwrap();
        let widget = tree.widget().unwrap();
        assert!(MemoryTree::<u32>::is_within(widget, "c", "a"));
        assert!(MemoryTree::<u32>::is_within(widget, "a", "a"));
        assert!(!MemoryTree::<u32>::is_within(widget, "a", "c"));
    }

    #[test]
    fn test_clear_subtree_keeps_root() {
        let mut tree = tree();
        tree.add(TreeNode::new("a", "A", 0), None).unwrap();
        tree.add(TreeNode::new("b", "B", 0), Some("a")).unwrap();
        tree.add(TreeNode::new("c", "C", 0), Some("b")).unwrap();
        tree.clear(Some("a")).unwrap();
        assert_eq!(tree.get_nodes_count(), 1);
        tree.clear(None).unwrap();
        assert_eq!(tree.get_nodes_count(), 0);
    }
}
