//! In-memory backing widget.
//!
//! Holds the node arena, selection, open set and search filter without any
//! rendering. Besides the [`BackingWidget`] primitives it can replay user
//! interaction (`click`, `drag_move`, `user_rename`, ...) which queues the
//! same events a rendering engine would emit.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::error::WidgetError;
use crate::node::TreeNode;
use crate::selection::{Selection, SelectionMode};
use crate::view_state::ViewState;

use super::{BackingWidget, LabelMatcher, Plugin, SelectionAction, WidgetEvent, WidgetOptions};

/// Call counters for the programmatic primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetStats {
    pub select_calls: usize,
    pub deselect_all_calls: usize,
    pub rename_calls: usize,
    pub move_calls: usize,
    pub delete_calls: usize,
}

/// A [`BackingWidget`] that keeps everything in memory.
///
/// # Example
///
/// ```
/// use hierarchy_tree::{BackingWidget, MemoryWidget, TreeNode};
///
/// let mut widget = MemoryWidget::new();
/// widget.create_node(None, TreeNode::new("scripts", "Scripts", ())).unwrap();
/// widget.create_node(Some("scripts"), TreeNode::new("a.ts", "a.ts", ())).unwrap();
/// assert_eq!(widget.flat_count(), 2);
/// ```
#[derive(Debug)]
pub struct MemoryWidget<P> {
    container: Option<String>,
    options: Option<WidgetOptions<P>>,
    nodes: HashMap<String, TreeNode<P>>,
    roots: Vec<String>,
    selection: Selection,
    opened: HashSet<String>,
    /// Ids left visible by the current search, if any.
    filter: Option<HashSet<String>>,
    events: Vec<WidgetEvent>,
    stats: WidgetStats,
    saved_state: Option<ViewState>,
    /// Saved state still being applied to nodes as they are created.
    restoring: Option<ViewState>,
    next_generated: usize,
}

impl<P> Default for MemoryWidget<P> {
    fn default() -> Self {
        Self {
            container: None,
            options: None,
            nodes: HashMap::new(),
            roots: Vec::new(),
            selection: Selection::default(),
            opened: HashSet::new(),
            filter: None,
            events: Vec::new(),
            stats: WidgetStats::default(),
            saved_state: None,
            restoring: None,
            next_generated: 1,
        }
    }
}

impl<P: Clone> MemoryWidget<P> {
    /// Create an empty, unmounted widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with previously persisted view state, restored on mount.
    pub fn with_saved_state(mut self, state: ViewState) -> Self {
        self.saved_state = Some(state);
        self
    }

    /// Container the widget is mounted on.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Options applied at mount.
    pub fn options(&self) -> Option<&WidgetOptions<P>> {
        self.options.as_ref()
    }

    /// Call counters.
    pub fn stats(&self) -> WidgetStats {
        self.stats
    }

    /// View state persisted by the last `unmount(true)`.
    pub fn saved_state(&self) -> Option<&ViewState> {
        self.saved_state.as_ref()
    }

    /// Events queued but not yet drained.
    pub fn pending_events(&self) -> &[WidgetEvent] {
        &self.events
    }

    // -------------------------------------------------------------------------
    // User interaction
    // -------------------------------------------------------------------------

    /// Plain click: select only `id`.
    pub fn click(&mut self, id: &str) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.selection.select_only(id);
        self.push(WidgetEvent::SelectionChanged {
            action: SelectionAction::Select,
            id: Some(id.to_string()),
        });
        true
    }

    /// Ctrl+click: toggle `id` in multi mode, plain click otherwise.
    pub fn ctrl_click(&mut self, id: &str) -> bool {
        if self.selection.mode == SelectionMode::Single {
            return self.click(id);
        }
        if !self.nodes.contains_key(id) {
            return false;
        }
        let action = if self.selection.toggle(id) {
            SelectionAction::Select
        } else {
            SelectionAction::Deselect
        };
        self.push(WidgetEvent::SelectionChanged {
            action,
            id: Some(id.to_string()),
        });
        true
    }

    /// Clear the selection by clicking empty space.
    pub fn click_empty(&mut self) {
        if self.selection.clear() {
            self.push(WidgetEvent::SelectionChanged {
                action: SelectionAction::DeselectAll,
                id: None,
            });
        }
    }

    pub fn double_click(&mut self) {
        self.push(WidgetEvent::DoubleClicked);
    }

    /// Finish an inline rename.
    pub fn user_rename(&mut self, id: &str, label: &str) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let old = std::mem::replace(&mut node.label, label.to_string());
        self.push(WidgetEvent::Renamed {
            id: id.to_string(),
            old,
            new: label.to_string(),
        });
        true
    }

    /// Drag `ids` onto `parent`. Returns false if the drag was refused.
    ///
    /// Nodes that would land inside their own subtree are skipped.
    pub fn drag_move(&mut self, ids: &[&str], parent: Option<&str>) -> bool {
        if !self.can_start_drag(ids) || !self.parent_exists(parent) {
            return false;
        }
        for id in ids {
            if !self.nodes.contains_key(*id) || self.would_cycle(id, parent) {
                continue;
            }
            let old_parent = self.relocate(id, parent);
            self.push(WidgetEvent::Moved {
                id: id.to_string(),
                parent: parent.map(str::to_string),
                old_parent,
            });
        }
        true
    }

    /// Ctrl+drag `ids` onto `parent`, duplicating each subtree.
    ///
    /// Returns the generated ids of the top-level copies. Nodes that would
    /// land inside their own subtree are skipped.
    pub fn drag_copy(&mut self, ids: &[&str], parent: Option<&str>) -> Vec<String> {
        if !self.can_start_drag(ids) || !self.parent_exists(parent) {
            return Vec::new();
        }
        let mut copies = Vec::new();
        for id in ids {
            if self.would_cycle(id, parent) {
                debug!("copy of '{}' into its own subtree skipped", id);
                continue;
            }
            if let Some(copy) = self.duplicate(id, parent) {
                self.push(WidgetEvent::Copied {
                    original: id.to_string(),
                    copy: copy.clone(),
                });
                copies.push(copy);
            }
        }
        copies
    }

    pub fn focus_in(&mut self) {
        self.push(WidgetEvent::FocusIn);
    }

    pub fn focus_out(&mut self) {
        self.push(WidgetEvent::FocusOut);
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn push(&mut self, event: WidgetEvent) {
        trace!("widget event queued: {:?}", event);
        self.events.push(event);
    }

    fn can_start_drag(&self, ids: &[&str]) -> bool {
        let Some(options) = &self.options else {
            return false;
        };
        if !options.has_plugin(Plugin::DragAndDrop) {
            return false;
        }
        let Some(first) = ids.first().and_then(|id| self.nodes.get(*id)) else {
            return false;
        };
        let allowed = (options.is_draggable)(first);
        if !allowed {
            debug!("drag of '{}' refused", first.id);
        }
        allowed
    }

    fn parent_exists(&self, parent: Option<&str>) -> bool {
        parent.is_none_or(|p| self.nodes.contains_key(p))
    }

    fn child_list_mut(&mut self, parent: Option<&str>) -> Option<&mut Vec<String>> {
        match parent {
            None => Some(&mut self.roots),
            Some(p) => self.nodes.get_mut(p).map(|n| &mut n.children),
        }
    }

    /// Ids of `id` and everything below it, depth first.
    fn subtree(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().cloned());
                out.push(current);
            }
        }
        out
    }

    fn ancestors(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(id).and_then(|n| n.parent.clone());
        while let Some(parent) = current {
            current = self.nodes.get(&parent).and_then(|n| n.parent.clone());
            out.push(parent);
        }
        out
    }

    /// True if `parent` is `id` or lies inside its subtree.
    fn would_cycle(&self, id: &str, parent: Option<&str>) -> bool {
        match parent {
            None => false,
            Some(p) => p == id || self.ancestors(p).iter().any(|a| a == id),
        }
    }

    /// Move `id` to the end of `parent`'s children; returns the old parent.
    fn relocate(&mut self, id: &str, parent: Option<&str>) -> Option<String> {
        let old_parent = self.nodes.get(id).and_then(|n| n.parent.clone());
        if let Some(list) = self.child_list_mut(old_parent.as_deref()) {
            list.retain(|c| c != id);
        }
        if let Some(list) = self.child_list_mut(parent) {
            list.push(id.to_string());
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = parent.map(str::to_string);
        }
        old_parent
    }

    fn generate_id(&mut self) -> String {
        loop {
            let id = format!("j1_{}", self.next_generated);
            self.next_generated += 1;
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Copy the subtree at `id` under `parent` with generated ids.
    fn duplicate(&mut self, id: &str, parent: Option<&str>) -> Option<String> {
        let source = self.nodes.get(id)?.clone();
        let copy_id = self.generate_id();
        let copy = TreeNode {
            id: copy_id.clone(),
            children: Vec::new(),
            parent: parent.map(str::to_string),
            ..source.clone()
        };
        self.nodes.insert(copy_id.clone(), copy);
        if let Some(list) = self.child_list_mut(parent) {
            list.push(copy_id.clone());
        }
        for child in &source.children {
            self.duplicate(child, Some(&copy_id));
        }
        Some(copy_id)
    }

    fn snapshot(&self) -> ViewState {
        ViewState {
            opened: self.opened(),
            selected: self.selection.ids().to_vec(),
        }
    }

    /// Apply the state being restored to `id`, if it mentions it.
    fn restore_node(&mut self, id: &str) {
        let Some(state) = &self.restoring else {
            return;
        };
        let open = state.opened.iter().any(|o| o == id);
        let select = state.selected.iter().any(|s| s == id);
        if open {
            self.opened.insert(id.to_string());
        }
        if select {
            self.selection.select(id);
        }
    }

    fn collect_visible(&self, ids: &[String], out: &mut Vec<String>) {
        for id in ids {
            if self.filter.as_ref().is_some_and(|f| !f.contains(id)) {
                continue;
            }
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id.clone());
            if self.opened.contains(id) {
                self.collect_visible(&node.children, out);
            }
        }
    }
}

impl<P: Clone> BackingWidget<P> for MemoryWidget<P> {
    fn mount(&mut self, container_id: &str, options: WidgetOptions<P>) -> Result<(), WidgetError> {
        if let Some(existing) = &self.container {
            return Err(WidgetError::AlreadyMounted(existing.clone()));
        }
        debug!(
            "mounting widget on '{}' with plugins {:?}",
            container_id, options.plugins
        );
        self.selection.mode = SelectionMode::from_multiple(options.multiple);
        if self.selection.mode == SelectionMode::Single && self.selection.len() > 1 {
            let first = self.selection.first().map(str::to_string);
            self.selection.retain(|id| Some(id) == first.as_ref());
        }
        let restore = options.has_plugin(Plugin::State);
        self.container = Some(container_id.to_string());
        self.options = Some(options);
        if restore {
            self.restoring = self.saved_state.clone();
            let existing: Vec<String> = self.nodes.keys().cloned().collect();
            for id in existing {
                self.restore_node(&id);
            }
        }
        Ok(())
    }

    fn unmount(&mut self, persist_state: bool) {
        let keeps_state = self
            .options
            .as_ref()
            .is_some_and(|o| o.has_plugin(Plugin::State));
        if persist_state && keeps_state {
            self.saved_state = Some(self.snapshot());
        }
        debug!(
            "unmounting widget from '{}' (persist: {})",
            self.container.as_deref().unwrap_or_default(),
            persist_state
        );
        self.container = None;
        self.options = None;
        self.nodes.clear();
        self.roots.clear();
        self.selection.clear();
        self.opened.clear();
        self.filter = None;
        self.events.clear();
        self.restoring = None;
    }

    fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    fn create_node(
        &mut self,
        parent: Option<&str>,
        mut node: TreeNode<P>,
    ) -> Result<String, WidgetError> {
        if self.nodes.contains_key(&node.id) {
            return Err(WidgetError::DuplicateId(node.id));
        }
        if let Some(p) = parent
            && !self.nodes.contains_key(p)
        {
            return Err(WidgetError::NodeNotFound(p.to_string()));
        }
        let id = node.id.clone();
        node.parent = parent.map(str::to_string);
        node.children.clear();
        self.nodes.insert(id.clone(), node);
        if let Some(list) = self.child_list_mut(parent) {
            list.push(id.clone());
        }
        self.restore_node(&id);
        Ok(id)
    }

    fn delete_node(&mut self, id: &str) -> bool {
        self.stats.delete_calls += 1;
        if !self.nodes.contains_key(id) {
            return false;
        }
        let removed = self.subtree(id);
        let parent = self.nodes.get(id).and_then(|n| n.parent.clone());
        if let Some(list) = self.child_list_mut(parent.as_deref()) {
            list.retain(|c| c != id);
        }
        for gone in &removed {
            self.nodes.remove(gone);
            self.opened.remove(gone);
            if let Some(filter) = &mut self.filter {
                filter.remove(gone);
            }
        }
        self.selection.retain(|s| !removed.contains(s));
        true
    }

    fn get_node(&self, id: &str) -> Option<TreeNode<P>> {
        self.nodes.get(id).cloned()
    }

    fn children(&self, parent: Option<&str>) -> Vec<String> {
        match parent {
            None => self.roots.clone(),
            Some(p) => self
                .nodes
                .get(p)
                .map(|n| n.children.clone())
                .unwrap_or_default(),
        }
    }

    fn selected(&self) -> Vec<String> {
        self.selection.ids().to_vec()
    }

    fn select_node(&mut self, id: &str) -> bool {
        self.stats.select_calls += 1;
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.selection.select(id);
        true
    }

    fn deselect_all(&mut self) {
        self.stats.deselect_all_calls += 1;
        self.selection.clear();
    }

    fn rename_node(&mut self, id: &str, label: &str) -> Result<bool, WidgetError> {
        self.stats.rename_calls += 1;
        Ok(self.user_rename(id, label))
    }

    fn open_node(&mut self, id: &str) {
        if self.nodes.get(id).is_some_and(TreeNode::has_children) {
            self.opened.insert(id.to_string());
        }
    }

    fn close_node(&mut self, id: &str) {
        self.opened.remove(id);
    }

    fn is_open(&self, id: &str) -> bool {
        self.opened.contains(id)
    }

    fn opened(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.opened.iter().cloned().collect();
        ids.sort();
        ids
    }

    fn move_node(&mut self, id: &str, parent: Option<&str>) -> Result<bool, WidgetError> {
        self.stats.move_calls += 1;
        if !self.nodes.contains_key(id) || !self.parent_exists(parent) {
            return Ok(false);
        }
        if self.would_cycle(id, parent) {
            return Err(WidgetError::InvalidMove {
                id: id.to_string(),
                parent: parent.unwrap_or_default().to_string(),
            });
        }
        let old_parent = self.relocate(id, parent);
        self.push(WidgetEvent::Moved {
            id: id.to_string(),
            parent: parent.map(str::to_string),
            old_parent,
        });
        Ok(true)
    }

    fn set_id(&mut self, id: &str, new_id: &str) -> Result<(), WidgetError> {
        if id == new_id {
            return Ok(());
        }
        if self.nodes.contains_key(new_id) {
            return Err(WidgetError::DuplicateId(new_id.to_string()));
        }
        let mut node = self
            .nodes
            .remove(id)
            .ok_or_else(|| WidgetError::NodeNotFound(id.to_string()))?;
        node.id = new_id.to_string();
        for child in &node.children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = Some(new_id.to_string());
            }
        }
        let parent = node.parent.clone();
        self.nodes.insert(new_id.to_string(), node);
        if let Some(list) = self.child_list_mut(parent.as_deref()) {
            for entry in list.iter_mut().filter(|c| *c == id) {
                *entry = new_id.to_string();
            }
        }
        if self.opened.remove(id) {
            self.opened.insert(new_id.to_string());
        }
        if let Some(filter) = &mut self.filter
            && filter.remove(id)
        {
            filter.insert(new_id.to_string());
        }
        self.selection.rekey(id, new_id);
        Ok(())
    }

    fn set_payload(&mut self, id: &str, payload: P) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.payload = payload;
                true
            }
            None => false,
        }
    }

    fn flat_count(&self) -> usize {
        self.nodes.len()
    }

    fn search(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.filter = None;
            return;
        }
        let (only_matches, keep_children) = self
            .options
            .as_ref()
            .map(|o| (o.search_show_only_matches, o.search_show_only_matches_children))
            .unwrap_or((true, true));

        let mut matcher = LabelMatcher::new(query);
        let matches: Vec<String> = self
            .nodes
            .values()
            .filter(|n| matcher.matches(&n.label))
            .map(|n| n.id.clone())
            .collect();
        debug!("search '{}' matched {} node(s)", query, matches.len());

        let mut visible = HashSet::new();
        for id in &matches {
            for ancestor in self.ancestors(id) {
                self.opened.insert(ancestor.clone());
                visible.insert(ancestor);
            }
            if keep_children {
                visible.extend(self.subtree(id));
            } else {
                visible.insert(id.clone());
            }
        }
        self.filter = only_matches.then_some(visible);
    }

    fn visible(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_visible(&self.roots, &mut out);
        out
    }

    fn take_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn options(multiple: bool, draggable: bool) -> WidgetOptions<u32> {
        WidgetOptions {
            plugins: vec![Plugin::DragAndDrop, Plugin::Search, Plugin::State],
            multiple,
            search_show_only_matches: true,
            search_show_only_matches_children: true,
            is_draggable: Arc::new(move |_: &TreeNode<u32>| draggable),
        }
    }

    /// scene
    /// ├── camera
    /// └── lights
    ///     ├── sun
    ///     └── lamp
    fn populated(multiple: bool, draggable: bool) -> MemoryWidget<u32> {
        let mut widget = MemoryWidget::new();
        widget.mount("tree", options(multiple, draggable)).unwrap();
        widget.create_node(None, TreeNode::new("scene", "Scene", 0)).unwrap();
        widget.create_node(Some("scene"), TreeNode::new("camera", "Camera", 1)).unwrap();
        widget.create_node(Some("scene"), TreeNode::new("lights", "Lights", 2)).unwrap();
        widget.create_node(Some("lights"), TreeNode::new("sun", "Sun", 3)).unwrap();
        widget.create_node(Some("lights"), TreeNode::new("lamp", "Lamp", 4)).unwrap();
        widget
    }

    #[test]
    fn test_create_rejects_duplicates_and_missing_parent() {
        let mut widget = populated(false, true);
        assert!(matches!(
            widget.create_node(None, TreeNode::new("sun", "Sun", 9)),
            Err(WidgetError::DuplicateId(_))
        ));
        assert!(matches!(
            widget.create_node(Some("nope"), TreeNode::new("x", "X", 9)),
            Err(WidgetError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut widget = populated(true, true);
        widget.select_node("sun");
        assert!(widget.delete_node("lights"));
        assert_eq!(widget.flat_count(), 2);
        assert!(widget.get_node("lamp").is_none());
        assert!(widget.selected().is_empty());
        assert_eq!(widget.children(Some("scene")), vec!["camera".to_string()]);
        assert!(!widget.delete_node("lights"));
    }

    #[test]
    fn test_visible_respects_open_state() {
        let mut widget = populated(false, true);
        assert_eq!(widget.visible(), vec!["scene".to_string()]);
        widget.open_node("scene");
        assert_eq!(widget.visible(), vec!["scene", "camera", "lights"]);
        widget.open_node("camera");
        assert!(!widget.is_open("camera"));
    }

    #[test]
    fn test_search_keeps_ancestors_and_hides_others() {
        let mut widget = populated(false, true);
        widget.search("SUN");
        assert_eq!(widget.visible(), vec!["scene", "lights", "sun"]);
        widget.search("");
        assert_eq!(widget.visible().len(), 5);
    }

    #[test]
    fn test_search_keeps_children_of_matches() {
        let mut widget = populated(false, true);
        widget.open_node("scene");
        widget.open_node("lights");
        widget.search("light");
        assert_eq!(widget.visible(), vec!["scene", "lights", "sun", "lamp"]);
    }

    #[test]
    fn test_move_rejects_cycles() {
        let mut widget = populated(false, true);
        assert!(matches!(
            widget.move_node("scene", Some("sun")),
            Err(WidgetError::InvalidMove { .. })
        ));
        assert!(widget.move_node("sun", None).unwrap());
        assert_eq!(widget.children(None), vec!["scene", "sun"]);
        assert_eq!(
            widget.take_events(),
            vec![WidgetEvent::Moved {
                id: "sun".to_string(),
                parent: None,
                old_parent: Some("lights".to_string()),
            }]
        );
    }

    #[test]
    fn test_drag_refused_by_gate() {
        let mut widget = populated(false, false);
        assert!(!widget.drag_move(&["sun"], Some("scene")));
        assert!(widget.take_events().is_empty());
        assert_eq!(widget.get_node("sun").unwrap().parent.as_deref(), Some("lights"));
    }

    #[test]
    fn test_drag_copy_duplicates_subtree() {
        let mut widget = populated(false, true);
        let copies = widget.drag_copy(&["lights"], None);
        assert_eq!(copies.len(), 1);
        assert_eq!(widget.flat_count(), 8);
        let copy = widget.get_node(&copies[0]).unwrap();
        assert_eq!(copy.label, "Lights");
        assert_eq!(copy.children.len(), 2);
        assert_eq!(
            widget.take_events(),
            vec![WidgetEvent::Copied {
                original: "lights".to_string(),
                copy: copies[0].clone(),
            }]
        );
    }

    #[test]
    fn test_set_id_rekeys_everything() {
        let mut widget = populated(false, true);
        widget.open_node("lights");
        widget.select_node("lights");
        widget.set_id("lights", "lighting").unwrap();
        assert!(widget.get_node("lights").is_none());
        assert_eq!(widget.children(Some("scene")), vec!["camera", "lighting"]);
        assert_eq!(widget.get_node("sun").unwrap().parent.as_deref(), Some("lighting"));
        assert!(widget.is_open("lighting"));
        assert_eq!(widget.selected(), vec!["lighting".to_string()]);
        assert!(matches!(
            widget.set_id("sun", "camera"),
            Err(WidgetError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_ctrl_click_single_mode_replaces() {
        let mut widget = populated(false, true);
        widget.click("sun");
        widget.ctrl_click("lamp");
        assert_eq!(widget.selected(), vec!["lamp".to_string()]);
    }

    #[test]
    fn test_ctrl_click_multi_mode_toggles() {
        let mut widget = populated(true, true);
        widget.click("sun");
        widget.ctrl_click("lamp");
        widget.ctrl_click("sun");
        assert_eq!(widget.selected(), vec!["lamp".to_string()]);
        let events = widget.take_events();
        assert_eq!(
            events.last(),
            Some(&WidgetEvent::SelectionChanged {
                action: SelectionAction::Deselect,
                id: Some("sun".to_string()),
            })
        );
    }

    #[test]
    fn test_unmount_persists_only_when_asked() {
        let mut widget = populated(false, true);
        widget.open_node("scene");
        widget.unmount(false);
        assert!(widget.saved_state().is_none());
        assert_eq!(widget.flat_count(), 0);

        let mut widget = populated(false, true);
        widget.open_node("scene");
        widget.select_node("camera");
        widget.unmount(true);
        assert_eq!(
            widget.saved_state(),
            Some(&ViewState {
                opened: vec!["scene".to_string()],
                selected: vec!["camera".to_string()],
            })
        );
    }

    #[test]
    fn test_drag_copy_into_own_subtree_is_skipped() {
        let mut widget = populated(false, true);
        assert!(widget.drag_copy(&["lights"], Some("sun")).is_empty());
        assert!(widget.drag_copy(&["scene"], Some("scene")).is_empty());
        assert_eq!(widget.flat_count(), 5);
        assert!(widget.take_events().is_empty());

        let copies = widget.drag_copy(&["scene", "sun"], Some("lamp"));
        assert_eq!(copies.len(), 1);
        assert_eq!(widget.get_node(&copies[0]).unwrap().label, "Sun");
        assert_eq!(widget.flat_count(), 6);
    }

    #[test]
    fn test_mount_twice_fails() {
        let mut widget = populated(false, true);
        assert!(matches!(
            widget.mount("other", options(false, true)),
            Err(WidgetError::AlreadyMounted(_))
        ));
    }
}
