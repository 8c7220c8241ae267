//! Backing widget capability.
//!
//! The rendering engine (rows, drag-and-drop, inline rename editor,
//! context-menu overlay, search filter) is abstracted as [`BackingWidget`].
//! User interaction on the engine is reported through a queue of
//! [`WidgetEvent`]s that the tree drains in
//! [`HierarchyTree::process_events`](crate::HierarchyTree::process_events).

mod memory;
mod search;

pub use memory::{MemoryWidget, WidgetStats};
pub use search::LabelMatcher;

use std::sync::Arc;

use crate::error::WidgetError;
use crate::node::TreeNode;

/// Optional engine features requested at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plugin {
    ContextMenu,
    DragAndDrop,
    Search,
    /// Persisted expand/collapse and selection state.
    State,
    /// Icon/styling categories.
    Types,
    /// Whole-row highlight.
    WholeRow,
    /// Keyboard bindings.
    Hotkeys,
}

/// Decides whether a drag may start, given the first dragged node.
pub type DragGate<P> = Arc<dyn Fn(&TreeNode<P>) -> bool + Send + Sync>;

/// Options passed to [`BackingWidget::mount`].
pub struct WidgetOptions<P> {
    pub plugins: Vec<Plugin>,
    /// Allow multiple selection.
    pub multiple: bool,
    /// Hide nodes that do not match the search.
    pub search_show_only_matches: bool,
    /// Keep the children of matching nodes visible.
    pub search_show_only_matches_children: bool,
    pub is_draggable: DragGate<P>,
}

impl<P> WidgetOptions<P> {
    /// Check if a plugin was requested.
    pub fn has_plugin(&self, plugin: Plugin) -> bool {
        self.plugins.contains(&plugin)
    }
}

impl<P> std::fmt::Debug for WidgetOptions<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("plugins", &self.plugins)
            .field("multiple", &self.multiple)
            .field("search_show_only_matches", &self.search_show_only_matches)
            .field(
                "search_show_only_matches_children",
                &self.search_show_only_matches_children,
            )
            .finish_non_exhaustive()
    }
}

/// Kind of selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    Select,
    Deselect,
    DeselectAll,
}

/// Notification emitted by the backing widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Selection changed through user interaction.
    SelectionChanged {
        action: SelectionAction,
        id: Option<String>,
    },
    /// A row was double-clicked.
    DoubleClicked,
    /// A node's label changed.
    Renamed { id: String, old: String, new: String },
    /// A node was duplicated; `copy` is the widget-generated id.
    Copied { original: String, copy: String },
    /// A node changed parent.
    Moved {
        id: String,
        parent: Option<String>,
        old_parent: Option<String>,
    },
    FocusIn,
    FocusOut,
}

/// Node CRUD, selection, move/rename primitives and event emission.
///
/// `None` as a parent always means the synthetic root. Lookups of absent
/// ids return `None`, `false` or an empty list rather than an error.
pub trait BackingWidget<P: Clone> {
    /// Attach to the container and apply options.
    fn mount(&mut self, container_id: &str, options: WidgetOptions<P>) -> Result<(), WidgetError>;

    /// Detach, optionally persisting view state first.
    fn unmount(&mut self, persist_state: bool);

    fn is_mounted(&self) -> bool;

    /// Insert `node` as the last child of `parent` and return its id.
    fn create_node(&mut self, parent: Option<&str>, node: TreeNode<P>)
    -> Result<String, WidgetError>;

    /// Delete a node and its subtree. Returns true if it existed.
    fn delete_node(&mut self, id: &str) -> bool;

    fn get_node(&self, id: &str) -> Option<TreeNode<P>>;

    /// Child ids of `parent` in display order.
    fn children(&self, parent: Option<&str>) -> Vec<String>;

    /// Selected ids in selection order.
    fn selected(&self) -> Vec<String>;

    /// Add a node to the selection without emitting events.
    fn select_node(&mut self, id: &str) -> bool;

    /// Clear the selection without emitting events.
    fn deselect_all(&mut self);

    /// Change a label. Emits [`WidgetEvent::Renamed`] when the node exists.
    fn rename_node(&mut self, id: &str, label: &str) -> Result<bool, WidgetError>;

    fn open_node(&mut self, id: &str);

    fn close_node(&mut self, id: &str);

    fn is_open(&self, id: &str) -> bool;

    /// Ids of every open node.
    fn opened(&self) -> Vec<String>;

    /// Reparent as the last child of `parent`. Emits [`WidgetEvent::Moved`].
    fn move_node(&mut self, id: &str, parent: Option<&str>) -> Result<bool, WidgetError>;

    /// Replace a node's id.
    fn set_id(&mut self, id: &str, new_id: &str) -> Result<(), WidgetError>;

    /// Replace a node's payload. Returns true if the node exists.
    fn set_payload(&mut self, id: &str, payload: P) -> bool;

    /// Number of nodes at every depth.
    fn flat_count(&self) -> usize;

    /// Filter rows by label. An empty query clears the filter.
    fn search(&mut self, query: &str);

    /// Rendered rows in display order.
    fn visible(&self) -> Vec<String>;

    /// Drain queued notifications.
    fn take_events(&mut self) -> Vec<WidgetEvent>;
}
