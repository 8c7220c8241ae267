//! Generic hierarchy tree for editor navigation panels.
//!
//! The crate coordinates a tree-rendering widget (abstracted as
//! [`BackingWidget`]) for a code workspace's script/post-process panel:
//!
//! - typed node CRUD with a caller-chosen payload type,
//! - cached selection,
//! - rename, move and copy validation through host handlers, with the tree
//!   reverted when a handler says no,
//! - context menus built when they are opened,
//! - focus tracking across every tree through a [`FocusRegistry`].
//!
//! [`MemoryWidget`] is a complete in-memory widget, used headless and in
//! tests.

pub mod config;
pub mod error;
pub mod focus;
pub mod handlers;
pub mod node;
pub mod scope;
pub mod selection;
pub mod tree;
pub mod view_state;
pub mod widget;

pub use config::TreeConfig;
pub use error::{BoxError, Result, TreeError, WidgetError};
pub use focus::{FocusRegistry, TreeId, has_one_focused};
pub use handlers::{ContextMenu, ContextMenuAction, CopyAccepted, Handlers, Verdict};
pub use node::{ROOT_ID, TreeNode};
pub use scope::InternalOp;
pub use selection::{Selection, SelectionMode};
pub use tree::{HierarchyTree, MemoryTree};
pub use view_state::ViewState;
pub use widget::{
    BackingWidget, LabelMatcher, MemoryWidget, Plugin, SelectionAction, WidgetEvent,
    WidgetOptions, WidgetStats,
};
