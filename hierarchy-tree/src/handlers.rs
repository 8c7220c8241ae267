//! Host callbacks and context-menu actions.

use std::future::Future;
use std::sync::{Arc, RwLock};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::BoxError;
use crate::node::TreeNode;

/// Pending accept/reject decision from a validation handler.
pub type Verdict = BoxFuture<'static, bool>;

/// `(id, payload)`, used for click and double-click.
pub type ClickHandler<P> = Box<dyn FnMut(&str, &P) + Send>;

/// `(id, new_label, payload)`; resolving to false reverts the rename.
pub type RenameHandler<P> = Box<dyn FnMut(&str, &str, &P) -> Verdict + Send>;

/// `(id, payload)` of the last selected node; returns the menu entries.
pub type ContextMenuHandler<P> = Box<dyn FnMut(&str, &P) -> Vec<ContextMenuAction<P>> + Send>;

/// `(id, payload)` of the first dragged node; false refuses the drag.
pub type CanDragHandler<P> = Box<dyn Fn(&str, &P) -> bool + Send + Sync>;

/// `(payload, new_parent_payload)`; resolving to false reverts the move.
///
/// The parent payload is `None` when the node was dropped on the root.
pub type DragHandler<P> = Box<dyn FnMut(&P, Option<&P>) -> Verdict + Send>;

/// `(source, copy, parent_payload)`; resolving to `None` deletes the copy.
pub type CopyHandler<P> = Box<
    dyn FnMut(&TreeNode<P>, &TreeNode<P>, Option<&P>) -> BoxFuture<'static, Option<CopyAccepted<P>>>
        + Send,
>;

/// Callback run by a context-menu action.
pub type ActionCallback<P> =
    Arc<dyn Fn(TreeNode<P>) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Outcome of an accepted copy.
///
/// The widget-generated id of the duplicate is replaced by `id`, and its
/// payload by `payload`.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyAccepted<P> {
    pub id: String,
    pub payload: P,
}

/// Handler slots of a tree. Every slot starts empty.
pub struct Handlers<P> {
    pub on_click: Option<ClickHandler<P>>,
    pub on_dbl_click: Option<ClickHandler<P>>,
    pub on_rename: Option<RenameHandler<P>>,
    pub on_context_menu: Option<ContextMenuHandler<P>>,
    pub on_drag: Option<DragHandler<P>>,
    pub on_copy: Option<CopyHandler<P>>,
    /// Shared with the widget's drag gate, which reads it on every drag start.
    pub(crate) on_can_drag: Arc<RwLock<Option<CanDragHandler<P>>>>,
}

impl<P> Default for Handlers<P> {
    fn default() -> Self {
        Self {
            on_click: None,
            on_dbl_click: None,
            on_rename: None,
            on_context_menu: None,
            on_drag: None,
            on_copy: None,
            on_can_drag: Arc::new(RwLock::new(None)),
        }
    }
}

impl<P> Handlers<P> {
    /// Replace the drag gate handler.
    pub(crate) fn set_can_drag(&self, handler: Option<CanDragHandler<P>>) {
        if let Ok(mut guard) = self.on_can_drag.write() {
            *guard = handler;
        }
    }

    pub(crate) fn has_can_drag(&self) -> bool {
        self.on_can_drag
            .read()
            .map(|g| g.is_some())
            .unwrap_or(false)
    }

    /// Empty every slot.
    pub(crate) fn clear(&mut self) {
        self.on_click = None;
        self.on_dbl_click = None;
        self.on_rename = None;
        self.on_context_menu = None;
        self.on_drag = None;
        self.on_copy = None;
        self.set_can_drag(None);
    }
}

impl<P> std::fmt::Debug for Handlers<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("on_click", &self.on_click.is_some())
            .field("on_dbl_click", &self.on_dbl_click.is_some())
            .field("on_rename", &self.on_rename.is_some())
            .field("on_context_menu", &self.on_context_menu.is_some())
            .field("on_can_drag", &self.has_can_drag())
            .field("on_drag", &self.on_drag.is_some())
            .field("on_copy", &self.on_copy.is_some())
            .finish()
    }
}

/// One entry of a context menu.
pub struct ContextMenuAction<P> {
    pub id: String,
    pub label: String,
    /// Run against every selected node instead of the last selected one.
    pub applies_to_multiple: bool,
    pub icon: Option<String>,
    pub separator_before: bool,
    pub separator_after: bool,
    pub callback: ActionCallback<P>,
}

impl<P: 'static> ContextMenuAction<P> {
    /// Create an action applying to the last selected node only.
    pub fn new<F, Fut>(id: impl Into<String>, label: impl Into<String>, callback: F) -> Self
    where
        F: Fn(TreeNode<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            applies_to_multiple: false,
            icon: None,
            separator_before: false,
            separator_after: false,
            callback: Arc::new(move |node| callback(node).boxed()),
        }
    }

    /// Run against every selected node.
    pub fn for_each_selected(mut self) -> Self {
        self.applies_to_multiple = true;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_separator_before(mut self) -> Self {
        self.separator_before = true;
        self
    }

    pub fn with_separator_after(mut self) -> Self {
        self.separator_after = true;
        self
    }
}

impl<P> Clone for ContextMenuAction<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            applies_to_multiple: self.applies_to_multiple,
            icon: self.icon.clone(),
            separator_before: self.separator_before,
            separator_after: self.separator_after,
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<P> std::fmt::Debug for ContextMenuAction<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextMenuAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("applies_to_multiple", &self.applies_to_multiple)
            .field("icon", &self.icon)
            .field("separator_before", &self.separator_before)
            .field("separator_after", &self.separator_after)
            .finish_non_exhaustive()
    }
}

/// A context menu built for the last selected node.
#[derive(Debug, Clone)]
pub struct ContextMenu<P> {
    /// Node the menu was opened on.
    pub target: TreeNode<P>,
    pub actions: Vec<ContextMenuAction<P>>,
}

impl<P> ContextMenu<P> {
    /// Find an action by id.
    pub fn action(&self, id: &str) -> Option<&ContextMenuAction<P>> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.label.as_str()).collect()
    }
}
