//! The hierarchy tree component.
//!
//! [`HierarchyTree`] wraps a [`BackingWidget`] and adds typed node access,
//! cached selection, rename/move/copy validation with automatic revert,
//! lazily built context menus and focus tracking.
//!
//! # Example
//!
//! ```
//! use hierarchy_tree::{MemoryTree, MemoryWidget, TreeNode};
//!
//! let mut tree: MemoryTree<&str> = MemoryTree::new("scripts");
//! tree.build("scripts-panel", MemoryWidget::new()).unwrap();
//! tree.add(TreeNode::new("scene", "Scene", "scene"), None).unwrap();
//! tree.add(TreeNode::new("player", "player.ts", "script"), Some("scene")).unwrap();
//! tree.expand("scene").unwrap();
//!
//! assert_eq!(tree.get_nodes_count(), 2);
//! assert_eq!(tree.get("player").unwrap().parent.as_deref(), Some("scene"));
//! ```

mod events;
mod menu;
mod ops;

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use log::debug;

use crate::config::TreeConfig;
use crate::error::{Result, TreeError};
use crate::focus::{FocusRegistry, TreeId};
use crate::handlers::{ContextMenuAction, CopyAccepted, Handlers};
use crate::node::TreeNode;
use crate::scope::{InternalOp, OpState};
use crate::widget::{BackingWidget, DragGate, MemoryWidget, Plugin, WidgetEvent, WidgetOptions};

/// A tree backed by the in-memory widget.
pub type MemoryTree<P> = HierarchyTree<P, MemoryWidget<P>>;

/// Typed, generic wrapper around a tree-rendering widget.
///
/// A tree is inert until [`build`](Self::build) mounts its widget. Handler
/// slots may be set before or after building. Operations on ids that do not
/// exist are no-ops.
pub struct HierarchyTree<P, W> {
    id: TreeId,
    name: String,
    config: TreeConfig,
    registry: Arc<FocusRegistry>,
    widget: Option<W>,
    container: Option<String>,
    handlers: Handlers<P>,
    /// Last id passed to `select`; only gates redundant calls.
    current_selection: Option<String>,
    op: OpState,
    /// Events drained from the widget but not yet dispatched.
    deferred: VecDeque<WidgetEvent>,
    /// Focus flag owned by the registry entry, present while built.
    focused: Option<Arc<AtomicBool>>,
}

impl<P, W> HierarchyTree<P, W>
where
    P: Clone + Send + Sync + 'static,
    W: BackingWidget<P>,
{
    /// Create an inert tree registered with the process-wide focus registry
    /// once built.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TreeId::new(),
            name: name.into(),
            config: TreeConfig::default(),
            registry: Arc::clone(FocusRegistry::global()),
            widget: None,
            container: None,
            handlers: Handlers::default(),
            current_selection: None,
            op: OpState::default(),
            deferred: VecDeque::new(),
            focused: None,
        }
    }

    /// Use the given configuration.
    pub fn with_config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    /// Track focus in `registry` instead of the process-wide one.
    pub fn with_registry(mut self, registry: Arc<FocusRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Mutable configuration. Changes take effect on the next build.
    pub fn config_mut(&mut self) -> &mut TreeConfig {
        &mut self.config
    }

    /// Container the tree was built on.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    pub fn is_built(&self) -> bool {
        self.widget.is_some()
    }

    /// The backing widget, once built.
    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    /// The backing widget, once built.
    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }

    /// The programmatic operation in progress, if any.
    pub fn internal_op(&self) -> Option<InternalOp> {
        self.op.current()
    }

    /// Whether this tree currently has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Mount `widget` on `container_id` and register for focus tracking.
    ///
    /// Fails with [`TreeError::AlreadyBuilt`] if the tree is already built.
    pub fn build(&mut self, container_id: &str, mut widget: W) -> Result<()> {
        if self.widget.is_some() {
            return Err(TreeError::AlreadyBuilt(self.name.clone()));
        }

        let mut plugins = vec![
            Plugin::ContextMenu,
            Plugin::DragAndDrop,
            Plugin::Search,
            Plugin::State,
            Plugin::Types,
        ];
        if self.config.full_row_highlight {
            plugins.push(Plugin::WholeRow);
        }
        if self.config.keyboard_shortcuts {
            plugins.push(Plugin::Hotkeys);
        }

        let can_drag = Arc::clone(&self.handlers.on_can_drag);
        let is_draggable: DragGate<P> = Arc::new(move |node: &TreeNode<P>| {
            can_drag
                .read()
                .map(|g| g.as_ref().is_some_and(|f| f(&node.id, &node.payload)))
                .unwrap_or(false)
        });

        widget.mount(
            container_id,
            WidgetOptions {
                plugins,
                multiple: self.config.multiple_selection,
                search_show_only_matches: true,
                search_show_only_matches_children: true,
                is_draggable,
            },
        )?;

        self.focused = Some(self.registry.register(self.id, self.name.clone()));
        self.widget = Some(widget);
        self.container = Some(container_id.to_string());
        debug!("tree '{}' built on '{}'", self.name, container_id);
        Ok(())
    }

    /// Unmount the widget without persisting its state, empty every handler
    /// slot and leave the focus registry.
    ///
    /// Returns the unmounted widget. Calling it again is a no-op.
    pub fn destroy(&mut self) -> Option<W> {
        let widget = self.widget.take().map(|mut w| {
            w.unmount(false);
            w
        });
        self.handlers.clear();
        self.deferred.clear();
        self.current_selection = None;
        self.container = None;
        if self.focused.take().is_some() {
            self.registry.deregister(self.id);
            debug!("tree '{}' destroyed", self.name);
        }
        widget
    }

    // -------------------------------------------------------------------------
    // Handler slots
    // -------------------------------------------------------------------------

    pub fn set_on_click<F>(&mut self, handler: F)
    where
        F: FnMut(&str, &P) + Send + 'static,
    {
        self.handlers.on_click = Some(Box::new(handler));
    }

    pub fn set_on_dbl_click<F>(&mut self, handler: F)
    where
        F: FnMut(&str, &P) + Send + 'static,
    {
        self.handlers.on_dbl_click = Some(Box::new(handler));
    }

    /// Validate user renames. Resolving to false restores the old label.
    pub fn set_on_rename<F, Fut>(&mut self, mut handler: F)
    where
        F: FnMut(&str, &str, &P) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.handlers.on_rename = Some(Box::new(move |id: &str, label: &str, payload: &P| {
            handler(id, label, payload).boxed()
        }));
    }

    /// Build context-menu entries for the last selected node.
    pub fn set_on_context_menu<F>(&mut self, handler: F)
    where
        F: FnMut(&str, &P) -> Vec<ContextMenuAction<P>> + Send + 'static,
    {
        self.handlers.on_context_menu = Some(Box::new(handler));
    }

    /// Allow or refuse drags. Without this handler nothing can be dragged.
    pub fn set_on_can_drag<F>(&mut self, handler: F)
    where
        F: Fn(&str, &P) -> bool + Send + Sync + 'static,
    {
        self.handlers.set_can_drag(Some(Box::new(handler)));
    }

    /// Validate user moves. Resolving to false moves the node back.
    pub fn set_on_drag<F, Fut>(&mut self, mut handler: F)
    where
        F: FnMut(&P, Option<&P>) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.handlers.on_drag = Some(Box::new(move |payload: &P, parent: Option<&P>| {
            handler(payload, parent).boxed()
        }));
    }

    /// Accept or reject copies. Without this handler every copy is deleted.
    pub fn set_on_copy<F, Fut>(&mut self, mut handler: F)
    where
        F: FnMut(&TreeNode<P>, &TreeNode<P>, Option<&P>) -> Fut + Send + 'static,
        Fut: Future<Output = Option<CopyAccepted<P>>> + Send + 'static,
    {
        self.handlers.on_copy = Some(Box::new(
            move |source: &TreeNode<P>, copy: &TreeNode<P>, parent: Option<&P>| {
                handler(source, copy, parent).boxed()
            },
        ));
    }

    /// Handler slots, for inspection.
    pub fn handlers(&self) -> &Handlers<P> {
        &self.handlers
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn built_mut(&mut self) -> Result<&mut W> {
        self.widget.as_mut().ok_or(TreeError::NotBuilt)
    }

    /// Queue whatever the widget emitted, dropping events the current
    /// internal operation suppresses.
    fn settle(widget: &mut W, op: &OpState, deferred: &mut VecDeque<WidgetEvent>) {
        for event in widget.take_events() {
            if op.suppresses(&event) {
                log::trace!("suppressed {:?}", event);
            } else {
                deferred.push_back(event);
            }
        }
    }
}

impl<P, W> std::fmt::Debug for HierarchyTree<P, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyTree")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("config", &self.config)
            .field("container", &self.container)
            .field("built", &self.widget.is_some())
            .field("current_selection", &self.current_selection)
            .field("deferred", &self.deferred.len())
            .finish_non_exhaustive()
    }
}

impl<P, W> Drop for HierarchyTree<P, W> {
    fn drop(&mut self) {
        if self.focused.take().is_some() {
            self.registry.deregister(self.id);
        }
    }
}
