//! Context menus for the hierarchy tree.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::error::{Result, TreeError};
use crate::handlers::ContextMenu;
use crate::widget::BackingWidget;

use super::HierarchyTree;

impl<P, W> HierarchyTree<P, W>
where
    P: Clone + Send + Sync + 'static,
    W: BackingWidget<P>,
{
    /// Build the context menu for the selected node (the first one the
    /// widget reports).
    ///
    /// Returns `None` when no context-menu handler is set, nothing is
    /// selected, or the handler offers no actions.
    pub fn context_menu(&mut self) -> Option<ContextMenu<P>> {
        if self.handlers.on_context_menu.is_none() {
            return None;
        }
        let target = self.get_selected()?;
        let handler = self.handlers.on_context_menu.as_mut()?;
        let actions = handler(&target.id, &target.payload);
        if actions.is_empty() {
            return None;
        }
        Some(ContextMenu { target, actions })
    }

    /// Run a menu action.
    ///
    /// Single-target actions run against the node the menu was opened on.
    /// Multi-target actions run once per selected node, each awaited before
    /// the next starts. The first failing callback stops the run.
    pub fn invoke_context_action(
        &self,
        menu: &ContextMenu<P>,
        action_id: &str,
    ) -> BoxFuture<'static, Result<()>> {
        let Some(action) = menu.action(action_id) else {
            return future::ready(Err(TreeError::UnknownAction(action_id.to_string()))).boxed();
        };
        let targets = if action.applies_to_multiple {
            self.get_all_selected()
        } else {
            vec![menu.target.clone()]
        };
        let callback = Arc::clone(&action.callback);

        async move {
            for node in targets {
                callback(node).await.map_err(TreeError::Action)?;
            }
            Ok(())
        }
        .boxed()
    }
}
