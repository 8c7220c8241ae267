//! Event dispatch for the hierarchy tree.

use std::sync::atomic::Ordering;

use log::{debug, trace};

use crate::error::{Result, TreeError};
use crate::handlers::CopyAccepted;
use crate::node::ROOT_ID;
use crate::scope::InternalOp;
use crate::widget::{BackingWidget, SelectionAction, WidgetEvent};

use super::HierarchyTree;

impl<P, W> HierarchyTree<P, W>
where
    P: Clone + Send + Sync + 'static,
    W: BackingWidget<P>,
{
    /// Drain the widget's events and run the matching handlers in order.
    ///
    /// Handler verdicts are awaited one at a time; a rejected rename, move
    /// or copy is reverted before the next event is looked at. Returns the
    /// number of events dispatched.
    pub async fn process_events(&mut self) -> Result<usize> {
        let mut dispatched = 0;
        loop {
            if let Some(widget) = self.widget.as_mut() {
                self.deferred.extend(widget.take_events());
            }
            let Some(event) = self.deferred.pop_front() else {
                break;
            };
            trace!("tree '{}' dispatching {:?}", self.name, event);
            self.dispatch(event).await?;
            dispatched += 1;
        }
        Ok(dispatched)
    }

    async fn dispatch(&mut self, event: WidgetEvent) -> Result<()> {
        match event {
            WidgetEvent::SelectionChanged {
                action: SelectionAction::Select,
                id: Some(id),
            } => self.on_selected(&id),
            WidgetEvent::SelectionChanged { .. } => {}
            WidgetEvent::DoubleClicked => self.on_double_clicked(),
            WidgetEvent::Renamed { id, old, new } => self.on_renamed(&id, &old, &new).await?,
            WidgetEvent::Copied { original, copy } => self.on_copied(&original, &copy).await?,
            WidgetEvent::Moved {
                id,
                parent,
                old_parent,
            } => {
                self.on_moved(&id, parent.as_deref(), old_parent.as_deref())
                    .await?
            }
            WidgetEvent::FocusIn => self.set_focused(true),
            WidgetEvent::FocusOut => self.set_focused(false),
        }
        Ok(())
    }

    fn on_selected(&mut self, id: &str) {
        if self.handlers.on_click.is_none() {
            return;
        }
        let Some(node) = self.get(id) else {
            return;
        };
        if let Some(handler) = self.handlers.on_click.as_mut() {
            handler(&node.id, &node.payload);
        }
    }

    fn on_double_clicked(&mut self) {
        if self.handlers.on_dbl_click.is_none() {
            return;
        }
        let Some(node) = self.get_selected() else {
            return;
        };
        if let Some(handler) = self.handlers.on_dbl_click.as_mut() {
            handler(&node.id, &node.payload);
        }
    }

    async fn on_renamed(&mut self, id: &str, old: &str, new: &str) -> Result<()> {
        if old == new || self.op.current() == Some(InternalOp::Renaming) {
            return Ok(());
        }
        let Some(node) = self.get(id) else {
            return Ok(());
        };
        let Some(handler) = self.handlers.on_rename.as_mut() else {
            return Ok(());
        };
        if !handler(id, new, &node.payload).await {
            debug!("rename of '{}' to '{}' rejected, restoring '{}'", id, new, old);
            self.rename(id, old)?;
        }
        Ok(())
    }

    async fn on_copied(&mut self, original: &str, copy: &str) -> Result<()> {
        let Some(copied) = self.get(copy) else {
            return Ok(());
        };
        let source = self.get(original);
        let parent = copied
            .parent
            .as_deref()
            .and_then(|p| self.get(p))
            .map(|n| n.payload);

        let accepted = match (self.handlers.on_copy.as_mut(), source) {
            (Some(handler), Some(source)) => handler(&source, &copied, parent.as_ref()).await,
            _ => None,
        };

        let widget = self.widget.as_mut().ok_or(TreeError::NotBuilt)?;
        match accepted {
            None => {
                debug!("copy of '{}' rejected, deleting '{}'", original, copy);
                widget.delete_node(copy);
            }
            Some(CopyAccepted { id, payload }) => {
                if let Err(err) = widget.set_id(copy, &id) {
                    widget.delete_node(copy);
                    return Err(TreeError::from_widget(err));
                }
                widget.set_payload(&id, payload);
                debug!("copy of '{}' accepted as '{}'", original, id);
            }
        }
        Ok(())
    }

    async fn on_moved(
        &mut self,
        id: &str,
        parent: Option<&str>,
        old_parent: Option<&str>,
    ) -> Result<()> {
        if self.handlers.on_drag.is_none() || self.op.current() == Some(InternalOp::Moving) {
            return Ok(());
        }
        let Some(node) = self.get(id) else {
            return Ok(());
        };
        let parent_payload = match parent {
            None => None,
            Some(p) => match self.get(p) {
                Some(parent_node) => Some(parent_node.payload),
                None => return Ok(()),
            },
        };
        let Some(handler) = self.handlers.on_drag.as_mut() else {
            return Ok(());
        };
        if !handler(&node.payload, parent_payload.as_ref()).await {
            debug!(
                "move of '{}' rejected, returning it to '{}'",
                id,
                old_parent.unwrap_or(ROOT_ID)
            );
            self.set_parent(id, old_parent)?;
        }
        Ok(())
    }

    fn set_focused(&self, focused: bool) {
        if let Some(flag) = &self.focused {
            flag.store(focused, Ordering::SeqCst);
        }
    }
}
