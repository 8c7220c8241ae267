//! Suppression of notifications caused by the tree's own operations.
//!
//! A programmatic rename or move makes the backing widget emit the same
//! event a user edit would. While an [`InternalOp`] is in progress those
//! events are discarded instead of reaching the validation handlers.

use std::cell::Cell;

use crate::widget::WidgetEvent;

/// Programmatic operation currently running inside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalOp {
    /// `rename` (including rename reverts).
    Renaming,
    /// `set_parent` (including move reverts).
    Moving,
}

impl InternalOp {
    /// Check if this operation swallows `event`.
    pub fn suppresses(self, event: &WidgetEvent) -> bool {
        matches!(
            (self, event),
            (InternalOp::Renaming, WidgetEvent::Renamed { .. })
                | (InternalOp::Moving, WidgetEvent::Moved { .. })
        )
    }
}

/// Current operation slot.
#[derive(Debug, Default)]
pub(crate) struct OpState {
    current: Cell<Option<InternalOp>>,
}

impl OpState {
    pub(crate) fn current(&self) -> Option<InternalOp> {
        self.current.get()
    }

    /// Enter `op` until the returned scope is dropped.
    pub(crate) fn enter(&self, op: InternalOp) -> OpScope<'_> {
        let previous = self.current.replace(Some(op));
        OpScope {
            state: self,
            previous,
        }
    }

    pub(crate) fn suppresses(&self, event: &WidgetEvent) -> bool {
        self.current().is_some_and(|op| op.suppresses(event))
    }
}

/// Restores the previous operation on drop, including on early returns.
#[derive(Debug)]
pub(crate) struct OpScope<'a> {
    state: &'a OpState,
    previous: Option<InternalOp>,
}

impl Drop for OpScope<'_> {
    fn drop(&mut self) {
        self.state.current.set(self.previous);
    }
}
