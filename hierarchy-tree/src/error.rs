//! Error types

use thiserror::Error;

/// Boxed error returned by host callbacks (context-menu actions).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;

/// Errors raised by a backing widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("widget is not mounted")]
    NotMounted,
    #[error("widget is already mounted on '{0}'")]
    AlreadyMounted(String),
    #[error("node '{0}' not found")]
    NodeNotFound(String),
    #[error("node id '{0}' is already in use")]
    DuplicateId(String),
    #[error("cannot move '{id}' under '{parent}'")]
    InvalidMove { id: String, parent: String },
}

/// Errors raised by [`HierarchyTree`](crate::HierarchyTree).
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("tree has not been built")]
    NotBuilt,
    #[error("tree '{0}' is already built")]
    AlreadyBuilt(String),
    #[error("node '{0}' not found")]
    NotFound(String),
    #[error("node id '{0}' is already in use")]
    DuplicateId(String),
    #[error("unknown context-menu action '{0}'")]
    UnknownAction(String),
    #[error("context-menu action failed: {0}")]
    Action(#[source] BoxError),
    #[error("widget error: {0}")]
    Widget(#[from] WidgetError),
    #[error("view state error: {0}")]
    ViewState(#[from] serde_json::Error),
}

impl TreeError {
    /// Lift a widget error, surfacing lookup and id conflicts as tree errors.
    pub(crate) fn from_widget(err: WidgetError) -> Self {
        match err {
            WidgetError::NodeNotFound(id) => TreeError::NotFound(id),
            WidgetError::DuplicateId(id) => TreeError::DuplicateId(id),
            other => TreeError::Widget(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_widget_maps_lookups() {
        assert!(matches!(
            TreeError::from_widget(WidgetError::DuplicateId("a".to_string())),
            TreeError::DuplicateId(_)
        ));
        assert!(matches!(
            TreeError::from_widget(WidgetError::NotMounted),
            TreeError::Widget(WidgetError::NotMounted)
        ));
    }

    #[test]
    fn test_widget_error_converts() {
        let err: TreeError = WidgetError::NodeNotFound("a".to_string()).into();
        assert!(matches!(err, TreeError::Widget(WidgetError::NodeNotFound(_))));
        assert_eq!(err.to_string(), "widget error: node 'a' not found");
    }

    #[test]
    fn test_action_error_display() {
        let source: BoxError = "dialog closed".into();
        let err = TreeError::Action(source);
        assert!(err.to_string().contains("dialog closed"));
    }
}
