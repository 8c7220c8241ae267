//! Node data model.

/// String form of the synthetic root node.
///
/// Typed APIs use `None` for the root; this id only appears where a plain
/// string is required, such as log output.
pub const ROOT_ID: &str = "#";

/// One entry in a hierarchy tree.
///
/// `parent` and `children` are reported by the backing widget and ignored on
/// insertion: the widget owns placement.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<P> {
    /// Caller-assigned identifier, unique within a tree.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Icon identifier, resolved by the renderer.
    pub icon: Option<String>,
    /// Caller-owned data, returned unchanged by every read.
    pub payload: P,
    /// Parent id (`None` for top-level nodes).
    pub parent: Option<String>,
    /// Child ids in display order.
    pub children: Vec<String>,
    /// Optional check-box state.
    pub checked: Option<bool>,
}

impl<P> TreeNode<P> {
    /// Create a detached node ready to be passed to `add`.
    pub fn new(id: impl Into<String>, label: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            payload,
            parent: None,
            children: Vec::new(),
            checked: None,
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the check-box state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Check if this node has children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node sits directly under the root.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}
