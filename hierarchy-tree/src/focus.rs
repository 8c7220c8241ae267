//! Focus tracking across tree instances.
//!
//! Hosts suppress their global keyboard shortcuts while any tree has focus.
//! Each built tree owns one entry in a [`FocusRegistry`]; the entry is
//! removed when the tree is destroyed or dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

/// Unique identifier for a tree instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(usize);

impl TreeId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tree_{}", self.0)
    }
}

#[derive(Debug)]
struct FocusEntry {
    name: String,
    focused: Arc<AtomicBool>,
}

/// Registry of live tree instances and their focus flags.
#[derive(Debug, Default)]
pub struct FocusRegistry {
    entries: RwLock<HashMap<TreeId, FocusEntry>>,
}

impl FocusRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by trees that were not given one.
    pub fn global() -> &'static Arc<FocusRegistry> {
        static GLOBAL: OnceLock<Arc<FocusRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(FocusRegistry::new()))
    }

    /// Register a tree and return the flag it should update on focus changes.
    ///
    /// Registering an id twice replaces the previous entry.
    pub fn register(&self, id: TreeId, name: impl Into<String>) -> Arc<AtomicBool> {
        let focused = Arc::new(AtomicBool::new(false));
        if let Ok(mut guard) = self.entries.write() {
            guard.insert(
                id,
                FocusEntry {
                    name: name.into(),
                    focused: Arc::clone(&focused),
                },
            );
        }
        focused
    }

    /// Remove a tree. Returns true if it was registered.
    pub fn deregister(&self, id: TreeId) -> bool {
        self.entries
            .write()
            .map(|mut g| g.remove(&id).is_some())
            .unwrap_or(false)
    }

    /// Check if a tree is registered.
    pub fn contains(&self, id: TreeId) -> bool {
        self.entries
            .read()
            .map(|g| g.contains_key(&id))
            .unwrap_or(false)
    }

    /// Returns if at least one registered tree is focused.
    pub fn any_focused(&self) -> bool {
        self.entries
            .read()
            .map(|g| g.values().any(|e| e.focused.load(Ordering::SeqCst)))
            .unwrap_or(false)
    }

    /// Names of the focused trees.
    pub fn focused_names(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|g| {
                g.values()
                    .filter(|e| e.focused.load(Ordering::SeqCst))
                    .map(|e| e.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of registered trees.
    pub fn len(&self) -> usize {
        self.entries.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Check if no tree is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns if at least one tree in the process-wide registry is focused.
///
/// Trees given their own registry through `with_registry` are not seen here.
pub fn has_one_focused() -> bool {
    FocusRegistry::global().any_focused()
}
