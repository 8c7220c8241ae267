//! Focus tracking across tree instances.

use std::sync::Arc;

use hierarchy_tree::{FocusRegistry, MemoryTree, MemoryWidget, has_one_focused};

fn built(name: &str, registry: &Arc<FocusRegistry>) -> MemoryTree<()> {
    let mut tree = MemoryTree::new(name).with_registry(Arc::clone(registry));
    tree.build(&format!("{name}-panel"), MemoryWidget::new()).unwrap();
    tree
}

#[tokio::test]
async fn test_focus_in_and_out() {
    let registry = Arc::new(FocusRegistry::new());
    let mut scripts = built("scripts", &registry);
    let mut post = built("post-processes", &registry);
    assert_eq!(registry.len(), 2);
    assert!(!registry.any_focused());

    scripts.widget_mut().unwrap().focus_in();
    scripts.process_events().await.unwrap();
    assert!(scripts.is_focused());
    assert!(!post.is_focused());
    assert!(registry.any_focused());
    assert_eq!(registry.focused_names(), vec!["scripts".to_string()]);

    scripts.widget_mut().unwrap().focus_out();
    post.widget_mut().unwrap().focus_in();
    scripts.process_events().await.unwrap();
    post.process_events().await.unwrap();
    assert_eq!(registry.focused_names(), vec!["post-processes".to_string()]);

    post.widget_mut().unwrap().focus_out();
    post.process_events().await.unwrap();
    assert!(!registry.any_focused());
}

#[test]
fn test_unbuilt_tree_is_not_registered() {
    let registry = Arc::new(FocusRegistry::new());
    let tree: MemoryTree<()> = MemoryTree::new("scripts").with_registry(Arc::clone(&registry));
    assert!(registry.is_empty());
    assert!(!registry.contains(tree.id()));
    assert!(!tree.is_focused());
}

#[tokio::test]
async fn test_destroy_deregisters() {
    let registry = Arc::new(FocusRegistry::new());
    let mut tree = built("scripts", &registry);
    let id = tree.id();
    assert!(registry.contains(id));

    tree.widget_mut().unwrap().focus_in();
    tree.process_events().await.unwrap();
    assert!(registry.any_focused());

    tree.destroy();
    assert!(!registry.contains(id));
    assert!(!registry.any_focused());
    assert!(!tree.is_focused());

    tree.build("scripts-panel", MemoryWidget::new()).unwrap();
    assert!(registry.contains(id));
    assert!(!tree.is_focused());
}

#[test]
fn test_drop_deregisters() {
    let registry = Arc::new(FocusRegistry::new());
    let tree = built("scripts", &registry);
    let id = tree.id();
    drop(tree);
    assert!(!registry.contains(id));
    assert!(registry.is_empty());
}

#[test]
fn test_trees_have_distinct_ids() {
    let registry = Arc::new(FocusRegistry::new());
    let a = built("scripts", &registry);
    let b = built("scripts", &registry);
    assert_ne!(a.id(), b.id());
    assert_eq!(registry.len(), 2);
}

#[tokio::test]
async fn test_global_registry_sees_default_trees() {
    let mut tree: MemoryTree<()> = MemoryTree::new("global-focus");
    tree.build("global-panel", MemoryWidget::new()).unwrap();
    assert!(FocusRegistry::global().contains(tree.id()));

    tree.widget_mut().unwrap().focus_in();
    tree.process_events().await.unwrap();
    assert!(has_one_focused());

    tree.destroy();
    assert!(!FocusRegistry::global().contains(tree.id()));
}
