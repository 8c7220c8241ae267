//! Scripts and post-process panel on the in-memory widget.
//!
//! Run with `cargo run --example script_graph`.

use std::sync::{Arc, Mutex};

use hierarchy_tree::{
    ContextMenuAction, CopyAccepted, MemoryTree, MemoryWidget, TreeConfig, TreeNode,
    has_one_focused,
};
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Debug, Clone, PartialEq)]
enum Asset {
    Folder,
    Script(String),
    PostProcess(String),
}

impl Asset {
    fn is_folder(&self) -> bool {
        matches!(self, Asset::Folder)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = TreeConfig::new()
        .with_full_row_highlight(true)
        .with_multiple_selection(true);
    let mut tree: MemoryTree<Asset> = MemoryTree::new("scripts").with_config(config);
    tree.build("scripts-panel", MemoryWidget::new())?;

    tree.add(
        TreeNode::new("scripts", "Scripts", Asset::Folder).with_icon("icon-folder"),
        None,
    )?;
    tree.add(
        TreeNode::new("player", "player.ts", Asset::Script("src/player.ts".into()))
            .with_icon("icon-script"),
        Some("scripts"),
    )?;
    tree.add(
        TreeNode::new("enemy", "enemy.ts", Asset::Script("src/enemy.ts".into())),
        Some("scripts"),
    )?;
    tree.add(
        TreeNode::new("post", "Post processes", Asset::Folder).with_icon("icon-folder"),
        None,
    )?;
    tree.add(
        TreeNode::new("bloom", "Bloom", Asset::PostProcess("fx/bloom.fx".into())),
        Some("post"),
    )?;
    tree.expand("scripts")?;

    tree.set_on_click(|id, asset| info!("clicked '{}' ({:?})", id, asset));
    tree.set_on_rename(|_, label, _| {
        let valid = label.ends_with(".ts");
        async move { valid }
    });
    tree.set_on_can_drag(|_, asset| !asset.is_folder());
    tree.set_on_drag(|asset, parent| {
        let allowed = match (asset, parent) {
            (Asset::Script(_), Some(Asset::Folder)) => true,
            (Asset::PostProcess(_), Some(Asset::Folder)) => true,
            _ => false,
        };
        async move { allowed }
    });
    tree.set_on_copy(|source, _, _| {
        let id = format!("{}-copy", source.id);
        let payload = source.payload.clone();
        async move { Some(CopyAccepted { id, payload }) }
    });

    let attached = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&attached);
    tree.set_on_context_menu(move |_, asset| {
        if asset.is_folder() {
            return Vec::new();
        }
        let log = Arc::clone(&log);
        vec![
            ContextMenuAction::new("attach", "Attach to selection", move |node: TreeNode<Asset>| {
                let log = Arc::clone(&log);
                async move {
                    if let Ok(mut attached) = log.lock() {
                        attached.push(node.label);
                    }
                    Ok(())
                }
            })
            .for_each_selected()
            .with_icon("icon-link"),
        ]
    });

    if let Some(widget) = tree.widget_mut() {
        widget.click("player");
        widget.user_rename("player", "hero.ts");
        widget.user_rename("enemy", "enemy.txt");
        widget.drag_move(&["bloom"], None);
        widget.drag_copy(&["player"], Some("scripts"));
        widget.ctrl_click("enemy");
        widget.focus_in();
    }
    let dispatched = tree.process_events().await?;
    info!("dispatched {} event(s)", dispatched);

    if let Some(menu) = tree.context_menu() {
        info!("menu for '{}': {:?}", menu.target.id, menu.labels());
        tree.invoke_context_action(&menu, "attach").await?;
    }
    info!("attached: {:?}", attached.lock().map(|a| a.clone()).unwrap_or_default());

    tree.search("ts")?;
    info!("visible while searching 'ts': {:?}", tree.visible_ids());
    tree.search("")?;

    info!("view state: {}", tree.view_state().to_json()?);
    info!(
        "{} node(s), focused: {}",
        tree.get_nodes_count(),
        has_one_focused()
    );

    tree.destroy();
    Ok(())
}
