// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless recycle list: fifty labels shown through fifteen cells.
//!
//! This example shows how to:
//! - implement [`ScrollHost`] over a minimal scene graph,
//! - start a session with [`RecycleScrollView::set_datas`] and a label binder,
//! - drive it with [`RecycleScrollView::tick`] while the content scrolls,
//! - forward a scroll listener through [`ScrollSettings`],
//! - end it through the returned [`SessionHandle`].
//!
//! Run:
//! - `cargo run -p understory_examples --example recycle_list`
//! - `RUST_LOG=understory_recycle_view=trace cargo run -p understory_examples --example recycle_list`

use std::collections::HashMap;

use kurbo::{Size, Vec2};
use understory_recycle_view::{
    ContentFrame, GridSettings, MaskSettings, RecycleScrollView, RecycleSettings, ScrollAxis,
    ScrollHost, ScrollSettings, SessionHandle, WindowUpdate,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct NodeId(u32);

#[derive(Debug)]
struct SceneNode {
    name: &'static str,
    parent: Option<NodeId>,
    size: Size,
    position: Vec2,
    text: String,
}

/// A flat scene graph standing in for an engine.
#[derive(Debug, Default)]
struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
    next: u32,
    on_scroll: Option<fn(Vec2)>,
}

impl Scene {
    fn spawn(&mut self, name: &'static str, parent: Option<NodeId>, size: Size) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        self.nodes.insert(
            id,
            SceneNode {
                name,
                parent,
                size,
                position: Vec2::ZERO,
                text: String::new(),
            },
        );
        id
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            text.clone_into(&mut n.text);
        }
    }

    /// Moves `node` by `delta`, the way a drag would.
    fn drag(&mut self, node: NodeId, delta: Vec2) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.position += delta;
            if let Some(on_scroll) = self.on_scroll {
                on_scroll(n.position);
            }
        }
    }

    fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name == name)
            .map(|(id, _)| *id)
    }

    /// Cell labels, top row first.
    fn rows(&self, columns: usize) -> Vec<String> {
        let mut cells: Vec<_> = self
            .nodes
            .values()
            .filter(|n| n.name == "cell")
            .map(|n| (n.position, n.text.as_str()))
            .collect();
        cells.sort_by(|(a, _), (b, _)| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));
        cells
            .chunks(columns)
            .map(|row| {
                row.iter()
                    .map(|(_, text)| format!("{text:>7}"))
                    .collect::<String>()
            })
            .collect()
    }
}

impl ScrollHost for Scene {
    type Node = NodeId;
    type Prefab = &'static str;
    type Image = ();
    type Listener = fn(Vec2);

    fn rect_size(&self, node: NodeId) -> Size {
        self.nodes.get(&node).map_or(Size::ZERO, |n| n.size)
    }

    fn create_scroller(
        &mut self,
        root: NodeId,
        axis: ScrollAxis,
        settings: &ScrollSettings<NodeId, fn(Vec2)>,
    ) -> NodeId {
        tracing::info!(%axis, movement = ?settings.movement, "scroller created");
        self.on_scroll = settings.on_value_changed;
        let size = self.rect_size(root);
        self.spawn("scroller", Some(root), size)
    }

    fn create_viewport(&mut self, scroller: NodeId, _mask: &MaskSettings<()>) -> NodeId {
        let size = self.rect_size(scroller);
        self.spawn("viewport", Some(scroller), size)
    }

    fn create_content(&mut self, viewport: NodeId, frame: &ContentFrame) -> NodeId {
        let content = self.spawn("content", Some(viewport), frame.size);
        self.set_local_position(content, frame.local_position);
        content
    }

    fn attach_content(&mut self, _scroller: NodeId, _viewport: NodeId, _content: NodeId) {}

    fn instantiate(&mut self, prefab: &&'static str, parent: NodeId) -> NodeId {
        self.spawn(*prefab, Some(parent), Size::new(100.0, 30.0))
    }

    fn local_position(&self, node: NodeId) -> Vec2 {
        self.nodes.get(&node).map_or(Vec2::ZERO, |n| n.position)
    }

    fn set_local_position(&mut self, node: NodeId, position: Vec2) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.position = position;
        }
    }

    fn destroy(&mut self, node: NodeId) {
        let children: Vec<_> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(node))
            .map(|(id, _)| *id)
            .collect();
        for child in children {
            self.destroy(child);
        }
        self.nodes.remove(&node);
    }
}

fn log_scroll(position: Vec2) {
    tracing::debug!(y = position.y, "scroll value changed");
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    const COLUMNS: usize = 5;

    let mut scene = Scene::default();
    let root = scene.spawn("root", None, Size::new(500.0, 60.0));

    let grid = GridSettings::default()
        .with_cell_size(Size::new(100.0, 30.0))
        .with_cross_limit(COLUMNS)
        .unwrap();
    let mut view = RecycleScrollView::new(
        RecycleSettings::<Scene>::default()
            .with_grid(grid)
            .with_scroll(ScrollSettings {
                on_value_changed: Some(log_scroll as fn(Vec2)),
                ..ScrollSettings::default()
            })
            .with_prefab("cell"),
    );

    let items: Vec<String> = (0..50).map(|i| format!("Data{i}")).collect();
    let handle: SessionHandle<Scene> = view.set_datas(
        &mut scene,
        root,
        items,
        |scene: &mut Scene, cell: NodeId, _index: usize, item: &String| {
            scene.set_text(cell, item);
        },
    );
    println!("started: {:?}", handle.stats());
    for row in scene.rows(COLUMNS) {
        println!("  {row}");
    }

    let content = scene.find("content").unwrap();
    // Drag down in uneven steps until the end of the list, then overshoot.
    for step in [12.0, 25.0, 30.0, 45.0, 60.0, 90.0, 60.0, 30.0] {
        scene.drag(content, Vec2::new(0.0, step));
        match view.tick(&mut scene) {
            WindowUpdate::Shifted {
                first_index,
                rebound,
            } => {
                println!("scrolled {step:>5}: first index {first_index}, {rebound} cells rebound");
                for row in scene.rows(COLUMNS) {
                    println!("  {row}");
                }
            }
            other => println!("scrolled {step:>5}: {other:?}"),
        }
    }

    handle.dispose(&mut scene);
    assert!(!handle.is_active());
    assert_eq!(view.tick(&mut scene), WindowUpdate::Idle);
    println!("disposed, {} node(s) left", scene.nodes.len());
}
