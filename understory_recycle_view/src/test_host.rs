// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`ScrollHost`] used by unit tests.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Size, Vec2};

use crate::{ContentFrame, MaskSettings, ScrollAxis, ScrollHost, ScrollSettings};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Root,
    Scroller,
    Viewport,
    Content,
    Cell,
}

#[derive(Clone, Debug)]
struct MockNode {
    kind: NodeKind,
    parent: Option<NodeRef>,
    size: Size,
    position: Vec2,
    label: Option<String>,
}

/// Flat node arena with creation/destruction counters.
///
/// Destroying a node twice panics, so tests catch double frees.
#[derive(Debug)]
pub(crate) struct MockHost {
    nodes: Vec<Option<MockNode>>,
    instantiated: usize,
    destroyed: usize,
    scroller_axis: Option<ScrollAxis>,
    scroll_listener: Option<&'static str>,
    attached: Option<(NodeRef, NodeRef, NodeRef)>,
}

pub(crate) fn labels(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Data{i}")).collect()
}

impl MockHost {
    /// Creates a host whose root rectangle has the given size.
    pub(crate) fn new(root_size: Size) -> Self {
        Self {
            nodes: alloc::vec![Some(MockNode {
                kind: NodeKind::Root,
                parent: None,
                size: root_size,
                position: Vec2::ZERO,
                label: None,
            })],
            instantiated: 0,
            destroyed: 0,
            scroller_axis: None,
            scroll_listener: None,
            attached: None,
        }
    }

    pub(crate) fn root(&self) -> NodeRef {
        NodeRef(0)
    }

    fn node(&self, node: NodeRef) -> &MockNode {
        self.nodes[node.0].as_ref().expect("node is alive")
    }

    fn node_mut(&mut self, node: NodeRef) -> &mut MockNode {
        self.nodes[node.0].as_mut().expect("node is alive")
    }

    fn push(&mut self, kind: NodeKind, parent: NodeRef, size: Size, position: Vec2) -> NodeRef {
        self.nodes.push(Some(MockNode {
            kind,
            parent: Some(parent),
            size,
            position,
            label: None,
        }));
        NodeRef(self.nodes.len() - 1)
    }

    pub(crate) fn set_label(&mut self, node: NodeRef, label: &str) {
        self.node_mut(node).label = Some(label.to_string());
    }

    pub(crate) fn label(&self, node: NodeRef) -> Option<&str> {
        self.node(node).label.as_deref()
    }

    pub(crate) fn position(&self, node: NodeRef) -> Vec2 {
        self.node(node).position
    }

    pub(crate) fn set_position(&mut self, node: NodeRef, position: Vec2) {
        self.node_mut(node).position = position;
    }

    pub(crate) fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).parent
    }

    pub(crate) fn is_alive(&self, node: NodeRef) -> bool {
        self.nodes.get(node.0).is_some_and(Option::is_some)
    }

    /// Number of cells created through [`ScrollHost::instantiate`].
    pub(crate) fn instantiated(&self) -> usize {
        self.instantiated
    }

    /// Number of nodes destroyed so far.
    pub(crate) fn destroyed(&self) -> usize {
        self.destroyed
    }

    pub(crate) fn scroller_axis(&self) -> Option<ScrollAxis> {
        self.scroller_axis
    }

    /// Listener handed over with the most recent scroller.
    pub(crate) fn scroll_listener(&self) -> Option<&'static str> {
        self.scroll_listener
    }

    pub(crate) fn attached(&self) -> Option<(NodeRef, NodeRef, NodeRef)> {
        self.attached
    }

    fn live_of(&self, kind: NodeKind) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.as_ref().is_some_and(|n| n.kind == kind))
            .map(|(i, _)| NodeRef(i))
    }

    pub(crate) fn live_cells(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.live_of(NodeKind::Cell)
    }

    /// The most recently created live content node.
    pub(crate) fn content(&self) -> Option<NodeRef> {
        self.live_of(NodeKind::Content).last()
    }

    /// Live nodes other than the root.
    pub(crate) fn live_count(&self) -> usize {
        self.nodes.iter().skip(1).filter(|n| n.is_some()).count()
    }

    /// Labels of live cells ordered by their position along `y`, top first.
    pub(crate) fn visible_labels(&self) -> Vec<String> {
        let mut cells: Vec<_> = self
            .live_cells()
            .map(|c| (self.position(c), self.label(c).unwrap_or_default().to_string()))
            .collect();
        cells.sort_by(|(a, _), (b, _)| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));
        cells.into_iter().map(|(_, label)| label).collect()
    }
}

impl ScrollHost for MockHost {
    type Node = NodeRef;
    type Prefab = &'static str;
    type Image = &'static str;
    type Listener = &'static str;

    fn rect_size(&self, node: NodeRef) -> Size {
        self.node(node).size
    }

    fn create_scroller(
        &mut self,
        root: NodeRef,
        axis: ScrollAxis,
        settings: &ScrollSettings<NodeRef, &'static str>,
    ) -> NodeRef {
        self.scroller_axis = Some(axis);
        self.scroll_listener = settings.on_value_changed;
        let size = self.rect_size(root);
        self.push(NodeKind::Scroller, root, size, Vec2::ZERO)
    }

    fn create_viewport(&mut self, scroller: NodeRef, _mask: &MaskSettings<&'static str>) -> NodeRef {
        let size = self.rect_size(scroller);
        self.push(NodeKind::Viewport, scroller, size, Vec2::ZERO)
    }

    fn create_content(&mut self, viewport: NodeRef, frame: &ContentFrame) -> NodeRef {
        self.push(NodeKind::Content, viewport, frame.size, frame.local_position)
    }

    fn attach_content(&mut self, scroller: NodeRef, viewport: NodeRef, content: NodeRef) {
        self.attached = Some((scroller, viewport, content));
    }

    fn instantiate(&mut self, _prefab: &&'static str, parent: NodeRef) -> NodeRef {
        self.instantiated += 1;
        self.push(NodeKind::Cell, parent, Size::ZERO, Vec2::ZERO)
    }

    fn local_position(&self, node: NodeRef) -> Vec2 {
        self.position(node)
    }

    fn set_local_position(&mut self, node: NodeRef, position: Vec2) {
        self.set_position(node, position);
    }

    fn destroy(&mut self, node: NodeRef) {
        assert!(self.is_alive(node), "{node:?} destroyed twice");
        let children: Vec<_> = (0..self.nodes.len())
            .map(NodeRef)
            .filter(|&n| self.is_alive(n) && self.parent(n) == Some(node))
            .collect();
        for child in children {
            self.destroy(child);
        }
        self.nodes[node.0] = None;
        self.destroyed += 1;
    }
}
