// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the recycler and the host engine's scene graph.
//!
//! The recycler never owns visual objects directly. It asks a [`ScrollHost`]
//! to build the scroll container, viewport, and content nodes, to instantiate
//! cells from a prefab, to move nodes, and to destroy them again. Scroll
//! physics, masking, and scrollbars stay on the host side; the settings for
//! them are handed over verbatim.

use core::fmt;

use kurbo::{Size, Vec2};

use crate::{ContentFrame, ScrollAxis};

/// How the host's scroll container behaves at the content bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementType {
    /// Content can move past the bounds freely.
    Unrestricted,
    /// Content can overshoot and springs back.
    #[default]
    Elastic,
    /// Content stops at the bounds.
    Clamped,
}

/// When the host shows the scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollbarVisibility {
    /// Always visible.
    #[default]
    Permanent,
    /// Hidden when the content fits the viewport.
    AutoHide,
    /// Hidden when the content fits, and the viewport expands into its space.
    AutoHideAndExpandViewport,
}

/// Scroll container settings, passed through to [`ScrollHost::create_scroller`].
///
/// None of these are interpreted by the recycler.
#[derive(Clone, PartialEq)]
pub struct ScrollSettings<N, L> {
    /// Bounds behavior.
    pub movement: MovementType,
    /// Spring strength for [`MovementType::Elastic`].
    pub elasticity: f64,
    /// Whether content keeps moving after a drag ends.
    pub inertia: bool,
    /// Velocity decay per second when `inertia` is enabled.
    pub deceleration_rate: f64,
    /// Wheel/trackpad scroll multiplier.
    pub scroll_sensitivity: f64,
    /// Optional scrollbar node to attach along the scroll axis.
    pub scrollbar: Option<N>,
    /// Scrollbar visibility policy.
    pub scrollbar_visibility: ScrollbarVisibility,
    /// Listener the host notifies whenever the scroll position changes.
    pub on_value_changed: Option<L>,
}

impl<N, L> Default for ScrollSettings<N, L> {
    fn default() -> Self {
        Self {
            movement: MovementType::default(),
            elasticity: 0.1,
            inertia: true,
            deceleration_rate: 0.135,
            scroll_sensitivity: 1.0,
            scrollbar: None,
            scrollbar_visibility: ScrollbarVisibility::default(),
            on_value_changed: None,
        }
    }
}

impl<N: fmt::Debug, L> fmt::Debug for ScrollSettings<N, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSettings")
            .field("movement", &self.movement)
            .field("elasticity", &self.elasticity)
            .field("inertia", &self.inertia)
            .field("deceleration_rate", &self.deceleration_rate)
            .field("scroll_sensitivity", &self.scroll_sensitivity)
            .field("scrollbar", &self.scrollbar)
            .field("scrollbar_visibility", &self.scrollbar_visibility)
            .field("on_value_changed", &self.on_value_changed.is_some())
            .finish()
    }
}

/// Viewport mask settings, passed through to [`ScrollHost::create_viewport`].
#[derive(Debug, Clone, PartialEq)]
pub struct MaskSettings<I> {
    /// Whether the mask graphic itself is drawn.
    pub show_graphic: bool,
    /// Optional image used as the mask shape.
    pub image: Option<I>,
}

impl<I> Default for MaskSettings<I> {
    fn default() -> Self {
        Self {
            show_graphic: false,
            image: None,
        }
    }
}

/// Host engine services used by a recycle view.
///
/// All positions are local to the node's parent. The scroll container created
/// by [`create_scroller`](Self::create_scroller) is expected to move the
/// content node in response to input; the recycler only reads the result
/// through [`local_position`](Self::local_position).
pub trait ScrollHost {
    /// Handle to a node in the host's transform hierarchy.
    type Node: Copy + Eq + fmt::Debug;
    /// Template cells are instantiated from.
    type Prefab;
    /// Image type used for viewport masks.
    type Image: Clone;
    /// Scroll position listener carried by [`ScrollSettings::on_value_changed`].
    type Listener;

    /// Size of the rectangle of `node`.
    fn rect_size(&self, node: Self::Node) -> Size;

    /// Creates the scroll container as a child of `root`, fitted to it.
    fn create_scroller(
        &mut self,
        root: Self::Node,
        axis: ScrollAxis,
        settings: &ScrollSettings<Self::Node, Self::Listener>,
    ) -> Self::Node;

    /// Creates the clipping viewport as a child of `scroller`, fitted to it.
    fn create_viewport(
        &mut self,
        scroller: Self::Node,
        mask: &MaskSettings<Self::Image>,
    ) -> Self::Node;

    /// Creates the content node under `viewport` with the given frame.
    fn create_content(&mut self, viewport: Self::Node, frame: &ContentFrame) -> Self::Node;

    /// Wires `viewport` and `content` into the scroll container.
    fn attach_content(&mut self, scroller: Self::Node, viewport: Self::Node, content: Self::Node);

    /// Instantiates a cell from `prefab` as a child of `parent`.
    ///
    /// The new node should carry unit scale and the parent's rotation.
    fn instantiate(&mut self, prefab: &Self::Prefab, parent: Self::Node) -> Self::Node;

    /// Local position of `node`.
    fn local_position(&self, node: Self::Node) -> Vec2;

    /// Moves `node` to a new local position.
    fn set_local_position(&mut self, node: Self::Node, position: Vec2);

    /// Destroys `node` and its subtree.
    fn destroy(&mut self, node: Self::Node);
}

/// Pushes a data item into a cell's visuals.
///
/// This is the typed half of the cell capability: hosts hand one in when
/// starting a session. Any `FnMut(&mut H, H::Node, usize, &T)` closure
/// implements it, receiving the host, the cell node, the data index, and the
/// item.
pub trait BindCell<H: ScrollHost, T> {
    /// Shows `item` (at `index` in the data list) in `cell`.
    fn bind(&mut self, host: &mut H, cell: H::Node, index: usize, item: &T);
}

impl<H, T, F> BindCell<H, T> for F
where
    H: ScrollHost,
    F: FnMut(&mut H, H::Node, usize, &T),
{
    fn bind(&mut self, host: &mut H, cell: H::Node, index: usize, item: &T) {
        self(host, cell, index, item);
    }
}
