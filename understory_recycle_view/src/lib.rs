// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_recycle_view --heading-base-level=0

//! Understory Recycle View: a recycling grid scroll view core.
//!
//! This crate shows a data list of any length through a small, fixed pool of
//! visual cells. It instantiates only as many cells as one viewport needs
//! (plus one overscan track) and, as the user scrolls, rebinds the cells that
//! scrolled out of view to the items scrolling in, instead of creating new
//! visuals per item.
//!
//! The core concepts are:
//!
//! - [`ScrollAxis`] and [`Arrangement`]: which way the view scrolls and which
//!   corner the grid grows from; [`signs_for`] turns them into [`GrowthSigns`].
//! - [`GridLayout`]: uniform grid arithmetic over a flat index strip (content
//!   extent, per-index cell positions, and where the content sits in the
//!   viewport).
//! - [`CellPool`]: the fixed set of cells of one session and the data index
//!   each currently shows. [`capacity_for`] sizes it.
//! - [`WindowTracker`]: the per-frame step that reads the scroll position and,
//!   when the first visible track changes, rebinds only the cells that left the
//!   window ([`plan_rebinds`]).
//! - [`RecycleScrollView`]: the entry point. [`RecycleScrollView::set_datas`]
//!   builds the scroll hierarchy and cell pool and returns a [`SessionHandle`];
//!   [`RecycleScrollView::tick`] drives the tracker each frame.
//!
//! This crate deliberately does **not** implement scroll physics, clipping, or
//! any scene graph. Host engines implement [`ScrollHost`] to provide those,
//! and supply a [`BindCell`] callback that pushes an item into a cell's visuals.
//!
//! ## Frame loop
//!
//! Sessions are single-threaded and frame-driven. The host calls
//! [`RecycleScrollView::tick`] once per rendered frame; disposing the
//! [`SessionHandle`] ends the session synchronously, and later ticks do
//! nothing.
//!
//! ## Grid arithmetic
//!
//! With `cross_limit` cells per track, item `i` sits in track
//! `i / cross_limit` at slot `i % cross_limit`:
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use kurbo::{Size, Vec2};
//! use understory_recycle_view::{Arrangement, GridLayout, LayoutConfig, ScrollAxis, capacity_for};
//!
//! let layout = GridLayout::new(LayoutConfig {
//!     axis: ScrollAxis::Vertical,
//!     arrangement: Arrangement::LeftUpToRightDown,
//!     cell_size: Size::new(100.0, 30.0),
//!     cross_limit: NonZeroUsize::new(5).unwrap(),
//!     item_count: 50,
//! });
//!
//! // Ten rows of 30, five columns of 100.
//! assert_eq!(layout.content_extent(), (300.0, 500.0));
//! // Cell centers grow down and to the right of the top-left corner.
//! assert_eq!(layout.position_of(6), Vec2::new(150.0, -45.0));
//! // A viewport two rows tall needs three rows of cells.
//! assert_eq!(capacity_for(&layout, 60.0), 15);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` for `kurbo`, `tracing`, and `thiserror`.
//! - `libm`: `no_std` float support for `kurbo`.
//! - `serde`: `Serialize`/`Deserialize` for [`GridSettings`] and the setting enums.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod dispose;
mod error;
mod host;
mod layout;
mod pool;
mod session;
mod tracker;
mod util;
mod view;

#[cfg(test)]
mod test_host;

pub use axis::{Arrangement, GrowthSigns, ScrollAxis, signs_for};
pub use dispose::DisposeBag;
pub use error::ConfigError;
pub use host::{
    BindCell, MaskSettings, MovementType, ScrollHost, ScrollSettings, ScrollbarVisibility,
};
pub use layout::{ContentFrame, GridLayout, LayoutConfig};
pub use pool::{Cell, CellPool, capacity_for};
pub use session::{SessionHandle, SessionStats};
pub use tracker::{Rebind, TrackerState, WindowTracker, WindowUpdate, plan_rebinds, visible_slice};
pub use view::{GridSettings, RecycleScrollView, RecycleSettings};
