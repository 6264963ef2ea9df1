// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fixed-size pool of cell instances and their current data bindings.

use alloc::vec::Vec;

use kurbo::Vec2;

use crate::util::ceil_to_usize;
use crate::{BindCell, ConfigError, GridLayout, ScrollHost};

/// Number of cells needed to cover a viewport of `viewport_primary` extent.
///
/// One viewport's worth of tracks, plus one extra track of overscan so no gap
/// shows while a partially scrolled track is entering, times the cells per
/// track.
#[must_use]
pub fn capacity_for(layout: &GridLayout, viewport_primary: f64) -> usize {
    let cell_primary = layout.config().cell_primary();
    let tracks = if cell_primary > 0.0 {
        ceil_to_usize(viewport_primary / cell_primary)
    } else {
        0
    };
    tracks.saturating_add(1).saturating_mul(layout.cross_limit())
}

/// A visual cell and the data index it currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<N> {
    /// The host node for this cell.
    pub node: N,
    /// Index of the bound data item, or `None` if the cell never received data.
    pub bound: Option<usize>,
}

/// Owns the cell instances of one session.
///
/// Cells are created once in [`build`](Self::build), rebound in place while
/// scrolling, and destroyed in [`teardown`](Self::teardown). The pool never
/// grows or shrinks in between.
#[derive(Debug)]
pub struct CellPool<N> {
    cells: Vec<Cell<N>>,
    torn_down: bool,
}

impl<N: Copy + Eq> CellPool<N> {
    /// Creates a pool with no cells.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: Vec::new(),
            torn_down: false,
        }
    }

    /// Instantiates up to `capacity` cells under `content` and binds the first
    /// items to them in order.
    ///
    /// Fails with [`ConfigError::MissingPrefab`] before creating anything when
    /// no prefab is given.
    pub fn build<H, T, B>(
        host: &mut H,
        prefab: Option<&H::Prefab>,
        content: N,
        layout: &GridLayout,
        capacity: usize,
        items: &[T],
        binder: &mut B,
    ) -> Result<Self, ConfigError>
    where
        H: ScrollHost<Node = N>,
        B: BindCell<H, T>,
    {
        let prefab = prefab.ok_or(ConfigError::MissingPrefab)?;
        let count = capacity.min(items.len());
        let mut cells = Vec::with_capacity(count);
        for (index, item) in items.iter().enumerate().take(count) {
            let node = host.instantiate(prefab, content);
            binder.bind(host, node, index, item);
            host.set_local_position(node, layout.position_of(index));
            cells.push(Cell {
                node,
                bound: Some(index),
            });
        }
        Ok(Self {
            cells,
            torn_down: false,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: Vec<Cell<N>>) -> Self {
        Self {
            cells,
            torn_down: false,
        }
    }

    /// Number of cells in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the pool holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` once [`teardown`](Self::teardown) has run.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Iterates over the cells in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell<N>> {
        self.cells.iter()
    }

    /// Data index bound to the cell at `slot`.
    #[must_use]
    pub fn bound_index(&self, slot: usize) -> Option<usize> {
        self.cells.get(slot).and_then(|c| c.bound)
    }

    /// Data item bound to the cell at `slot`, looked up in `items`.
    #[must_use]
    pub fn bound_item<'a, T>(&self, slot: usize, items: &'a [T]) -> Option<&'a T> {
        self.bound_index(slot).and_then(|i| items.get(i))
    }

    /// Binds the cell at `slot` to `item` (at `index`) and moves it to `position`.
    ///
    /// Out-of-range slots are ignored.
    pub fn rebind<H, T, B>(
        &mut self,
        host: &mut H,
        binder: &mut B,
        slot: usize,
        index: usize,
        item: &T,
        position: Vec2,
    ) where
        H: ScrollHost<Node = N>,
        B: BindCell<H, T>,
    {
        let Some(cell) = self.cells.get_mut(slot) else {
            return;
        };
        binder.bind(host, cell.node, index, item);
        host.set_local_position(cell.node, position);
        cell.bound = Some(index);
    }

    /// Destroys every cell. Calling this again is a no-op.
    pub fn teardown<H: ScrollHost<Node = N>>(&mut self, host: &mut H) {
        if self.torn_down {
            return;
        }
        for cell in self.cells.drain(..) {
            host.destroy(cell.node);
        }
        self.torn_down = true;
    }
}

impl<N: Copy + Eq> Default for CellPool<N> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::num::NonZeroUsize;

    use kurbo::Size;

    use super::{CellPool, capacity_for};
    use crate::test_host::{MockHost, NodeRef, labels};
    use crate::{Arrangement, ConfigError, GridLayout, LayoutConfig, ScrollAxis};

    fn layout(count: usize) -> GridLayout {
        GridLayout::new(LayoutConfig {
            axis: ScrollAxis::Vertical,
            arrangement: Arrangement::LeftUpToRightDown,
            cell_size: Size::new(100.0, 30.0),
            cross_limit: NonZeroUsize::new(5).unwrap(),
            item_count: count,
        })
    }

    fn bind_label(host: &mut MockHost, cell: NodeRef, _index: usize, item: &String) {
        host.set_label(cell, item);
    }

    #[test]
    fn capacity_adds_one_overscan_track() {
        let layout = layout(50);
        // Two rows fit exactly; one more for overscan.
        assert_eq!(capacity_for(&layout, 60.0), 15);
        // A partial row rounds up before the overscan row is added.
        assert_eq!(capacity_for(&layout, 61.0), 20);
        assert_eq!(capacity_for(&layout, 0.0), 5);
    }

    #[test]
    fn capacity_saturates_for_tiny_cells() {
        let layout = GridLayout::new(LayoutConfig {
            cell_size: Size::new(100.0, 1e-15),
            ..*layout(50).config()
        });
        assert_eq!(capacity_for(&layout, 60_000.0), usize::MAX);
    }

    #[test]
    fn build_binds_leading_items_in_order() {
        let mut host = MockHost::new(Size::new(500.0, 60.0));
        let content = host.root();
        let items = labels(8);
        let layout = layout(items.len());

        let pool = CellPool::build(
            &mut host,
            Some(&"cell"),
            content,
            &layout,
            15,
            &items,
            &mut bind_label,
        )
        .unwrap();

        // Fewer items than capacity: one cell per item.
        assert_eq!(pool.len(), 8);
        for (slot, cell) in pool.iter().enumerate() {
            assert_eq!(cell.bound, Some(slot));
            assert_eq!(host.label(cell.node), Some(items[slot].as_str()));
            assert_eq!(host.position(cell.node), layout.position_of(slot));
        }
        assert_eq!(host.instantiated(), 8);
    }

    #[test]
    fn build_without_prefab_creates_nothing() {
        let mut host = MockHost::new(Size::new(500.0, 60.0));
        let content = host.root();
        let items = labels(3);
        let result = CellPool::build(
            &mut host,
            None,
            content,
            &layout(3),
            15,
            &items,
            &mut bind_label,
        );
        assert_eq!(result.unwrap_err(), ConfigError::MissingPrefab);
        assert_eq!(host.instantiated(), 0);
    }

    #[test]
    fn rebind_round_trips_through_bound_index() {
        let mut host = MockHost::new(Size::new(500.0, 60.0));
        let content = host.root();
        let items = labels(20);
        let layout = layout(items.len());
        let mut pool = CellPool::build(
            &mut host,
            Some(&"cell"),
            content,
            &layout,
            5,
            &items,
            &mut bind_label,
        )
        .unwrap();

        pool.rebind(
            &mut host,
            &mut bind_label,
            2,
            17,
            &items[17],
            layout.position_of(17),
        );
        assert_eq!(pool.bound_index(2), Some(17));
        assert_eq!(pool.bound_item(2, &items), Some(&items[17]));
        let node = pool.iter().nth(2).unwrap().node;
        assert_eq!(host.label(node), Some("Data17"));
        assert_eq!(host.position(node), layout.position_of(17));
        // No new instances were created for the rebind.
        assert_eq!(host.instantiated(), 5);

        assert_eq!(pool.bound_index(9), None);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut host = MockHost::new(Size::new(500.0, 60.0));
        let content = host.root();
        let items = labels(4);
        let mut pool = CellPool::build(
            &mut host,
            Some(&"cell"),
            content,
            &layout(4),
            15,
            &items,
            &mut bind_label,
        )
        .unwrap();

        pool.teardown(&mut host);
        assert!(pool.is_torn_down());
        assert!(pool.is_empty());
        assert_eq!(host.destroyed(), 4);

        pool.teardown(&mut host);
        assert_eq!(host.destroyed(), 4);
        let live: Vec<_> = host.live_cells().collect();
        assert!(live.is_empty());
    }
}
