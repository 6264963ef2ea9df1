// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame visibility window tracking and minimal cell reassignment.
//!
//! Each tick the tracker reads the content node's position along the scroll
//! axis. When the position moved far enough to change the first visible track,
//! it computes the new window of data indices and rebinds only the cells whose
//! index fell out of the window to the indices that entered it. Cells already
//! showing an index inside the window are not touched.

use core::ops::Range;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::{BindCell, CellPool, GridLayout, ScrollHost};

/// Lifecycle of a [`WindowTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackerState {
    /// No session is being tracked.
    #[default]
    Idle,
    /// A session is live and ticks are processed.
    Tracking {
        /// Scrolled distance recorded when tracking began; index `0` sits here.
        start_offset: f64,
        /// Content position along the scroll axis seen on the last tick.
        last_position: f64,
        /// First index of the current window. Negative while overscrolled.
        first_index: isize,
    },
}

/// Outcome of one [`WindowTracker::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowUpdate {
    /// The tracker is idle; nothing was read.
    Idle,
    /// The content did not move since the last tick.
    Unchanged,
    /// The content moved within the current first track.
    SameWindow,
    /// The window moved to a new first track.
    Shifted {
        /// New first index of the window.
        first_index: isize,
        /// Number of cells that were rebound.
        rebound: usize,
    },
}

/// One planned rebinding: pool slot to data index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rebind {
    /// Slot of the cell in the pool.
    pub slot: usize,
    /// Data index the cell will show.
    pub index: usize,
}

/// Data indices visible for a window starting at `first_index`, clipped to `0..item_count`.
#[must_use]
pub fn visible_slice(first_index: isize, window_len: usize, item_count: usize) -> Range<usize> {
    let end = first_index.saturating_add_unsigned(window_len);
    let clip = |i: isize| usize::try_from(i).unwrap_or(0).min(item_count);
    clip(first_index)..clip(end)
}

/// Pairs cells showing indices outside `slice` with indices of `slice` no cell shows.
///
/// Reusable cells are taken in pool order and missing indices in ascending
/// order. When one side runs out, the rest of the other side is left as is;
/// this only happens near either end of the data.
#[must_use]
pub fn plan_rebinds<N: Copy + Eq>(pool: &CellPool<N>, slice: Range<usize>) -> SmallVec<[Rebind; 16]> {
    let shown: HashSet<usize> = pool
        .iter()
        .filter_map(|c| c.bound)
        .filter(|i| slice.contains(i))
        .collect();
    let reusable = pool
        .iter()
        .enumerate()
        .filter(|(_, c)| c.bound.is_none_or(|i| !slice.contains(&i)))
        .map(|(slot, _)| slot);
    let missing = slice.clone().filter(|i| !shown.contains(i));
    reusable
        .zip(missing)
        .map(|(slot, index)| Rebind { slot, index })
        .collect()
}

/// Tracks the visible window of one session.
#[derive(Debug, Clone, Default)]
pub struct WindowTracker {
    state: TrackerState,
}

impl WindowTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TrackerState::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> TrackerState {
        self.state
    }

    /// Returns `true` while tracking.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        matches!(self.state, TrackerState::Tracking { .. })
    }

    /// First index of the current window, if tracking.
    #[must_use]
    pub const fn first_index(&self) -> Option<isize> {
        match self.state {
            TrackerState::Tracking { first_index, .. } => Some(first_index),
            TrackerState::Idle => None,
        }
    }

    /// Starts tracking with the content at `content_position` along the scroll axis.
    ///
    /// That position becomes the origin of index `0`.
    pub fn start(&mut self, layout: &GridLayout, content_position: f64) {
        self.state = TrackerState::Tracking {
            start_offset: layout.scrolled_distance(content_position),
            last_position: content_position,
            first_index: 0,
        };
    }

    /// Stops tracking. Later ticks return [`WindowUpdate::Idle`].
    pub fn stop(&mut self) {
        self.state = TrackerState::Idle;
    }

    /// Processes one frame.
    pub fn tick<H, T, B>(
        &mut self,
        host: &mut H,
        content: H::Node,
        layout: &GridLayout,
        pool: &mut CellPool<H::Node>,
        items: &[T],
        binder: &mut B,
    ) -> WindowUpdate
    where
        H: ScrollHost,
        B: BindCell<H, T>,
    {
        let TrackerState::Tracking {
            start_offset,
            last_position,
            first_index,
        } = &mut self.state
        else {
            return WindowUpdate::Idle;
        };

        let position = layout.config().axis.primary_of(host.local_position(content));
        if position == *last_position {
            return WindowUpdate::Unchanged;
        }
        *last_position = position;

        let new_first = layout.first_index_at(layout.scrolled_distance(position) - *start_offset);
        if new_first == *first_index {
            return WindowUpdate::SameWindow;
        }
        *first_index = new_first;

        let slice = visible_slice(new_first, pool.len(), items.len());
        let plan = plan_rebinds(pool, slice.clone());
        tracing::debug!(
            first_index = new_first,
            start = slice.start,
            end = slice.end,
            rebound = plan.len(),
            "recycle window shifted"
        );
        for Rebind { slot, index } in &plan {
            tracing::trace!(slot, index, "rebinding cell");
            pool.rebind(
                host,
                binder,
                *slot,
                *index,
                &items[*index],
                layout.position_of(*index),
            );
        }
        WindowUpdate::Shifted {
            first_index: new_first,
            rebound: plan.len(),
        }
    }
}
