// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid layout over a flat index strip.
//!
//! Items are laid out in *tracks* along the scroll axis (rows in a vertical
//! view, columns in a horizontal one). Each track holds up to
//! [`LayoutConfig::cross_limit`] cells along the cross axis, so item `i` sits
//! in track `i / cross_limit` at slot `i % cross_limit`.
//!
//! Positions are cell *centers* relative to the content node's pivot, which is
//! the [`Arrangement`] origin corner. Growth away from that corner follows the
//! [`GrowthSigns`] for the configured axis and arrangement.

use core::num::NonZeroUsize;

use kurbo::{Point, Size, Vec2};

use crate::util::floor_to_isize;
use crate::{Arrangement, ConfigError, GrowthSigns, ScrollAxis, signs_for};

/// Immutable per-session layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Scroll direction.
    pub axis: ScrollAxis,
    /// Origin corner and growth direction.
    pub arrangement: Arrangement,
    /// Size of one cell in content space (`width` × `height`).
    pub cell_size: Size,
    /// Number of cells per track along the cross axis.
    pub cross_limit: NonZeroUsize,
    /// Total number of data items.
    pub item_count: usize,
}

impl LayoutConfig {
    /// Extent of one cell along the scroll axis.
    #[must_use]
    pub const fn cell_primary(&self) -> f64 {
        self.axis.primary_extent(self.cell_size)
    }

    /// Extent of one cell along the cross axis.
    #[must_use]
    pub const fn cell_cross(&self) -> f64 {
        self.axis.cross_extent(self.cell_size)
    }

    /// Checks that the configuration can be laid out.
    ///
    /// The scroll-axis cell extent divides scroll offsets, so it must be
    /// positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extent = self.cell_primary();
        if extent.is_finite() && extent > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositiveCellExtent { extent })
        }
    }
}

/// Placement of the content node inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentFrame {
    /// Pivot (and anchor) of the content node in unit space, `y` up.
    pub pivot: Point,
    /// Size of the whole content area.
    pub size: Size,
    /// Position of the pivot relative to the viewport's center.
    pub local_position: Vec2,
}

/// Grid planner for one [`LayoutConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    config: LayoutConfig,
    signs: GrowthSigns,
}

impl GridLayout {
    /// Creates a planner, resolving the growth signs for the configuration.
    #[must_use]
    pub const fn new(config: LayoutConfig) -> Self {
        Self {
            signs: signs_for(config.axis, config.arrangement),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Returns the growth signs.
    #[must_use]
    pub const fn signs(&self) -> GrowthSigns {
        self.signs
    }

    /// Number of cells per track.
    #[must_use]
    pub const fn cross_limit(&self) -> usize {
        self.config.cross_limit.get()
    }

    /// Returns the track (row or column along the scroll axis) holding `index`.
    #[must_use]
    pub const fn track_of(&self, index: usize) -> usize {
        index / self.config.cross_limit.get()
    }

    /// Returns the slot of `index` within its track.
    #[must_use]
    pub const fn slot_in_track(&self, index: usize) -> usize {
        index % self.config.cross_limit.get()
    }

    /// Number of tracks needed for all items.
    #[must_use]
    pub const fn track_count(&self) -> usize {
        self.config.item_count.div_ceil(self.config.cross_limit.get())
    }

    /// Total content extent as `(primary, cross)`.
    #[must_use]
    pub fn content_extent(&self) -> (f64, f64) {
        let tracks = self.track_count() as f64;
        let limit = self.cross_limit() as f64;
        (
            self.config.cell_primary() * tracks,
            self.config.cell_cross() * limit,
        )
    }

    /// Position of the center of the cell showing `index`, relative to the
    /// content origin corner.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Vec2 {
        let main = self.signs.main_f64();
        let cross = self.signs.cross_f64();
        let cell_primary = self.config.cell_primary();
        let cell_cross = self.config.cell_cross();

        let track = self.track_of(index) as f64;
        let slot = self.slot_in_track(index) as f64;
        let primary = track * (cell_primary * main) + cell_primary * 0.5 * main;
        let cross = slot * (cell_cross * cross) + cell_cross * 0.5 * cross;
        self.config.axis.compose(primary, cross)
    }

    /// Where the content node sits inside a viewport of the given size.
    ///
    /// The content pivot is the origin corner. Along the scroll axis the pivot
    /// is pushed half a viewport away from the center, against the growth
    /// direction, so the first track starts flush with the scroll start edge.
    /// Along the cross axis the content is centered on the viewport.
    #[must_use]
    pub fn content_frame(&self, viewport: Size) -> ContentFrame {
        let axis = self.config.axis;
        let pivot = self.config.arrangement.pivot();
        let (primary_extent, cross_extent) = self.content_extent();

        let primary = axis.primary_extent(viewport) * 0.5 * -self.signs.main_f64();
        let cross = cross_extent * (axis.cross_of(pivot.to_vec2()) - 0.5);
        ContentFrame {
            pivot,
            size: axis.compose_size(primary_extent, cross_extent),
            local_position: axis.compose(primary, cross),
        }
    }

    /// Converts a content position along the scroll axis into the signed
    /// distance scrolled from the start edge.
    #[must_use]
    pub fn scrolled_distance(&self, primary_position: f64) -> f64 {
        primary_position * -self.signs.main_f64()
    }

    /// First index of the track at `distance` past the start edge.
    ///
    /// The result is signed: overscrolling before the start yields negative
    /// indices, which callers clip against `0..item_count`.
    #[must_use]
    pub fn first_index_at(&self, distance: f64) -> isize {
        let track = floor_to_isize(distance / self.config.cell_primary());
        #[allow(
            clippy::cast_possible_wrap,
            reason = "Cross limits are small cell counts"
        )]
        let limit = self.cross_limit() as isize;
        track.saturating_mul(limit)
    }
}
