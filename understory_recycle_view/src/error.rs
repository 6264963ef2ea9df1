// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors reported while starting a session or parsing settings.

use alloc::string::String;

/// Errors raised by invalid recycle view configuration.
///
/// [`MissingPrefab`](Self::MissingPrefab) and
/// [`NonPositiveCellExtent`](Self::NonPositiveCellExtent) are recoverable: the
/// view logs them and degrades to a no-op session. The parse errors are hard
/// failures for the operation that produced them, since there is no sensible
/// default geometry to fall back on.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No cell prefab has been configured on the view.
    #[error("cell prefab not found")]
    MissingPrefab,

    /// The cell size along the scroll axis is zero, negative, or not finite.
    #[error("cell extent along the scroll axis must be positive and finite, got {extent}")]
    NonPositiveCellExtent {
        /// The offending primary-axis extent.
        extent: f64,
    },

    /// A cross-axis limit of zero was supplied.
    #[error("cross-axis cell limit must be at least 1")]
    ZeroCrossLimit,

    /// A scroll axis name or tag that does not map to a known axis.
    #[error("scroll axis <{0}> does not exist")]
    UnknownScrollAxis(String),

    /// An arrangement name or tag that does not map to a known arrangement.
    #[error("arrangement <{0}> does not exist")]
    UnknownArrangement(String),
}
