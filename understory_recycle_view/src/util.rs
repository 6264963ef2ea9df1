// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float rounding helpers that work without `std`.

/// Floors `x` to an `isize`, saturating at the `isize` bounds.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Saturating float-to-int cast; inputs are scroll offsets divided by a cell extent"
)]
pub(crate) fn floor_to_isize(x: f64) -> isize {
    let t = x as isize;
    if (t as f64) > x { t.saturating_sub(1) } else { t }
}

/// Ceils a non-negative `x` to a `usize`. Negative and NaN inputs yield `0`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Saturating float-to-int cast of a non-negative extent ratio"
)]
pub(crate) fn ceil_to_usize(x: f64) -> usize {
    let t = x as usize;
    if (t as f64) < x { t.saturating_add(1) } else { t }
}
