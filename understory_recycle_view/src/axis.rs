// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-agnostic geometry: primary/cross projection and arrangement growth signs.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Size, Vec2};

use crate::ConfigError;

/// The direction a recycle view scrolls in.
///
/// The scroll direction is the *primary* axis. The perpendicular axis is the
/// *cross* axis, along which a fixed number of cells repeat per row/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    /// Scroll along x; cells repeat along y.
    Horizontal,
    /// Scroll along y; cells repeat along x.
    #[default]
    Vertical,
}

impl ScrollAxis {
    /// Projects `v` onto the scroll axis.
    #[must_use]
    pub const fn primary_of(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Projects `v` onto the cross axis.
    #[must_use]
    pub const fn cross_of(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.y,
            Self::Vertical => v.x,
        }
    }

    /// Extent of `size` along the scroll axis.
    #[must_use]
    pub const fn primary_extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Extent of `size` along the cross axis.
    #[must_use]
    pub const fn cross_extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Builds a vector from its scroll-axis and cross-axis components.
    ///
    /// This is the inverse of [`primary_of`](Self::primary_of) and
    /// [`cross_of`](Self::cross_of).
    #[must_use]
    pub const fn compose(self, primary: f64, cross: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(primary, cross),
            Self::Vertical => Vec2::new(cross, primary),
        }
    }

    /// Builds a size from its scroll-axis and cross-axis extents.
    #[must_use]
    pub const fn compose_size(self, primary: f64, cross: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(primary, cross),
            Self::Vertical => Size::new(cross, primary),
        }
    }
}

impl fmt::Display for ScrollAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        })
    }
}

impl FromStr for ScrollAxis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Horizontal" | "horizontal" => Ok(Self::Horizontal),
            "Vertical" | "vertical" => Ok(Self::Vertical),
            other => Err(ConfigError::UnknownScrollAxis(other.to_string())),
        }
    }
}

impl TryFrom<u8> for ScrollAxis {
    type Error = ConfigError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Horizontal),
            1 => Ok(Self::Vertical),
            other => Err(ConfigError::UnknownScrollAxis(other.to_string())),
        }
    }
}

/// The corner the grid starts from and the directions it grows in.
///
/// Names read as "start corner, then end corner": `LeftUpToRightDown` starts
/// in the upper-left corner and fills rightwards and downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arrangement {
    /// Start upper-left, grow right and down.
    #[default]
    LeftUpToRightDown,
    /// Start lower-left, grow right and up.
    LeftDownToRightUp,
    /// Start upper-right, grow left and down.
    RightUpToLeftDown,
    /// Start lower-right, grow left and up.
    RightDownToLeftUp,
}

impl Arrangement {
    /// All arrangements, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::LeftUpToRightDown,
        Self::LeftDownToRightUp,
        Self::RightUpToLeftDown,
        Self::RightDownToLeftUp,
    ];

    /// The origin corner in unit space, with `y` pointing up.
    ///
    /// Hosts use this as the pivot of the content node so that cell positions
    /// are relative to the corner the grid grows from.
    #[must_use]
    pub const fn pivot(self) -> Point {
        match self {
            Self::LeftUpToRightDown => Point::new(0.0, 1.0),
            Self::LeftDownToRightUp => Point::new(0.0, 0.0),
            Self::RightUpToLeftDown => Point::new(1.0, 1.0),
            Self::RightDownToLeftUp => Point::new(1.0, 0.0),
        }
    }

    const fn starts_left(self) -> bool {
        matches!(self, Self::LeftUpToRightDown | Self::LeftDownToRightUp)
    }

    const fn starts_down(self) -> bool {
        matches!(self, Self::LeftDownToRightUp | Self::RightDownToLeftUp)
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LeftUpToRightDown => "LeftUpToRightDown",
            Self::LeftDownToRightUp => "LeftDownToRightUp",
            Self::RightUpToLeftDown => "RightUpToLeftDown",
            Self::RightDownToLeftUp => "RightDownToLeftUp",
        })
    }
}

impl FromStr for Arrangement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.to_string() == s)
            .ok_or_else(|| ConfigError::UnknownArrangement(s.to_string()))
    }
}

impl TryFrom<u8> for Arrangement {
    type Error = ConfigError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or_else(|| ConfigError::UnknownArrangement(tag.to_string()))
    }
}

/// Growth direction of the grid along each axis, each `+1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrowthSigns {
    /// Sign of growth along the scroll axis.
    pub main: i8,
    /// Sign of growth along the cross axis.
    pub cross: i8,
}

impl GrowthSigns {
    /// [`main`](Self::main) as a float factor.
    #[must_use]
    pub fn main_f64(self) -> f64 {
        f64::from(self.main)
    }

    /// [`cross`](Self::cross) as a float factor.
    #[must_use]
    pub fn cross_f64(self) -> f64 {
        f64::from(self.cross)
    }
}

const fn sign(positive: bool) -> i8 {
    if positive { 1 } else { -1 }
}

/// Looks up the growth signs for an axis and arrangement.
///
/// Positive means growing towards +x (right) or +y (up). For a horizontal
/// view the scroll axis grows right when starting on the left, and the cross
/// axis grows up when starting at the bottom; a vertical view swaps the roles.
#[must_use]
pub const fn signs_for(axis: ScrollAxis, arrangement: Arrangement) -> GrowthSigns {
    let right = sign(arrangement.starts_left());
    let up = sign(arrangement.starts_down());
    match axis {
        ScrollAxis::Horizontal => GrowthSigns {
            main: right,
            cross: up,
        },
        ScrollAxis::Vertical => GrowthSigns {
            main: up,
            cross: right,
        },
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Size, Vec2};

    use super::{Arrangement, GrowthSigns, ScrollAxis, signs_for};
    use crate::ConfigError;

    fn signs(main: i8, cross: i8) -> GrowthSigns {
        GrowthSigns { main, cross }
    }

    #[test]
    fn sign_table_matches_all_eight_cases() {
        use Arrangement::*;
        use ScrollAxis::*;

        let table = [
            (Horizontal, LeftUpToRightDown, signs(1, -1)),
            (Horizontal, LeftDownToRightUp, signs(1, 1)),
            (Horizontal, RightUpToLeftDown, signs(-1, -1)),
            (Horizontal, RightDownToLeftUp, signs(-1, 1)),
            (Vertical, LeftUpToRightDown, signs(-1, 1)),
            (Vertical, LeftDownToRightUp, signs(1, 1)),
            (Vertical, RightUpToLeftDown, signs(-1, -1)),
            (Vertical, RightDownToLeftUp, signs(1, -1)),
        ];
        for (axis, arrangement, expected) in table {
            assert_eq!(
                signs_for(axis, arrangement),
                expected,
                "{axis} / {arrangement}"
            );
        }
    }

    #[test]
    fn each_axis_maps_arrangements_onto_distinct_sign_pairs() {
        for axis in [ScrollAxis::Horizontal, ScrollAxis::Vertical] {
            let mut seen: Vec<GrowthSigns> = Vec::new();
            for arrangement in Arrangement::ALL {
                let s = signs_for(axis, arrangement);
                assert!(s.main.abs() == 1 && s.cross.abs() == 1, "signs must be unit");
                assert!(!seen.contains(&s), "{axis} / {arrangement} reuses {s:?}");
                seen.push(s);
            }
        }
    }

    #[test]
    fn projection_and_compose_are_inverse() {
        let v = Vec2::new(3.0, 7.0);
        for axis in [ScrollAxis::Horizontal, ScrollAxis::Vertical] {
            let back = axis.compose(axis.primary_of(v), axis.cross_of(v));
            assert_eq!(back, v);
        }
        assert_eq!(ScrollAxis::Vertical.primary_of(v), 7.0);
        assert_eq!(ScrollAxis::Horizontal.cross_of(v), 7.0);

        let size = Size::new(100.0, 30.0);
        assert_eq!(ScrollAxis::Vertical.primary_extent(size), 30.0);
        assert_eq!(ScrollAxis::Vertical.cross_extent(size), 100.0);
        assert_eq!(ScrollAxis::Horizontal.compose_size(100.0, 30.0), size);
    }

    #[test]
    fn unknown_names_and_tags_are_rejected() {
        assert_eq!("Vertical".parse::<ScrollAxis>(), Ok(ScrollAxis::Vertical));
        assert_eq!(
            "Diagonal".parse::<ScrollAxis>(),
            Err(ConfigError::UnknownScrollAxis("Diagonal".into()))
        );
        assert_eq!(
            ScrollAxis::try_from(2),
            Err(ConfigError::UnknownScrollAxis("2".into()))
        );
        assert_eq!(
            "RightDownToLeftUp".parse::<Arrangement>(),
            Ok(Arrangement::RightDownToLeftUp)
        );
        assert_eq!(Arrangement::try_from(1), Ok(Arrangement::LeftDownToRightUp));
        assert_eq!(
            Arrangement::try_from(4),
            Err(ConfigError::UnknownArrangement("4".into()))
        );
    }

    #[test]
    fn pivot_is_the_origin_corner() {
        assert_eq!(Arrangement::LeftUpToRightDown.pivot(), kurbo::Point::new(0.0, 1.0));
        assert_eq!(Arrangement::RightDownToLeftUp.pivot(), kurbo::Point::new(1.0, 0.0));
    }
}
