use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Axis;

/// Integer lattice position in cube-local coordinates. Each component is in
/// `{-1, 0, 1}`.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    #[allow(missing_docs)]
    pub x: i8,
    #[allow(missing_docs)]
    pub y: i8,
    #[allow(missing_docs)]
    pub z: i8,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i8; 3]> for Pos {
    fn from([x, y, z]: [i8; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Pos> for [i8; 3] {
    fn from(p: Pos) -> Self {
        [p.x, p.y, p.z]
    }
}

impl Pos {
    /// Origin, which is never occupied by a cubie.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Constructs a position.
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Returns the component along `axis`.
    pub fn get(self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Returns whether every component is in `{-1, 0, 1}`.
    pub fn is_on_lattice(self) -> bool {
        [self.x, self.y, self.z].iter().all(|c| (-1..=1).contains(c))
    }

    /// Returns the position after a quarter turn about `axis` in direction
    /// `dir` (`1` or `-1`). The component along `axis` is unchanged.
    ///
    /// Rotating by `dir` and then by `-dir` is the identity.
    #[must_use]
    pub fn rotated(self, axis: Axis, dir: i8) -> Self {
        let Self { x, y, z } = self;
        match axis {
            Axis::X => Self::new(x, -dir * z, dir * y),
            Axis::Y => Self::new(dir * z, y, -dir * x),
            Axis::Z => Self::new(-dir * y, dir * x, z),
        }
    }
}

/// Orientation of a cubie, stored as the images of the three unit vectors
/// under its accumulated rotation.
///
/// This is only ever a product of quarter turns, so every entry is `-1`, `0`,
/// or `1`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Image of each of the `x`, `y`, and `z` unit vectors.
    pub columns: [Pos; 3],
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Orientation {
    /// Orientation of a cubie that has never been turned.
    pub const IDENTITY: Self = Self {
        columns: [Pos::new(1, 0, 0), Pos::new(0, 1, 0), Pos::new(0, 0, 1)],
    };

    /// Returns the orientation after a further quarter turn about `axis` in
    /// direction `dir`.
    #[must_use]
    pub fn rotated(self, axis: Axis, dir: i8) -> Self {
        Self {
            columns: self.columns.map(|c| c.rotated(axis, dir)),
        }
    }

    /// Returns whether this is the identity.
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Returns the matrix in row-major order.
    pub fn to_rows(self) -> [[i8; 3]; 3] {
        let [a, b, c] = self.columns;
        [[a.x, b.x, c.x], [a.y, b.y, c.y], [a.z, b.z, c.z]]
    }
}
