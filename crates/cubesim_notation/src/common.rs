//! Axes, faces, and modifiers that make up a move token.

use std::fmt;

/// Axis of rotation in cube-local coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Axis {
    /// Points toward the `R` face.
    X,
    /// Points toward the `U` face.
    Y,
    /// Points toward the `F` face.
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

impl Axis {
    /// All three axes, in coordinate order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Returns the index of the coordinate along this axis.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Face of the cube, written as the leading character of a move token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Face {
    /// Right
    R,
    /// Left
    L,
    /// Up
    U,
    /// Down
    D,
    /// Front
    F,
    /// Back
    B,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Face {
    /// All six faces.
    pub const ALL: [Self; 6] = [Self::R, Self::L, Self::U, Self::D, Self::F, Self::B];

    /// Returns the character used for the face in move tokens.
    pub fn symbol(self) -> char {
        match self {
            Face::R => 'R',
            Face::L => 'L',
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    /// Returns the face written using `c`, or `None` if there isn't one.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'R' => Some(Face::R),
            'L' => Some(Face::L),
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    /// Returns the coordinate of the face's layer along [`Self::axis()`].
    pub fn layer(self) -> i8 {
        match self {
            Face::R | Face::U | Face::F => 1,
            Face::L | Face::D | Face::B => -1,
        }
    }

    /// Returns the rotation direction of a clockwise turn of the face, seen
    /// from outside the cube. This is the same sign as [`Self::layer()`].
    pub fn base_dir(self) -> i8 {
        self.layer()
    }
}

/// Suffix of a move token.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Modifier {
    /// Clockwise quarter turn, written with no suffix.
    #[default]
    None,
    /// Counterclockwise quarter turn, written `'`.
    Prime,
    /// Half turn, written `2`.
    Double,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suffix() {
            Some(c) => write!(f, "{c}"),
            None => Ok(()),
        }
    }
}

impl Modifier {
    /// All three modifiers.
    pub const ALL: [Self; 3] = [Self::None, Self::Prime, Self::Double];

    /// Returns the suffix character, or `None` for a plain quarter turn.
    pub fn suffix(self) -> Option<char> {
        match self {
            Modifier::None => None,
            Modifier::Prime => Some('\''),
            Modifier::Double => Some('2'),
        }
    }

    /// Returns the modifier written using `c`, or `None` if there isn't one.
    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Modifier::Prime),
            '2' => Some(Modifier::Double),
            _ => None,
        }
    }

    /// Returns the modifier that undoes this one.
    pub fn inv(self) -> Self {
        match self {
            Modifier::None => Modifier::Prime,
            Modifier::Prime => Modifier::None,
            Modifier::Double => Modifier::Double,
        }
    }
}
