use std::fmt;
use std::str::FromStr;

use crate::{Axis, Face, InvalidMoveError, Modifier};

/// Single face turn, such as `R`, `U'`, or `F2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Move {
    /// Face whose layer is turned.
    pub face: Face,
    /// Direction and amount of the turn.
    pub modifier: Modifier,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.modifier)
    }
}

impl FromStr for Move {
    type Err = InvalidMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(InvalidMoveError::Empty)?;
        let face = Face::from_symbol(first).ok_or(InvalidMoveError::BadFace(first))?;
        let modifier = match chars.next() {
            None => Modifier::None,
            Some(c) => Modifier::from_suffix(c).ok_or(InvalidMoveError::BadModifier(c))?,
        };
        if chars.next().is_some() {
            return Err(InvalidMoveError::TooLong(s.to_owned()));
        }
        Ok(Self { face, modifier })
    }
}

impl From<Face> for Move {
    fn from(face: Face) -> Self {
        Self::new(face, Modifier::None)
    }
}

impl Move {
    /// Every distinct move token: 6 faces times 3 modifiers.
    pub const ALL: [Self; 18] = {
        let mut ret = [Self::new(Face::R, Modifier::None); 18];
        let mut i = 0;
        while i < 18 {
            ret[i] = Self::new(Face::ALL[i / 3], Modifier::ALL[i % 3]);
            i += 1;
        }
        ret
    };

    /// Constructs a move.
    pub const fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    /// Returns the axis of rotation.
    pub fn axis(self) -> Axis {
        self.face.axis()
    }
    /// Returns the coordinate of the turning layer along [`Self::axis()`]:
    /// `1` or `-1`.
    pub fn layer(self) -> i8 {
        self.face.layer()
    }
    /// Returns the number of quarter turns: `1` or `2`.
    pub fn turns(self) -> u8 {
        match self.modifier {
            Modifier::None | Modifier::Prime => 1,
            Modifier::Double => 2,
        }
    }
    /// Returns the direction of each quarter turn: `1` or `-1`.
    ///
    /// A half turn keeps the face's base direction.
    pub fn dir(self) -> i8 {
        match self.modifier {
            Modifier::None | Modifier::Double => self.face.base_dir(),
            Modifier::Prime => -self.face.base_dir(),
        }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inv(self) -> Self {
        Self::new(self.face, self.modifier.inv())
    }
}

/// Returns the inverse of a move token using only its text.
///
/// - A token ending in `'` has it removed.
/// - A token ending in `2` is its own inverse.
/// - Any other token gets `'` appended.
///
/// The token is not validated; use [`Move::inv()`] for parsed moves.
pub fn invert_token(token: &str) -> String {
    if let Some(rest) = token.strip_suffix('\'') {
        rest.to_owned()
    } else if token.ends_with('2') {
        token.to_owned()
    } else {
        format!("{token}'")
    }
}
