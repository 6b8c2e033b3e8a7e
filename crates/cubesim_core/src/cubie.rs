use std::collections::HashSet;

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Axis, CUBIE_COUNT, LAYER_SIZE, Move, Orientation, Pos};

/// Indices of the cubies in a single layer.
pub type LayerIndices = SmallVec<[usize; LAYER_SIZE]>;

/// One of the 26 visible sub-cubes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cubie {
    /// Current location.
    pub position: Pos,
    /// Location in the solved state. This never changes.
    pub home: Pos,
    /// Accumulated rotation since the cubie was at home.
    pub orientation: Orientation,
}

impl Cubie {
    fn new(home: Pos) -> Self {
        Self {
            position: home,
            home,
            orientation: Orientation::IDENTITY,
        }
    }

    /// Returns whether the cubie is at its home position, regardless of
    /// orientation.
    pub fn is_home(&self) -> bool {
        self.position == self.home
    }

    fn rotate(&mut self, axis: Axis, dir: i8) {
        self.position = self.position.rotated(axis, dir);
        self.orientation = self.orientation.rotated(axis, dir);
    }

    fn reset(&mut self) {
        *self = Self::new(self.home);
    }
}

/// Returns the cubies whose component along `axis` equals `layer`.
///
/// For `layer` = `1` or `-1` this is exactly 9 cubies.
pub fn select_layer(cubies: &[Cubie], axis: Axis, layer: i8) -> impl '_ + Iterator<Item = &Cubie> {
    cubies.iter().filter(move |c| c.position.get(axis) == layer)
}

/// Set of all 26 cubies, in a fixed order.
///
/// Positions can only be changed by turning a layer or by resetting, so the
/// cubies always occupy 26 distinct lattice points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubieSet {
    cubies: Vec<Cubie>,
}

impl Default for CubieSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CubieSet {
    /// Constructs a solved cube, with cubies ordered by home position.
    pub fn new() -> Self {
        let cubies: Vec<Cubie> = iproduct!(-1..=1, -1..=1, -1..=1)
            .map(|(x, y, z)| Pos::new(x, y, z))
            .filter(|&p| p != Pos::ORIGIN)
            .map(Cubie::new)
            .collect();
        debug_assert_eq!(cubies.len(), CUBIE_COUNT);
        Self { cubies }
    }

    /// Returns all cubies.
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }
    /// Returns an iterator over all cubies.
    pub fn iter(&self) -> std::slice::Iter<'_, Cubie> {
        self.cubies.iter()
    }
    /// Returns the number of cubies, which is always [`CUBIE_COUNT`].
    pub fn len(&self) -> usize {
        self.cubies.len()
    }
    /// Returns `false`.
    pub fn is_empty(&self) -> bool {
        self.cubies.is_empty()
    }

    /// Returns the cubie currently at `pos`, if any.
    pub fn cubie_at(&self, pos: Pos) -> Option<&Cubie> {
        self.cubies.iter().find(|c| c.position == pos)
    }

    /// Returns the cubies currently in the layer.
    pub fn select(&self, axis: Axis, layer: i8) -> impl '_ + Iterator<Item = &Cubie> {
        select_layer(&self.cubies, axis, layer)
    }
    /// Returns the indices of the cubies currently in the layer.
    pub fn layer_indices(&self, axis: Axis, layer: i8) -> LayerIndices {
        self.cubies
            .iter()
            .enumerate()
            .filter(|(_, c)| c.position.get(axis) == layer)
            .map(|(i, _)| i)
            .collect()
    }

    /// Rotates one layer by a quarter turn in direction `dir` (`1` or `-1`).
    pub fn apply_quarter_turn(&mut self, axis: Axis, layer: i8, dir: i8) {
        for i in self.layer_indices(axis, layer) {
            self.cubies[i].rotate(axis, dir);
        }
        debug_assert!(self.is_valid_permutation());
    }

    /// Applies a move. A half turn is two quarter turns in the same direction.
    pub fn do_move(&mut self, m: Move) {
        for _ in 0..m.turns() {
            self.apply_quarter_turn(m.axis(), m.layer(), m.dir());
        }
    }
    /// Applies a sequence of moves in order.
    pub fn do_moves(&mut self, moves: impl IntoIterator<Item = Move>) {
        for m in moves {
            self.do_move(m);
        }
    }

    /// Returns whether every cubie is at its home position.
    pub fn is_solved(&self) -> bool {
        self.cubies.iter().all(Cubie::is_home)
    }
    /// Returns whether every cubie is at its home position with its original
    /// orientation.
    pub fn is_fully_solved(&self) -> bool {
        self.cubies
            .iter()
            .all(|c| c.is_home() && c.orientation.is_identity())
    }

    /// Returns every cubie to its home position and orientation.
    pub fn reset(&mut self) {
        self.cubies.iter_mut().for_each(Cubie::reset);
    }

    /// Returns whether the cubies occupy 26 distinct non-center lattice
    /// points.
    pub fn is_valid_permutation(&self) -> bool {
        let mut seen = HashSet::with_capacity(CUBIE_COUNT);
        self.cubies.len() == CUBIE_COUNT
            && self.cubies.iter().all(|c| {
                c.position.is_on_lattice() && c.position != Pos::ORIGIN && seen.insert(c.position)
            })
    }
}

impl<'a> IntoIterator for &'a CubieSet {
    type Item = &'a Cubie;
    type IntoIter = std::slice::Iter<'a, Cubie>;

    fn into_iter(self) -> Self::IntoIter {
        self.cubies.iter()
    }
}
