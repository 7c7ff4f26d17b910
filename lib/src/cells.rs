//! Cells in the cellular automaton.

/// The coordinates of a cell.
///
/// `(column, row)`. Both coordinates are 0-indexed.
pub type Coord = (usize, usize);

/// Offsets of the eight cells in the Moore neighborhood,
/// as `(column, row)` deltas.
///
/// The order is: north-west, north, north-east, west, east,
/// south-west, south, south-east.
pub const NBHD: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A cell in the cellular automaton.
///
/// The name `LifeCell` is chosen to avoid ambiguity with
/// [`std::cell::Cell`].
///
/// A cell knows nothing about its position or its neighbors;
/// the [`World`](crate::World) that owns it does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeCell {
    /// Whether the cell is alive.
    pub alive: bool,

    /// The state of the cell in the next generation.
    ///
    /// Only meaningful between the two phases of
    /// [`World::advance`](crate::World::advance).
    pub(crate) pending: bool,
}

impl LifeCell {
    /// Creates a new cell with the given state.
    #[inline]
    pub fn new(alive: bool) -> Self {
        LifeCell {
            alive,
            pending: false,
        }
    }

    /// Computes the next state from the number of living neighbors,
    /// following the rule `B3/S23`.
    ///
    /// Reads only [`alive`](#structfield.alive), writes only the pending state.
    #[inline]
    pub(crate) fn prepare(&mut self, live_neighbors: usize) {
        self.pending = if self.alive {
            live_neighbors == 2 || live_neighbors == 3
        } else {
            live_neighbors == 3
        };
    }

    /// Commits the pending state.
    #[inline]
    pub(crate) fn commit(&mut self) {
        self.alive = self.pending;
    }
}
