//! The world.

use crate::{
    cells::{Coord, LifeCell, NBHD},
    error::Error,
    matcher::PatternMatcher,
    pattern::{Matrix, Pattern},
};
use log::{debug, trace, warn};
use rand::Rng;
use std::fmt::{self, Display, Formatter};

/// The default character for a living cell in plain text boards.
pub const ALIVE_CHAR: char = '*';
/// The default character for a dead cell when saving a plain text board.
///
/// When loading, every character other than the living one is a dead cell.
pub const DEAD_CHAR: char = '.';

/// The world: a fixed-size grid of cells whose edges wrap around,
/// i.e., a torus.
///
/// Every cell has exactly eight neighbors. They are never stored;
/// they are computed from the coordinates of the cell when needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    /// Number of columns.
    columns: usize,

    /// Number of rows.
    rows: usize,

    /// Size of a cell on the screen.
    ///
    /// Only used for display, never by the simulation.
    cell_size: usize,

    /// Number of generations since the world was created.
    generation: u64,

    /// All the cells, in row-major order.
    ///
    /// The cell at `(column, row)` is at index `row * columns + column`.
    cells: Box<[LifeCell]>,
}

impl World {
    /// Creates a world of dead cells.
    pub fn dead(columns: usize, rows: usize, cell_size: usize) -> Result<Self, Error> {
        if columns == 0 || rows == 0 {
            return Err(Error::InvalidDimensions);
        }
        debug!("Created an empty {}x{} world", columns, rows);
        Ok(World {
            columns,
            rows,
            cell_size,
            generation: 0,
            cells: vec![LifeCell::new(false); columns * rows].into_boxed_slice(),
        })
    }

    /// Creates a world where every cell is alive with probability `live_density`,
    /// independently of the others.
    ///
    /// The randomness comes from `rng`, so a seeded generator gives
    /// a reproducible world.
    pub fn random<R: Rng + ?Sized>(
        columns: usize,
        rows: usize,
        cell_size: usize,
        live_density: f64,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&live_density) {
            return Err(Error::InvalidDensity(live_density));
        }
        let mut world = World::dead(columns, rows, cell_size)?;
        for cell in world.cells.iter_mut() {
            cell.alive = rng.gen::<f64>() < live_density;
        }
        debug!(
            "Filled the world with density {}: {} living cells",
            live_density,
            world.cell_count()
        );
        Ok(world)
    }

    /// Creates a world from a map of cell states, one entry per row.
    ///
    /// The number of columns is the length of the shortest row.
    /// Longer rows are truncated to that width.
    ///
    /// Returns an error if there are no rows or the shortest row is empty.
    pub fn from_map<T: AsRef<[bool]>>(map: &[T]) -> Result<Self, Error> {
        let columns = map.iter().map(|row| row.as_ref().len()).min().unwrap_or(0);
        let mut world = World::dead(columns, map.len(), 1)?;
        for (y, row) in map.iter().enumerate() {
            let row = row.as_ref();
            if row.len() > columns {
                warn!(
                    "Row {} has {} cells, truncated to {}",
                    y,
                    row.len(),
                    columns
                );
            }
            for (x, &alive) in row.iter().take(columns).enumerate() {
                world.cells[y * columns + x].alive = alive;
            }
        }
        Ok(world)
    }

    /// Creates a world from a plain text board, one line per row.
    ///
    /// `alive` is the character for living cells; any other character
    /// is a dead cell. Rows are truncated to the shortest line,
    /// as in [`from_map`](Self::from_map).
    pub fn from_plaintext(text: &str, alive: char) -> Result<Self, Error> {
        let map: Vec<Vec<bool>> = text
            .trim_end_matches(|c| c == '\n' || c == '\r')
            .lines()
            .map(|line| line.chars().map(|c| c == alive).collect())
            .collect();
        World::from_map(&map)
    }

    /// Displays the world as a plain text board, one line per row.
    pub fn to_plaintext(&self, alive: char, dead: char) -> String {
        let mut str = String::with_capacity((self.columns + 1) * self.rows);
        for row in self.cells.chunks(self.columns) {
            str.extend(row.iter().map(|c| if c.alive { alive } else { dead }));
            str.push('\n');
        }
        str
    }

    /// A canonical representation of the current states of all cells,
    /// one character per cell in row-major order.
    ///
    /// Two worlds of the same size have the same snapshot
    /// if and only if all their cells have the same states.
    pub fn snapshot(&self) -> String {
        self.cells
            .iter()
            .map(|c| if c.alive { ALIVE_CHAR } else { DEAD_CHAR })
            .collect()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Size of a cell on the screen.
    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Width of the world on the screen.
    pub fn pixel_width(&self) -> usize {
        self.columns * self.cell_size
    }

    /// Height of the world on the screen.
    pub fn pixel_height(&self) -> usize {
        self.rows * self.cell_size
    }

    /// Number of generations since the world was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of living cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Wraps signed coordinates around the edges of the world.
    fn wrap(&self, column: isize, row: isize) -> Coord {
        (
            column.rem_euclid(self.columns as isize) as usize,
            row.rem_euclid(self.rows as isize) as usize,
        )
    }

    fn index(&self, (column, row): Coord) -> usize {
        (row % self.rows) * self.columns + column % self.columns
    }

    fn coord(&self, index: usize) -> Coord {
        (index % self.columns, index / self.columns)
    }

    /// Whether the cell at `coord` is alive.
    ///
    /// Coordinates outside the world wrap around.
    pub fn is_alive(&self, coord: Coord) -> bool {
        self.cells[self.index(coord)].alive
    }

    /// Sets the state of the cell at `coord`.
    ///
    /// Coordinates outside the world wrap around.
    /// This does not count as a generation.
    pub fn set_alive(&mut self, coord: Coord, alive: bool) {
        let index = self.index(coord);
        self.cells[index].alive = alive;
    }

    /// The eight neighbors of the cell at `coord`, in the order of [`NBHD`].
    ///
    /// Neighbors of cells on an edge are on the opposite edge.
    pub fn neighbors(&self, coord: Coord) -> [Coord; 8] {
        let (x, y) = (coord.0 as isize, coord.1 as isize);
        NBHD.map(|(dx, dy)| self.wrap(x + dx, y + dy))
    }

    /// Number of living cells among the eight neighbors of the cell at `coord`.
    pub fn live_neighbors(&self, coord: Coord) -> usize {
        self.neighbors(coord)
            .iter()
            .filter(|&&n| self.is_alive(n))
            .count()
    }

    /// Iterates over all cells in row-major order,
    /// with their coordinates and states.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (self.coord(i), c.alive))
    }

    /// Advances the world by one generation.
    pub fn advance(&mut self) {
        self.advance_in_order(0..self.cells.len());
    }

    /// Advances the world by one generation, preparing the cells in the given order.
    ///
    /// All cells compute their next states from the current generation
    /// before any of them is updated, so the order does not matter
    /// as long as every index is visited once.
    pub(crate) fn advance_in_order<I: IntoIterator<Item = usize>>(&mut self, order: I) {
        for i in order {
            let live_neighbors = self.live_neighbors(self.coord(i));
            self.cells[i].prepare(live_neighbors);
        }
        for cell in self.cells.iter_mut() {
            cell.commit();
        }
        self.generation += 1;
        trace!(
            "Generation {}: {} living cells",
            self.generation,
            self.cell_count()
        );
    }

    /// Reads a `height × width` window whose top left corner is at
    /// `(anchor_column, anchor_row)`.
    ///
    /// The window wraps around the edges of the world.
    pub fn window(
        &self,
        anchor_column: usize,
        anchor_row: usize,
        width: usize,
        height: usize,
    ) -> Pattern {
        let mut data = Vec::with_capacity(width * height);
        for j in 0..height {
            let row = (anchor_row + j) % self.rows;
            for i in 0..width {
                let column = (anchor_column + i) % self.columns;
                data.push(self.cells[row * self.columns + column].alive);
            }
        }
        Matrix::from_vec(height, width, data)
    }

    /// A matcher counting patterns in this world.
    pub fn matcher(&self) -> PatternMatcher<'_> {
        PatternMatcher::new(self)
    }
}

/// Displays the world with `*` for living cells and `.` for dead cells.
impl Display for World {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plaintext(ALIVE_CHAR, DEAD_CHAR))
    }
}
