//! Rectangular matrices, and patterns of cells to look for in a world.

use crate::error::Error;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A rectangular matrix stored in row-major order.
///
/// Two matrices are equal only when they have the same number of rows,
/// the same number of columns, and the same entries.
///
/// With the `serde` feature, a matrix is serialized as a list of rows,
/// and deserializing checks the rows like [`from_rows`](Self::from_rows).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    rows: usize,
    columns: usize,
    data: Vec<T>,
}

/// A pattern of living and dead cells, e.g. a still life
/// surrounded by a border of dead cells.
pub type Pattern = Matrix<bool>;

impl<T> Matrix<T> {
    /// Creates a matrix from a list of rows.
    ///
    /// Returns an error if there are no rows, the rows are empty,
    /// or the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, Error> {
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(Error::EmptyPattern);
        }
        if let Some(row) = rows.iter().position(|r| r.len() != columns) {
            return Err(Error::RaggedPattern { row });
        }
        Ok(Matrix {
            rows: rows.len(),
            columns,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Creates a matrix from its entries in row-major order.
    ///
    /// `data.len()` must be `rows * columns`.
    pub(crate) fn from_vec(rows: usize, columns: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * columns);
        Matrix {
            rows,
            columns,
            data,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Gets the entry at the given row and column.
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row < self.rows && column < self.columns {
            self.data.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Iterates over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.columns.max(1))
    }
}

impl<T: Clone> Matrix<T> {
    /// Rotates the matrix by 90° clockwise.
    ///
    /// For an `R×C` matrix the result is `C×R`, and the entry at
    /// `(row, column)` moves to `(column, R - 1 - row)`.
    pub fn rotate90(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for column in 0..self.columns {
            for new_column in 0..self.rows {
                let row = self.rows - 1 - new_column;
                data.push(self.data[row * self.columns + column].clone());
            }
        }
        Matrix::from_vec(self.columns, self.rows, data)
    }

    /// The matrix rotated by 0°, 90°, 180° and 270°, in that order.
    pub fn rotations(&self) -> [Self; 4] {
        let r90 = self.rotate90();
        let r180 = r90.rotate90();
        let r270 = r180.rotate90();
        [self.clone(), r90, r180, r270]
    }
}

#[cfg(feature = "serde")]
impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter_rows())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Matrix<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<T>>::deserialize(deserializer)?;
        Matrix::from_rows(rows).map_err(de::Error::custom)
    }
}

impl Pattern {
    /// Parses a pattern from text, one line per row.
    ///
    /// `X`, `*`, `o`, `O` and `1` are living cells;
    /// any other character is a dead cell.
    /// Whitespace around each line and blank lines are ignored,
    /// so dead cells should be written with a visible character such as `.`.
    ///
    /// Unlike a board, all rows of a pattern must have the same length.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines
            .iter()
            .map(|line| line.chars().map(is_alive_char).collect())
            .collect();
        Matrix::from_rows(rows)
    }

    /// Number of living cells in the pattern.
    pub fn cell_count(&self) -> usize {
        self.data.iter().filter(|&&alive| alive).count()
    }
}

fn is_alive_char(c: char) -> bool {
    matches!(c, 'X' | '*' | 'o' | 'O' | '1')
}

/// Displays a pattern with `X` for living cells and `.` for dead cells.
impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &alive in row {
                f.write_str(if alive { "X" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
