//! All kinds of errors in this crate.

use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum Error {
    /// Width and height should be positive, and a board should have at least one cell.
    InvalidDimensions,
    /// Live density should be between 0 and 1, got {0}.
    InvalidDensity(f64),
    /// Cell size should be positive.
    NonPositiveCellSize,
    /// A pattern should have at least one row and one column.
    EmptyPattern,
    /// Row {row} of the pattern has a different length from the first row.
    RaggedPattern { row: usize },
    /// No pattern named {0:?} in the catalog.
    UnknownPattern(String),
}
