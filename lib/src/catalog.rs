//! Named patterns.

use crate::{
    error::Error,
    pattern::{Matrix, Pattern},
    world::World,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A list of named patterns, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catalog {
    patterns: Vec<(String, Pattern)>,
}

/// Builds a pattern from rows of `X` and `.`.
///
/// All rows must have the same length.
fn literal(rows: &[&str]) -> Pattern {
    let columns = rows[0].len();
    let data = rows
        .iter()
        .flat_map(|row| row.bytes().map(|b| b == b'X'))
        .collect();
    Matrix::from_vec(rows.len(), columns, data)
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// The common small still lifes, each surrounded by a border of dead cells,
    /// so that a still life is only found when nothing touches it.
    pub fn still_lifes() -> Self {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Block",
            literal(&[
                "....", //
                ".XX.", //
                ".XX.", //
                "....",
            ]),
        );
        catalog.insert(
            "Beehive",
            literal(&[
                "......", //
                "..XX..", //
                ".X..X.", //
                "..XX..", //
                "......",
            ]),
        );
        catalog.insert(
            "Loaf",
            literal(&[
                "......", //
                "..XX..", //
                ".X..X.", //
                "..X.X.", //
                "...X..", //
                "......",
            ]),
        );
        catalog.insert(
            "Boat",
            literal(&[
                ".....", //
                "..X..", //
                ".X.X.", //
                ".XX..", //
                ".....",
            ]),
        );
        catalog.insert(
            "Ship",
            literal(&[
                ".....", //
                ".XX..", //
                ".X.X.", //
                "..XX.", //
                ".....",
            ]),
        );
        catalog.insert(
            "Tub",
            literal(&[
                ".....", //
                "..X..", //
                ".X.X.", //
                "..X..", //
                ".....",
            ]),
        );
        catalog
    }

    /// Adds a pattern, replacing any pattern with the same name.
    pub fn insert<S: ToString>(&mut self, name: S, pattern: Pattern) {
        let name = name.to_string();
        match self.patterns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => *old = pattern,
            None => self.patterns.push((name, pattern)),
        }
    }

    /// Finds a pattern by its name.
    pub fn get(&self, name: &str) -> Result<&Pattern, Error> {
        self.patterns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
            .ok_or_else(|| Error::UnknownPattern(name.to_string()))
    }

    /// Iterates over the names and patterns.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.patterns.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Counts every pattern of the catalog in the world.
    pub fn census(&self, world: &World) -> Vec<(&str, usize)> {
        let matcher = world.matcher();
        self.iter()
            .map(|(name, pattern)| (name, matcher.count(pattern)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_lifes_are_stable() -> Result<(), Error> {
        let catalog = Catalog::still_lifes();
        assert_eq!(catalog.len(), 6);
        for (name, pattern) in catalog.iter() {
            let map: Vec<Vec<bool>> = pattern.iter_rows().map(<[bool]>::to_vec).collect();
            let mut world = World::from_map(&map)?;
            let before = world.snapshot();
            world.advance();
            assert_eq!(world.snapshot(), before, "{} is not a still life", name);
        }
        Ok(())
    }

    #[test]
    fn block_shape() -> Result<(), Error> {
        let catalog = Catalog::still_lifes();
        assert_eq!(
            catalog.get("Block")?,
            &Pattern::parse("....\n.XX.\n.XX.\n....")?
        );
        assert_eq!(catalog.get("Beehive")?.rows(), 5);
        assert_eq!(catalog.get("Beehive")?.columns(), 6);
        Ok(())
    }

    #[test]
    fn unknown_name() {
        let catalog = Catalog::still_lifes();
        assert_eq!(
            catalog.get("Glider"),
            Err(Error::UnknownPattern(String::from("Glider")))
        );
    }

    #[test]
    fn insert_replaces() -> Result<(), Error> {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        catalog.insert("Dot", Pattern::parse("X")?);
        catalog.insert("Dot", Pattern::parse("...\n.X.\n...")?);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Dot")?.rows(), 3);
        Ok(())
    }
}
