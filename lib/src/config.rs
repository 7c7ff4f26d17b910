//! World configuration.

use crate::{error::Error, world::World};
use derivative::Derivative;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World configuration.
///
/// A random world will be generated from this configuration.
///
/// When deserialized, missing fields take their default values.
/// Values out of range are only rejected by [`validate`](Self::validate)
/// and [`world`](Self::world).
#[derive(Clone, Debug, Derivative, PartialEq)]
#[derivative(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of columns.
    #[derivative(Default(value = "100"))]
    pub width: usize,

    /// Number of rows.
    #[derivative(Default(value = "20"))]
    pub height: usize,

    /// Size of a cell on the screen.
    ///
    /// It has no effect on the simulation.
    #[derivative(Default(value = "1"))]
    #[cfg_attr(feature = "serde", serde(alias = "cellSize"))]
    pub cell_size: usize,

    /// Probability for each cell to be alive in the first generation.
    #[derivative(Default(value = "0.5"))]
    #[cfg_attr(feature = "serde", serde(alias = "liveDensity"))]
    pub live_density: f64,

    /// Seed of the random number generator.
    ///
    /// `None` means that the generator is seeded from the operating system,
    /// so every world is different.
    pub seed: Option<u64>,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: usize, height: usize) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the cell size.
    pub fn set_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the live density.
    pub fn set_live_density(mut self, live_density: f64) -> Self {
        self.live_density = live_density;
        self
    }

    /// Sets the seed.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// Checks that all values are in range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions);
        }
        if self.cell_size == 0 {
            return Err(Error::NonPositiveCellSize);
        }
        if !(0.0..=1.0).contains(&self.live_density) {
            return Err(Error::InvalidDensity(self.live_density));
        }
        Ok(())
    }

    /// Creates a new random world from the configuration.
    pub fn world(&self) -> Result<World, Error> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!("Creating a world from {:?}", self);
        World::random(
            self.width,
            self.height,
            self.cell_size,
            self.live_density,
            &mut rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 20);
        assert_eq!(config.cell_size, 1);
        assert_eq!(config.live_density, 0.5);
        assert_eq!(config.seed, None);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn invalid_values() {
        assert_eq!(
            Config::new(0, 10).validate(),
            Err(Error::InvalidDimensions)
        );
        assert_eq!(
            Config::new(10, 10).set_cell_size(0).validate(),
            Err(Error::NonPositiveCellSize)
        );
        assert_eq!(
            Config::new(10, 10).set_live_density(-0.1).world(),
            Err(Error::InvalidDensity(-0.1))
        );
    }

    #[test]
    fn seeded_worlds_are_reproducible() -> Result<(), Error> {
        let config = Config::new(30, 20).set_seed(42);
        assert_eq!(config.world()?, config.world()?);
        Ok(())
    }

    #[test]
    fn extreme_densities() -> Result<(), Error> {
        let full = Config::new(7, 5).set_live_density(1.0).world()?;
        assert_eq!(full.cell_count(), 35);
        let empty = Config::new(7, 5).set_live_density(0.0).world()?;
        assert_eq!(empty.cell_count(), 0);
        Ok(())
    }
}
