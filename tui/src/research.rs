//! Sweeping the initial density.
//!
//! For each density, runs a few random worlds until they are stable
//! or reach a generation limit, and records how long that took.

use anyhow::Result;
use lifewatch_lib::{Config, StabilityTracker};
use log::info;
use serde::Serialize;

/// The result of one run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Record {
    pub(crate) density: f64,
    pub(crate) trial: usize,
    /// Generations until a cycle was detected, or the limit.
    pub(crate) generations: u64,
    /// Living cells at the first generation.
    pub(crate) initial_population: usize,
    /// Living cells at the last generation.
    pub(crate) final_population: usize,
    /// Period of the cycle, if one was detected.
    pub(crate) period: Option<usize>,
    /// Living cells at every generation, if asked for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) series: Option<Vec<usize>>,
}

/// Which densities to try, and how.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Sweep {
    pub(crate) from: f64,
    pub(crate) to: f64,
    pub(crate) step: f64,
    /// Number of worlds per density.
    pub(crate) trials: usize,
    pub(crate) max_generations: u64,
    /// Whether to record the population at every generation.
    pub(crate) series: bool,
}

impl Default for Sweep {
    fn default() -> Self {
        Sweep {
            from: 0.1,
            to: 0.9,
            step: 0.1,
            trials: 3,
            max_generations: 1000,
            series: false,
        }
    }
}

impl Sweep {
    /// The densities from `from` to `to` inclusive, `step` apart.
    pub(crate) fn densities(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.to < self.from {
            return vec![self.from];
        }
        // Rounding, so that 0.1..=0.9 by 0.1 includes 0.9.
        let n = ((self.to - self.from) / self.step + 1e-9).floor() as usize;
        (0..=n)
            .map(|i| self.from + i as f64 * self.step)
            .collect()
    }

    /// Runs all trials, passing each record to `emit` as soon as it is done.
    ///
    /// The size and seed come from `base`. With a seed, trial `k` overall
    /// uses seed `seed + k`, so the whole sweep is reproducible.
    pub(crate) fn run<F>(&self, base: &Config, mut emit: F) -> Result<()>
    where
        F: FnMut(&Record) -> Result<()>,
    {
        let mut k = 0;
        for density in self.densities() {
            for trial in 0..self.trials {
                let config = base
                    .clone()
                    .set_live_density(density)
                    .set_seed(base.seed.map(|s| s.wrapping_add(k)));
                k += 1;
                let record = self.trial(&config, trial)?;
                info!(
                    "Density {:.3}, trial {}: {} generations",
                    density, trial, record.generations
                );
                emit(&record)?;
            }
        }
        Ok(())
    }

    fn trial(&self, config: &Config, trial: usize) -> Result<Record> {
        let mut world = config.world()?;
        let mut tracker = StabilityTracker::new();
        let initial_population = world.cell_count();
        let mut series = self.series.then(|| vec![initial_population]);
        let mut period = None;
        while world.generation() < self.max_generations {
            world.advance();
            if let Some(series) = series.as_mut() {
                series.push(world.cell_count());
            }
            if tracker.observe(&world) {
                period = tracker.period();
                break;
            }
        }
        Ok(Record {
            density: config.live_density,
            trial,
            generations: world.generation(),
            initial_population,
            final_population: world.cell_count(),
            period,
            series,
        })
    }
}
