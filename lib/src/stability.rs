//! Detecting short cycles.

use crate::world::World;
use log::debug;
use std::collections::VecDeque;

/// Number of snapshots kept by default, including the latest one.
///
/// Cycles of period up to `HISTORY_LEN - 1` can be detected.
pub const HISTORY_LEN: usize = 5;

/// Remembers the last few states of a world, and tells whether
/// the world has returned to one of them.
///
/// This only detects short cycles. A `false` from [`observe`](Self::observe)
/// means that no cycle is visible in the window, not that the world
/// will never repeat itself.
#[derive(Clone, Debug)]
pub struct StabilityTracker {
    /// Widths and snapshots of the world, oldest first.
    ///
    /// Two worlds of different shapes may have the same snapshot,
    /// so the width is part of the key.
    history: VecDeque<(usize, String)>,

    /// Maximal number of snapshots in the history.
    window: usize,

    /// The period of the cycle found by the last observation.
    period: Option<usize>,
}

impl Default for StabilityTracker {
    fn default() -> Self {
        StabilityTracker::with_window(HISTORY_LEN)
    }
}

impl StabilityTracker {
    /// Creates a tracker keeping [`HISTORY_LEN`] snapshots.
    pub fn new() -> Self {
        StabilityTracker::default()
    }

    /// Creates a tracker keeping `window` snapshots.
    ///
    /// A window smaller than 2 could never see a repetition,
    /// so it is raised to 2.
    pub fn with_window(window: usize) -> Self {
        let window = window.max(2);
        StabilityTracker {
            history: VecDeque::with_capacity(window + 1),
            window,
            period: None,
        }
    }

    /// Records the current state of the world.
    ///
    /// Returns `true` if the same state is among the earlier snapshots
    /// still in the history.
    pub fn observe(&mut self, world: &World) -> bool {
        let snapshot = (world.columns(), world.snapshot());
        // Only the snapshots that survive the eviction below count.
        self.period = self
            .history
            .iter()
            .rev()
            .take(self.window - 1)
            .position(|s| *s == snapshot)
            .map(|i| i + 1);
        self.history.push_back(snapshot);
        if self.history.len() > self.window {
            self.history.pop_front();
        }
        if let Some(period) = self.period {
            debug!(
                "Generation {} repeats with period {}",
                world.generation(),
                period
            );
        }
        self.period.is_some()
    }

    /// The period of the cycle found by the last call to
    /// [`observe`](Self::observe), if any.
    pub fn period(&self) -> Option<usize> {
        self.period
    }

    /// Number of snapshots in the history.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Maximal number of snapshots in the history.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Forgets all snapshots, e.g. after loading a new world.
    pub fn clear(&mut self) {
        self.history.clear();
        self.period = None;
    }
}
