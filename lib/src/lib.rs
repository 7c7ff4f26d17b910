//! __Lifewatch__ runs [Conway's Game of Life](https://conwaylife.com/wiki/Conway%27s_Game_of_Life)
//! on a fixed-size toroidal world, counts small still lifes in it,
//! and tells when the world has settled into a short cycle.
//!
//! # Example
//!
//! ```rust
//! use lifewatch_lib::{Catalog, Config, StabilityTracker};
//!
//! let mut world = Config::new(40, 20).set_seed(1).world().unwrap();
//! let catalog = Catalog::still_lifes();
//! let mut tracker = StabilityTracker::new();
//!
//! while world.generation() < 1000 {
//!     world.advance();
//!     if tracker.observe(&world) {
//!         break;
//!     }
//! }
//!
//! let blocks = world.matcher().count(catalog.get("Block").unwrap());
//! println!("{} blocks after {} generations", blocks, world.generation());
//! ```

mod catalog;
mod cells;
mod config;
mod error;
mod matcher;
mod pattern;
mod stability;
mod world;

pub use catalog::Catalog;
pub use cells::{Coord, NBHD};
pub use config::Config;
pub use error::Error;
pub use matcher::PatternMatcher;
pub use pattern::{Matrix, Pattern};
pub use stability::{StabilityTracker, HISTORY_LEN};
pub use world::{World, ALIVE_CHAR, DEAD_CHAR};
