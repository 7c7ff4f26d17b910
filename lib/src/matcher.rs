//! Counting occurrences of a pattern in a world.

use crate::{cells::Coord, pattern::Pattern, world::World};
use log::trace;

/// Finds a pattern in a world, up to rotations.
///
/// The pattern is found at an anchor `(column, row)` if one of its four
/// rotations is exactly equal to the window of the same size whose
/// top left corner is at the anchor. Windows wrap around the edges of the world.
///
/// Each anchor counts at most once, so symmetric patterns that match
/// in several rotations at the same place are not counted twice.
#[derive(Clone, Copy, Debug)]
pub struct PatternMatcher<'a> {
    world: &'a World,
}

impl<'a> PatternMatcher<'a> {
    /// Creates a matcher for the world.
    pub fn new(world: &'a World) -> Self {
        PatternMatcher { world }
    }

    /// Number of anchors where the pattern is found.
    pub fn count(&self, pattern: &Pattern) -> usize {
        self.find(pattern).count()
    }

    /// All anchors where the pattern is found, in row-major order.
    pub fn positions(&self, pattern: &Pattern) -> Vec<Coord> {
        self.find(pattern).collect()
    }

    fn find(&self, pattern: &Pattern) -> impl Iterator<Item = Coord> + 'a {
        let world = self.world;
        let rotations = pattern.rotations();
        // Windows wrap, so a rotation wider than the world still reads
        // a window. Only a pattern that fits in no rotation is never found.
        let fits = rotations
            .iter()
            .any(|r| r.rows() <= world.rows() && r.columns() <= world.columns());
        let rows = if fits && pattern.rows() > 0 && pattern.columns() > 0 {
            world.rows()
        } else {
            0
        };
        trace!(
            "Matching a {}x{} pattern, fits: {}",
            pattern.columns(),
            pattern.rows(),
            fits
        );
        (0..rows)
            .flat_map(move |y| (0..world.columns()).map(move |x| (x, y)))
            .filter(move |&(x, y)| {
                rotations
                    .iter()
                    .any(|r| world.window(x, y, r.columns(), r.rows()) == *r)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn symmetric_pattern_counts_once() -> Result<(), Error> {
        let mut world = World::dead(8, 8, 1)?;
        for coord in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            world.set_alive(coord, true);
        }
        let block = Pattern::parse("....\n.XX.\n.XX.\n....")?;
        assert_eq!(world.matcher().positions(&block), vec![(2, 2)]);
        Ok(())
    }

    #[test]
    fn finds_all_rotations() -> Result<(), Error> {
        let world = World::from_plaintext(
            "..........\n\
             .*....*...\n\
             .**..**...\n\
             ..........\n\
             .......**.\n\
             .**....*..\n\
             ..*.......\n\
             ..........\n",
            '*',
        )?;
        let corner = Pattern::parse("X.\nXX")?;
        let positions = world.matcher().positions(&corner);
        assert_eq!(positions, vec![(1, 1), (5, 1), (7, 4), (1, 5)]);
        Ok(())
    }

    #[test]
    fn too_large_pattern() -> Result<(), Error> {
        let world = World::dead(3, 3, 1)?;
        let wide = Pattern::parse("....\n....")?;
        assert_eq!(world.matcher().count(&wide), 0);
        let tall = Pattern::parse("..\n..\n..\n..")?;
        assert_eq!(world.matcher().count(&tall), 0);
        Ok(())
    }

    #[test]
    fn wrapped_rotation_still_counts() -> Result<(), Error> {
        let mut world = World::dead(2, 5, 1)?;
        world.set_alive((0, 0), true);
        // Four columns wide: only the quarter turns fit without wrapping.
        let pattern = Pattern::parse("X.X.\n....")?;
        assert_eq!(world.window(0, 0, 4, 2), pattern);
        // Upright at (0, 0), and upside down at (1, 4).
        assert_eq!(world.matcher().positions(&pattern), vec![(0, 0), (1, 4)]);
        Ok(())
    }

    #[test]
    fn wide_pattern_in_tall_world() -> Result<(), Error> {
        let world = World::dead(2, 5, 1)?;
        // Only the quarter turns fit.
        let wide = Pattern::parse("....\n....")?;
        assert_eq!(world.matcher().count(&wide), 10);
        Ok(())
    }
}
