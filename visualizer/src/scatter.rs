//! Random obstacle scattering: rectangular blocks plus noise.

use gridpath_core::{Grid, Point};
use rand::Rng;
use rand::RngExt;

/// Parameters for [`scatter`].
#[derive(Debug, Clone)]
pub struct ScatterConfig {
    /// Number of rectangular obstacle blocks.
    pub blocks: usize,
    /// Minimum block side length.
    pub min_block: i32,
    /// Maximum block side length.
    pub max_block: i32,
    /// One noise obstacle is placed per this many grid cells.
    pub noise_divisor: usize,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            blocks: 6,
            min_block: 2,
            max_block: 6,
            noise_divisor: 12,
        }
    }
}

/// Scatter obstacle blocks and noise cells over `grid`.
///
/// Blocks may be clipped by the grid edge. Placement goes through
/// [`Grid::set_obstacle`], so the start/target cells are never touched.
pub fn scatter<R: Rng>(grid: &mut Grid, rng: &mut R, cfg: &ScatterConfig) {
    let w = grid.width();
    let h = grid.height();

    for _ in 0..cfg.blocks {
        let bw = rng.random_range(cfg.min_block..=cfg.max_block);
        let bh = rng.random_range(cfg.min_block..=cfg.max_block);
        let x0 = rng.random_range(0..w);
        let y0 = rng.random_range(0..h);
        for y in y0..(y0 + bh).min(h) {
            for x in x0..(x0 + bw).min(w) {
                grid.set_obstacle(Point::new(x, y), true);
            }
        }
    }

    let noise = grid.cell_count() / cfg.noise_divisor;
    for _ in 0..noise {
        let p = Point::new(rng.random_range(0..w), rng.random_range(0..h));
        grid.set_obstacle(p, true);
    }

    log::debug!(
        "scattered {} obstacle cells",
        grid.cells().iter().filter(|c| c.obstacle).count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_avoids_endpoints_and_places_obstacles() {
        let mut grid = Grid::new(25, 25).unwrap();
        grid.set_start(Point::new(0, 0));
        grid.set_target(Point::new(24, 24));
        let mut rng = rand::rng();
        scatter(&mut grid, &mut rng, &ScatterConfig::default());

        assert!(!grid.is_obstacle(Point::new(0, 0)));
        assert!(!grid.is_obstacle(Point::new(24, 24)));
        assert!(grid.cells().iter().any(|c| c.obstacle));
    }

    #[test]
    fn blocks_clip_at_the_grid_edge() {
        // Small grid, large blocks: everything must stay in bounds (no
        // panic) and endpoints stay clear.
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_start(Point::new(0, 0));
        grid.set_target(Point::new(3, 3));
        let cfg = ScatterConfig {
            blocks: 10,
            min_block: 3,
            max_block: 8,
            noise_divisor: 2,
        };
        let mut rng = rand::rng();
        scatter(&mut grid, &mut rng, &cfg);
        assert!(!grid.is_obstacle(Point::new(0, 0)));
        assert!(!grid.is_obstacle(Point::new(3, 3)));
    }
}
