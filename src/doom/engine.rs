//! Fire simulation engine (doom-style)
//!
//! The bottom row is an inexhaustible heat source. Every tick each cell takes
//! the intensity of the cell below it minus a random decay, and deposits it
//! at a position shifted by the wind. Updates happen in place, column by
//! column, so a value written earlier in the tick can feed a later read.

use super::geometry::GridGeometry;
use super::wind::WindDirection;
use rand::Rng;
use tracing::{debug, warn};

/// Owns the intensity grid and the random source driving its decay
pub struct FireEngine<R: Rng> {
    geometry: GridGeometry,
    pixels: Vec<u8>,
    max_level: u8,
    rng: R,
    ticks: u64,
}

impl<R: Rng> FireEngine<R> {
    /// Allocate a grid for `geometry` and light the source row at `max_level`
    pub fn new(geometry: GridGeometry, max_level: u8, rng: R) -> Self {
        let mut engine = Self {
            geometry,
            pixels: Vec::new(),
            max_level,
            rng,
            ticks: 0,
        };
        engine.reinitialize(geometry);
        engine
    }

    /// Throw away the current grid and start over with a new shape
    pub fn reinitialize(&mut self, geometry: GridGeometry) {
        self.geometry = geometry;
        self.ticks = 0;
        self.pixels = vec![0; geometry.cell_count()];

        let source = geometry.source_row_start();
        for pixel in &mut self.pixels[source..] {
            *pixel = self.max_level;
        }

        if geometry.is_inert() {
            warn!(
                width = geometry.source_width,
                height = geometry.source_height,
                "surface too small for a fire grid, simulation is inert"
            );
        } else {
            debug!(
                grid_width = geometry.grid_width,
                grid_height = geometry.grid_height,
                cell_size = geometry.cell_size,
                "fire grid initialized"
            );
        }
    }

    /// Advance the fire by one frame and return the new intensities
    pub fn tick(&mut self, wind: WindDirection) -> &[u8] {
        let width = self.geometry.grid_width;
        let height = self.geometry.grid_height;

        for column in 0..width {
            for row in 1..height {
                let current = self.geometry.index(column, row);
                self.spread(current, wind);
            }
        }

        self.ticks += 1;
        &self.pixels
    }

    fn spread(&mut self, current: usize, wind: WindDirection) {
        let len = self.pixels.len();
        let below = current + self.geometry.grid_width as usize;
        if below >= len {
            return;
        }

        let range = self.geometry.decay_range() as f64;
        let decay = (self.rng.gen::<f64>() * range).floor() as u8;
        let intensity = self.pixels[below].saturating_sub(decay);

        // Left wind wraps into the next row; it must never reach the source row
        let target = match wind.shift(current, decay as usize) {
            Some(t) if t < self.geometry.source_row_start() => t,
            _ => current,
        };

        self.pixels[target] = intensity;
    }

    /// Current intensities, row-major, top row first
    pub fn snapshot(&self) -> &[u8] {
        &self.pixels
    }

    /// Intensity of one cell, `None` outside the grid
    #[allow(dead_code)]
    pub fn intensity(&self, column: u32, row: u32) -> Option<u8> {
        if column >= self.geometry.grid_width || row >= self.geometry.grid_height {
            return None;
        }
        self.pixels.get(self.geometry.index(column, row)).copied()
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Level the source row burns at
    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    /// Ticks since the last (re)initialization
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MAX: u8 = 36;

    /// Random source whose every `f64` draw is 0.0
    fn zero_draws() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Random source whose every `f64` draw is exactly 0.5
    fn half_draws() -> StepRng {
        StepRng::new(1 << 63, 0)
    }

    /// Random source whose every `f64` draw is just below 1.0
    fn top_draws() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn grid(width: u32, height: u32, taller_than_wide: bool) -> GridGeometry {
        GridGeometry {
            source_width: width,
            source_height: height,
            taller_than_wide,
            cell_size: 1,
            grid_width: width,
            grid_height: height,
        }
    }

    fn source_row(engine: &FireEngine<impl Rng>) -> Vec<u8> {
        let start = engine.geometry().source_row_start();
        engine.snapshot()[start..].to_vec()
    }

    #[test]
    fn seeds_only_the_bottom_row() {
        let g = GridGeometry::resolve(120, 80);
        let engine = FireEngine::new(g, MAX, zero_draws());
        let w = g.grid_width as usize;
        let snap = engine.snapshot();
        assert_eq!(snap.len(), g.cell_count());
        let (top, bottom) = snap.split_at(snap.len() - w);
        assert!(top.iter().all(|&p| p == 0));
        assert!(bottom.iter().all(|&p| p == MAX));
    }

    #[test]
    fn three_by_three_without_decay() {
        let mut engine = FireEngine::new(grid(3, 3, false), 7, zero_draws());
        assert_eq!(engine.snapshot(), &[0, 0, 0, 0, 0, 0, 7, 7, 7]);

        engine.tick(WindDirection::None);
        assert_eq!(engine.snapshot(), &[0, 0, 0, 7, 7, 7, 7, 7, 7]);

        // Row 0 is never a target for calm air, so it stays dark
        engine.tick(WindDirection::None);
        assert_eq!(engine.snapshot(), &[0, 0, 0, 7, 7, 7, 7, 7, 7]);
        assert_eq!(engine.ticks(), 2);
    }

    #[test]
    fn decay_matches_fixed_draw() {
        // 0.5 * 3 floors to 1 on a wide grid
        let mut engine = FireEngine::new(grid(4, 3, false), 7, half_draws());
        engine.tick(WindDirection::None);
        assert_eq!(&engine.snapshot()[4..8], &[6, 6, 6, 6]);

        // 0.5 * 2 floors to 1 on a tall grid as well
        let mut engine = FireEngine::new(grid(3, 4, true), 7, half_draws());
        engine.tick(WindDirection::None);
        assert_eq!(&engine.snapshot()[6..9], &[6, 6, 6]);
    }

    #[test]
    fn maximum_draw_uses_full_decay_range() {
        let mut wide = FireEngine::new(grid(4, 3, false), 7, top_draws());
        wide.tick(WindDirection::None);
        assert_eq!(&wide.snapshot()[4..8], &[5, 5, 5, 5]);

        let mut tall = FireEngine::new(grid(3, 4, true), 7, top_draws());
        tall.tick(WindDirection::None);
        assert_eq!(&tall.snapshot()[6..9], &[6, 6, 6]);
    }

    #[test]
    fn decay_never_goes_below_zero() {
        let mut engine = FireEngine::new(grid(4, 6, false), 1, top_draws());
        for _ in 0..5 {
            engine.tick(WindDirection::None);
        }
        let start = engine.geometry().source_row_start();
        assert!(engine.snapshot()[..start].iter().all(|&p| p == 0));
    }

    #[test]
    fn right_wind_shifts_back_by_decay() {
        // Wide 4x3 grid, decay 1: row 1 writes land one index earlier
        let mut engine = FireEngine::new(grid(4, 3, false), 7, half_draws());
        engine.tick(WindDirection::Right);
        let snap = engine.snapshot();
        // column 0 of row 1 spills into the last cell of row 0
        assert_eq!(snap[3], 6);
        assert_eq!(&snap[4..7], &[6, 6, 6]);
        // column 3 of row 1 is never a target
        assert_eq!(snap[7], 0);
    }

    #[test]
    fn right_wind_at_grid_start_stays_put() {
        // Index 1 shifted back by a decay of 2 would fall before the grid
        let mut engine = FireEngine::new(grid(1, 3, false), 7, top_draws());
        engine.tick(WindDirection::Right);
        assert_eq!(engine.snapshot(), &[0, 5, 7]);
    }

    #[test]
    fn left_wind_shifts_forward_by_decay() {
        let mut engine = FireEngine::new(grid(4, 4, false), 7, half_draws());
        engine.tick(WindDirection::Left);
        let snap = engine.snapshot();
        // Row 2 reads the source and lands one cell to the right; column 3
        // would land in the source row and stays put
        assert_eq!(&snap[9..12], &[6, 6, 6]);
        assert_eq!(source_row(&engine), vec![7; 4]);
    }

    #[test]
    fn left_wind_reads_values_written_earlier_in_the_tick() {
        let mut engine = FireEngine::new(grid(4, 4, false), 7, half_draws());
        engine.tick(WindDirection::Left);
        let snap = engine.snapshot();
        // Column 0 of row 1 read the untouched row 2 (still dark), later
        // columns read the heat that column 0..2 had already pushed into row 2
        assert_eq!(&snap[4..8], &[0, 0, 5, 5]);
        // Column 3 of row 1 wraps onto the start of row 2
        assert_eq!(snap[8], 5);
    }

    #[test]
    fn source_row_survives_every_wind() {
        for wind in [WindDirection::Left, WindDirection::Right, WindDirection::None] {
            let g = GridGeometry::resolve(90, 60);
            let mut engine = FireEngine::new(g, MAX, StdRng::seed_from_u64(7));
            for _ in 0..200 {
                engine.tick(wind);
            }
            assert!(source_row(&engine).iter().all(|&p| p == MAX), "{:?}", wind);
        }
    }

    #[test]
    fn intensities_stay_in_range() {
        let g = GridGeometry::resolve(64, 200);
        let mut engine = FireEngine::new(g, MAX, StdRng::seed_from_u64(42));
        for _ in 0..100 {
            let snap = engine.tick(WindDirection::Left);
            assert!(snap.iter().all(|&p| p <= MAX));
        }
    }

    #[test]
    fn calm_cells_stay_within_decay_of_previous_below() {
        let g = GridGeometry::resolve(100, 60);
        let range = g.decay_range() as u8;
        let mut engine = FireEngine::new(g, MAX, StdRng::seed_from_u64(3));
        for _ in 0..30 {
            engine.tick(WindDirection::None);
        }
        let before = engine.snapshot().to_vec();
        engine.tick(WindDirection::None);
        let after = engine.snapshot();
        let w = g.grid_width as usize;
        for idx in w..g.source_row_start() {
            let below = before[idx + w];
            assert!(after[idx] <= below);
            assert!(after[idx] + (range - 1) >= below || after[idx] == 0);
        }
    }

    #[test]
    fn same_seed_same_fire() {
        let g = GridGeometry::resolve(80, 80);
        let mut a = FireEngine::new(g, MAX, StdRng::seed_from_u64(99));
        let mut b = FireEngine::new(g, MAX, StdRng::seed_from_u64(99));
        for _ in 0..20 {
            a.tick(WindDirection::Right);
            b.tick(WindDirection::Right);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn inert_grid_never_changes() {
        let g = GridGeometry::resolve(0, 0);
        let mut engine = FireEngine::new(g, MAX, StdRng::seed_from_u64(1));
        assert!(engine.snapshot().is_empty());
        for _ in 0..10 {
            assert!(engine.tick(WindDirection::Left).is_empty());
        }
        assert_eq!(engine.intensity(0, 0), None);
    }

    #[test]
    fn intensity_reads_by_column_and_row() {
        let mut engine = FireEngine::new(grid(3, 3, false), 7, zero_draws());
        assert_eq!(engine.intensity(1, 1), Some(0));
        assert_eq!(engine.intensity(2, 2), Some(7));
        engine.tick(WindDirection::None);
        assert_eq!(engine.intensity(1, 1), Some(7));
        assert_eq!(engine.intensity(0, 0), Some(0));
        assert_eq!(engine.intensity(3, 0), None);
        assert_eq!(engine.intensity(0, 3), None);
    }

    #[test]
    fn max_level_is_the_seed_level() {
        let engine = FireEngine::new(grid(4, 2, false), 12, zero_draws());
        assert_eq!(engine.max_level(), 12);
        assert_eq!(engine.intensity(3, 1), Some(engine.max_level()));
    }

    #[test]
    fn reinitialize_changes_shape_and_reseeds() {
        let mut engine = FireEngine::new(grid(3, 3, false), 7, zero_draws());
        engine.tick(WindDirection::None);
        engine.reinitialize(grid(5, 2, false));
        assert_eq!(engine.snapshot(), &[0, 0, 0, 0, 0, 7, 7, 7, 7, 7]);
        assert_eq!(engine.ticks(), 0);
        assert_eq!(engine.geometry().grid_width, 5);
        assert_eq!(engine.intensity(4, 1), Some(7));
        assert_eq!(engine.intensity(5, 1), None);
    }
}
