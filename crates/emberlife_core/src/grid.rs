//! Fixed-size toroidal cell grid.
//!
//! Every coordinate lookup wraps modulo the grid size, so the left edge
//! neighbours the right edge and the top neighbours the bottom. A grid is only
//! ever rewritten wholesale (cleared, seeded, or filled by the transition
//! engine); nothing pokes individual cells during a run.

use emberlife_data::{Cell, CellMode, Rgb};
use rand::Rng;
use std::fmt;

use crate::error::{LifeError, Result};
use crate::palette::ColorGenerator;

/// Moore-neighbourhood offsets.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Live-neighbour tally for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighborhood {
    pub count: u8,
    /// Unweighted per-channel sum over live colored neighbours.
    pub color_sum: [u32; 3],
}

impl Neighborhood {
    /// Per-channel mean colour of the live neighbours, `None` when there are none.
    pub fn average_color(&self) -> Option<Rgb> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as u32;
        let avg = |sum: u32| (sum / n).min(255) as u8;
        Some(Rgb::new(
            avg(self.color_sum[0]),
            avg(self.color_sum[1]),
            avg(self.color_sum[2]),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u16,
    height: u16,
    mode: CellMode,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a cleared grid. Fails when either dimension is zero.
    pub fn new(width: u16, height: u16, mode: CellMode) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            mode,
            cells: vec![Cell::DEAD; width as usize * height as usize],
        })
    }

    /// Creates a grid with exactly the listed cells alive.
    ///
    /// Coordinates wrap like every other access. In colored mode the live
    /// cells take `color`.
    pub fn with_live_cells(
        width: u16,
        height: u16,
        mode: CellMode,
        live: &[(i32, i32)],
        color: Rgb,
    ) -> Result<Self> {
        let mut grid = Self::new(width, height, mode)?;
        for &(x, y) in live {
            let idx = grid.wrapped_index(x, y);
            grid.cells[idx] = Cell::born(mode, color);
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn mode(&self) -> CellMode {
        self.mode
    }

    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[inline(always)]
    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize * self.width as usize) + x as usize
    }

    #[inline(always)]
    fn wrapped_index(&self, x: i32, y: i32) -> usize {
        let wx = x.rem_euclid(self.width as i32) as u16;
        let wy = y.rem_euclid(self.height as i32) as u16;
        self.index(wx, wy)
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::DEAD);
    }

    /// Brings each cell to life independently with probability `probability`.
    ///
    /// Cells that are already alive stay alive. In colored mode one colour is
    /// drawn for the whole batch before any cell is tried.
    pub fn seed<R: Rng + ?Sized>(
        &mut self,
        probability: f64,
        palette: &ColorGenerator,
        rng: &mut R,
    ) {
        let color = match self.mode {
            CellMode::Colored => palette.generate(rng),
            CellMode::Binary => Rgb::BLACK,
        };
        let mode = self.mode;
        for cell in self.cells.iter_mut() {
            if rng.gen::<f64>() < probability {
                *cell = Cell::born(mode, color);
            }
        }
    }

    /// Cell at `(x, y)` after wrapping.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> &Cell {
        &self.cells[self.wrapped_index(x, y)]
    }

    #[inline]
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).alive
    }

    /// Counts live Moore neighbours of `(x, y)`, each offset wrapped on its own.
    ///
    /// `(x, y)` is wrapped onto the grid before the offsets are applied, so any
    /// `i32` pair is accepted.
    pub fn neighbor_count(&self, x: i32, y: i32) -> Neighborhood {
        let cx = x.rem_euclid(self.width as i32);
        let cy = y.rem_euclid(self.height as i32);
        let mut hood = Neighborhood::default();
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let cell = self.cell(cx + dx, cy + dy);
            if cell.alive {
                hood.count += 1;
                if let Some(c) = cell.color {
                    hood.color_sum[0] += c.r as u32;
                    hood.color_sum[1] += c.g as u32;
                    hood.color_sum[2] += c.b as u32;
                }
            }
        }
        hood
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    pub fn is_populated(&self) -> bool {
        self.cells.iter().any(|c| c.alive)
    }

    /// Overwrites this grid with the contents of `other`.
    pub fn copy_from(&mut self, other: &Grid) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(LifeError::DimensionMismatch {
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        self.mode = other.mode;
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major mutable view, for the transition engine's full-grid rewrite.
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub(crate) fn set_mode(&mut self, mode: CellMode) {
        self.mode = mode;
    }

    /// Iterates `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| ((i % w) as u16, (i / w) as u16, c))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                let ch = if self.cells[self.index(x, y)].alive {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const ORANGE: Rgb = Rgb::new(200, 80, 20);

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Grid::new(0, 5, CellMode::Binary),
            Err(LifeError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::new(5, 0, CellMode::Colored).is_err());
    }

    #[test]
    fn test_new_grid_is_cleared() {
        let grid = Grid::new(4, 3, CellMode::Colored).unwrap();
        assert_eq!(grid.population(), 0);
        assert!(!grid.is_populated());
        assert!(grid.cells().iter().all(|c| *c == Cell::DEAD));
    }

    #[test]
    fn test_is_alive_wraps() {
        let grid = Grid::with_live_cells(5, 4, CellMode::Binary, &[(0, 0)], ORANGE).unwrap();
        assert!(grid.is_alive(5, 4));
        assert!(grid.is_alive(-5, -4));
        assert!(grid.is_alive(10, 8));
        assert!(!grid.is_alive(1, 0));
    }

    #[test]
    fn test_corner_neighbors_wrap() {
        let grid = Grid::with_live_cells(6, 5, CellMode::Binary, &[(5, 4)], ORANGE).unwrap();
        // (5,4) is diagonal to every corner on a torus.
        assert_eq!(grid.neighbor_count(0, 0).count, 1);
        assert_eq!(grid.neighbor_count(4, 3).count, 1);
        assert_eq!(grid.neighbor_count(0, 3).count, 1);
        assert_eq!(grid.neighbor_count(4, 0).count, 1);
        assert_eq!(grid.neighbor_count(5, 4).count, 0);
    }

    #[test]
    fn test_neighbor_count_at_i32_extremes() {
        let grid = Grid::with_live_cells(5, 4, CellMode::Binary, &[(0, 0), (4, 3)], ORANGE)
            .unwrap();
        assert_eq!(
            grid.neighbor_count(i32::MAX, 0),
            grid.neighbor_count(i32::MAX.rem_euclid(5), 0)
        );
        assert_eq!(
            grid.neighbor_count(i32::MIN, i32::MIN),
            grid.neighbor_count(i32::MIN.rem_euclid(5), i32::MIN.rem_euclid(4))
        );
        assert_eq!(grid.neighbor_count(i32::MAX, i32::MAX).count, 0);
        assert!(!grid.is_alive(i32::MAX, i32::MIN));
    }

    proptest! {
        #[test]
        fn test_neighbor_count_total_over_i32(
            x in any::<i32>(),
            y in any::<i32>(),
            width in 1u16..12,
            height in 1u16..12,
        ) {
            let grid = Grid::with_live_cells(
                width,
                height,
                CellMode::Binary,
                &[(0, 0), (1, 1), (2, 0)],
                ORANGE,
            )
            .unwrap();
            let wx = x.rem_euclid(width as i32);
            let wy = y.rem_euclid(height as i32);
            prop_assert_eq!(grid.neighbor_count(x, y), grid.neighbor_count(wx, wy));
            prop_assert!(grid.neighbor_count(x, y).count <= 8);
        }
    }

    #[test]
    fn test_neighbor_color_sum() {
        let grid = Grid::with_live_cells(
            8,
            8,
            CellMode::Colored,
            &[(0, 0), (1, 0), (2, 0)],
            Rgb::new(90, 30, 3),
        )
        .unwrap();
        let hood = grid.neighbor_count(1, 1);
        assert_eq!(hood.count, 3);
        assert_eq!(hood.color_sum, [270, 90, 9]);
        assert_eq!(hood.average_color(), Some(Rgb::new(90, 30, 3)));
    }

    #[test]
    fn test_binary_neighbors_have_no_color() {
        let grid =
            Grid::with_live_cells(8, 8, CellMode::Binary, &[(0, 0), (1, 0)], ORANGE).unwrap();
        let hood = grid.neighbor_count(1, 1);
        assert_eq!(hood.count, 2);
        assert_eq!(hood.color_sum, [0, 0, 0]);
    }

    #[test]
    fn test_seed_extremes() {
        let palette = ColorGenerator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut grid = Grid::new(8, 8, CellMode::Colored).unwrap();
        grid.seed(0.0, &palette, &mut rng);
        assert_eq!(grid.population(), 0);
        grid.seed(1.0, &palette, &mut rng);
        assert_eq!(grid.population(), 64);
    }

    #[test]
    fn test_seed_batch_shares_one_color() {
        let palette = ColorGenerator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = Grid::new(8, 8, CellMode::Colored).unwrap();
        grid.seed(0.5, &palette, &mut rng);
        let colors: Vec<_> = grid.cells().iter().filter_map(|c| c.color).collect();
        assert!(!colors.is_empty());
        assert!(colors.iter().all(|c| *c == colors[0]));
    }

    #[test]
    fn test_clear_kills_everything() {
        let mut grid =
            Grid::with_live_cells(4, 4, CellMode::Colored, &[(1, 1), (2, 2)], ORANGE).unwrap();
        grid.clear();
        assert!(!grid.is_populated());
        assert!(grid.cells().iter().all(|c| c.color.is_none()));
    }

    #[test]
    fn test_equality_includes_color() {
        let a = Grid::with_live_cells(4, 4, CellMode::Colored, &[(1, 1)], ORANGE).unwrap();
        let b = Grid::with_live_cells(4, 4, CellMode::Colored, &[(1, 1)], Rgb::new(1, 1, 1))
            .unwrap();
        let c = Grid::with_live_cells(4, 4, CellMode::Colored, &[(1, 1)], ORANGE).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_copy_from_rejects_other_shape() {
        let mut a = Grid::new(4, 4, CellMode::Binary).unwrap();
        let b = Grid::new(5, 4, CellMode::Binary).unwrap();
        assert!(a.copy_from(&b).is_err());
    }

    #[test]
    fn test_display() {
        let grid =
            Grid::with_live_cells(3, 2, CellMode::Binary, &[(0, 0), (2, 1)], ORANGE).unwrap();
        assert_eq!(grid.to_string(), "#..\n..#");
    }
}
