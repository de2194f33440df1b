//! Generation N -> N+1.
//!
//! Standard B3/S23 life, read strictly from the source grid and written to a
//! different one. Colored births inherit the mean colour of their three
//! parents. On top of the rule, a cell that was dead and stays dead can ignite
//! spontaneously with a small probability, which keeps the panel from going
//! permanently dark or frozen.

use emberlife_data::{Cell, CellMode, Rgb};
use rand::Rng;

use crate::error::{LifeError, Result};
use crate::grid::Grid;
use crate::palette::ColorGenerator;

/// What happened during one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    pub births: usize,
    pub deaths: usize,
    pub spontaneous_births: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    palette: ColorGenerator,
}

impl TransitionEngine {
    pub fn new(palette: ColorGenerator) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &ColorGenerator {
        &self.palette
    }

    /// Computes the successor of `from` into a fresh grid.
    pub fn next_generation<R: Rng + ?Sized>(
        &self,
        from: &Grid,
        mutation_probability: f64,
        rng: &mut R,
    ) -> Grid {
        let mut next = from.clone();
        self.write_next(from, &mut next, mutation_probability, rng);
        next
    }

    /// Computes the successor of `from` into `into`, overwriting all of it.
    ///
    /// `into` must have the same dimensions as `from` and takes on `from`'s mode.
    pub fn step_into<R: Rng + ?Sized>(
        &self,
        from: &Grid,
        into: &mut Grid,
        mutation_probability: f64,
        rng: &mut R,
    ) -> Result<StepOutcome> {
        if from.dimensions() != into.dimensions() {
            return Err(LifeError::DimensionMismatch {
                left: from.dimensions(),
                right: into.dimensions(),
            });
        }
        Ok(self.write_next(from, into, mutation_probability, rng))
    }

    fn write_next<R: Rng + ?Sized>(
        &self,
        from: &Grid,
        into: &mut Grid,
        mutation_probability: f64,
        rng: &mut R,
    ) -> StepOutcome {
        let mode = from.mode();
        let width = from.width() as i32;
        // One ignition colour per generation, shared by every spontaneous birth.
        let spark = if mutation_probability > 0.0 && mode == CellMode::Colored {
            self.palette.generate(rng)
        } else {
            Rgb::BLACK
        };

        let mut outcome = StepOutcome::default();
        into.set_mode(mode);
        let cells = into.cells_mut();
        for (i, slot) in cells.iter_mut().enumerate() {
            let x = i as i32 % width;
            let y = i as i32 / width;
            let current = *from.cell(x, y);
            let hood = from.neighbor_count(x, y);

            *slot = match (current.alive, hood.count) {
                (true, n) if !(2..=3).contains(&n) => {
                    outcome.deaths += 1;
                    Cell::DEAD
                }
                (false, 3) => {
                    outcome.births += 1;
                    Cell::born(mode, hood.average_color().unwrap_or(Rgb::BLACK))
                }
                _ => {
                    if !current.alive
                        && mutation_probability > 0.0
                        && rng.gen::<f64>() < mutation_probability
                    {
                        outcome.spontaneous_births += 1;
                        Cell::born(mode, spark)
                    } else {
                        current
                    }
                }
            };
        }
        outcome
    }
}
