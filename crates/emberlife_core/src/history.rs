//! Three-generation history and long-run behaviour classification.
//!
//! The buffer keeps the current generation plus the two before it in three
//! fixed slots. Advancing writes the successor into the slot that held the
//! oldest generation and relabels the roles, so no grid is ever copied and
//! the slot being written is never the one being read.

use emberlife_data::{CellMode, TerminalPattern};
use rand::Rng;

use crate::error::Result;
use crate::grid::Grid;
use crate::palette::ColorGenerator;
use crate::transition::{StepOutcome, TransitionEngine};

const CURRENT: usize = 0;
const PREVIOUS: usize = 1;
const PREVIOUS2: usize = 2;

#[derive(Debug, Clone)]
pub struct GenerationBuffer {
    slots: [Grid; 3],
    /// Slot index for each role: current, previous, previous².
    roles: [usize; 3],
    /// How many roles hold a generation of the running epoch (1..=3).
    depth: usize,
    generation: u64,
}

impl GenerationBuffer {
    pub fn new(width: u16, height: u16, mode: CellMode) -> Result<Self> {
        let grid = Grid::new(width, height, mode)?;
        Ok(Self {
            slots: [grid.clone(), grid.clone(), grid],
            roles: [0, 1, 2],
            depth: 1,
            generation: 0,
        })
    }

    pub fn current(&self) -> &Grid {
        &self.slots[self.roles[CURRENT]]
    }

    /// The generation before the current one, if this epoch has one.
    pub fn previous(&self) -> Option<&Grid> {
        (self.depth > PREVIOUS).then(|| &self.slots[self.roles[PREVIOUS]])
    }

    /// Two generations back, if this epoch has one.
    pub fn previous2(&self) -> Option<&Grid> {
        (self.depth > PREVIOUS2).then(|| &self.slots[self.roles[PREVIOUS2]])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Generations advanced since the last reseed or load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new epoch: clears the current grid, seeds it, forgets history.
    pub fn reseed<R: Rng + ?Sized>(
        &mut self,
        density: f64,
        palette: &ColorGenerator,
        rng: &mut R,
    ) {
        let slot = &mut self.slots[self.roles[CURRENT]];
        slot.clear();
        slot.seed(density, palette, rng);
        self.restart();
    }

    /// Starts a new epoch from a prepared pattern.
    pub fn load(&mut self, grid: &Grid) -> Result<()> {
        self.slots[self.roles[CURRENT]].copy_from(grid)?;
        self.restart();
        Ok(())
    }

    fn restart(&mut self) {
        self.depth = 1;
        self.generation = 0;
    }

    /// Computes the next generation and rotates the roles.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        engine: &TransitionEngine,
        mutation_probability: f64,
        rng: &mut R,
    ) -> Result<StepOutcome> {
        let [cur, prev, oldest] = self.roles;
        let (from, into) = split_pair(&mut self.slots, cur, oldest);
        let outcome = engine.step_into(from, into, mutation_probability, rng)?;
        self.roles = [oldest, cur, prev];
        self.depth = (self.depth + 1).min(3);
        self.generation += 1;
        Ok(outcome)
    }
}

fn split_pair(slots: &mut [Grid; 3], read: usize, write: usize) -> (&Grid, &mut Grid) {
    debug_assert_ne!(read, write);
    if read < write {
        let (lo, hi) = slots.split_at_mut(write);
        (&lo[read], &mut hi[0])
    } else {
        let (lo, hi) = slots.split_at_mut(read);
        (&hi[0], &mut lo[write])
    }
}

/// Long-run behaviour of the running epoch after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The grid stopped changing.
    Static,
    /// Period-2 repeat, still within tolerance. `count` detections so far.
    Oscillating { count: u32 },
    /// Period-2 repeat seen `count` times in a row; handled like `Static`.
    OscillationExhausted { count: u32 },
    /// Every cell is dead.
    Extinct,
    Live,
}

impl Verdict {
    /// Whether the epoch keeps iterating after this verdict.
    pub fn continues(&self) -> bool {
        matches!(self, Verdict::Live | Verdict::Oscillating { .. })
    }

    /// The sting that ends the epoch, if it ends.
    pub fn terminal_pattern(&self) -> Option<TerminalPattern> {
        match self {
            Verdict::Static | Verdict::OscillationExhausted { .. } => {
                Some(TerminalPattern::Stable)
            }
            Verdict::Extinct => Some(TerminalPattern::Extinct),
            Verdict::Live | Verdict::Oscillating { .. } => None,
        }
    }
}

/// Classifies the buffer and counts consecutive oscillation detections.
///
/// Order: an empty grid is `Extinct` before anything else (it trivially
/// equals an empty predecessor), then `Static`, then `Oscillating`, then
/// `Live`.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    tolerance: u32,
    count: u32,
}

impl CycleDetector {
    pub fn new(tolerance: u32) -> Self {
        Self {
            tolerance: tolerance.max(1),
            count: 0,
        }
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn classify(&mut self, buffer: &GenerationBuffer) -> Verdict {
        let g0 = buffer.current();

        if !g0.is_populated() {
            self.reset();
            return Verdict::Extinct;
        }

        if buffer.previous().is_some_and(|g1| g1 == g0) {
            self.reset();
            return Verdict::Static;
        }

        if buffer.previous2().is_some_and(|g2| g2 == g0) {
            self.count += 1;
            if self.count >= self.tolerance {
                let count = self.count;
                self.reset();
                return Verdict::OscillationExhausted { count };
            }
            return Verdict::Oscillating { count: self.count };
        }

        self.reset();
        Verdict::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberlife_data::Rgb;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn buffer_with(live: &[(i32, i32)]) -> GenerationBuffer {
        let mut buffer = GenerationBuffer::new(8, 8, CellMode::Binary).unwrap();
        let grid =
            Grid::with_live_cells(8, 8, CellMode::Binary, live, Rgb::new(200, 80, 20)).unwrap();
        buffer.load(&grid).unwrap();
        buffer
    }

    #[test]
    fn test_advance_rotates_roles() {
        let engine = TransitionEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut buffer = buffer_with(&[(2, 3), (3, 3), (4, 3)]);
        let start = buffer.current().clone();
        assert!(buffer.previous().is_none());

        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        assert_eq!(buffer.previous(), Some(&start));
        assert!(buffer.previous2().is_none());
        let second = buffer.current().clone();

        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        assert_eq!(buffer.previous(), Some(&second));
        assert_eq!(buffer.previous2(), Some(&start));
        assert_eq!(buffer.generation(), 2);
        assert_eq!(buffer.depth(), 3);
    }

    #[test]
    fn test_reseed_forgets_history() {
        let engine = TransitionEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut buffer = buffer_with(&[(2, 3), (3, 3), (4, 3)]);
        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        buffer.reseed(0.2, engine.palette(), &mut rng);
        assert_eq!(buffer.depth(), 1);
        assert_eq!(buffer.generation(), 0);
        assert!(buffer.previous().is_none());
    }

    #[test]
    fn test_fresh_epoch_is_live() {
        let mut detector = CycleDetector::new(6);
        let buffer = buffer_with(&[(3, 3), (4, 3), (3, 4), (4, 4)]);
        assert_eq!(detector.classify(&buffer), Verdict::Live);
    }

    #[test]
    fn test_still_life_is_static_after_one_tick() {
        let engine = TransitionEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut detector = CycleDetector::new(6);
        let mut buffer = buffer_with(&[(3, 3), (4, 3), (3, 4), (4, 4)]);
        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        assert_eq!(detector.classify(&buffer), Verdict::Static);
    }

    #[test]
    fn test_empty_grid_is_extinct_not_static() {
        let engine = TransitionEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut detector = CycleDetector::new(6);
        let mut buffer = buffer_with(&[]);
        assert_eq!(detector.classify(&buffer), Verdict::Extinct);
        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        assert_eq!(detector.classify(&buffer), Verdict::Extinct);
    }

    #[test]
    fn test_blinker_exhausts_tolerance() {
        let engine = TransitionEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tolerance = 4;
        let mut detector = CycleDetector::new(tolerance);
        let mut buffer = buffer_with(&[(2, 3), (3, 3), (4, 3)]);

        assert_eq!(detector.classify(&buffer), Verdict::Live);
        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        assert_eq!(detector.classify(&buffer), Verdict::Live);

        for count in 1..tolerance {
            buffer.advance(&engine, 0.0, &mut rng).unwrap();
            assert_eq!(detector.classify(&buffer), Verdict::Oscillating { count });
        }
        buffer.advance(&engine, 0.0, &mut rng).unwrap();
        assert_eq!(
            detector.classify(&buffer),
            Verdict::OscillationExhausted { count: tolerance }
        );
        assert_eq!(detector.count(), 0);
    }

    #[test]
    fn test_live_resets_oscillation_count() {
        let mut detector = CycleDetector::new(6);
        detector.count = 3;
        let buffer = buffer_with(&[(1, 1)]);
        assert_eq!(detector.classify(&buffer), Verdict::Live);
        assert_eq!(detector.count(), 0);
    }

    #[test]
    fn test_verdict_patterns() {
        assert_eq!(
            Verdict::Static.terminal_pattern(),
            Some(TerminalPattern::Stable)
        );
        assert_eq!(
            Verdict::OscillationExhausted { count: 6 }.terminal_pattern(),
            Some(TerminalPattern::Stable)
        );
        assert_eq!(
            Verdict::Extinct.terminal_pattern(),
            Some(TerminalPattern::Extinct)
        );
        assert!(Verdict::Oscillating { count: 2 }.continues());
        assert!(!Verdict::Extinct.continues());
    }
}
