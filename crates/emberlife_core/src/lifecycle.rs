//! The self-reseeding run loop.
//!
//! ```text
//! Seeding ──> Iterating <──> OscillationCounting(n)
//!                 │
//!                 ├─ static / oscillation exhausted ─> DisplayingTerminalPattern(stable)  ─> Seeding
//!                 ├─ extinct ───────────────────────-> DisplayingTerminalPattern(extinct) ─> Seeding
//!                 ├─ reseed button ─────────────────-> DisplayingTerminalPattern(nuked)   ─> Seeding
//!                 └─ halt button / epoch limit ─────-> DisplayingTerminalPattern(goodbye) ─> Halted
//! ```
//!
//! One call to [`Lifecycle::tick`] seeds if needed, renders the current
//! generation, waits one time step, classifies, acts on the verdict and then
//! polls the two buttons. Buttons are only looked at there, so a sting or a
//! transition that is already under way always finishes first.

use emberlife_data::{Button, CellMode, Rgb, TerminalPattern};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{LifeError, Result};
use crate::grid::Grid;
use crate::history::{CycleDetector, GenerationBuffer, Verdict};
use crate::io::{Clock, DisplaySink, InputSource};
use crate::metrics::{EpochEnd, RunStats};
use crate::palette::ColorGenerator;
use crate::sting::{Sting, StingStep};
use crate::transition::TransitionEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Seeding,
    Iterating,
    /// Iterating while a period-2 repeat has been seen `n` times in a row.
    OscillationCounting(u32),
    DisplayingTerminalPattern(TerminalPattern),
    Halted,
}

impl RunState {
    pub fn is_running_epoch(&self) -> bool {
        matches!(self, RunState::Iterating | RunState::OscillationCounting(_))
    }
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Generation index (within the epoch) that was rendered.
    pub generation: u64,
    pub verdict: Option<Verdict>,
    /// Stings played during the tick, in order.
    pub stings: Vec<TerminalPattern>,
    pub state: RunState,
}

/// Simulation RNG: reproducible with a seed, entropy-backed otherwise.
pub fn simulation_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub struct Lifecycle<R: Rng> {
    buffer: GenerationBuffer,
    detector: CycleDetector,
    engine: TransitionEngine,
    rng: R,
    state: RunState,
    /// Colour of every live binary cell for the running epoch.
    alive_color: Rgb,
    density: f64,
    mutation_probability: f64,
    time_step: Duration,
    print_to_console: bool,
    /// Halt once this many epochs have finished.
    epoch_limit: Option<u64>,
    stats: RunStats,
}

impl<R: Rng> Lifecycle<R> {
    /// Validates `config` and allocates the three generation slots.
    pub fn new(config: &AppConfig, rng: R) -> Result<Self> {
        config
            .validate()
            .map_err(|e| LifeError::config(e.to_string()))?;
        let buffer = GenerationBuffer::new(config.grid.width, config.grid.height, config.grid.mode)?;
        let palette = ColorGenerator::new(&config.palette);

        Ok(Self {
            buffer,
            detector: CycleDetector::new(config.lifecycle.oscillation_tolerance),
            engine: TransitionEngine::new(palette),
            rng,
            state: RunState::Seeding,
            alive_color: Rgb::BLACK,
            density: config.seeding.density,
            mutation_probability: config.seeding.mutation_probability(),
            time_step: config.timing.time_step(),
            print_to_console: config.print_to_console,
            epoch_limit: None,
            stats: RunStats::new(),
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == RunState::Halted
    }

    pub fn buffer(&self) -> &GenerationBuffer {
        &self.buffer
    }

    pub fn current(&self) -> &Grid {
        self.buffer.current()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn oscillation_count(&self) -> u32 {
        self.detector.count()
    }

    pub fn alive_color(&self) -> Rgb {
        self.alive_color
    }

    pub fn set_epoch_limit(&mut self, limit: Option<u64>) {
        self.epoch_limit = limit;
    }

    pub fn epoch_limit(&self) -> Option<u64> {
        self.epoch_limit
    }

    fn epoch_limit_reached(&self) -> bool {
        self.epoch_limit
            .is_some_and(|limit| self.stats.epochs >= limit)
    }

    /// Clears and reseeds the grid and starts a fresh epoch.
    pub fn seed(&mut self) {
        self.buffer
            .reseed(self.density, self.engine.palette(), &mut self.rng);
        if self.buffer.current().mode() == CellMode::Binary {
            self.alive_color = self.engine.palette().generate(&mut self.rng);
        }
        self.detector.reset();
        self.state = RunState::Iterating;
        tracing::debug!(
            population = self.buffer.current().population(),
            "Seeded new epoch"
        );
    }

    /// Starts a fresh epoch from a prepared grid instead of a random seed.
    pub fn load_pattern(&mut self, grid: &Grid, alive_color: Rgb) -> Result<()> {
        self.buffer.load(grid)?;
        self.alive_color = alive_color;
        self.detector.reset();
        self.state = RunState::Iterating;
        Ok(())
    }

    pub fn tick<D, I, C>(
        &mut self,
        display: &mut D,
        input: &mut I,
        clock: &mut C,
    ) -> anyhow::Result<TickReport>
    where
        D: DisplaySink + ?Sized,
        I: InputSource + ?Sized,
        C: Clock + ?Sized,
    {
        if self.is_halted() {
            return Ok(TickReport {
                generation: self.buffer.generation(),
                verdict: None,
                stings: Vec::new(),
                state: self.state,
            });
        }
        if self.epoch_limit_reached() {
            tracing::info!(epochs = self.stats.epochs, "Epoch limit reached");
            self.halt(display, clock)?;
            return Ok(TickReport {
                generation: self.buffer.generation(),
                verdict: None,
                stings: vec![TerminalPattern::Goodbye],
                state: self.state,
            });
        }
        if self.state == RunState::Seeding {
            self.seed();
        }

        let generation = self.buffer.generation();
        display.render(self.buffer.current(), self.alive_color)?;
        if self.print_to_console {
            tracing::info!(generation, "\n{}", self.buffer.current());
        }
        clock.sleep(self.time_step);

        let mut stings = Vec::new();
        let verdict = self.detector.classify(&self.buffer);
        tracing::debug!(
            generation,
            population = self.buffer.current().population(),
            verdict = ?verdict,
            "Classified generation"
        );

        match verdict {
            Verdict::Live | Verdict::Oscillating { .. } => {
                let outcome =
                    self.buffer
                        .advance(&self.engine, self.mutation_probability, &mut self.rng)?;
                self.stats.record_generation(&outcome);
                self.state = match verdict {
                    Verdict::Oscillating { count } => RunState::OscillationCounting(count),
                    _ => RunState::Iterating,
                };
            }
            Verdict::Static => {
                // Linger on the frozen frame before the sting.
                clock.sleep(self.time_step * 2);
                self.end_epoch(EpochEnd::Stable);
                self.play(TerminalPattern::Stable, display, clock)?;
                stings.push(TerminalPattern::Stable);
                self.state = RunState::Seeding;
            }
            Verdict::OscillationExhausted { .. } => {
                self.end_epoch(EpochEnd::OscillationExhausted);
                self.play(TerminalPattern::Stable, display, clock)?;
                stings.push(TerminalPattern::Stable);
                self.state = RunState::Seeding;
            }
            Verdict::Extinct => {
                self.end_epoch(EpochEnd::Extinct);
                self.play(TerminalPattern::Extinct, display, clock)?;
                stings.push(TerminalPattern::Extinct);
                self.state = RunState::Seeding;
            }
        }

        if input.poll(Button::Reseed) {
            if self.state.is_running_epoch() {
                self.end_epoch(EpochEnd::Nuked);
            }
            self.play(TerminalPattern::Nuked, display, clock)?;
            stings.push(TerminalPattern::Nuked);
            self.state = RunState::Seeding;
        }

        if input.poll(Button::Halt) {
            self.halt(display, clock)?;
            stings.push(TerminalPattern::Goodbye);
        }

        Ok(TickReport {
            generation,
            verdict: Some(verdict),
            stings,
            state: self.state,
        })
    }

    /// Ticks until halted and returns the run statistics.
    pub fn run<D, I, C>(
        &mut self,
        display: &mut D,
        input: &mut I,
        clock: &mut C,
    ) -> anyhow::Result<RunStats>
    where
        D: DisplaySink + ?Sized,
        I: InputSource + ?Sized,
        C: Clock + ?Sized,
    {
        while !self.is_halted() {
            self.tick(display, input, clock)?;
        }
        Ok(self.stats.clone())
    }

    fn end_epoch(&mut self, reason: EpochEnd) {
        self.stats
            .record_epoch_end(reason, self.buffer.generation());
        self.detector.reset();
    }

    fn halt<D, C>(&mut self, display: &mut D, clock: &mut C) -> anyhow::Result<()>
    where
        D: DisplaySink + ?Sized,
        C: Clock + ?Sized,
    {
        self.play(TerminalPattern::Goodbye, display, clock)?;
        self.state = RunState::Halted;
        tracing::info!(epochs = self.stats.epochs, "Halted");
        Ok(())
    }

    fn play<D, C>(
        &mut self,
        pattern: TerminalPattern,
        display: &mut D,
        clock: &mut C,
    ) -> anyhow::Result<()>
    where
        D: DisplaySink + ?Sized,
        C: Clock + ?Sized,
    {
        self.state = RunState::DisplayingTerminalPattern(pattern);
        let (width, height) = self.buffer.current().dimensions();
        let sting = Sting::build(pattern, width, height, self.time_step);
        for step in &sting.steps {
            match step {
                StingStep::Show(frame) => display.show(frame)?,
                StingStep::Pause(d) => clock.sleep(*d),
            }
        }
        Ok(())
    }
}
