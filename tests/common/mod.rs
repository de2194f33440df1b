pub mod macros;

use emberlife_lib::model::config::AppConfig;
use emberlife_lib::model::grid::Grid;
use emberlife_lib::model::io::{Clock, DisplaySink, InputSource};
use emberlife_lib::model::lifecycle::Lifecycle;
use emberlife_lib::model::patterns;
use emberlife_lib::model::sting::Frame;
use emberlife_lib::model::{Button, CellMode, Rgb};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::time::Duration;

#[allow(dead_code)]
pub const EMBER: Rgb = Rgb::new(200, 80, 20);

/// Builds a lifecycle on a small panel with spontaneous births off.
#[allow(dead_code)]
pub struct LifecycleBuilder {
    config: AppConfig,
    seed: u64,
}

#[allow(dead_code)]
impl LifecycleBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.grid.width = 8;
        config.grid.height = 8;
        config.seeding.mutation_divisor = 0.0;
        Self { config, seed: 42 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> Lifecycle<ChaCha8Rng> {
        Lifecycle::new(&self.config, ChaCha8Rng::seed_from_u64(self.seed))
            .expect("Failed to create lifecycle in test builder")
    }

    /// Builds and loads a named pattern as the first epoch.
    pub fn build_with_pattern(self, name: &str) -> Lifecycle<ChaCha8Rng> {
        let grid = pattern_grid(
            name,
            self.config.grid.width,
            self.config.grid.height,
            self.config.grid.mode,
        );
        let mut life = self.build();
        life.load_pattern(&grid, EMBER).expect("pattern fits");
        life
    }
}

#[allow(dead_code)]
pub fn pattern_grid(name: &str, width: u16, height: u16, mode: CellMode) -> Grid {
    patterns::find(name)
        .expect("known pattern")
        .place(width, height, mode, EMBER)
        .expect("valid grid")
}

/// Keeps every frame it is shown.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<Frame>,
}

impl DisplaySink for RecordingDisplay {
    fn show(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Presses buttons on chosen ticks (0-based, counted by reseed polls).
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedInput {
    tick: u64,
    presses: BTreeMap<u64, Vec<Button>>,
}

#[allow(dead_code)]
impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_at(mut self, tick: u64, button: Button) -> Self {
        self.presses.entry(tick).or_default().push(button);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, button: Button) -> bool {
        let pressed = self
            .presses
            .get(&self.tick)
            .is_some_and(|buttons| buttons.contains(&button));
        // Halt is polled last in every tick.
        if button == Button::Halt {
            self.tick += 1;
        }
        pressed
    }
}

/// Adds up every requested sleep instead of sleeping.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingClock {
    pub slept: Duration,
    pub sleeps: usize,
}

impl Clock for RecordingClock {
    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
        self.sleeps += 1;
    }
}
