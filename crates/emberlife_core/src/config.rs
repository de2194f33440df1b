//! Configuration management for simulation parameters.
//!
//! Strongly-typed structures that map to the `config.toml` file. Every
//! section has defaults, so a partial file only overrides what it names.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! rng_seed = 42
//! print_to_console = false
//!
//! [grid]
//! width = 16
//! height = 7
//! mode = "colored"
//!
//! [seeding]
//! density = 0.2
//! mutation_divisor = 20.0
//!
//! [palette]
//! base = [100, 20, 0]
//! ceiling = 220
//! luminance = 300
//!
//! [timing]
//! time_step_ms = 100
//!
//! [lifecycle]
//! oscillation_tolerance = 6
//! ```

use emberlife_data::CellMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Panel shape and cell representation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub width: u16,
    pub height: u16,
    pub mode: CellMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 7,
            mode: CellMode::Colored,
        }
    }
}

/// Seed density and the spontaneous-birth rate derived from it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SeedingConfig {
    /// Probability that a cell starts alive when the grid is reseeded.
    pub density: f64,
    /// `density / mutation_divisor` is the per-cell spontaneous birth chance.
    /// Zero turns spontaneous births off.
    pub mutation_divisor: f64,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            density: 0.2,
            mutation_divisor: 20.0,
        }
    }
}

impl SeedingConfig {
    #[must_use]
    pub fn mutation_probability(&self) -> f64 {
        if self.mutation_divisor > 0.0 {
            (self.density / self.mutation_divisor).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Birth colour generation. See [`crate::palette::ColorGenerator`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    /// Lower bound of the random draw for red, green and blue.
    pub base: [u8; 3],
    /// Upper bound of the random draw, shared by all channels.
    pub ceiling: u8,
    /// Target channel sum after rescaling.
    pub luminance: u32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            base: [100, 20, 0],
            ceiling: 220,
            luminance: 300,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay after each rendered generation; sting timings are multiples of it.
    pub time_step_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { time_step_ms: 100 }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn time_step(&self) -> Duration {
        Duration::from_millis(self.time_step_ms)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Consecutive period-2 detections tolerated before forcing a reseed.
    pub oscillation_tolerance: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            oscillation_tolerance: 6,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed RNG seed for reproducible runs; entropy when absent.
    pub rng_seed: Option<u64>,
    /// Log every rendered generation as a text grid.
    pub print_to_console: bool,
    pub grid: GridConfig,
    pub seeding: SeedingConfig,
    pub palette: PaletteConfig,
    pub timing: TimingConfig,
    pub lifecycle: LifecycleConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.grid.width > 0, "Grid width must be positive");
        anyhow::ensure!(self.grid.width <= 1000, "Grid width too large (max 1000)");
        anyhow::ensure!(self.grid.height > 0, "Grid height must be positive");
        anyhow::ensure!(
            self.grid.height <= 1000,
            "Grid height too large (max 1000)"
        );

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.seeding.density),
            "Seed density must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.seeding.mutation_divisor.is_finite() && self.seeding.mutation_divisor >= 0.0,
            "Mutation divisor must be finite and non-negative"
        );

        for (channel, base) in ["red", "green", "blue"].iter().zip(self.palette.base) {
            anyhow::ensure!(
                base <= self.palette.ceiling,
                "Palette {channel} base {base} exceeds ceiling {}",
                self.palette.ceiling
            );
        }
        anyhow::ensure!(
            self.palette.base.iter().any(|&b| b > 0),
            "Palette base must have at least one non-zero channel"
        );
        anyhow::ensure!(self.palette.luminance > 0, "Luminance must be positive");

        anyhow::ensure!(self.timing.time_step_ms > 0, "Time step must be positive");
        anyhow::ensure!(
            self.lifecycle.oscillation_tolerance >= 1,
            "Oscillation tolerance must be at least 1"
        );
        Ok(())
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }
}
