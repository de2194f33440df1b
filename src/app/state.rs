use anyhow::{Context, Result};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

use crate::app::ShutdownManager;
use crate::model::config::AppConfig;
use crate::model::lifecycle::{simulation_rng, Lifecycle};
use crate::model::patterns;
use crate::model::Rgb;

pub struct App {
    pub config: AppConfig,
    pub lifecycle: Lifecycle<ChaCha8Rng>,
    pub shutdown: ShutdownManager,
}

impl App {
    /// Reads `path`, falling back to defaults when it is missing or invalid.
    ///
    /// A missing file is created with the defaults so there is something to edit.
    pub fn load_config(path: &Path) -> AppConfig {
        match std::fs::read_to_string(path) {
            Ok(content) => match AppConfig::from_toml(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load {}: {e:#}", path.display());
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let default = AppConfig::default();
                match default.to_toml() {
                    Ok(toml_str) => {
                        if let Err(e) = std::fs::write(path, toml_str) {
                            tracing::warn!("Could not write default {}: {e}", path.display());
                        }
                    }
                    Err(e) => tracing::warn!("Could not serialise default config: {e:#}"),
                }
                return default;
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", path.display());
            }
        }
        AppConfig::default()
    }

    pub fn new(config: AppConfig) -> Result<Self> {
        let rng = simulation_rng(config.rng_seed);
        let lifecycle = Lifecycle::new(&config, rng).context("building simulation")?;
        tracing::info!(
            width = config.grid.width,
            height = config.grid.height,
            mode = ?config.grid.mode,
            seed = ?config.rng_seed,
            "Simulation ready"
        );

        Ok(Self {
            config,
            lifecycle,
            shutdown: ShutdownManager::new(),
        })
    }

    /// Halt after this many finished epochs.
    pub fn with_epoch_limit(mut self, limit: Option<u64>) -> Self {
        self.lifecycle.set_epoch_limit(limit);
        self
    }

    /// Starts the first epoch from a named pattern instead of a random seed.
    pub fn start_with_pattern(&mut self, name: &str) -> Result<()> {
        let pattern = patterns::find(name)
            .with_context(|| format!("unknown pattern '{name}'"))?;
        let color = Rgb::new(200, 80, 20);
        let grid = pattern.place(
            self.config.grid.width,
            self.config.grid.height,
            self.config.grid.mode,
            color,
        )?;
        self.lifecycle.load_pattern(&grid, color)?;
        tracing::info!(pattern = pattern.name, "Starting from pattern");
        Ok(())
    }
}
