//! Run statistics and logging setup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::transition::StepOutcome;

/// Why an epoch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpochEnd {
    Stable,
    OscillationExhausted,
    Extinct,
    Nuked,
}

/// Counters for a whole process run, reported on exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub epochs: u64,
    pub generations: u64,
    pub births: u64,
    pub deaths: u64,
    pub spontaneous_births: u64,
    pub stable: u64,
    pub oscillation_exhausted: u64,
    pub extinct: u64,
    pub nuked: u64,
    pub longest_epoch: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_generation(&mut self, outcome: &StepOutcome) {
        self.generations += 1;
        self.births += outcome.births as u64;
        self.deaths += outcome.deaths as u64;
        self.spontaneous_births += outcome.spontaneous_births as u64;
    }

    /// Records a finished epoch that ran for `generations` transitions.
    pub fn record_epoch_end(&mut self, reason: EpochEnd, generations: u64) {
        self.epochs += 1;
        self.longest_epoch = self.longest_epoch.max(generations);
        match reason {
            EpochEnd::Stable => self.stable += 1,
            EpochEnd::OscillationExhausted => self.oscillation_exhausted += 1,
            EpochEnd::Extinct => self.extinct += 1,
            EpochEnd::Nuked => self.nuked += 1,
        }
        tracing::info!(
            epoch = self.epochs,
            generations = generations,
            reason = ?reason,
            "Epoch ended"
        );
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides `default_filter`. With a `log_file` the output is
/// appended there without colour codes, which keeps a full-screen terminal
/// display clean.
pub fn init_logging(default_filter: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init()
                .ok();
        }
        None => {
            builder.try_init().ok();
        }
    }
    Ok(())
}
