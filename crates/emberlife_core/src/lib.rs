//! # Emberlife Core
//!
//! The simulation and lifecycle engine behind the emberlife panel: a small
//! toroidal Conway grid whose births carry warm colours, a three-generation
//! history that notices when the run has frozen, started repeating or died
//! out, and the state machine that turns those verdicts into reseeds.
//!
//! ## Example
//!
//! ```
//! use emberlife_core::config::AppConfig;
//! use emberlife_core::io::{NoInput, NoopClock};
//! use emberlife_core::lifecycle::{simulation_rng, Lifecycle};
//! use emberlife_core::sting::Frame;
//!
//! struct Discard;
//! impl emberlife_core::io::DisplaySink for Discard {
//!     fn show(&mut self, _frame: &Frame) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let config = AppConfig::default();
//! let mut life = Lifecycle::new(&config, simulation_rng(Some(42))).unwrap();
//! for _ in 0..10 {
//!     life.tick(&mut Discard, &mut NoInput, &mut NoopClock).unwrap();
//! }
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Error types
pub mod error;
/// Toroidal cell grid with wraparound neighbour counting
pub mod grid;
/// Generation buffer and cycle detection
pub mod history;
/// Display, input and clock boundary traits
pub mod io;
/// Seeding, iteration and reseed/halt state machine
pub mod lifecycle;
/// Run statistics and logging setup
pub mod metrics;
/// Birth colour generation
pub mod palette;
/// Terminal-pattern animations and pixel frames
pub mod sting;
/// Life rule with colour inheritance and spontaneous births
pub mod transition;

pub use emberlife_data::{Button, Cell, CellMode, Rgb, TerminalPattern};
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use history::{CycleDetector, GenerationBuffer, Verdict};
pub use lifecycle::{Lifecycle, RunState};
pub use metrics::{init_logging, RunStats};
pub use palette::ColorGenerator;
pub use transition::TransitionEngine;
