//! # Emberlife
//!
//! A self-reseeding colour Game of Life for small LED-style panels. The
//! simulation lives in `emberlife_core`; this crate wires it to a terminal or
//! headless display, the keyboard, Ctrl-C and a `config.toml`.

pub mod app;
pub mod model;
pub mod ui;

pub use app::App;
