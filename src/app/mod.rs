pub mod shutdown;
pub mod state;

pub use shutdown::ShutdownManager;
pub use state::App;

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::model::io::{Clock, DisplaySink, InputSource};
use crate::model::metrics::RunStats;
use crate::model::Button;

/// Wraps an input source so a raised shutdown flag reads as a halt press.
pub struct HaltOnShutdown<I> {
    inner: I,
    flag: Arc<AtomicBool>,
}

impl<I: InputSource> HaltOnShutdown<I> {
    pub fn new(inner: I, flag: Arc<AtomicBool>) -> Self {
        Self { inner, flag }
    }
}

impl<I: InputSource> InputSource for HaltOnShutdown<I> {
    fn poll(&mut self, button: Button) -> bool {
        let pressed = self.inner.poll(button);
        match button {
            Button::Halt => pressed || self.flag.load(Ordering::SeqCst),
            Button::Reseed => pressed,
        }
    }
}

impl App {
    /// Ticks the lifecycle until it halts.
    ///
    /// A shutdown request reads as a halt press, so the goodbye pattern always
    /// plays before this returns.
    pub fn run<D, I, C>(&mut self, display: &mut D, input: I, clock: &mut C) -> Result<RunStats>
    where
        D: DisplaySink + ?Sized,
        I: InputSource,
        C: Clock + ?Sized,
    {
        let mut input = HaltOnShutdown::new(input, self.shutdown.flag());

        while !self.lifecycle.is_halted() {
            self.lifecycle.tick(display, &mut input, clock)?;
        }

        Ok(self.lifecycle.stats().clone())
    }
}
