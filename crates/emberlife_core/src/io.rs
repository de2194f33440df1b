//! Boundary contracts with the outside world: a pixel display, two buttons,
//! and a clock. Randomness comes in through `rand::Rng`.

use emberlife_data::{Button, Rgb};
use std::time::Duration;

use crate::grid::Grid;
use crate::sting::Frame;

/// Something that can show a full frame of pixels.
pub trait DisplaySink {
    fn show(&mut self, frame: &Frame) -> anyhow::Result<()>;

    /// Draws a generation: dead cells black, live cells in their own colour
    /// (or `alive_color` for binary cells).
    fn render(&mut self, grid: &Grid, alive_color: Rgb) -> anyhow::Result<()> {
        self.show(&Frame::from_grid(grid, alive_color))
    }
}

/// Non-blocking button state.
pub trait InputSource {
    fn poll(&mut self, button: Button) -> bool;
}

/// Blocking pacing delay.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Returns immediately; for headless fast runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopClock;

impl Clock for NoopClock {
    fn sleep(&mut self, _duration: Duration) {}
}

/// Input that never reports a press.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _button: Button) -> bool {
        false
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn show(&mut self, frame: &Frame) -> anyhow::Result<()> {
        (**self).show(frame)
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll(&mut self, button: Button) -> bool {
        (**self).poll(button)
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}
