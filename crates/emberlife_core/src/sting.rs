//! Pixel frames and the short animations ("stings") played between epochs.
//!
//! A sting is plain data: a list of frames and pauses. Building one touches no
//! simulation state, and playing one is left to the lifecycle, which owns the
//! display and the clock.

use emberlife_data::{Rgb, TerminalPattern};
use std::time::Duration;

use crate::grid::Grid;

const STABLE_GREEN: Rgb = Rgb::new(5, 30, 2);
const NUKED_RED: Rgb = Rgb::new(80, 10, 5);

/// A width x height RGB pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    pixels: Vec<Rgb>,
}

impl Frame {
    pub fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
        }
    }

    pub fn filled(width: u16, height: u16, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// One pixel per cell: dead cells black, live cells their own colour or
    /// `alive_color` for binary cells.
    pub fn from_grid(grid: &Grid, alive_color: Rgb) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            pixels: grid.cells().iter().map(|c| c.pixel(alive_color)).collect(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel at `(x, y)`, `None` outside the frame.
    pub fn get(&self, x: u16, y: u16) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Sets a pixel; writes outside the frame are ignored.
    pub fn set(&mut self, x: u16, y: u16, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    pub fn fill_rows(&mut self, rows: std::ops::Range<u16>, color: Rgb) {
        for y in rows {
            for x in 0..self.width {
                self.set(x, y, color);
            }
        }
    }

    pub fn fill_column(&mut self, x: u16, color: Rgb) {
        for y in 0..self.height {
            self.set(x, y, color);
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StingStep {
    Show(Frame),
    Pause(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sting {
    pub pattern: TerminalPattern,
    pub steps: Vec<StingStep>,
}

impl Sting {
    /// Builds the animation for `pattern` on a `width` x `height` panel.
    ///
    /// Every sting opens with a blank frame and a quarter-step pause and
    /// closes with a five-step hold on its last frame.
    pub fn build(pattern: TerminalPattern, width: u16, height: u16, step: Duration) -> Self {
        let blank = Frame::blank(width, height);
        let mid_row = height / 2;
        let mut steps = vec![StingStep::Show(blank.clone()), StingStep::Pause(step / 4)];

        match pattern {
            TerminalPattern::Stable => {
                steps.push(StingStep::Show(Frame::filled(width, height, STABLE_GREEN)));
            }
            TerminalPattern::Nuked => {
                steps.push(StingStep::Show(Frame::filled(width, height, NUKED_RED)));
            }
            TerminalPattern::Extinct => {
                // A band that collapses towards the middle row.
                let mut wide = blank.clone();
                wide.fill_rows(1..height.saturating_sub(1), Rgb::grey(75));
                steps.push(StingStep::Show(wide));
                steps.push(StingStep::Pause(step * 2));
                steps.push(StingStep::Show(blank.clone()));

                let mut narrow = blank.clone();
                narrow.fill_rows(2..height.saturating_sub(2), Rgb::grey(50));
                steps.push(StingStep::Show(narrow));
                steps.push(StingStep::Pause(step * 2));
                steps.push(StingStep::Show(blank.clone()));

                let mut line = blank;
                line.fill_rows(mid_row..mid_row + 1, Rgb::grey(25));
                steps.push(StingStep::Show(line));
            }
            TerminalPattern::Goodbye => {
                let mut cross = blank;
                cross.fill_rows(mid_row..mid_row + 1, Rgb::grey(25));
                cross.fill_column(width / 2, Rgb::grey(25));
                steps.push(StingStep::Show(cross));
            }
        }

        steps.push(StingStep::Pause(step * 5));
        Self { pattern, steps }
    }

    pub fn total_pause(&self) -> Duration {
        self.steps
            .iter()
            .filter_map(|s| match s {
                StingStep::Pause(d) => Some(*d),
                StingStep::Show(_) => None,
            })
            .sum()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.steps.iter().rev().find_map(|s| match s {
            StingStep::Show(f) => Some(f),
            StingStep::Pause(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberlife_data::CellMode;

    const STEP: Duration = Duration::from_millis(100);

    #[test]
    fn test_frame_from_grid() {
        let grid = Grid::with_live_cells(3, 2, CellMode::Binary, &[(1, 1)], Rgb::BLACK).unwrap();
        let frame = Frame::from_grid(&grid, Rgb::new(200, 80, 20));
        assert_eq!(frame.get(1, 1), Some(Rgb::new(200, 80, 20)));
        assert_eq!(frame.get(0, 0), Some(Rgb::BLACK));
        assert_eq!(frame.get(3, 0), None);
    }

    #[test]
    fn test_stable_sting_timing() {
        let sting = Sting::build(TerminalPattern::Stable, 16, 7, STEP);
        assert_eq!(sting.total_pause(), Duration::from_millis(25 + 500));
        assert_eq!(
            sting.last_frame(),
            Some(&Frame::filled(16, 7, STABLE_GREEN))
        );
    }

    #[test]
    fn test_extinct_sting_collapses_to_middle_row() {
        let sting = Sting::build(TerminalPattern::Extinct, 16, 7, STEP);
        assert_eq!(sting.total_pause(), Duration::from_millis(25 + 200 + 200 + 500));
        let last = sting.last_frame().unwrap();
        assert_eq!(last.get(0, 3), Some(Rgb::grey(25)));
        assert_eq!(last.get(0, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn test_goodbye_is_a_cross() {
        let sting = Sting::build(TerminalPattern::Goodbye, 16, 7, STEP);
        let last = sting.last_frame().unwrap();
        assert_eq!(last.get(8, 0), Some(Rgb::grey(25)));
        assert_eq!(last.get(0, 3), Some(Rgb::grey(25)));
        assert_eq!(last.get(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_stings_survive_tiny_panels() {
        for pattern in [
            TerminalPattern::Stable,
            TerminalPattern::Extinct,
            TerminalPattern::Nuked,
            TerminalPattern::Goodbye,
        ] {
            let sting = Sting::build(pattern, 1, 1, STEP);
            assert!(sting.last_frame().is_some());
        }
    }
}
