//! # Emberlife Data
//!
//! Plain data types shared by the simulation core, the terminal front-end and
//! the application crate. Nothing in here owns behaviour beyond small
//! constructors; the rules live in `emberlife_core`.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple as written to a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value on every channel, like a single-intensity LED write.
    pub const fn grey(value: u8) -> Self {
        Self::new(value, value, value)
    }

    pub fn channel_sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Which cell representation a grid carries.
///
/// `Binary` cells only know whether they are alive; the display paints every
/// live cell with one palette colour chosen at seed time. `Colored` cells carry
/// their own colour, inherited from their parents at birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellMode {
    Binary,
    #[default]
    Colored,
}

/// One grid cell.
///
/// Dead cells never carry a colour. Binary live cells carry `None`, colored
/// live cells carry `Some(colour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub alive: bool,
    pub color: Option<Rgb>,
}

impl Cell {
    pub const DEAD: Cell = Cell {
        alive: false,
        color: None,
    };

    /// A live binary cell.
    pub const LIVE: Cell = Cell {
        alive: true,
        color: None,
    };

    pub const fn colored(color: Rgb) -> Self {
        Self {
            alive: true,
            color: Some(color),
        }
    }

    /// A live cell for the given mode. Binary cells drop the colour.
    pub fn born(mode: CellMode, color: Rgb) -> Self {
        match mode {
            CellMode::Binary => Self::LIVE,
            CellMode::Colored => Self::colored(color),
        }
    }

    /// Colour this cell shows on a pixel. Dead cells are black.
    pub fn pixel(&self, binary_color: Rgb) -> Rgb {
        match (self.alive, self.color) {
            (false, _) => Rgb::BLACK,
            (true, Some(c)) => c,
            (true, None) => binary_color,
        }
    }
}

/// The short non-interactive animations shown between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalPattern {
    /// The grid froze, or oscillated for too long.
    Stable,
    /// Every cell died.
    Extinct,
    /// The user asked for a reseed.
    Nuked,
    /// The user asked to stop.
    Goodbye,
}

impl TerminalPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalPattern::Stable => "stable",
            TerminalPattern::Extinct => "extinct",
            TerminalPattern::Nuked => "nuked",
            TerminalPattern::Goodbye => "goodbye",
        }
    }
}

impl std::fmt::Display for TerminalPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical buttons polled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Reseed,
    Halt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_cell_is_black() {
        assert_eq!(Cell::DEAD.pixel(Rgb::new(9, 9, 9)), Rgb::BLACK);
    }

    #[test]
    fn test_binary_cell_uses_palette() {
        let c = Cell::born(CellMode::Binary, Rgb::new(1, 2, 3));
        assert_eq!(c, Cell::LIVE);
        assert_eq!(c.pixel(Rgb::new(200, 40, 0)), Rgb::new(200, 40, 0));
    }

    #[test]
    fn test_colored_cell_keeps_own_color() {
        let c = Cell::born(CellMode::Colored, Rgb::new(1, 2, 3));
        assert_eq!(c.pixel(Rgb::new(200, 40, 0)), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_cell_mode_serde_lowercase() {
        let json = serde_json::to_string(&CellMode::Binary).unwrap();
        assert_eq!(json, "\"binary\"");
    }
}
