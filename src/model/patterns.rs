//! Named starting patterns for demos and tests.

use emberlife_core::{CellMode, Grid, Rgb};

pub struct Pattern {
    pub name: &'static str,
    /// Live cells as `(x, y)` offsets from the pattern's top-left corner.
    pub cells: &'static [(i32, i32)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "beehive",
        cells: &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    pub fn extent(&self) -> (i32, i32) {
        let w = self.cells.iter().map(|&(x, _)| x).max().unwrap_or(0) + 1;
        let h = self.cells.iter().map(|&(_, y)| y).max().unwrap_or(0) + 1;
        (w, h)
    }

    /// Places the pattern centred on an otherwise dead grid.
    pub fn place(
        &self,
        width: u16,
        height: u16,
        mode: CellMode,
        color: Rgb,
    ) -> emberlife_core::Result<Grid> {
        let (pw, ph) = self.extent();
        let ox = (width as i32 - pw) / 2;
        let oy = (height as i32 - ph) / 2;
        let cells: Vec<(i32, i32)> = self.cells.iter().map(|&(x, y)| (x + ox, y + oy)).collect();
        Grid::with_live_cells(width, height, mode, &cells, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert!(find("Glider").is_some());
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_place_centres_block() {
        let block = find("block").unwrap();
        let grid = block.place(8, 8, CellMode::Binary, Rgb::BLACK).unwrap();
        assert_eq!(grid.population(), 4);
        assert!(grid.is_alive(3, 3));
        assert!(grid.is_alive(4, 4));
    }

    #[test]
    fn test_place_rejects_empty_panel() {
        let block = find("block").unwrap();
        assert!(block.place(0, 8, CellMode::Binary, Rgb::BLACK).is_err());
    }
}
