pub use emberlife_core::{Button, Cell, CellMode, Rgb, TerminalPattern};
pub mod config {
    pub use emberlife_core::config::*;
}
pub mod grid {
    pub use emberlife_core::grid::*;
}
pub mod palette {
    pub use emberlife_core::palette::*;
}
pub mod transition {
    pub use emberlife_core::transition::*;
}
pub mod history {
    pub use emberlife_core::history::*;
}
pub mod lifecycle {
    pub use emberlife_core::lifecycle::*;
}
pub mod sting {
    pub use emberlife_core::sting::*;
}
pub mod io {
    pub use emberlife_core::io::*;
}
pub mod metrics {
    pub use emberlife_core::metrics::*;
}

pub mod patterns;
