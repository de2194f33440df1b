pub mod console;

pub use console::ConsoleDisplay;
pub use emberlife_tui as tui;
