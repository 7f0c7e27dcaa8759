//! Custom widgets for the TUI

mod map;

pub use map::MapWidget;
