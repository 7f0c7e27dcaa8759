//! dg-tui: terminal front end for dg-core
//!
//! Renders generated layouts to plain text or to an interactive ratatui
//! preview.

pub mod app;
pub mod canvas;
pub mod display;
pub mod input;
pub mod widgets;

pub use app::App;
pub use canvas::Canvas;
pub use display::GraphicsMode;
