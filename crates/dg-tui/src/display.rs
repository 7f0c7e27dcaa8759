//! Glyph system for TUI rendering
//!
//! Provides support for both classic ASCII and fancy Unicode block characters.

use dg_core::{CellState, ThemeId};
use ratatui::style::Color;
use strum::{Display, EnumString, VariantNames};

/// Available graphics modes for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum GraphicsMode {
    /// Classic ASCII characters.
    Classic,
    /// Fancy Unicode characters.
    Fancy,
    /// Automatically detect support.
    #[default]
    Auto,
}

impl GraphicsMode {
    /// Mode the `g` key switches to
    pub fn toggled(self) -> Self {
        match self {
            GraphicsMode::Classic => GraphicsMode::Fancy,
            GraphicsMode::Fancy | GraphicsMode::Auto => GraphicsMode::Classic,
        }
    }
}

/// Set of glyphs used for rendering layout cells.
pub trait GlyphSet: Send + Sync {
    /// Character for a cell painted with `theme`.
    fn cell_char(&self, state: CellState, theme: ThemeId) -> char;
}

/// Plain ASCII glyph set.
pub struct ClassicGlyphs;

impl GlyphSet for ClassicGlyphs {
    fn cell_char(&self, state: CellState, theme: ThemeId) -> char {
        match (state, theme) {
            (CellState::Floor, ThemeId::CORRIDOR_FLOOR) => ',',
            _ => state.symbol(),
        }
    }
}

/// Unicode glyph set.
pub struct FancyGlyphs;

impl GlyphSet for FancyGlyphs {
    fn cell_char(&self, state: CellState, theme: ThemeId) -> char {
        match (state, theme) {
            (CellState::Empty, _) => ' ',
            (CellState::Floor, ThemeId::CORRIDOR_FLOOR) => '░',
            (CellState::Floor, _) => '·',
            (CellState::Wall, _) => '█',
        }
    }
}

/// Colour for a theme id. The three built-in themes get fixed colours;
/// region themes cycle through a small palette.
pub fn theme_color(state: CellState, theme: ThemeId) -> Color {
    const PALETTE: [Color; 6] = [
        Color::Cyan,
        Color::Green,
        Color::Magenta,
        Color::Yellow,
        Color::LightBlue,
        Color::LightRed,
    ];
    match (state, theme) {
        (CellState::Empty, _) => Color::Reset,
        (_, ThemeId::ROOM_FLOOR) => Color::White,
        (_, ThemeId::CORRIDOR_FLOOR) => Color::DarkGray,
        (_, ThemeId::WALL) => Color::Gray,
        (_, ThemeId(n)) => PALETTE[usize::from(n) % PALETTE.len()],
    }
}

/// Detect if the terminal supports Unicode/UTF-8.
pub fn supports_unicode() -> bool {
    for var in ["LANG", "LC_ALL", "LC_CTYPE"] {
        if let Ok(val) = std::env::var(var) {
            let val = val.to_uppercase();
            if val.contains("UTF-8") || val.contains("UTF8") {
                return true;
            }
        }
    }

    matches!(
        std::env::var("TERM").as_deref(),
        Ok("xterm-256color" | "alacritty" | "kitty" | "iterm")
    )
}

/// Returns the best available glyph set for the current environment.
pub fn detect_glyph_set(mode: GraphicsMode) -> Box<dyn GlyphSet> {
    match mode {
        GraphicsMode::Classic => Box::new(ClassicGlyphs),
        GraphicsMode::Fancy => Box::new(FancyGlyphs),
        GraphicsMode::Auto => {
            if supports_unicode() {
                Box::new(FancyGlyphs)
            } else {
                Box::new(ClassicGlyphs)
            }
        }
    }
}
