//! Glyph canvas
//!
//! A [`GridPainter`] that resolves every painted cell to a character and a
//! colour straight away. Both the stdout printer and the map widget read
//! from it.

use std::collections::BTreeMap;

use dg_core::{CellState, Coord, GridPainter, Room, ThemeId};
use ratatui::style::Color;

use crate::display::{detect_glyph_set, theme_color, GlyphSet, GraphicsMode};

/// One resolved cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub state: CellState,
    pub ch: char,
    pub color: Color,
}

pub struct Canvas {
    glyphs: Box<dyn GlyphSet>,
    cells: BTreeMap<Coord, Glyph>,
}

impl Canvas {
    pub fn new(mode: GraphicsMode) -> Self {
        Self {
            glyphs: detect_glyph_set(mode),
            cells: BTreeMap::new(),
        }
    }

    /// Change glyph set; takes effect on the next paint
    pub fn set_mode(&mut self, mode: GraphicsMode) {
        self.glyphs = detect_glyph_set(mode);
    }

    pub fn get(&self, at: Coord) -> Option<&Glyph> {
        self.cells.get(&at)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Smallest rectangle covering every painted cell
    pub fn bounds(&self) -> Option<Room> {
        let mut keys = self.cells.keys();
        let first = *keys.next()?;
        let (mut lx, mut ly, mut hx, mut hy) = (first.x, first.y, first.x, first.y);
        for c in keys {
            lx = lx.min(c.x);
            ly = ly.min(c.y);
            hx = hx.max(c.x);
            hy = hy.max(c.y);
        }
        Some(Room::new(lx, ly, hx - lx + 1, hy - ly + 1))
    }

    /// Rows of text, highest y first, trailing blanks trimmed
    pub fn lines(&self) -> Vec<String> {
        let Some(bounds) = self.bounds() else {
            return Vec::new();
        };
        (bounds.y..bounds.y_max())
            .rev()
            .map(|y| {
                let row: String = (bounds.x..bounds.x_max())
                    .map(|x| self.get(Coord::new(x, y)).map_or(' ', |g| g.ch))
                    .collect();
                row.trim_end().to_string()
            })
            .collect()
    }

    fn paint(&mut self, at: Coord, state: CellState, theme: ThemeId) {
        let glyph = Glyph {
            state,
            ch: self.glyphs.cell_char(state, theme),
            color: theme_color(state, theme),
        };
        self.cells.insert(at, glyph);
    }

    fn state(&self, at: Coord) -> CellState {
        self.get(at).map_or(CellState::Empty, |g| g.state)
    }
}

impl GridPainter for Canvas {
    fn set_floor(&mut self, at: Coord, theme: ThemeId) {
        self.paint(at, CellState::Floor, theme);
    }

    fn set_wall(&mut self, at: Coord, theme: ThemeId) {
        self.paint(at, CellState::Wall, theme);
    }

    fn has_floor(&self, at: Coord) -> bool {
        self.state(at) == CellState::Floor
    }

    fn has_wall(&self, at: Coord) -> bool {
        self.state(at) == CellState::Wall
    }

    fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::{generate, DungeonConfig};

    #[test]
    fn test_classic_canvas_matches_grid_dump() {
        let result = generate(&DungeonConfig::default().with_seed(6)).unwrap();
        let mut canvas = Canvas::new(GraphicsMode::Classic);
        result.paint_onto(&mut canvas);

        assert_eq!(canvas.len(), result.grid.floor_count() + result.grid.wall_count());
        assert_eq!(canvas.bounds(), result.grid.bounds());
        // Corridor floor gets its own glyph; the core dump does not
        let dump: Vec<String> = result.grid.render_ascii().lines().map(str::to_string).collect();
        let ours: Vec<String> = canvas.lines().iter().map(|l| l.replace(',', ".")).collect();
        assert_eq!(ours, dump);
    }

    #[test]
    fn test_clear_and_repaint() {
        let mut canvas = Canvas::new(GraphicsMode::Fancy);
        canvas.set_floor(Coord::ORIGIN, ThemeId::ROOM_FLOOR);
        canvas.set_wall(Coord::new(0, 1), ThemeId::WALL);
        assert!(canvas.has_floor(Coord::ORIGIN));
        assert!(canvas.has_wall(Coord::new(0, 1)));
        assert_eq!(canvas.get(Coord::new(0, 1)).map(|g| g.ch), Some('█'));
        canvas.clear();
        assert!(canvas.is_empty());
        assert!(canvas.bounds().is_none());
    }
}
