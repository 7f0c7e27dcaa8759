//! Map display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use dg_core::Coord;

use crate::canvas::Canvas;

/// Widget for rendering a painted layout, centered on its bounding box
pub struct MapWidget<'a> {
    canvas: &'a Canvas,
    scroll: Coord,
    title: &'a str,
}

impl<'a> MapWidget<'a> {
    pub fn new(canvas: &'a Canvas, scroll: Coord, title: &'a str) -> Self {
        Self {
            canvas,
            scroll,
            title,
        }
    }

    /// World coordinate shown in the top-left cell of a `width × height` view
    pub fn top_left(&self, width: u16, height: u16) -> Coord {
        let center = self
            .canvas
            .bounds()
            .map_or(Coord::ORIGIN, |b| b.center());
        Coord::new(
            center.x + self.scroll.x - i32::from(width) / 2,
            center.y + self.scroll.y + i32::from(height) / 2,
        )
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(self.title);

        let inner = block.inner(area);
        block.render(area, buf);

        let origin = self.top_left(inner.width, inner.height);
        for row in 0..inner.height {
            for col in 0..inner.width {
                let at = Coord::new(origin.x + i32::from(col), origin.y - i32::from(row));
                let Some(glyph) = self.canvas.get(at) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut(Position::new(inner.x + col, inner.y + row)) {
                    cell.set_char(glyph.ch);
                    cell.set_style(Style::default().fg(glyph.color));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::GraphicsMode;
    use dg_core::{GridPainter, ThemeId};

    #[test]
    fn test_single_cell_lands_in_the_middle() {
        let mut canvas = Canvas::new(GraphicsMode::Classic);
        canvas.set_floor(Coord::new(40, -3), ThemeId::ROOM_FLOOR);

        let area = Rect::new(0, 0, 12, 8);
        let mut buf = Buffer::empty(area);
        MapWidget::new(&canvas, Coord::ORIGIN, "map").render(area, &mut buf);

        // Inner area is 10 × 6 starting at (1, 1)
        let hit = buf.cell(Position::new(1 + 5, 1 + 3)).map(|c| c.symbol().to_string());
        assert_eq!(hit.as_deref(), Some("."));
    }
}
