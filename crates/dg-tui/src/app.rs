//! Main application state and UI logic

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use dg_core::{ConfigError, Coord, DungeonConfig, DungeonGenerator, GenerationResult, WallPolicy};

use crate::canvas::Canvas;
use crate::display::GraphicsMode;
use crate::input::{key_to_action, Action};
use crate::widgets::MapWidget;

/// Interactive layout preview
pub struct App {
    generator: DungeonGenerator,
    result: GenerationResult,
    canvas: Canvas,
    mode: GraphicsMode,
    scroll: Coord,
    /// Bumped by the generator after every completed run
    runs: Arc<AtomicU64>,
    should_quit: bool,
}

impl App {
    pub fn new(config: DungeonConfig, mode: GraphicsMode) -> Result<Self, ConfigError> {
        let mut generator = DungeonGenerator::new(config)?;
        let runs = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&runs);
        generator.subscribe(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let result = generator.generate();
        let mut canvas = Canvas::new(mode);
        result.paint_onto(&mut canvas);

        Ok(Self {
            generator,
            result,
            canvas,
            mode,
            scroll: Coord::ORIGIN,
            runs,
            should_quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn result(&self) -> &GenerationResult {
        &self.result
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &DungeonConfig {
        self.generator.config()
    }

    /// Completed runs so far, including the initial one
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    /// Handle a terminal event; returns the action it mapped to
    pub fn handle_event(&mut self, event: Event) -> Option<Action> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let action = key_to_action(key)?;
        self.apply(action);
        Some(action)
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Regenerate => {
                let seed = self.generator.config().seed.wrapping_add(1);
                self.regenerate(seed);
            }
            Action::Reroll => {
                let seed = self.generator.config().seed;
                self.regenerate(seed);
            }
            Action::ToggleWalls => {
                let mut config = self.generator.config().clone();
                config.wall_policy = match config.wall_policy {
                    WallPolicy::Directional => WallPolicy::Ring,
                    WallPolicy::Ring => WallPolicy::Directional,
                };
                let seed = config.seed;
                if let Err(e) = self.generator.set_config(config) {
                    log::warn!("keeping previous configuration: {e}");
                    return;
                }
                self.regenerate(seed);
            }
            Action::ToggleGraphics => {
                self.mode = self.mode.toggled();
                self.canvas.set_mode(self.mode);
                self.result.paint_onto(&mut self.canvas);
            }
            Action::Scroll(dx, dy) => {
                self.scroll = self.scroll + (dx, dy);
            }
            Action::Quit => self.should_quit = true,
        }
    }

    fn regenerate(&mut self, seed: u64) {
        self.result = self.generator.regenerate(seed);
        self.result.paint_onto(&mut self.canvas);
        self.scroll = Coord::ORIGIN;
        log::debug!("regenerated with seed {seed}");
    }

    /// One-line summary of the current layout
    pub fn status_line(&self) -> String {
        let config = self.generator.config();
        format!(
            "seed {} | rooms {}/{} | corridors {} ({} rejected) | walls {} | run #{}",
            self.result.seed,
            self.result.placed,
            config.room_count,
            self.result.corridors.len(),
            self.result.rejected_corridors,
            config.wall_policy,
            self.runs(),
        )
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        // Layout: map on top, status below
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(frame.area());

        let map = MapWidget::new(&self.canvas, self.scroll, "dungen");
        frame.render_widget(map, chunks[0]);

        let status = Paragraph::new(vec![
            Line::from(self.status_line()),
            Line::from("r: next seed  R: reroll  w: walls  g: glyphs  arrows: scroll  q: quit"),
        ])
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(status, chunks[1]);
    }
}
