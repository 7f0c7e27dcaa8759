//! dungen: generate a room-and-corridor layout
//!
//! Prints the layout as text or JSON, or opens an interactive preview.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use dg_core::{
    generate, DungeonConfig, LinkStrategy, PlacementBounds, RegionConfig, SizeRange,
    StartPlacement, WallPolicy,
};
use dg_tui::{App, Canvas, GraphicsMode};

/// Seeded dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate a room-and-corridor dungeon layout", long_about = None)]
struct Args {
    /// JSON configuration file; flags below override its fields
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Rooms to request, including the start room
    #[arg(short = 'n', long = "rooms")]
    rooms: Option<u32>,

    /// Width of the placement area
    #[arg(long = "width")]
    width: Option<i32>,

    /// Height of the placement area
    #[arg(long = "height")]
    height: Option<i32>,

    /// Smallest room side
    #[arg(long = "min-size")]
    min_size: Option<i32>,

    /// Largest room side
    #[arg(long = "max-size")]
    max_size: Option<i32>,

    /// Initial padding kept between rooms
    #[arg(long = "padding")]
    padding: Option<i32>,

    /// Placement attempts per room
    #[arg(long = "attempts")]
    attempts: Option<u32>,

    /// Corridor width in cells
    #[arg(long = "corridor-width")]
    corridor_width: Option<i32>,

    /// Wall policy (directional, ring)
    #[arg(long = "walls")]
    walls: Option<WallPolicy>,

    /// Link strategy (nearest, random)
    #[arg(long = "link")]
    link: Option<LinkStrategy>,

    /// Start room placement (fixed, random)
    #[arg(long = "start")]
    start: Option<StartPlacement>,

    /// Extra random corridors after placement
    #[arg(long = "extra")]
    extra: Option<u32>,

    /// Enable theme regions with default settings
    #[arg(long = "regions")]
    regions: bool,

    /// Print the full result as JSON
    #[arg(long = "json")]
    json: bool,

    /// Open the interactive preview
    #[arg(long = "tui")]
    tui: bool,

    /// Glyph set (classic, fancy, auto)
    #[arg(short = 'g', long = "graphics", default_value = "auto")]
    graphics: GraphicsMode,

    /// Verbose logging (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Configuration file (or defaults) with command-line overrides applied
    fn load_config(&self) -> Result<DungeonConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => DungeonConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rooms) = self.rooms {
            config.room_count = rooms;
        }
        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.bounds.width());
            let height = self.height.unwrap_or(config.bounds.height());
            config.bounds = PlacementBounds::new(
                config.bounds.min,
                config.bounds.min + (width, height),
            );
        }
        config.room_size = SizeRange::new(
            self.min_size.unwrap_or(config.room_size.min),
            self.max_size.unwrap_or(config.room_size.max),
        );
        if let Some(padding) = self.padding {
            config.room_padding = padding;
        }
        if let Some(attempts) = self.attempts {
            config.max_attempts = attempts;
        }
        if let Some(width) = self.corridor_width {
            config.corridor_width = width;
        }
        if let Some(walls) = self.walls {
            config.wall_policy = walls;
        }
        if let Some(link) = self.link {
            config.link = link;
        }
        if let Some(start) = self.start {
            config.start_placement = start;
        }
        if let Some(extra) = self.extra {
            config.extra_corridors = extra;
        }
        if self.regions && config.regions.is_none() {
            config.regions = Some(RegionConfig::default());
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = args.load_config()?;

    if args.tui {
        return run_tui(config, args.graphics);
    }

    let result = generate(&config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let mut canvas = Canvas::new(args.graphics);
        result.paint_onto(&mut canvas);
        for line in canvas.lines() {
            println!("{line}");
        }
        println!(
            "seed {}: {} rooms ({} failed), {} corridors",
            result.seed,
            result.placed,
            result.failed,
            result.corridors.len()
        );
    }
    Ok(())
}

fn run_tui(config: DungeonConfig, mode: GraphicsMode) -> Result<()> {
    let mut app = App::new(config, mode)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
            if app.should_quit() {
                return Ok(());
            }
        }
    }
}
