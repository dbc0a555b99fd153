//! Terminal card table (default binary).
//!
//! Runs the demo session on the real terminal. Stdout is the alternate screen,
//! so logs go to the file named by `CARD_TABLE_LOG_PATH` (none when unset).

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use card_table::config::TableConfig;
use card_table::demo::DemoSession;
use card_table::input::map_key;
use card_table::term::{CanvasSize, TerminalSurface};

fn main() -> Result<()> {
    let config = TableConfig::from_env();
    if let Some(path) = &config.log_path {
        initialize_logging(path, config.log_level)?;
    }

    // Screen size is read once; the layout does not follow resizes.
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let canvas = CanvasSize::from_terminal(cols, rows);
    info!(cols, rows, seed = config.seed, "table opened");

    let mut surface = TerminalSurface::new(canvas);
    surface.enter()?;

    let result = run(&mut surface, canvas, &config);

    // Always try to restore terminal state.
    let _ = surface.exit();
    result
}

fn run(surface: &mut TerminalSurface, canvas: CanvasSize, config: &TableConfig) -> Result<()> {
    let mut session = DemoSession::new(surface, canvas, config);

    while !session.is_finished() {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(cmd) = map_key(key, session.state()) {
                session.handle(cmd);
            }
        }
    }
    Ok(())
}

fn initialize_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}
