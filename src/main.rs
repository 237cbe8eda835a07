//! Terminal pairs runner (default binary).
//!
//! crossterm for input, plain text lines for output. Progress is saved to a
//! JSON file after every score change.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_pairs::config::{parse_boot_args, AppConfig, BootArgs};
use tui_pairs::core::{BootOutcome, GameSession};
use tui_pairs::input::{handle_key_event, should_quit, GridCursor};
use tui_pairs::store::FileStore;
use tui_pairs::term::{CursorView, GameView, TerminalRenderer};
use tui_pairs::types::{GameEvent, Phase, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let boot_args = parse_boot_args(&args)?;
    let config = AppConfig::from_env().with_args(&boot_args);

    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &boot_args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `path`. The terminal belongs to the game, so nothing goes to stderr.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, args: &BootArgs) -> Result<()> {
    let store = FileStore::new(&config.save_path);
    let mut session = GameSession::new(config.game.clone(), Box::new(store), config.seed);

    let mut status = match session.boot(args.mode) {
        BootOutcome::Loaded => "Loaded saved game.".to_string(),
        BootOutcome::Fresh => String::new(),
    };
    info!(mode = ?args.mode, save = %config.save_path.display(), "session started");

    let view = GameView::default();
    let mut cursor = GridCursor::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        drain_events(&mut session, &mut cursor, &mut status);

        // Render.
        let lines = view.render(
            &session,
            CursorView {
                row: cursor.row(),
                col: cursor.col(),
            },
            &status,
        );
        term.draw(lines)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Some(intent) = cursor.apply(action, session.layout()) {
                            session.apply(intent);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }
    }
}

/// Fold pending game events into the status line and cursor.
///
/// The first message in a batch wins, so a load failure stays visible over
/// the deal that follows it.
fn drain_events(session: &mut GameSession, cursor: &mut GridCursor, status: &mut String) {
    let mut next: Option<String> = None;
    for event in session.take_events() {
        let message = match event {
            GameEvent::BoardRebuilt { layout, .. } => {
                cursor.clamp_to(layout);
                continue;
            }
            GameEvent::PhaseChanged(Phase::Previewing) => String::new(),
            GameEvent::PairMismatched(..) => "No match.".to_string(),
            GameEvent::CardMatched(_) => "Match!".to_string(),
            GameEvent::GameWon { final_score } => {
                format!("Board cleared with {} points.", final_score)
            }
            GameEvent::LoadFailed => "No save file found. Starting a New Game...".to_string(),
            GameEvent::SaveFailed => "Could not save progress.".to_string(),
            _ => continue,
        };
        next.get_or_insert(message);
    }
    if let Some(message) = next {
        *status = message;
    }
}
