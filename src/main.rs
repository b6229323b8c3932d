//! Ringside - Terminal Host
//!
//! Sets up the terminal, spawns the key reader and runs the fixed-rate
//! tick loop until the player quits.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use ringside::boss::BossCatalog;
use ringside::core::config::GameConfig;
use ringside::core::error::{Result, RingError};
use ringside::core::{Clock, SeededDice, SystemClock};
use ringside::render::terminal::draw;
use ringside::session::SessionController;
use ringside::ui::{drain_into, spawn_key_reader};

const IDLE_SLEEP: Duration = Duration::from_millis(2);

#[derive(Parser, Debug)]
#[command(name = "ringside")]
#[command(about = "Three bosses, one ring. Dodge the telegraph, punch the opening.")]
struct Args {
    /// Host configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Boss tuning file (TOML), overrides the config
    #[arg(long)]
    bosses: Option<PathBuf>,

    /// Seed for the enemy AI, overrides the config
    #[arg(long)]
    seed: Option<u64>,
}

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    // Logs share the terminal with the ring, so stay quiet unless asked
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.bosses.is_some() {
        config.catalog_path = args.bosses.clone();
    }
    config.validate()?;

    let catalog = match &config.catalog_path {
        Some(path) => BossCatalog::load(path)?,
        None => BossCatalog::default(),
    };

    tracing::info!(?config, bosses = catalog.len(), "ringside starting");

    let mut terminal = enter_terminal()?;
    let result = run(&mut terminal, &config, catalog);
    leave_terminal(&mut terminal)?;
    result
}

fn enter_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn leave_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(terminal: &mut Term, config: &GameConfig, catalog: BossCatalog) -> Result<()> {
    let clock = SystemClock::new();
    let mut dice = match config.seed {
        Some(seed) => SeededDice::new(seed),
        None => SeededDice::from_entropy(),
    };

    let (tx, mut rx) = mpsc::channel(config.input_queue_capacity);
    let reader = spawn_key_reader(tx);

    let mut session = SessionController::new(catalog, clock.now());
    let mut last_frame: Option<u64> = None;

    loop {
        let now = clock.now();

        match drain_into(&mut rx, &mut session, now) {
            Ok(_) => {}
            Err(RingError::InputClosed) => {
                tracing::warn!("input closed");
                break;
            }
            Err(e) => return Err(e),
        }
        if session.exit_requested() {
            break;
        }

        session.tick(now, &mut dice);

        for event in session.take_events() {
            tracing::debug!(at = event.at, signal = ?event.signal, "match event");
        }

        let due = last_frame.map_or(true, |at| now.saturating_sub(at) >= config.frame_ms);
        if due {
            let snapshot = session.snapshot(now);
            terminal.draw(|frame| draw(frame, &snapshot, now))?;
            last_frame = Some(now);
        } else {
            thread::sleep(IDLE_SLEEP);
        }
    }

    drop(rx);
    if reader.join().is_err() {
        tracing::warn!("key reader panicked");
    }

    tracing::info!(outcome = ?session.outcome(), boss_index = session.state().boss_index, "ringside exiting");
    Ok(())
}
