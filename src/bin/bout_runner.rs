//! Headless Bout Runner
//!
//! Plays a full match against the boss ladder with a scripted player on a
//! synthetic clock and prints the result. Useful for tuning boss tables.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ringside::ai::{BotKind, PlayerBot};
use ringside::boss::BossCatalog;
use ringside::combat::constants::FRAME_MS;
use ringside::combat::events::{CombatSignal, MatchEvent};
use ringside::core::error::Result;
use ringside::core::types::Side;
use ringside::core::{Clock, ManualClock, SeededDice};
use ringside::session::{MatchOutcome, SessionController};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Headless Bout Runner - scripted player vs the boss ladder
#[derive(Parser, Debug)]
#[command(name = "bout_runner")]
#[command(about = "Run a full match with a scripted player and report the outcome")]
struct Args {
    /// Random seed for the enemy AI
    #[arg(long)]
    seed: Option<u64>,

    /// Player strategy
    #[arg(long, value_enum, default_value_t = BotKind::Reactive)]
    bot: BotKind,

    /// Reaction window for the reactive bot (ms before the punch lands)
    #[arg(long)]
    reaction_ms: Option<u64>,

    /// Give up after this much game time
    #[arg(long, default_value_t = 180_000)]
    max_ms: u64,

    /// Simulated frame period
    #[arg(long, default_value_t = FRAME_MS)]
    frame_ms: u64,

    /// Boss tuning file (TOML)
    #[arg(long)]
    bosses: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print every match event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Signal counts over a whole bout
#[derive(Debug, Default, Serialize)]
struct EventCounts {
    telegraphs: u32,
    punches_landed: u32,
    punches_blocked: u32,
    player_whiffs: u32,
    enemy_whiffs: u32,
    dodges_opened: u32,
    player_hits_taken: u32,
}

impl EventCounts {
    fn record(&mut self, event: &MatchEvent) {
        match event.signal {
            CombatSignal::Telegraphed => self.telegraphs += 1,
            CombatSignal::Landed { .. } => self.punches_landed += 1,
            CombatSignal::Blocked => self.punches_blocked += 1,
            CombatSignal::Whiffed { attacker } => match attacker {
                Side::Player => self.player_whiffs += 1,
                Side::Enemy => self.enemy_whiffs += 1,
            },
            CombatSignal::Opened { .. } => self.dodges_opened += 1,
            CombatSignal::PlayerHit { .. } => self.player_hits_taken += 1,
            _ => {}
        }
    }
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct BoutResult {
    outcome: String,
    elapsed_ms: u64,
    bosses_defeated: usize,
    final_boss_index: usize,
    player_hp: u8,
    bot: BotKind,
    seed: u64,
    events: EventCounts,
}

fn outcome_label(outcome: MatchOutcome) -> &'static str {
    match outcome {
        MatchOutcome::Won => "won",
        MatchOutcome::Lost => "lost",
        MatchOutcome::InProgress => "timeout",
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ringside=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let catalog = match &args.bosses {
        Some(path) => BossCatalog::load(path)?,
        None => BossCatalog::default(),
    };

    let mut dice = SeededDice::new(seed);
    let mut clock = ManualClock::starting_at(0);
    let mut bot = PlayerBot::new(args.bot);
    if let Some(reaction_ms) = args.reaction_ms {
        bot = bot.with_reaction(reaction_ms);
    }

    let mut session = SessionController::new(catalog, clock.now());
    let mut counts = EventCounts::default();
    let mut bosses_defeated = 0;
    let frame_ms = args.frame_ms.max(1);

    tracing::info!(seed, bot = ?args.bot, "bout started");

    while session.outcome() == MatchOutcome::InProgress && clock.now() < args.max_ms {
        let now = clock.now();

        if let Some(action) = bot.decide(session.state(), session.catalog(), now) {
            session.handle_input(action, now);
        }
        session.tick(now, &mut dice);

        for event in session.take_events() {
            if args.verbose {
                eprintln!("  [{:>6}] {:?}", event.at, event.signal);
            }
            if let CombatSignal::BossDown { .. } = event.signal {
                bosses_defeated += 1;
            }
            counts.record(&event);
        }

        clock.advance(frame_ms);
    }

    let result = BoutResult {
        outcome: outcome_label(session.outcome()).to_string(),
        elapsed_ms: clock.now(),
        bosses_defeated,
        final_boss_index: session.state().boss_index,
        player_hp: session.state().player.hp,
        bot: args.bot,
        seed,
        events: counts,
    };

    tracing::info!(outcome = %result.outcome, elapsed_ms = result.elapsed_ms, "bout finished");

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            println!("=== Bout Result ===");
            println!("Outcome: {}", result.outcome);
            println!("Elapsed: {} ms", result.elapsed_ms);
            println!("Bosses defeated: {}", result.bosses_defeated);
            println!("Player HP: {}", result.player_hp);
            println!("Bot: {:?}  Seed: {}", result.bot, result.seed);
            println!(
                "Landed {}  Blocked {}  Opened {}  Hits taken {}",
                result.events.punches_landed,
                result.events.punches_blocked,
                result.events.dodges_opened,
                result.events.player_hits_taken
            );
        }
    }

    Ok(())
}
