//! Combat signals and the per-match event log
//!
//! Every gameplay outcome (including the ones that do nothing, like a blocked
//! punch) is reported as a signal. The session turns signals into banners;
//! hosts and the bout runner read the log.

use serde::{Deserialize, Serialize};

use crate::core::types::{Side, Timestamp};

/// Something the UI should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatSignal {
    MatchStarted,
    /// A punch that never reached its target
    Whiffed { attacker: Side },
    /// Player punch in range but the enemy was guarded
    Blocked,
    /// Player punch connected
    Landed { damage: u8, enemy_hp: u8 },
    /// Enemy began winding up
    Telegraphed,
    /// Player dodged an enemy punch; the enemy is open until `until`
    Opened { until: Timestamp },
    PlayerHit { player_hp: u8 },
    PlayerKnockedOut,
    BossDown { index: usize },
    NextBoss { index: usize },
    Victory,
    Restarted,
}

impl CombatSignal {
    /// Banner text and how long it stays up, if the signal has one
    pub fn banner(&self) -> Option<(&'static str, u64)> {
        match self {
            CombatSignal::MatchStarted => Some(("DODGE / PUNCH", 900)),
            CombatSignal::Blocked => Some(("BLOCK", 240)),
            CombatSignal::Landed { .. } => Some(("GOOD!", 300)),
            CombatSignal::Opened { .. } => Some(("OPEN!", 350)),
            CombatSignal::PlayerHit { .. } => Some(("HIT!", 350)),
            CombatSignal::PlayerKnockedOut => Some(("YOU LOSE...", 2000)),
            CombatSignal::BossDown { .. } => Some(("BOSS DOWN!", 800)),
            CombatSignal::NextBoss { index } => Some((boss_intro(*index), 700)),
            CombatSignal::Victory => Some(("YOU WIN!", 2000)),
            CombatSignal::Whiffed { .. } | CombatSignal::Telegraphed | CombatSignal::Restarted => {
                None
            }
        }
    }

    /// Signals that end the match
    pub fn is_terminal(&self) -> bool {
        matches!(self, CombatSignal::PlayerKnockedOut | CombatSignal::Victory)
    }
}

fn boss_intro(index: usize) -> &'static str {
    match index {
        0 => "BOSS 1",
        1 => "BOSS 2",
        _ => "FINAL",
    }
}

/// A signal stamped with when it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub at: Timestamp,
    pub signal: CombatSignal,
}

/// Signals accumulated since the host last drained them
#[derive(Debug, Clone, Default)]
pub struct MatchEventLog {
    pub events: Vec<MatchEvent>,
}

impl MatchEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: CombatSignal, at: Timestamp) {
        self.events.push(MatchEvent { at, signal });
    }

    /// Hand the accumulated events to the caller, leaving the log empty
    pub fn take(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, signal: CombatSignal) -> bool {
        self.events.iter().any(|e| e.signal == signal)
    }

    pub fn last(&self) -> Option<&MatchEvent> {
        self.events.last()
    }
}
