//! Scripted player bots for headless bouts
//!
//! Bots read the match state like a human reads the screen and answer with
//! the same discrete inputs a keyboard would produce.

use serde::{Deserialize, Serialize};

use crate::boss::BossCatalog;
use crate::combat::constants::PUNCH_RANGE;
use crate::combat::state::FighterState;
use crate::core::types::{InputAction, Timestamp};
use crate::session::match_state::{MatchOutcome, MatchState};

/// How long before a telegraph ends the reactive bot dodges
pub const DEFAULT_REACTION_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum BotKind {
    /// Dodges telegraphs, punches openings
    Reactive,
    /// Punches whenever free
    Masher,
    /// Never presses anything
    Idle,
}

#[derive(Debug, Clone)]
pub struct PlayerBot {
    kind: BotKind,
    reaction_ms: u64,
    dodge_left_next: bool,
}

impl PlayerBot {
    pub fn new(kind: BotKind) -> Self {
        Self {
            kind,
            reaction_ms: DEFAULT_REACTION_MS,
            dodge_left_next: true,
        }
    }

    pub fn with_reaction(mut self, reaction_ms: u64) -> Self {
        self.reaction_ms = reaction_ms;
        self
    }

    pub fn kind(&self) -> BotKind {
        self.kind
    }

    /// Pick at most one input for this tick
    pub fn decide(&mut self, state: &MatchState, catalog: &BossCatalog, now: Timestamp) -> Option<InputAction> {
        if state.outcome != MatchOutcome::InProgress || !state.player.is_idle() {
            return None;
        }

        match self.kind {
            BotKind::Idle => None,
            BotKind::Masher => Some(InputAction::Punch),
            BotKind::Reactive => self.react(state, catalog, now),
        }
    }

    fn react(&mut self, state: &MatchState, catalog: &BossCatalog, now: Timestamp) -> Option<InputAction> {
        let boss = catalog.boss(state.boss_index);
        let in_reach = state.distance() <= PUNCH_RANGE;

        if state.enemy_is_vulnerable(now) && in_reach {
            return Some(InputAction::Punch);
        }

        if state.enemy.state != FighterState::Telegraph {
            return None;
        }

        if boss.telegraph_hittable && in_reach {
            return Some(InputAction::Punch);
        }

        let remaining = state.enemy.state_deadline.saturating_sub(now);
        if remaining > self.reaction_ms {
            return None;
        }

        let action = if self.dodge_left_next {
            InputAction::DodgeLeft
        } else {
            InputAction::DodgeRight
        };
        self.dodge_left_next = !self.dodge_left_next;
        Some(action)
    }
}
