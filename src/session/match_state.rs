//! Match state - everything that changes during a bout
//!
//! One `MatchState` exists per session. The tick loop owns it and lends it
//! to the combat resolver and AI scheduler by `&mut`.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{ENEMY_Y, HOME_X, MAX_HP, PLAYER_Y};
use crate::combat::events::{CombatSignal, MatchEventLog};
use crate::combat::state::Fighter;
use crate::core::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// Transient message over the ring
#[derive(Debug, Clone, Default)]
pub struct Banner {
    pub text: Option<&'static str>,
    pub until: Timestamp,
    pub visible: bool,
}

impl Banner {
    pub fn show(&mut self, text: &'static str, duration_ms: u64, now: Timestamp) {
        self.text = Some(text);
        self.until = now + duration_ms;
        self.visible = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn expire(&mut self, now: Timestamp) {
        if self.visible && now >= self.until {
            self.visible = false;
        }
    }

    /// Text while the banner is still up
    pub fn current(&self) -> Option<&'static str> {
        if self.visible {
            self.text
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub player: Fighter,
    pub enemy: Fighter,

    /// 0..=2, only ever increases until the match is won or restarted
    pub boss_index: usize,

    /// Enemy can be hit freely while `now` is below this; 0 = closed
    pub enemy_vulnerable_until: Timestamp,

    pub enemy_next_action: Timestamp,
    pub enemy_next_shuffle: Timestamp,

    pub banner: Banner,
    pub outcome: MatchOutcome,
    pub events: MatchEventLog,
}

impl MatchState {
    /// Fresh fighters; callers start a boss before play begins
    pub fn new() -> Self {
        Self {
            player: Fighter::new(HOME_X, PLAYER_Y, MAX_HP),
            enemy: Fighter::new(HOME_X, ENEMY_Y, MAX_HP),
            boss_index: 0,
            enemy_vulnerable_until: 0,
            enemy_next_action: 0,
            enemy_next_shuffle: 0,
            banner: Banner::default(),
            outcome: MatchOutcome::InProgress,
            events: MatchEventLog::new(),
        }
    }

    pub fn enemy_is_vulnerable(&self, now: Timestamp) -> bool {
        now < self.enemy_vulnerable_until
    }

    /// Neither fighter is down and the match has not been decided
    pub fn in_play(&self) -> bool {
        self.outcome == MatchOutcome::InProgress && !self.player.is_ko() && !self.enemy.is_ko()
    }

    pub fn distance(&self) -> i32 {
        self.player.distance_to(&self.enemy)
    }

    /// Record a signal and raise its banner
    pub fn emit(&mut self, signal: CombatSignal, now: Timestamp) {
        if let Some((text, duration_ms)) = signal.banner() {
            self.banner.show(text, duration_ms, now);
        }
        self.events.push(signal, now);
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
