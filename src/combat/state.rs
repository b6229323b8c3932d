//! Fighter state machine
//!
//! Both the player and the enemy are a `Fighter`. Timed states carry a
//! deadline; `advance` expires them back to `Idle` once the clock passes it.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{BOSS_START_FLASH_DELAY_MS, FIGHTER_W, FLASH_INTERVAL_MS};
use crate::core::types::Timestamp;

/// Behavioural state of a fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FighterState {
    #[default]
    Idle,
    /// Enemy wind-up before a punch
    Telegraph,
    Punching,
    HitStun,
    /// Player only
    Dodging,
    /// Terminal until an explicit reset
    KO,
}

/// One corner of the ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub x: i32,
    pub y: i32,
    /// Rest position; dodges snap back here
    pub home_x: i32,

    pub state: FighterState,
    /// When the current state auto-expires; 0 means never
    pub state_deadline: Timestamp,

    pub hp: u8,
    pub max_hp: u8,

    /// Telegraph blink
    pub flash: bool,
    pub flash_deadline: Timestamp,

    /// -1 left, +1 right, 0 never dodged
    pub dodge_direction: i8,

    /// Set when a telegraph starts, cleared once the punch resolves or is cancelled
    pub pending_punch: bool,
}

impl Fighter {
    pub fn new(home_x: i32, y: i32, max_hp: u8) -> Self {
        Self {
            x: home_x,
            y,
            home_x,
            state: FighterState::Idle,
            state_deadline: 0,
            hp: max_hp,
            max_hp,
            flash: false,
            flash_deadline: 0,
            dodge_direction: 0,
            pending_punch: false,
        }
    }

    /// Put the fighter back at full health, at home, idle
    pub fn reset(&mut self, home_x: i32, y: i32, max_hp: u8, now: Timestamp) {
        *self = Self::new(home_x, y, max_hp);
        self.flash_deadline = now + BOSS_START_FLASH_DELAY_MS;
    }

    /// Enter `state` for `duration_ms`; zero means no auto-expiry
    pub fn set_state(&mut self, state: FighterState, duration_ms: u64, now: Timestamp) {
        self.state = state;
        self.state_deadline = if duration_ms == 0 { 0 } else { now + duration_ms };
    }

    /// Advance timers to `now`
    pub fn advance(&mut self, now: Timestamp) {
        if self.state == FighterState::KO {
            return;
        }

        if self.state == FighterState::Telegraph && now >= self.flash_deadline {
            self.flash = !self.flash;
            self.flash_deadline = now + FLASH_INTERVAL_MS;
        }

        if self.state != FighterState::Idle
            && self.state_deadline != 0
            && now >= self.state_deadline
        {
            if self.state == FighterState::Dodging {
                self.x = self.home_x;
            }
            tracing::trace!(from = ?self.state, now, "state expired");
            self.set_state(FighterState::Idle, 0, now);
        }
    }

    /// Saturating damage; returns the remaining HP
    pub fn take_damage(&mut self, amount: u8) -> u8 {
        self.hp = self.hp.saturating_sub(amount);
        self.hp
    }

    pub fn knock_out(&mut self) {
        self.set_state(FighterState::KO, 0, 0);
        self.pending_punch = false;
    }

    pub fn is_idle(&self) -> bool {
        self.state == FighterState::Idle
    }

    pub fn is_ko(&self) -> bool {
        self.state == FighterState::KO
    }

    pub fn center_x(&self) -> i32 {
        self.x + FIGHTER_W / 2
    }

    /// Horizontal center-to-center distance
    pub fn distance_to(&self, other: &Fighter) -> i32 {
        (self.center_x() - other.center_x()).abs()
    }
}
