//! Rendering for Ringside
//!
//! Provides visual representation of match state.
//! This module is READ-ONLY - it never modifies match state.

pub mod terminal;

use serde::Serialize;

use crate::boss::BossCatalog;
use crate::combat::resolution::enemy_is_hittable;
use crate::combat::state::{Fighter, FighterState};
use crate::core::types::Timestamp;
use crate::session::match_state::{MatchOutcome, MatchState};

/// Lightweight copy of a fighter for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterView {
    pub x: i32,
    pub y: i32,
    pub state: FighterState,
    pub hp: u8,
    pub max_hp: u8,
    pub flash: bool,
}

impl From<&Fighter> for FighterView {
    fn from(fighter: &Fighter) -> Self {
        Self {
            x: fighter.x,
            y: fighter.y,
            state: fighter.state,
            hp: fighter.hp,
            max_hp: fighter.max_hp,
            flash: fighter.flash,
        }
    }
}

/// Everything a frame needs, captured after the tick's mutations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub player: FighterView,
    pub enemy: FighterView,
    pub boss_index: usize,
    pub boss_name: String,
    /// Banner text while it is still showing
    pub banner: Option<String>,
    pub outcome: MatchOutcome,
    /// A punch would connect right now ("!!" marker)
    pub enemy_open: bool,
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState, catalog: &BossCatalog, now: Timestamp) -> Self {
        Self {
            player: FighterView::from(&state.player),
            enemy: FighterView::from(&state.enemy),
            boss_index: state.boss_index,
            boss_name: catalog.boss(state.boss_index).name.clone(),
            banner: state.banner.current().map(str::to_string),
            outcome: state.outcome,
            enemy_open: enemy_is_hittable(state, catalog, now),
        }
    }
}
