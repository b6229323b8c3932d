//! Session controller - the single owner of a match
//!
//! Hosts call `handle_input` for each queued action in arrival order, then
//! `tick` once per frame. Everything that mutates game state goes through here.

use crate::ai::scheduler;
use crate::boss::{BossCatalog, BossDefinition};
use crate::combat::events::{CombatSignal, MatchEvent};
use crate::combat::resolution::{attempt_player_punch, start_player_dodge};
use crate::core::dice::Dice;
use crate::core::types::{DodgeDirection, InputAction, Timestamp};
use crate::render::MatchSnapshot;
use crate::session::match_state::{MatchOutcome, MatchState};
use crate::session::progression::reset_match;

pub struct SessionController {
    catalog: BossCatalog,
    state: MatchState,
    exit_requested: bool,
}

impl SessionController {
    /// Start a match against the first boss
    pub fn new(catalog: BossCatalog, now: Timestamp) -> Self {
        let mut state = MatchState::new();
        reset_match(&mut state, &catalog, now);
        tracing::info!(boss = %catalog.boss(0).name, "match started");
        Self {
            catalog,
            state,
            exit_requested: false,
        }
    }

    /// Apply one discrete input
    ///
    /// Actions that the current state does not allow are dropped silently.
    pub fn handle_input(&mut self, action: InputAction, now: Timestamp) {
        match action {
            InputAction::Exit => {
                self.exit_requested = true;
            }
            InputAction::DodgeLeft => {
                start_player_dodge(&mut self.state, DodgeDirection::Left, now);
            }
            InputAction::DodgeRight => {
                start_player_dodge(&mut self.state, DodgeDirection::Right, now);
            }
            InputAction::Punch => {
                attempt_player_punch(&mut self.state, &self.catalog, now);
            }
            InputAction::Confirm => {
                if self.state.outcome == MatchOutcome::InProgress {
                    attempt_player_punch(&mut self.state, &self.catalog, now);
                } else {
                    self.restart(now);
                }
            }
        }
    }

    /// Advance the match by one tick
    pub fn tick<D: Dice>(&mut self, now: Timestamp, dice: &mut D) {
        self.state.player.advance(now);
        self.state.enemy.advance(now);

        scheduler::resolve_pending_punch(&mut self.state, &self.catalog, now);

        self.state.banner.expire(now);

        scheduler::step(&mut self.state, &self.catalog, now, dice);
    }

    /// Full reset back to boss 1
    pub fn restart(&mut self, now: Timestamp) {
        tracing::info!(outcome = ?self.state.outcome, boss_index = self.state.boss_index, "match restarted");
        self.state.emit(CombatSignal::Restarted, now);
        reset_match(&mut self.state, &self.catalog, now);
    }

    /// Drain the signals raised since the last call
    pub fn take_events(&mut self) -> Vec<MatchEvent> {
        self.state.events.take()
    }

    pub fn snapshot(&self, now: Timestamp) -> MatchSnapshot {
        MatchSnapshot::capture(&self.state, &self.catalog, now)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Direct access for hosts and tests that stage a situation
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn catalog(&self) -> &BossCatalog {
        &self.catalog
    }

    pub fn current_boss(&self) -> &BossDefinition {
        self.catalog.boss(self.state.boss_index)
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.state.outcome
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
