//! Boss progression and match resets

use crate::boss::{BossCatalog, LAST_BOSS_INDEX};
use crate::combat::constants::{
    BOSS_START_ACTION_DELAY_MS, BOSS_START_SHUFFLE_DELAY_MS, ENEMY_Y, HOME_X, MAX_HP, PLAYER_Y,
};
use crate::combat::events::CombatSignal;
use crate::core::types::Timestamp;
use crate::session::match_state::{MatchOutcome, MatchState};

/// Bring boss `index` into the ring
///
/// The enemy is always rebuilt from the catalog. The player is only reset
/// when `reset_player` is set (match start and restart).
pub fn start_boss(
    state: &mut MatchState,
    catalog: &BossCatalog,
    index: usize,
    reset_player: bool,
    now: Timestamp,
) {
    let boss = catalog.boss(index);

    if reset_player {
        state.player.reset(HOME_X, PLAYER_Y, MAX_HP, now);
    }

    state.boss_index = index.min(LAST_BOSS_INDEX);
    state.enemy.reset(HOME_X, ENEMY_Y, boss.hp, now);
    state.enemy_vulnerable_until = 0;
    state.enemy_next_action = now + BOSS_START_ACTION_DELAY_MS;
    state.enemy_next_shuffle = now + BOSS_START_SHUFFLE_DELAY_MS;
    state.banner.clear();

    tracing::debug!(boss = %boss.name, index, "boss enters the ring");
}

/// Called when the enemy hits the canvas
///
/// Moves to the next boss, or ends the match when the last one falls.
pub fn advance_or_win(state: &mut MatchState, catalog: &BossCatalog, now: Timestamp) {
    if state.boss_index < LAST_BOSS_INDEX {
        let next = state.boss_index + 1;
        start_boss(state, catalog, next, false, now);
        state.emit(CombatSignal::NextBoss { index: next }, now);
        tracing::info!(boss = %catalog.boss(next).name, player_hp = state.player.hp, "next boss");
    } else {
        state.outcome = MatchOutcome::Won;
        state.emit(CombatSignal::Victory, now);
        tracing::info!(player_hp = state.player.hp, "final boss defeated");
    }
}

/// Back to boss 1 with a healthy player
pub fn reset_match(state: &mut MatchState, catalog: &BossCatalog, now: Timestamp) {
    state.outcome = MatchOutcome::InProgress;
    start_boss(state, catalog, 0, true, now);
    state.emit(CombatSignal::MatchStarted, now);
}
