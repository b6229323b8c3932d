//! Enemy AI scheduler
//!
//! Two timers drive the enemy while it stands idle: a shuffle timer that
//! jitters its position, and an action timer that rolls for a punch. A
//! successful roll only starts the telegraph. The punch itself is thrown by
//! `resolve_pending_punch` once the telegraph has run out.

use crate::boss::{BossCatalog, BossDefinition};
use crate::combat::constants::{
    clamp_to_ring, ENEMY_SHUFFLE_RANGE, ENEMY_SHUFFLE_STEP, FLASH_INTERVAL_MS, NEAR_RANGE_SLACK,
    PASSIVE_RETRY_BASE_MS, PASSIVE_RETRY_JITTER_MS, PUNCH_RANGE, SHUFFLE_BASE_MS,
    SHUFFLE_JITTER_MS, SHUFFLE_ONE_IN,
};
use crate::combat::events::CombatSignal;
use crate::combat::resolution::{attempt_enemy_punch, PunchOutcome};
use crate::combat::state::FighterState;
use crate::core::dice::Dice;
use crate::core::types::Timestamp;
use crate::session::match_state::MatchState;

/// Run both AI timers for this tick
pub fn step<D: Dice>(state: &mut MatchState, catalog: &BossCatalog, now: Timestamp, dice: &mut D) {
    if !state.in_play() {
        return;
    }

    let boss = catalog.boss(state.boss_index);

    if state.enemy.is_idle() && now >= state.enemy_next_shuffle {
        shuffle(state, dice);
        state.enemy_next_shuffle = now + dice.range(SHUFFLE_BASE_MS, SHUFFLE_BASE_MS + SHUFFLE_JITTER_MS);
    }

    if now < state.enemy_next_action || !state.enemy.is_idle() {
        return;
    }

    let distance = state.distance();
    let near = distance <= PUNCH_RANGE + NEAR_RANGE_SLACK;
    let roll = dice.percent();

    if roll < boss.punch_chance(near) {
        begin_telegraph(state, boss, now);
        let pause = boss.ai_base_delay + dice.range(0, boss.ai_rand_delay);
        state.enemy_next_action = now + boss.telegraph_ms + pause;
        tracing::debug!(roll, near, distance, next = state.enemy_next_action, "enemy winds up");
    } else {
        state.enemy_next_action = now + dice.range(PASSIVE_RETRY_BASE_MS, PASSIVE_RETRY_BASE_MS + PASSIVE_RETRY_JITTER_MS);
        tracing::trace!(roll, near, "enemy holds");
    }
}

/// One-in-four chance to step a unit left or right around home
fn shuffle<D: Dice>(state: &mut MatchState, dice: &mut D) {
    if !dice.one_in(SHUFFLE_ONE_IN) {
        return;
    }

    let step = if dice.coin() { ENEMY_SHUFFLE_STEP } else { -ENEMY_SHUFFLE_STEP };
    let home = state.enemy.home_x;
    let x = (state.enemy.x + step).clamp(home - ENEMY_SHUFFLE_RANGE, home + ENEMY_SHUFFLE_RANGE);
    state.enemy.x = clamp_to_ring(x);
}

/// Start a telegraph and queue the punch behind it
pub fn begin_telegraph(state: &mut MatchState, boss: &BossDefinition, now: Timestamp) {
    state.enemy.flash = false;
    state.enemy.flash_deadline = now + FLASH_INTERVAL_MS;
    state.enemy.pending_punch = true;
    state.enemy.set_state(FighterState::Telegraph, boss.telegraph_ms, now);
    state.emit(CombatSignal::Telegraphed, now);
}

/// Throw the queued punch once the telegraph has expired back to idle
///
/// Runs every tick after the fighters advance. Returns the punch outcome if
/// one was thrown.
pub fn resolve_pending_punch(
    state: &mut MatchState,
    catalog: &BossCatalog,
    now: Timestamp,
) -> Option<PunchOutcome> {
    if !state.enemy.pending_punch || !state.enemy.is_idle() {
        return None;
    }

    state.enemy.pending_punch = false;
    Some(attempt_enemy_punch(state, catalog, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedDice;
    use crate::session::progression::reset_match;

    fn setup() -> (MatchState, BossCatalog) {
        let catalog = BossCatalog::default();
        let mut state = MatchState::new();
        reset_match(&mut state, &catalog, 0);
        // Keep the shuffle timer out of the way
        state.enemy_next_shuffle = u64::MAX;
        (state, catalog)
    }

    #[test]
    fn test_nothing_before_action_deadline() {
        let (mut state, catalog) = setup();
        let mut dice = ScriptedDice::always(0);
        step(&mut state, &catalog, 699, &mut dice);
        assert_eq!(state.enemy.state, FighterState::Idle);
        assert!(!state.enemy.pending_punch);
    }

    #[test]
    fn test_successful_roll_telegraphs() {
        let (mut state, catalog) = setup();
        // roll 10 < 40, then rand delay 100
        let mut dice = ScriptedDice::new([10, 100]);
        step(&mut state, &catalog, 700, &mut dice);

        assert_eq!(state.enemy.state, FighterState::Telegraph);
        assert_eq!(state.enemy.state_deadline, 700 + 700);
        assert!(state.enemy.pending_punch);
        assert!(!state.enemy.flash);
        assert_eq!(state.enemy.flash_deadline, 780);
        assert_eq!(state.enemy_next_action, 700 + 700 + 900 + 100);
    }

    #[test]
    fn test_failed_roll_reschedules() {
        let (mut state, catalog) = setup();
        // roll 40 is not < 40, retry jitter 123
        let mut dice = ScriptedDice::new([40, 123]);
        step(&mut state, &catalog, 700, &mut dice);

        assert_eq!(state.enemy.state, FighterState::Idle);
        assert!(!state.enemy.pending_punch);
        assert_eq!(state.enemy_next_action, 700 + 300 + 123);
    }

    #[test]
    fn test_far_player_uses_far_chance() {
        let (mut state, catalog) = setup();
        state.player.x = state.enemy.x + PUNCH_RANGE + NEAR_RANGE_SLACK + 1;
        // 20 would pass the near chance (40) but not the far chance (8)
        let mut dice = ScriptedDice::new([20, 0]);
        step(&mut state, &catalog, 700, &mut dice);
        assert_eq!(state.enemy.state, FighterState::Idle);
    }

    #[test]
    fn test_busy_enemy_keeps_action_due() {
        let (mut state, catalog) = setup();
        state.enemy.set_state(FighterState::HitStun, 260, 650);
        let mut dice = ScriptedDice::always(0);
        step(&mut state, &catalog, 700, &mut dice);
        assert_eq!(state.enemy_next_action, 700);
        assert_eq!(state.enemy.state, FighterState::HitStun);
    }

    #[test]
    fn test_busy_enemy_skips_overdue_shuffle() {
        let (mut state, catalog) = setup();
        state.enemy_next_action = u64::MAX;
        state.enemy_next_shuffle = 0;
        let x = state.enemy.x;

        for busy in [FighterState::Telegraph, FighterState::Punching, FighterState::HitStun] {
            state.enemy.set_state(busy, 260, 650);
            // Would step right and reschedule if the enemy were idle
            let mut dice = ScriptedDice::new([0, 1, 0]);
            step(&mut state, &catalog, 700, &mut dice);
            assert_eq!(state.enemy.x, x, "{busy:?}");
            assert_eq!(state.enemy_next_shuffle, 0, "{busy:?}");
            assert_eq!(dice.remaining(), 3, "{busy:?}");
        }
    }

    #[test]
    fn test_shuffle_stays_near_home() {
        let (mut state, catalog) = setup();
        state.enemy_next_action = u64::MAX;
        // one_in(4) hits on 0, coin on 1 = step right; then reschedule
        let mut dice = ScriptedDice::always(0);
        let home = state.enemy.home_x;
        for i in 0..40 {
            state.enemy_next_shuffle = 0;
            let mut script = ScriptedDice::new([0, 1, 0]);
            step(&mut state, &catalog, i, &mut script);
        }
        assert_eq!(state.enemy.x, home + ENEMY_SHUFFLE_RANGE);

        state.enemy_next_shuffle = 0;
        step(&mut state, &catalog, 100, &mut dice);
        // coin 0 -> step left
        assert_eq!(state.enemy.x, home + ENEMY_SHUFFLE_RANGE - 1);
        assert_eq!(state.enemy_next_shuffle, 100 + SHUFFLE_BASE_MS);
    }

    #[test]
    fn test_shuffle_miss_leaves_position() {
        let (mut state, catalog) = setup();
        state.enemy_next_action = u64::MAX;
        state.enemy_next_shuffle = 0;
        let mut dice = ScriptedDice::new([1, 50]);
        let x = state.enemy.x;
        step(&mut state, &catalog, 10, &mut dice);
        assert_eq!(state.enemy.x, x);
        assert_eq!(state.enemy_next_shuffle, 10 + SHUFFLE_BASE_MS + 50);
    }

    #[test]
    fn test_pending_punch_fires_once() {
        let (mut state, catalog) = setup();
        let boss = catalog.boss(0).clone();
        begin_telegraph(&mut state, &boss, 1000);

        state.enemy.advance(1500);
        assert_eq!(resolve_pending_punch(&mut state, &catalog, 1500), None);

        state.enemy.advance(1700);
        let outcome = resolve_pending_punch(&mut state, &catalog, 1700);
        assert_eq!(outcome, Some(PunchOutcome::Landed { damage: 1, knockout: false }));
        assert!(!state.enemy.pending_punch);
        assert_eq!(state.enemy.state, FighterState::Punching);

        state.enemy.advance(1700 + boss.punch_ms);
        assert_eq!(resolve_pending_punch(&mut state, &catalog, 1700 + boss.punch_ms), None);
    }
}
