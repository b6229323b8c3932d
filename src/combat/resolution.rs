//! Punch and dodge resolution
//!
//! A punch always commits its thrower for the full `punch_ms`, whether it
//! connects or not. Damage only happens when the target is open:
//! - the enemy is open inside its vulnerability window, or while
//!   telegraphing if the boss allows it
//! - the player is open whenever they are in reach and not dodging

use serde::{Deserialize, Serialize};

use crate::boss::BossCatalog;
use crate::combat::constants::{
    clamp_to_ring, DODGE_MS, ENEMY_PUNCH_DAMAGE, HIT_STUN_MS, PLAYER_DODGE_OFFSET, PUNCH_RANGE,
};
use crate::combat::events::CombatSignal;
use crate::combat::state::FighterState;
use crate::core::types::{DodgeDirection, Side, Timestamp};
use crate::session::match_state::{MatchOutcome, MatchState};
use crate::session::progression::advance_or_win;

/// What happened to a punch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PunchOutcome {
    /// Thrower could not act; nothing changed
    Ignored,
    /// Committed but out of reach
    OutOfRange,
    /// Player punch reached a guarded enemy
    Blocked,
    /// Enemy punch met a dodging player
    Evaded,
    /// Target was already reeling from a hit
    Absorbed,
    Landed { damage: u8, knockout: bool },
}

/// Can the player's punch connect right now?
pub fn enemy_is_hittable(state: &MatchState, catalog: &BossCatalog, now: Timestamp) -> bool {
    if state.enemy_is_vulnerable(now) {
        return true;
    }
    catalog.boss(state.boss_index).telegraph_hittable && state.enemy.state == FighterState::Telegraph
}

pub fn attempt_player_punch(
    state: &mut MatchState,
    catalog: &BossCatalog,
    now: Timestamp,
) -> PunchOutcome {
    if !state.in_play() || !state.player.is_idle() {
        return PunchOutcome::Ignored;
    }

    let boss = catalog.boss(state.boss_index);
    state.player.set_state(FighterState::Punching, boss.punch_ms, now);

    if state.distance() > PUNCH_RANGE {
        state.emit(CombatSignal::Whiffed { attacker: Side::Player }, now);
        return PunchOutcome::OutOfRange;
    }

    if !enemy_is_hittable(state, catalog, now) {
        state.emit(CombatSignal::Blocked, now);
        return PunchOutcome::Blocked;
    }

    if matches!(state.enemy.state, FighterState::HitStun | FighterState::KO) {
        return PunchOutcome::Absorbed;
    }

    let damage = boss.player_damage;
    let was_telegraphing = state.enemy.state == FighterState::Telegraph;
    let enemy_hp = state.enemy.take_damage(damage);

    // Hitting through a wind-up cancels the punch behind it, but only on
    // bosses whose wind-up is itself hittable
    if was_telegraphing && boss.telegraph_hittable {
        state.enemy.pending_punch = false;
    }

    state.enemy.set_state(FighterState::HitStun, HIT_STUN_MS, now);
    state.enemy_vulnerable_until = 0;
    state.emit(CombatSignal::Landed { damage, enemy_hp }, now);
    tracing::debug!(damage, enemy_hp, through_telegraph = was_telegraphing, "player punch landed");

    let knockout = enemy_hp == 0;
    if knockout {
        state.enemy.knock_out();
        let index = state.boss_index;
        state.emit(CombatSignal::BossDown { index }, now);
        tracing::info!(boss = %boss.name, index, "boss knocked out");
        advance_or_win(state, catalog, now);
    }

    PunchOutcome::Landed { damage, knockout }
}

pub fn attempt_enemy_punch(
    state: &mut MatchState,
    catalog: &BossCatalog,
    now: Timestamp,
) -> PunchOutcome {
    if !state.in_play() || !state.enemy.is_idle() {
        return PunchOutcome::Ignored;
    }

    let boss = catalog.boss(state.boss_index);
    // The swing commits even when it is about to miss
    state.enemy.set_state(FighterState::Punching, boss.punch_ms, now);

    if state.player.state == FighterState::Dodging {
        let until = now + boss.vulnerable_ms;
        state.enemy_vulnerable_until = until;
        state.emit(CombatSignal::Opened { until }, now);
        tracing::debug!(until, "enemy punch evaded");
        return PunchOutcome::Evaded;
    }

    if state.distance() > PUNCH_RANGE {
        state.emit(CombatSignal::Whiffed { attacker: Side::Enemy }, now);
        return PunchOutcome::OutOfRange;
    }

    if state.player.state == FighterState::HitStun {
        return PunchOutcome::Absorbed;
    }

    let player_hp = state.player.take_damage(ENEMY_PUNCH_DAMAGE);
    state.player.set_state(FighterState::HitStun, HIT_STUN_MS, now);
    state.emit(CombatSignal::PlayerHit { player_hp }, now);

    let knockout = player_hp == 0;
    if knockout {
        state.player.knock_out();
        state.outcome = MatchOutcome::Lost;
        state.emit(CombatSignal::PlayerKnockedOut, now);
        tracing::info!(boss = %boss.name, "player knocked out");
    }

    PunchOutcome::Landed {
        damage: ENEMY_PUNCH_DAMAGE,
        knockout,
    }
}

/// Step the player sideways for `DODGE_MS`; returns false if they could not move
pub fn start_player_dodge(state: &mut MatchState, direction: DodgeDirection, now: Timestamp) -> bool {
    if !state.in_play() || !state.player.is_idle() {
        return false;
    }

    let sign = direction.sign();
    state.player.dodge_direction = sign;
    state.player.x = clamp_to_ring(state.player.home_x + i32::from(sign) * PLAYER_DODGE_OFFSET);
    state.player.set_state(FighterState::Dodging, DODGE_MS, now);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::scheduler::{begin_telegraph, resolve_pending_punch};
    use crate::session::progression::{reset_match, start_boss};

    fn setup() -> (MatchState, BossCatalog) {
        let catalog = BossCatalog::default();
        let mut state = MatchState::new();
        reset_match(&mut state, &catalog, 0);
        (state, catalog)
    }

    #[test]
    fn test_guarded_enemy_blocks() {
        let (mut state, catalog) = setup();
        let outcome = attempt_player_punch(&mut state, &catalog, 100);
        assert_eq!(outcome, PunchOutcome::Blocked);
        assert_eq!(state.enemy.hp, 6);
        assert_eq!(state.enemy.state, FighterState::Idle);
        assert_eq!(state.player.state, FighterState::Punching);
        assert_eq!(state.player.state_deadline, 100 + 320);
    }

    #[test]
    fn test_punch_ignored_while_busy() {
        let (mut state, catalog) = setup();
        state.player.set_state(FighterState::Punching, 320, 0);
        assert_eq!(attempt_player_punch(&mut state, &catalog, 10), PunchOutcome::Ignored);
        assert_eq!(state.player.state_deadline, 320);
    }

    #[test]
    fn test_out_of_range_still_commits() {
        let (mut state, catalog) = setup();
        state.enemy.x = state.player.x + PUNCH_RANGE + 1;
        state.enemy_vulnerable_until = 10_000;
        let outcome = attempt_player_punch(&mut state, &catalog, 50);
        assert_eq!(outcome, PunchOutcome::OutOfRange);
        assert_eq!(state.player.state, FighterState::Punching);
        assert_eq!(state.enemy.hp, 6);
        // Window stays open after a whiff
        assert!(state.enemy_is_vulnerable(50));
    }

    #[test]
    fn test_vulnerable_enemy_takes_damage() {
        let (mut state, catalog) = setup();
        state.enemy_vulnerable_until = 1000;
        let outcome = attempt_player_punch(&mut state, &catalog, 500);
        assert_eq!(outcome, PunchOutcome::Landed { damage: 2, knockout: false });
        assert_eq!(state.enemy.hp, 4);
        assert_eq!(state.enemy.state, FighterState::HitStun);
        assert_eq!(state.enemy.state_deadline, 500 + HIT_STUN_MS);
        assert_eq!(state.enemy_vulnerable_until, 0);
    }

    #[test]
    fn test_open_window_hit_keeps_guarded_telegraph_punch() {
        let (mut state, catalog) = setup();
        start_boss(&mut state, &catalog, 2, false, 0);
        state.enemy_vulnerable_until = 1000;
        begin_telegraph(&mut state, catalog.boss(2), 100);

        let outcome = attempt_player_punch(&mut state, &catalog, 150);
        assert_eq!(outcome, PunchOutcome::Landed { damage: 1, knockout: false });
        assert_eq!(state.enemy.state, FighterState::HitStun);
        assert!(state.enemy.pending_punch);

        // HitStun ends at 410; the queued punch goes out on that tick
        state.enemy.advance(410);
        state.player.advance(410);
        assert_eq!(state.enemy.state, FighterState::Idle);
        assert!(resolve_pending_punch(&mut state, &catalog, 410).is_some());
        assert_eq!(state.enemy.state, FighterState::Punching);
        assert!(!state.enemy.pending_punch);
    }

    #[test]
    fn test_hittable_telegraph_hit_cancels_punch() {
        let (mut state, catalog) = setup();
        begin_telegraph(&mut state, catalog.boss(0), 100);

        let outcome = attempt_player_punch(&mut state, &catalog, 150);
        assert_eq!(outcome, PunchOutcome::Landed { damage: 2, knockout: false });
        assert!(!state.enemy.pending_punch);
    }

    #[test]
    fn test_hitstun_enemy_absorbs() {
        let (mut state, catalog) = setup();
        state.enemy_vulnerable_until = 1000;
        state.enemy.set_state(FighterState::HitStun, HIT_STUN_MS, 400);
        let outcome = attempt_player_punch(&mut state, &catalog, 500);
        assert_eq!(outcome, PunchOutcome::Absorbed);
        assert_eq!(state.enemy.hp, 6);
    }

    #[test]
    fn test_enemy_punch_hits_idle_player() {
        let (mut state, catalog) = setup();
        let outcome = attempt_enemy_punch(&mut state, &catalog, 100);
        assert_eq!(outcome, PunchOutcome::Landed { damage: 1, knockout: false });
        assert_eq!(state.player.hp, 9);
        assert_eq!(state.player.state, FighterState::HitStun);
        assert_eq!(state.enemy.state, FighterState::Punching);
    }

    #[test]
    fn test_enemy_punch_evaded_opens_window() {
        let (mut state, catalog) = setup();
        assert!(start_player_dodge(&mut state, DodgeDirection::Right, 90));
        let outcome = attempt_enemy_punch(&mut state, &catalog, 100);
        assert_eq!(outcome, PunchOutcome::Evaded);
        assert_eq!(state.player.hp, 10);
        assert_eq!(state.enemy_vulnerable_until, 100 + 1200);
        assert_eq!(state.enemy.state, FighterState::Punching);
        assert_eq!(state.banner.current(), Some("OPEN!"));
    }

    #[test]
    fn test_enemy_punch_ignored_when_not_idle() {
        let (mut state, catalog) = setup();
        state.enemy.set_state(FighterState::HitStun, HIT_STUN_MS, 0);
        assert_eq!(attempt_enemy_punch(&mut state, &catalog, 10), PunchOutcome::Ignored);
        assert_eq!(state.player.hp, 10);
    }

    #[test]
    fn test_stunned_player_not_hit_twice() {
        let (mut state, catalog) = setup();
        state.player.set_state(FighterState::HitStun, HIT_STUN_MS, 0);
        let outcome = attempt_enemy_punch(&mut state, &catalog, 10);
        assert_eq!(outcome, PunchOutcome::Absorbed);
        assert_eq!(state.player.hp, 10);
    }

    #[test]
    fn test_last_hit_knocks_player_out() {
        let (mut state, catalog) = setup();
        state.player.hp = 1;
        let outcome = attempt_enemy_punch(&mut state, &catalog, 10);
        assert_eq!(outcome, PunchOutcome::Landed { damage: 1, knockout: true });
        assert!(state.player.is_ko());
        assert_eq!(state.outcome, MatchOutcome::Lost);
        assert_eq!(state.banner.current(), Some("YOU LOSE..."));
    }

    #[test]
    fn test_dodge_moves_and_clamps() {
        let (mut state, _) = setup();
        assert!(start_player_dodge(&mut state, DodgeDirection::Left, 0));
        assert_eq!(state.player.x, state.player.home_x - PLAYER_DODGE_OFFSET);
        assert_eq!(state.player.dodge_direction, -1);
        // Busy dodging, second dodge ignored
        assert!(!start_player_dodge(&mut state, DodgeDirection::Right, 10));
        assert_eq!(state.player.dodge_direction, -1);

        state.player.advance(DODGE_MS);
        state.player.home_x = 100;
        assert!(start_player_dodge(&mut state, DodgeDirection::Right, DODGE_MS));
        assert_eq!(state.player.x, clamp_to_ring(120));
    }

    #[test]
    fn test_knockout_advances_boss() {
        let (mut state, catalog) = setup();
        state.enemy.hp = 2;
        state.enemy_vulnerable_until = 1000;
        let outcome = attempt_player_punch(&mut state, &catalog, 100);
        assert_eq!(outcome, PunchOutcome::Landed { damage: 2, knockout: true });
        assert_eq!(state.boss_index, 1);
        assert_eq!(state.enemy.hp, 8);
        assert!(state.events.contains(CombatSignal::BossDown { index: 0 }));
    }
}
