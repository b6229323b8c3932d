//! Combat constants - ring geometry and timing in one place
//!
//! Coordinates are ring units (the 128x64 screen grid). Times are milliseconds.

// Screen and ring layout
pub const SCREEN_W: i32 = 128;
pub const SCREEN_H: i32 = 64;
pub const RING_TOP: i32 = 10;
pub const RING_BOTTOM: i32 = 58;
pub const RING_LEFT: i32 = 6;
pub const RING_RIGHT: i32 = 121;

// Fighter sprite box
pub const FIGHTER_W: i32 = 16;
pub const FIGHTER_H: i32 = 24;

pub const PLAYER_Y: i32 = RING_BOTTOM - FIGHTER_H - 2;
pub const ENEMY_Y: i32 = RING_TOP + 6;
pub const HOME_X: i32 = SCREEN_W / 2 - FIGHTER_W / 2;

// Horizontal limits for a fighter's left edge
pub const FIGHTER_MIN_X: i32 = RING_LEFT + 3;
pub const FIGHTER_MAX_X: i32 = RING_RIGHT - 3 - FIGHTER_W;

// Time
pub const FRAME_MS: u64 = 33;
pub const HIT_STUN_MS: u64 = 260;
pub const DODGE_MS: u64 = 220;
pub const FLASH_INTERVAL_MS: u64 = 80;
/// First flash toggle after a fighter is reset
pub const BOSS_START_FLASH_DELAY_MS: u64 = 60;

// Movement
pub const PLAYER_DODGE_OFFSET: i32 = 20;
pub const ENEMY_SHUFFLE_RANGE: i32 = 5;
pub const ENEMY_SHUFFLE_STEP: i32 = 1;

// Damage and reach
pub const MAX_HP: u8 = 10;
pub const PUNCH_RANGE: i32 = 16;
pub const NEAR_RANGE_SLACK: i32 = 2;
pub const ENEMY_PUNCH_DAMAGE: u8 = 1;

// Enemy AI scheduling
pub const SHUFFLE_BASE_MS: u64 = 350;
pub const SHUFFLE_JITTER_MS: u64 = 400;
pub const SHUFFLE_ONE_IN: u64 = 4;
pub const PASSIVE_RETRY_BASE_MS: u64 = 300;
pub const PASSIVE_RETRY_JITTER_MS: u64 = 500;
pub const BOSS_START_ACTION_DELAY_MS: u64 = 700;
pub const BOSS_START_SHUFFLE_DELAY_MS: u64 = 450;

/// Clamp a fighter's left edge into the ring
pub fn clamp_to_ring(x: i32) -> i32 {
    x.clamp(FIGHTER_MIN_X, FIGHTER_MAX_X)
}
