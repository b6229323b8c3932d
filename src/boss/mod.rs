//! Boss roster - the three opponents fought in sequence
//!
//! Bosses differ only in data. There is no per-boss code path.

pub mod catalog;

pub use catalog::{BossCatalog, BossDefinition, BOSS_COUNT, LAST_BOSS_INDEX};
