//! Boss tuning loaded from TOML
//!
//! Each boss is a flat record of timings, AI odds and damage. The built-in
//! table matches `data/bosses.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, RingError};

pub const BOSS_COUNT: usize = 3;
pub const LAST_BOSS_INDEX: usize = BOSS_COUNT - 1;

/// Tuning for a single opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossDefinition {
    pub name: String,
    /// Starting (and maximum) HP
    pub hp: u8,
    /// Wind-up before a punch lands
    pub telegraph_ms: u64,
    /// How long a punch occupies its thrower, for both fighters
    pub punch_ms: u64,
    /// Open window after the player dodges a punch
    pub vulnerable_ms: u64,
    /// Fixed part of the pause after a telegraph
    pub ai_base_delay: u64,
    /// Random part of the pause after a telegraph, `[0, ai_rand_delay)`
    pub ai_rand_delay: u64,
    /// Percent chance to punch when within reach
    pub punch_chance_near: u8,
    /// Percent chance to punch from further away
    pub punch_chance_far: u8,
    /// Damage the player deals per clean hit
    pub player_damage: u8,
    /// Whether a punch during the telegraph connects
    pub telegraph_hittable: bool,
}

impl BossDefinition {
    pub fn easy() -> Self {
        Self {
            name: "B1 EASY".to_string(),
            hp: 6,
            telegraph_ms: 700,
            punch_ms: 320,
            vulnerable_ms: 1200,
            ai_base_delay: 900,
            ai_rand_delay: 800,
            punch_chance_near: 40,
            punch_chance_far: 8,
            player_damage: 2,
            telegraph_hittable: true,
        }
    }

    pub fn medium() -> Self {
        Self {
            name: "B2 MED".to_string(),
            hp: 8,
            telegraph_ms: 520,
            punch_ms: 260,
            vulnerable_ms: 900,
            ai_base_delay: 700,
            ai_rand_delay: 650,
            punch_chance_near: 55,
            punch_chance_far: 14,
            player_damage: 2,
            telegraph_hittable: true,
        }
    }

    pub fn hard() -> Self {
        Self {
            name: "B3 HARD".to_string(),
            hp: 10,
            telegraph_ms: 260,
            punch_ms: 220,
            vulnerable_ms: 520,
            ai_base_delay: 550,
            ai_rand_delay: 500,
            punch_chance_near: 78,
            punch_chance_far: 22,
            player_damage: 1,
            telegraph_hittable: false,
        }
    }

    /// Punch chance for the given range band
    pub fn punch_chance(&self, near: bool) -> u8 {
        if near {
            self.punch_chance_near
        } else {
            self.punch_chance_far
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.hp == 0 {
            return Err(format!("{}: hp must be positive", self.name));
        }
        if self.punch_chance_near > 100 || self.punch_chance_far > 100 {
            return Err(format!("{}: punch chances are percentages (0-100)", self.name));
        }
        if self.player_damage == 0 {
            return Err(format!("{}: player_damage must be positive", self.name));
        }
        // Zero would mean a state that never expires
        if self.telegraph_ms == 0 || self.punch_ms == 0 {
            return Err(format!("{}: telegraph_ms and punch_ms must be positive", self.name));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    boss: Vec<BossDefinition>,
}

/// The ordered boss roster
#[derive(Debug, Clone, PartialEq)]
pub struct BossCatalog {
    bosses: Vec<BossDefinition>,
}

impl Default for BossCatalog {
    fn default() -> Self {
        Self {
            bosses: vec![
                BossDefinition::easy(),
                BossDefinition::medium(),
                BossDefinition::hard(),
            ],
        }
    }
}

impl BossCatalog {
    /// Build a catalog from exactly `BOSS_COUNT` valid records
    pub fn new(bosses: Vec<BossDefinition>) -> Result<Self> {
        if bosses.len() != BOSS_COUNT {
            return Err(RingError::InvalidCatalog(format!(
                "expected {} bosses, found {}",
                BOSS_COUNT,
                bosses.len()
            )));
        }
        for boss in &bosses {
            boss.validate().map_err(RingError::InvalidCatalog)?;
        }
        Ok(Self { bosses })
    }

    /// Load the roster from a TOML file of `[[boss]]` tables
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)?;
        let catalog = Self::new(file.boss)?;
        tracing::debug!(bosses = catalog.bosses.len(), "loaded boss catalog");
        Ok(catalog)
    }

    /// Boss at `index`, clamped to the final boss
    pub fn boss(&self, index: usize) -> &BossDefinition {
        &self.bosses[index.min(LAST_BOSS_INDEX)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BossDefinition> {
        self.bosses.iter()
    }

    pub fn len(&self) -> usize {
        self.bosses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bosses.is_empty()
    }
}
