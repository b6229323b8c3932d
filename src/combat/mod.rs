pub mod constants;
pub mod events;
pub mod resolution;
pub mod state;

pub use events::{CombatSignal, MatchEvent, MatchEventLog};
pub use resolution::{
    attempt_enemy_punch, attempt_player_punch, enemy_is_hittable, start_player_dodge,
    PunchOutcome,
};
pub use state::{Fighter, FighterState};
