//! Match session - state, progression and the controller that owns them

pub mod controller;
pub mod match_state;
pub mod progression;

pub use controller::SessionController;
pub use match_state::{Banner, MatchOutcome, MatchState};
pub use progression::{advance_or_win, reset_match, start_boss};
