pub mod clock;
pub mod config;
pub mod dice;
pub mod error;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dice::{Dice, ScriptedDice, SeededDice};
