//! Decision-making on both sides of the ring
//!
//! - `scheduler` drives the boss: shuffle and punch timers
//! - `bot` stands in for a human player in headless bouts

pub mod bot;
pub mod scheduler;

pub use bot::{BotKind, PlayerBot};
pub use scheduler::{begin_telegraph, resolve_pending_punch};
