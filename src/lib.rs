//! Ringside - a three-boss boxing minigame
//!
//! The game core (`combat`, `boss`, `ai`, `session`) is pure and driven by
//! explicit timestamps. `render` and `ui` adapt it to a terminal.

pub mod ai;
pub mod boss;
pub mod combat;
pub mod core;
pub mod render;
pub mod session;
pub mod ui;
