//! Keyboard input for the terminal host

pub mod input;

pub use input::{action_for_key, drain_into, spawn_key_reader};
