//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Monotonic milliseconds since the host clock started
pub type Timestamp = u64;

/// Which fighter an event concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Direction of a player dodge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DodgeDirection {
    Left,
    Right,
}

impl DodgeDirection {
    /// -1 for left, +1 for right
    pub fn sign(self) -> i8 {
        match self {
            DodgeDirection::Left => -1,
            DodgeDirection::Right => 1,
        }
    }
}

/// Discrete input delivered by the host, once per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    DodgeLeft,
    DodgeRight,
    Punch,
    /// The OK button: restarts a finished match, punches otherwise
    Confirm,
    Exit,
}
