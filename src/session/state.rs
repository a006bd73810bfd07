//! Session phases, input commands and win results

use serde::{Deserialize, Serialize};

use crate::maze::Direction;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Maze built, waiting for the start command
    Idle,
    /// Timer running, ball accepts move commands
    Playing,
    /// Goal reached; terminal
    Won,
}

/// Input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Move(Direction),
}

impl Command {
    /// Map a keyboard key code (W/D/S/A) to a move command
    pub fn from_key(key_code: u32) -> Option<Self> {
        let direction = match key_code {
            87 => Direction::Up,
            68 => Direction::Right,
            83 => Direction::Down,
            65 => Direction::Left,
            _ => return None,
        };
        Some(Command::Move(direction))
    }
}

/// Outcome of the winning collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinReport {
    /// Completion time, whole seconds
    pub elapsed_secs: u64,
    /// Best time after this run
    pub best_secs: u64,
    /// Whether this run set the best time
    pub new_record: bool,
}
