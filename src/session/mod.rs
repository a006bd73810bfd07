//! Game session
//!
//! All gameplay decisions live here. The session never simulates physics
//! and never blocks:
//! - Collaborators (world, storage, clock) are injected
//! - Events arrive as plain method calls from the host loop
//! - Out-of-order events are ignored, not errors

pub mod game;
pub mod state;

pub use crate::maze::Direction;
pub use game::{GameSession, is_goal_contact};
pub use state::{Command, GamePhase, WinReport};
