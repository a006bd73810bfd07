//! Marble Maze - roll a ball through a randomly generated perfect maze
//!
//! Core modules:
//! - `maze`: Perfect-maze generation (randomized recursive backtracker)
//! - `layout`: Projection of a maze onto render-space bodies
//! - `session`: Play/win state machine, timer and best-time tracking
//! - `world`: Physics/render collaborator interface plus a headless backend
//! - `persistence`: Best-time storage (LocalStorage on web, JSON file on native)
//! - `platform`: Browser/native platform abstraction (clock)
//! - `settings`: Grid size and arena preferences

pub mod error;
pub mod layout;
pub mod maze;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod world;

pub use error::{MazeError, Result};
pub use layout::{BodyLabel, BodySpec, Layout};
pub use maze::{Dimensions, Maze, RandomSource, WallGrid};
pub use session::{Command, Direction, GamePhase, GameSession, WinReport};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default number of cells across (the range slider's starting value)
    pub const DEFAULT_GRID_SIZE: u32 = 10;
    /// Rows are this fraction of the column count (3/5)
    pub const ROWS_PER_COL_NUM: u32 = 3;
    pub const ROWS_PER_COL_DEN: u32 = 5;

    /// Default arena size in render units
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Thickness of the four walls enclosing the arena
    pub const BOUNDARY_THICKNESS: f32 = 10.0;
    /// Inner wall thickness as a fraction of the cell width
    pub const WALL_THICKNESS_RATIO: f32 = 0.1;
    /// Goal marker size as a fraction of the cell
    pub const GOAL_SCALE: f32 = 0.8;
    /// Ball radius = smaller cell side / this
    pub const BALL_RADIUS_DIVISOR: f32 = 3.0;

    /// Velocity nudge per move command, as a fraction of the cell width
    pub const IMPULSE_RATIO: f32 = 0.05;
    /// Gravity applied once the maze is released
    pub const RELEASE_GRAVITY: f32 = 1.0;
}
