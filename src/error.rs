//! Error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid maze dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimensions { rows: i64, cols: i64 },
}

pub type Result<T> = std::result::Result<T, MazeError>;
