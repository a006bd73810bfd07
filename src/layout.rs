//! Projection of a maze onto render-space bodies
//!
//! Pure data transformation: every closed wall becomes a thin static
//! rectangle, open walls emit nothing. The arena is framed by four boundary
//! walls, the goal sits in the far corner and the ball starts in cell (0, 0).
//! Positions are body centres, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::maze::Maze;

/// Label carried by every body; collisions are classified by label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    /// Arena frame (never released)
    Boundary,
    /// Inner maze wall
    Wall,
    Goal,
    Ball,
}

impl BodyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLabel::Boundary => "boundary",
            BodyLabel::Wall => "wall",
            BodyLabel::Goal => "goal",
            BodyLabel::Ball => "ball",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "boundary" => Some(BodyLabel::Boundary),
            "wall" => Some(BodyLabel::Wall),
            "goal" => Some(BodyLabel::Goal),
            "ball" => Some(BodyLabel::Ball),
            _ => None,
        }
    }
}

/// A body placement command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodySpec {
    StaticRect {
        center: Vec2,
        size: Vec2,
        label: BodyLabel,
    },
    DynamicCircle {
        center: Vec2,
        radius: f32,
        label: BodyLabel,
    },
}

impl BodySpec {
    pub fn label(&self) -> BodyLabel {
        match *self {
            BodySpec::StaticRect { label, .. } | BodySpec::DynamicCircle { label, .. } => label,
        }
    }

    pub fn center(&self) -> Vec2 {
        match *self {
            BodySpec::StaticRect { center, .. } | BodySpec::DynamicCircle { center, .. } => center,
        }
    }
}

/// Ordered body placement commands for one maze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Arena size in render units
    pub arena: Vec2,
    /// Size of one cell
    pub unit: Vec2,
    /// Boundaries, horizontal walls, vertical walls, goal, ball (in that order)
    pub bodies: Vec<BodySpec>,
}

impl Layout {
    /// Lay out `maze` over an arena of the given size
    pub fn project(maze: &Maze, arena: Vec2) -> Self {
        let unit = Vec2::new(arena.x / maze.cols() as f32, arena.y / maze.rows() as f32);
        let thickness = unit.x * WALL_THICKNESS_RATIO;

        let closed_walls = maze.verticals().iter().filter(|&(_, _, open)| !open).count()
            + maze.horizontals().iter().filter(|&(_, _, open)| !open).count();
        let mut bodies = Vec::with_capacity(closed_walls + 6);

        bodies.extend(boundaries(arena));

        for (row, col, open) in maze.horizontals().iter() {
            if open {
                continue;
            }
            bodies.push(BodySpec::StaticRect {
                center: Vec2::new(
                    col as f32 * unit.x + unit.x / 2.0,
                    row as f32 * unit.y + unit.y,
                ),
                size: Vec2::new(unit.x, thickness),
                label: BodyLabel::Wall,
            });
        }

        for (row, col, open) in maze.verticals().iter() {
            if open {
                continue;
            }
            bodies.push(BodySpec::StaticRect {
                center: Vec2::new(
                    col as f32 * unit.x + unit.x,
                    row as f32 * unit.y + unit.y / 2.0,
                ),
                size: Vec2::new(thickness, unit.y),
                label: BodyLabel::Wall,
            });
        }

        bodies.push(BodySpec::StaticRect {
            center: arena - unit / 2.0,
            size: unit * GOAL_SCALE,
            label: BodyLabel::Goal,
        });

        bodies.push(BodySpec::DynamicCircle {
            center: unit / 2.0,
            radius: unit.x.min(unit.y) / BALL_RADIUS_DIVISOR,
            label: BodyLabel::Ball,
        });

        log::debug!(
            "Projected {} bodies ({} walls) onto {}x{} arena",
            bodies.len(),
            closed_walls,
            arena.x,
            arena.y
        );

        Self {
            arena,
            unit,
            bodies,
        }
    }

    /// Number of inner wall bodies
    pub fn wall_count(&self) -> usize {
        self.bodies
            .iter()
            .filter(|b| b.label() == BodyLabel::Wall)
            .count()
    }

    /// Velocity added per move command
    pub fn impulse(&self) -> f32 {
        self.unit.x * IMPULSE_RATIO
    }
}

/// Top, bottom, left and right frame of the arena
fn boundaries(arena: Vec2) -> [BodySpec; 4] {
    let (w, h) = (arena.x, arena.y);
    let rect = |x, y, sw, sh| BodySpec::StaticRect {
        center: Vec2::new(x, y),
        size: Vec2::new(sw, sh),
        label: BodyLabel::Boundary,
    };
    [
        rect(w / 2.0, 0.0, w, BOUNDARY_THICKNESS),
        rect(w / 2.0, h, w, BOUNDARY_THICKNESS),
        rect(0.0, h / 2.0, BOUNDARY_THICKNESS, h),
        rect(w, h / 2.0, BOUNDARY_THICKNESS, h),
    ]
}
