//! The play/win state machine
//!
//! `Idle --start--> Playing --goal/ball contact--> Won`. Every other
//! event in every other phase is a silent no-op so duplicate or late
//! events from the host loop are harmless.

use glam::Vec2;

use super::state::{Command, GamePhase, WinReport};
use crate::consts::RELEASE_GRAVITY;
use crate::layout::{BodyLabel, Layout};
use crate::maze::{Direction, Maze};
use crate::persistence::BestTimeStore;
use crate::platform::{Clock, elapsed_secs};
use crate::world::World;

/// Whether a contact pair is the ball reaching the goal (either order)
pub fn is_goal_contact(a: BodyLabel, b: BodyLabel) -> bool {
    matches!(
        (a, b),
        (BodyLabel::Goal, BodyLabel::Ball) | (BodyLabel::Ball, BodyLabel::Goal)
    )
}

/// One game over one maze
///
/// Owns its collaborators; dropping the session abandons the game.
pub struct GameSession<W: World, S: BestTimeStore, C: Clock> {
    layout: Layout,
    world: W,
    store: S,
    clock: C,
    /// Handles of inner walls (released on win)
    walls: Vec<W::Handle>,
    ball: Option<W::Handle>,
    phase: GamePhase,
    started_at_ms: Option<f64>,
    best_time_secs: Option<u64>,
}

impl<W: World, S: BestTimeStore, C: Clock> GameSession<W, S, C> {
    /// Build the maze bodies in `world` and read the stored best time
    pub fn new(maze: &Maze, arena: Vec2, mut world: W, store: S, clock: C) -> Self {
        let layout = Layout::project(maze, arena);
        world.set_gravity(Vec2::ZERO);

        let mut walls = Vec::with_capacity(layout.wall_count());
        let mut ball = None;
        for spec in &layout.bodies {
            let handle = world.spawn(spec);
            match spec.label() {
                BodyLabel::Wall => walls.push(handle),
                BodyLabel::Ball => ball = Some(handle),
                BodyLabel::Boundary | BodyLabel::Goal => {}
            }
        }

        let best_time_secs = store.read_best_time();
        log::info!(
            "New {}x{} session, {} walls, best time {:?}",
            maze.rows(),
            maze.cols(),
            walls.len(),
            best_time_secs
        );

        Self {
            layout,
            world,
            store,
            clock,
            walls,
            ball,
            phase: GamePhase::Idle,
            started_at_ms: None,
            best_time_secs,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Best time known to this session (stored value, or this run's if better)
    pub fn best_time_secs(&self) -> Option<u64> {
        self.best_time_secs
    }

    pub fn started_at_ms(&self) -> Option<f64> {
        self.started_at_ms
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start the timer
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.started_at_ms = Some(self.clock.now_ms());
        self.phase = GamePhase::Playing;
        log::info!("Session started");
    }

    /// Dispatch a host command
    pub fn on_command(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Move(direction) => self.apply_impulse(direction),
        }
    }

    /// Nudge the ball's velocity one step in `direction`
    pub fn apply_impulse(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(ball) = self.ball else {
            return;
        };

        let step = self.layout.impulse();
        let delta = match direction {
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Right => Vec2::new(step, 0.0),
            Direction::Down => Vec2::new(0.0, step),
            Direction::Left => Vec2::new(-step, 0.0),
        };
        let velocity = self.world.velocity(ball) + delta;
        self.world.set_velocity(ball, velocity);
    }

    /// Handle one collision-start pair
    ///
    /// Returns the win report when this contact finishes the game.
    pub fn on_collision(&mut self, a: BodyLabel, b: BodyLabel) -> Option<WinReport> {
        if self.phase != GamePhase::Playing || !is_goal_contact(a, b) {
            return None;
        }
        let started_at = self.started_at_ms?;

        // Read the clock once; comparison, storage and display share this value
        let elapsed = elapsed_secs(started_at, self.clock.now_ms());
        let new_record = self.best_time_secs.is_none_or(|best| elapsed < best);
        if new_record {
            self.store.write_best_time(elapsed);
            self.best_time_secs = Some(elapsed);
        }

        self.release_walls();
        self.phase = GamePhase::Won;

        let report = WinReport {
            elapsed_secs: elapsed,
            best_secs: self.best_time_secs.unwrap_or(elapsed),
            new_record,
        };
        log::info!("Goal reached in {elapsed}s (new record: {new_record})");
        Some(report)
    }

    /// Handle every pair of one collision-start event
    pub fn on_collision_pairs<I>(&mut self, pairs: I) -> Option<WinReport>
    where
        I: IntoIterator<Item = (BodyLabel, BodyLabel)>,
    {
        pairs
            .into_iter()
            .fold(None, |won, (a, b)| won.or(self.on_collision(a, b)))
    }

    /// Let the maze collapse: walls go dynamic and gravity switches on
    fn release_walls(&mut self) {
        for &wall in &self.walls {
            self.world.set_non_static(wall);
        }
        self.world.set_gravity(Vec2::new(0.0, RELEASE_GRAVITY));
        log::debug!("Released {} walls", self.walls.len());
    }
}
