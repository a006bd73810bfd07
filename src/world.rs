//! Physics/render collaborator interface
//!
//! The game core never simulates anything. It asks a `World` to create
//! bodies, nudges the ball's velocity and flips walls to dynamic on a win.
//! The step loop and collision detection belong to the world; the host
//! forwards collision-start pairs to `GameSession::on_collision`.

use glam::Vec2;

use crate::layout::{BodyLabel, BodySpec};

/// Operations the game core needs from a physics engine
pub trait World {
    /// Opaque body handle
    type Handle: Copy;

    fn create_static_rect(&mut self, center: Vec2, size: Vec2, label: BodyLabel) -> Self::Handle;
    fn create_dynamic_circle(&mut self, center: Vec2, radius: f32, label: BodyLabel) -> Self::Handle;
    fn velocity(&self, handle: Self::Handle) -> Vec2;
    fn set_velocity(&mut self, handle: Self::Handle, velocity: Vec2);
    /// Let a static body move freely
    fn set_non_static(&mut self, handle: Self::Handle);
    fn set_gravity(&mut self, gravity: Vec2);

    /// Create the body described by `spec`
    fn spawn(&mut self, spec: &BodySpec) -> Self::Handle {
        match *spec {
            BodySpec::StaticRect {
                center,
                size,
                label,
            } => self.create_static_rect(center, size, label),
            BodySpec::DynamicCircle {
                center,
                radius,
                label,
            } => self.create_dynamic_circle(center, radius, label),
        }
    }
}

/// A body tracked by `HeadlessWorld`
#[derive(Debug, Clone)]
pub struct HeadlessBody {
    pub spec: BodySpec,
    pub is_static: bool,
    pub velocity: Vec2,
}

/// World without a simulation: records bodies and the commands applied to them
#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    pub bodies: Vec<HeadlessBody>,
    pub gravity: Vec2,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bodies carrying `label`
    pub fn with_label(&self, label: BodyLabel) -> impl Iterator<Item = &HeadlessBody> {
        self.bodies.iter().filter(move |b| b.spec.label() == label)
    }

    fn push(&mut self, spec: BodySpec, is_static: bool) -> usize {
        self.bodies.push(HeadlessBody {
            spec,
            is_static,
            velocity: Vec2::ZERO,
        });
        self.bodies.len() - 1
    }
}

impl World for HeadlessWorld {
    type Handle = usize;

    fn create_static_rect(&mut self, center: Vec2, size: Vec2, label: BodyLabel) -> usize {
        self.push(
            BodySpec::StaticRect {
                center,
                size,
                label,
            },
            true,
        )
    }

    fn create_dynamic_circle(&mut self, center: Vec2, radius: f32, label: BodyLabel) -> usize {
        self.push(
            BodySpec::DynamicCircle {
                center,
                radius,
                label,
            },
            false,
        )
    }

    fn velocity(&self, handle: usize) -> Vec2 {
        self.bodies.get(handle).map(|b| b.velocity).unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(&mut self, handle: usize, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.velocity = velocity;
        }
    }

    fn set_non_static(&mut self, handle: usize) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.is_static = false;
        }
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }
}
