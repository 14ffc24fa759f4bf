//! Axis-aligned cuboid bodies and their per-tick integration
//!
//! Every object in the game (player, ground, enemies, bullets) is a `Body`.
//! What a body does each tick is chosen by its `BodyKind` rather than by
//! a type hierarchy.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::overlaps;
use crate::consts::{BOUNCE_FACTOR, FORWARD_ACCELERATION, GRAVITY};

/// Rejected box dimensions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    #[error("box {axis} must be positive, got {value}")]
    NonPositiveSize { axis: &'static str, value: f32 },
    #[error("box {axis} must be finite, got {value}")]
    NonFiniteSize { axis: &'static str, value: f32 },
}

/// What a body is in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Player,
    Ground,
    Enemy,
    Bullet,
}

/// Per-kind movement rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Behavior {
    /// Falls under gravity and bounces off the ground
    pub gravity: bool,
    /// Speeds up along +z every tick
    pub forward_acceleration: bool,
    /// Moves at all
    pub moves: bool,
}

impl BodyKind {
    pub const fn behavior(self) -> Behavior {
        match self {
            BodyKind::Player => Behavior {
                gravity: true,
                forward_acceleration: false,
                moves: true,
            },
            BodyKind::Ground => Behavior {
                gravity: false,
                forward_acceleration: false,
                moves: false,
            },
            BodyKind::Enemy => Behavior {
                gravity: true,
                forward_acceleration: true,
                moves: true,
            },
            BodyKind::Bullet => Behavior {
                gravity: false,
                forward_acceleration: false,
                moves: true,
            },
        }
    }
}

/// Face coordinates of a box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    /// +z face (toward the camera)
    pub front: f32,
    /// -z face
    pub back: f32,
}

impl Bounds {
    pub fn of(position: Vec3, size: Vec3) -> Self {
        Self {
            left: position.x - size.x / 2.0,
            right: position.x + size.x / 2.0,
            bottom: position.y - size.y / 2.0,
            top: position.y + size.y / 2.0,
            front: position.z + size.z / 2.0,
            back: position.z - size.z / 2.0,
        }
    }
}

/// Check that every dimension of a box is a positive finite number
pub fn validate_size(size: Vec3) -> Result<(), BodyError> {
    for (axis, value) in [("width", size.x), ("height", size.y), ("depth", size.z)] {
        if !value.is_finite() {
            return Err(BodyError::NonFiniteSize { axis, value });
        }
        if value <= 0.0 {
            return Err(BodyError::NonPositiveSize { axis, value });
        }
    }
    Ok(())
}

/// A positioned, sized, axis-aligned box with velocity
///
/// `position` is only reachable through methods that also refresh the cached
/// faces, so `bounds()` always matches `position ± size / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub kind: BodyKind,
    size: Vec3,
    position: Vec3,
    pub velocity: Vec3,
    /// Added to `velocity.y` every tick for kinds that fall
    pub gravity: f32,
    /// Added to `velocity.z` every tick for kinds that accelerate forward
    pub forward_acceleration: f32,
    /// Fraction of vertical speed kept on a ground bounce
    pub bounce: f32,
    bounds: Bounds,
}

impl Body {
    /// Create a body at rest. Fails on non-positive or non-finite dimensions.
    pub fn new(kind: BodyKind, size: Vec3, position: Vec3) -> Result<Self, BodyError> {
        validate_size(size)?;
        Ok(Self {
            kind,
            size,
            position,
            velocity: Vec3::ZERO,
            gravity: GRAVITY,
            forward_acceleration: FORWARD_ACCELERATION,
            bounce: BOUNCE_FACTOR,
            bounds: Bounds::of(position, size),
        })
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_forward_acceleration(mut self, acceleration: f32) -> Self {
        self.forward_acceleration = acceleration;
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    /// Copy of this body moved to `position` (used to stamp out enemies and bullets)
    pub fn spawned_at(&self, position: Vec3) -> Self {
        let mut body = self.clone();
        body.set_position(position);
        body
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn uses_forward_acceleration(&self) -> bool {
        self.kind.behavior().forward_acceleration
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_bounds();
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.update_bounds();
    }

    /// Recompute the six faces from the current position
    pub fn update_bounds(&mut self) {
        self.bounds = Bounds::of(self.position, self.size);
    }

    /// Advance one tick according to this body's kind
    pub fn advance(&mut self, ground: &Body) {
        let behavior = self.kind.behavior();
        if !behavior.moves {
            return;
        }
        if behavior.gravity {
            self.integrate(ground);
        } else {
            self.drift();
        }
    }

    /// Gravity step against `ground`
    ///
    /// Horizontal motion is always applied; only the vertical displacement is
    /// withheld when the look-ahead test says the body would reach the ground,
    /// in which case the vertical speed is damped and inverted instead.
    pub fn integrate(&mut self, ground: &Body) {
        if self.uses_forward_acceleration() {
            self.velocity.z += self.forward_acceleration;
        }

        self.position.x += self.velocity.x;
        self.position.z += self.velocity.z;
        self.update_bounds();

        self.velocity.y += self.gravity;

        if overlaps(self, ground) {
            self.velocity.y = -(self.velocity.y * self.bounce);
        } else {
            self.position.y += self.velocity.y;
        }

        self.update_bounds();
    }

    /// Straight-line motion, ignoring gravity and ground
    pub fn drift(&mut self) {
        self.translate(self.velocity);
    }
}
