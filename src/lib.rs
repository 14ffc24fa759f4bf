//! Avoid and Shoot - a cuboid arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (bodies, collisions, spawning, scoring)
//! - `input`: Key state tracking with edge-triggered one-shot actions
//! - `session`: Start screen / game screen round lifecycle
//! - `renderer`: Read-only instance data for whatever draws the boxes
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{Controls, Key};
pub use session::{Screen, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration applied to every falling body, per tick
    pub const GRAVITY: f32 = -0.005;
    /// Fraction of vertical speed kept (and inverted) on a ground bounce
    pub const BOUNCE_FACTOR: f32 = 0.5;
    /// Per-tick z velocity increment for bodies using forward acceleration
    pub const FORWARD_ACCELERATION: f32 = 0.0001;

    /// Player horizontal speed per axis while a move key is held
    pub const PLAYER_SPEED: f32 = 0.05;
    /// Player starts falling onto the ground at this vertical speed
    pub const PLAYER_START_VELOCITY_Y: f32 = -0.05;
    /// Vertical speed set by a jump
    pub const JUMP_VELOCITY: f32 = 0.1;

    /// Bullets travel toward -z at this speed
    pub const BULLET_SPEED: f32 = 0.2;
    pub const BULLET_SIZE: f32 = 0.1;
    /// Bullets spawn this far in front (-z) of the player
    pub const BULLET_SPAWN_OFFSET: f32 = 1.0;

    /// Ground slab
    pub const GROUND_WIDTH: f32 = 10.0;
    pub const GROUND_HEIGHT: f32 = 0.5;
    pub const GROUND_DEPTH: f32 = 50.0;
    pub const GROUND_Y: f32 = -2.0;

    /// Enemies spawn at x in [-ENEMY_SPAWN_HALF_WIDTH, ENEMY_SPAWN_HALF_WIDTH)
    pub const ENEMY_SPAWN_HALF_WIDTH: f32 = 5.0;
    pub const ENEMY_SPAWN_Z: f32 = -20.0;
    pub const ENEMY_START_VELOCITY_Z: f32 = 0.005;

    /// Spawn scheduling (in ticks)
    pub const SPAWN_INTERVAL_START: u32 = 200;
    pub const SPAWN_INTERVAL_STEP: u32 = 20;
    pub const SPAWN_INTERVAL_MIN: u32 = 20;

    pub const SCORE_PER_KILL: u32 = 10;
}
