//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::{Behavior, Body, BodyError, BodyKind, Bounds};
pub use collision::overlaps;
pub use registry::EntityRegistry;
pub use spawn::{SpawnScheduler, enemy_spawn_position};
pub use state::{InputState, Round, RoundPhase, SimulationState};
pub use tick::{RoundListener, TickReport, steer, tick};
