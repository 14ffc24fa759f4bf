//! Round state and core simulation types
//!
//! A `Round` owns everything one game needs: the player, the ground, the
//! entity registry, the spawn schedule, and the seeded RNG.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyError, BodyKind};
use super::registry::EntityRegistry;
use super::spawn::SpawnScheduler;
use crate::tuning::{Tuning, TuningError};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    Running,
    /// Player was hit. Terminal.
    Over,
}

/// Debounced key state for a single tick
///
/// `shoot` and `jump` are one-shot: the tick that consumes them clears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub move_forward: bool,
    pub move_backward: bool,
    pub shoot: bool,
    pub jump: bool,
}

/// Per-round counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub score: u32,
    pub frame_count: u64,
    pub spawner: SpawnScheduler,
    pub input: InputState,
    pub phase: RoundPhase,
}

impl SimulationState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            frame_count: 0,
            spawner: SpawnScheduler::from_tuning(tuning),
            input: InputState::default(),
            phase: RoundPhase::Running,
        }
    }

    pub fn spawn_interval(&self) -> u32 {
        self.spawner.interval()
    }

    pub fn is_round_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }
}

fn size_error(field: &'static str) -> impl Fn(BodyError) -> TuningError {
    move |source| TuningError::Size { field, source }
}

/// One game from start until the player is hit
#[derive(Debug, Clone)]
pub struct Round {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub state: SimulationState,
    pub player: Body,
    pub ground: Body,
    pub registry: EntityRegistry,
    enemy_template: Body,
    bullet_template: Body,
    pub(crate) rng: Pcg32,
}

impl Round {
    /// Fresh round: score 0, frame 0, full spawn interval, no enemies or bullets
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        let player = Body::new(BodyKind::Player, tuning.player_size, tuning.player_start)
            .map_err(size_error("player_size"))?
            .with_velocity(Vec3::new(0.0, tuning.player_start_velocity_y, 0.0));
        let ground = Body::new(BodyKind::Ground, tuning.ground_size, tuning.ground_position)
            .map_err(size_error("ground_size"))?;
        let enemy_template = Body::new(BodyKind::Enemy, tuning.enemy_size, Vec3::ZERO)
            .map_err(size_error("enemy_size"))?
            .with_velocity(Vec3::new(0.0, 0.0, tuning.enemy_start_velocity_z));
        let bullet_size = Vec3::splat(tuning.bullet_size);
        let bullet_template = Body::new(BodyKind::Bullet, bullet_size, Vec3::ZERO)
            .map_err(size_error("bullet_size"))?
            .with_velocity(Vec3::new(0.0, 0.0, -tuning.bullet_speed));

        let [player, ground, enemy_template, bullet_template] =
            [player, ground, enemy_template, bullet_template].map(|body| {
                body.with_gravity(tuning.gravity)
                    .with_bounce(tuning.bounce_factor)
                    .with_forward_acceleration(tuning.forward_acceleration)
            });

        log::info!("Round started with seed: {}", seed);

        Ok(Self {
            seed,
            state: SimulationState::new(&tuning),
            tuning,
            player,
            ground,
            registry: EntityRegistry::new(),
            enemy_template,
            bullet_template,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_round_over()
    }

    /// A new enemy at `position`, moving and accelerating toward the player
    pub fn make_enemy(&self, position: Vec3) -> Body {
        self.enemy_template.spawned_at(position)
    }

    /// A new bullet at `position`, flying toward -z
    pub fn make_bullet(&self, position: Vec3) -> Body {
        self.bullet_template.spawned_at(position)
    }
}
