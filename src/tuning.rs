//! Data-driven game balance
//!
//! Every number the simulation uses lives here. `Tuning::default()` is the
//! stock game; a JSON file can override any subset of fields.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::body::{BodyError, validate_size};

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("could not parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {source}")]
    Size {
        field: &'static str,
        #[source]
        source: BodyError,
    },
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    pub gravity: f32,
    pub bounce_factor: f32,
    pub forward_acceleration: f32,

    // === Player ===
    pub player_size: Vec3,
    pub player_start: Vec3,
    pub player_start_velocity_y: f32,
    pub player_speed: f32,
    pub jump_velocity: f32,

    // === Ground ===
    pub ground_size: Vec3,
    pub ground_position: Vec3,

    // === Bullets ===
    pub bullet_size: f32,
    pub bullet_speed: f32,
    pub bullet_spawn_offset: f32,

    // === Enemies ===
    pub enemy_size: Vec3,
    pub enemy_spawn_half_width: f32,
    pub enemy_spawn_y: f32,
    pub enemy_spawn_z: f32,
    pub enemy_start_velocity_z: f32,

    // === Spawning ===
    pub spawn_interval_start: u32,
    pub spawn_interval_step: u32,
    pub spawn_interval_min: u32,

    pub score_per_kill: u32,
    /// Remove bullets and enemies farther than this (along z) from the player.
    /// `None` keeps everything alive for the whole round. Must exceed the
    /// enemy spawn distance, otherwise every enemy is removed as it spawns.
    pub despawn_distance: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounce_factor: BOUNCE_FACTOR,
            forward_acceleration: FORWARD_ACCELERATION,

            player_size: Vec3::ONE,
            player_start: Vec3::ZERO,
            player_start_velocity_y: PLAYER_START_VELOCITY_Y,
            player_speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,

            ground_size: Vec3::new(GROUND_WIDTH, GROUND_HEIGHT, GROUND_DEPTH),
            ground_position: Vec3::new(0.0, GROUND_Y, 0.0),

            bullet_size: BULLET_SIZE,
            bullet_speed: BULLET_SPEED,
            bullet_spawn_offset: BULLET_SPAWN_OFFSET,

            enemy_size: Vec3::ONE,
            enemy_spawn_half_width: ENEMY_SPAWN_HALF_WIDTH,
            enemy_spawn_y: 0.0,
            enemy_spawn_z: ENEMY_SPAWN_Z,
            enemy_start_velocity_z: ENEMY_START_VELOCITY_Z,

            spawn_interval_start: SPAWN_INTERVAL_START,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            spawn_interval_min: SPAWN_INTERVAL_MIN,

            score_per_kill: SCORE_PER_KILL,
            despawn_distance: None,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let sizes = [
            ("player_size", self.player_size),
            ("ground_size", self.ground_size),
            ("enemy_size", self.enemy_size),
            ("bullet_size", Vec3::splat(self.bullet_size)),
        ];
        for (field, size) in sizes {
            validate_size(size).map_err(|source| TuningError::Size { field, source })?;
        }

        if self.spawn_interval_min == 0 {
            return Err(TuningError::Invalid(
                "spawn_interval_min must be at least 1".into(),
            ));
        }
        if self.spawn_interval_start < self.spawn_interval_min {
            return Err(TuningError::Invalid(format!(
                "spawn_interval_start ({}) is below spawn_interval_min ({})",
                self.spawn_interval_start, self.spawn_interval_min
            )));
        }
        if !self.enemy_spawn_half_width.is_finite() || self.enemy_spawn_half_width < 0.0 {
            return Err(TuningError::Invalid(format!(
                "enemy_spawn_half_width must be a non-negative number, got {}",
                self.enemy_spawn_half_width
            )));
        }
        if let Some(distance) = self.despawn_distance.filter(|d| !(*d > 0.0)) {
            return Err(TuningError::Invalid(format!(
                "despawn_distance must be positive, got {distance}"
            )));
        }
        let spawn_distance = (self.enemy_spawn_z - self.player_start.z).abs();
        if let Some(distance) = self.despawn_distance.filter(|d| *d <= spawn_distance) {
            return Err(TuningError::Invalid(format!(
                "despawn_distance ({distance}) must exceed the enemy spawn distance ({spawn_distance})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_interval_start": 100, "score_per_kill": 25 }"#)
            .unwrap();
        assert_eq!(tuning.spawn_interval_start, 100);
        assert_eq!(tuning.score_per_kill, 25);
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.ground_size, Vec3::new(10.0, 0.5, 50.0));
    }

    #[test]
    fn test_json_round_trip() {
        let mut tuning = Tuning::default();
        tuning.despawn_distance = Some(60.0);
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let err = Tuning::from_json(r#"{ "enemy_size": [1.0, -1.0, 1.0] }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Size {
                field: "enemy_size",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "bullet_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Size { field: "bullet_size", .. }));
    }

    #[test]
    fn test_rejects_bad_schedule() {
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_interval_min": 0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_interval_start": 10 }"#),
            Err(TuningError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_despawn_distance() {
        assert!(Tuning::from_json(r#"{ "despawn_distance": 0.0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "despawn_distance": null }"#).is_ok());
    }

    #[test]
    fn test_despawn_distance_must_cover_spawn_point() {
        // Enemies spawn 20 units from the player by default
        assert!(matches!(
            Tuning::from_json(r#"{ "despawn_distance": 10.0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(Tuning::from_json(r#"{ "despawn_distance": 20.0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "despawn_distance": 30.0 }"#).is_ok());
        assert!(
            Tuning::from_json(r#"{ "despawn_distance": 10.0, "enemy_spawn_z": -8.0 }"#).is_ok()
        );
    }
}
