//! Enemy spawn scheduling
//!
//! An enemy appears on every frame that is a multiple of the current spawn
//! interval. Each spawn shortens the interval for the frames that follow,
//! down to a floor.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    interval: u32,
    step: u32,
    floor: u32,
}

impl SpawnScheduler {
    /// `floor` is clamped to at least 1 and `initial` to at least `floor`
    pub fn new(initial: u32, step: u32, floor: u32) -> Self {
        let floor = floor.max(1);
        Self {
            interval: initial.max(floor),
            step,
            floor,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.spawn_interval_start,
            tuning.spawn_interval_step,
            tuning.spawn_interval_min,
        )
    }

    /// Frames between spawns from now on
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns true if an enemy spawns on `frame`, shrinking the interval when it does
    pub fn poll(&mut self, frame: u64) -> bool {
        if frame % u64::from(self.interval) != 0 {
            return false;
        }
        if self.interval > self.floor {
            self.interval = self.interval.saturating_sub(self.step).max(self.floor);
        }
        true
    }
}

/// Where the next enemy appears: random x across the lane, fixed y and z
pub fn enemy_spawn_position(rng: &mut impl Rng, tuning: &Tuning) -> Vec3 {
    let half_width = tuning.enemy_spawn_half_width;
    let x = if half_width > 0.0 {
        rng.random_range(-half_width..half_width)
    } else {
        0.0
    };
    Vec3::new(x, tuning.enemy_spawn_y, tuning.enemy_spawn_z)
}
