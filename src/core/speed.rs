//! Score-driven speed curve.
//!
//! Speed is measured in ticks per second. It only moves when the score has
//! climbed a full `threshold` past the score of the previous step, so it never
//! regresses between steps.

use super::types::SpeedProfile;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedController {
    profile: SpeedProfile,
    speed: f64,
    last_updated_score: u32,
}

impl SpeedController {
    /// Fresh controller at the profile's base speed.
    pub fn new(profile: SpeedProfile) -> Self {
        Self {
            profile,
            speed: profile.initial_speed,
            last_updated_score: 0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn last_updated_score(&self) -> u32 {
        self.last_updated_score
    }

    /// Recompute the speed for `score` and return it.
    pub fn update(&mut self, score: u32) -> f64 {
        let threshold = self.profile.threshold.max(1);
        if score.saturating_sub(self.last_updated_score) >= threshold {
            self.last_updated_score = score;
        }
        let steps = self.last_updated_score / threshold;
        self.speed = self.profile.initial_speed + steps as f64 * self.profile.increment;
        self.speed
    }

    /// Wall-clock time between ticks at the current speed.
    pub fn tick_interval(&self) -> Duration {
        if self.speed > 0.0 {
            Duration::from_secs_f64(1.0 / self.speed)
        } else {
            Duration::from_secs(1)
        }
    }
}
