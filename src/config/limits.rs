//! Angle range enforcement at the rack boundary.

use serde::Deserialize;

use super::units::Degrees;

/// Policy for handling out-of-range nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Fail nudges that would leave the range.
    #[default]
    Reject,
    /// Hold in place instead of leaving the range.
    Clamp,
}

/// Symmetric axis range `-max..=max` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleLimits {
    /// Largest permitted magnitude in degrees.
    pub max: u16,
    /// What to do when limit is exceeded.
    pub policy: LimitPolicy,
}

impl AngleLimits {
    /// Create new limits.
    pub fn new(max: u16, policy: LimitPolicy) -> Self {
        Self { max, policy }
    }

    /// Check if a position is within limits.
    pub fn contains(&self, angle: Degrees) -> bool {
        angle.abs() <= self.max as u32
    }

    /// Whether a nudge from `current` to `target` may go ahead.
    ///
    /// A move that reduces the magnitude is always permitted, so an axis
    /// left outside the range can be walked back in.
    pub fn permits(&self, current: Degrees, target: Degrees) -> bool {
        self.contains(target) || target.abs() < current.abs()
    }
}
