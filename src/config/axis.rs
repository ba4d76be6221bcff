//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::clock::NANOS_PER_SEC;

/// Complete configuration of one rack axis and its stepper.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Axis identity, also used in log lines (max 32 chars).
    pub name: String<32>,

    /// Phase-steps per motor shaft revolution (2048 for a geared 28BYJ-48).
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u16,

    /// Stepping cadence.
    #[serde(default = "default_steps_per_second")]
    pub steps_per_second: u32,

    /// Phase-steps per degree of axis rotation. Takes precedence over
    /// `gear_ratio`.
    #[serde(default)]
    pub steps_per_degree: Option<u32>,

    /// Output reduction (motor revolutions per axis revolution), used to
    /// derive `steps_per_degree` when it is not given.
    #[serde(default)]
    pub gear_ratio: Option<f32>,

    /// Axis travel is `-max_angle..=max_angle` degrees.
    #[serde(rename = "max_angle_deg")]
    pub max_angle: u16,

    /// File holding the persisted angle.
    pub angle_file: String<64>,
}

fn default_steps_per_revolution() -> u16 {
    2048
}

fn default_steps_per_second() -> u32 {
    400
}

impl AxisConfig {
    /// Reference x axis: worm (7.5:1) then spur (200:15) stage, ±25°.
    pub fn reference_x() -> Self {
        Self {
            name: String::try_from("x").unwrap_or_default(),
            steps_per_revolution: default_steps_per_revolution(),
            steps_per_second: default_steps_per_second(),
            steps_per_degree: Some(568),
            gear_ratio: None,
            max_angle: 25,
            angle_file: String::try_from("cur_x.txt").unwrap_or_default(),
        }
    }

    /// Reference z axis: 95:62 internal gear, ±90°.
    pub fn reference_z() -> Self {
        Self {
            name: String::try_from("z").unwrap_or_default(),
            steps_per_revolution: default_steps_per_revolution(),
            steps_per_second: default_steps_per_second(),
            steps_per_degree: Some(9),
            gear_ratio: None,
            max_angle: 90,
            angle_file: String::try_from("cur_z.txt").unwrap_or_default(),
        }
    }

    /// Phase-steps per degree of axis rotation.
    ///
    /// Explicit value if configured, otherwise
    /// `round(steps_per_revolution * gear_ratio / 360)`, otherwise 0.
    pub fn steps_per_degree(&self) -> u32 {
        match (self.steps_per_degree, self.gear_ratio) {
            (Some(spd), _) => spd,
            (None, Some(ratio)) if ratio > 0.0 => {
                libm::roundf(self.steps_per_revolution as f32 * ratio / 360.0) as u32
            }
            _ => 0,
        }
    }

    /// Minimum time between two phase changes.
    pub fn step_interval_ns(&self) -> u64 {
        if self.steps_per_second == 0 {
            u64::MAX
        } else {
            NANOS_PER_SEC / self.steps_per_second as u64
        }
    }
}
