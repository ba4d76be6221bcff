//! Rack configuration - root configuration structure.

use serde::Deserialize;

use super::axis::AxisConfig;
use super::limits::AngleLimits;
use super::peripherals::{DriveConfig, LimitSwitchConfig, RackSettings};

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RackConfig {
    /// Tilt axis (expensive per degree).
    pub x_axis: AxisConfig,

    /// Rotation axis, homed against the limit switch.
    pub z_axis: AxisConfig,

    /// Limit switch on the z axis.
    #[serde(default)]
    pub limit_switch: LimitSwitchConfig,

    /// Command boundary settings.
    #[serde(default)]
    pub rack: RackSettings,

    /// Drive motors.
    #[serde(default)]
    pub drive: DriveConfig,
}

impl RackConfig {
    /// Range enforcement for the x axis.
    pub fn x_limits(&self) -> AngleLimits {
        AngleLimits::new(self.x_axis.max_angle, self.rack.limit_policy)
    }

    /// Range enforcement for the z axis.
    pub fn z_limits(&self) -> AngleLimits {
        AngleLimits::new(self.z_axis.max_angle, self.rack.limit_policy)
    }
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            x_axis: AxisConfig::reference_x(),
            z_axis: AxisConfig::reference_z(),
            limit_switch: LimitSwitchConfig::default(),
            rack: RackSettings::default(),
            drive: DriveConfig::default(),
        }
    }
}
