//! Limit switch, drive and façade settings.

use serde::Deserialize;

use super::limits::LimitPolicy;
use super::units::Level;
use crate::clock::NANOS_PER_MILLI;

/// Limit switch wiring and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LimitSwitchConfig {
    /// Debounce window in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,

    /// Stable level meaning "at the limit".
    #[serde(default)]
    pub triggered_level: Level,
}

fn default_debounce_ms() -> u32 {
    50
}

impl Default for LimitSwitchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            triggered_level: Level::Low,
        }
    }
}

impl LimitSwitchConfig {
    /// Debounce window in nanoseconds.
    pub fn debounce_ns(&self) -> u64 {
        self.debounce_ms as u64 * NANOS_PER_MILLI
    }
}

/// Command boundary settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RackSettings {
    /// What a nudge past an axis limit does.
    #[serde(default)]
    pub limit_policy: LimitPolicy,
}

/// Drive motor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DriveConfig {
    /// Duty cycle ceiling in percent.
    #[serde(default = "default_duty_cycle_max")]
    pub duty_cycle_max: u8,

    /// Duty cycle change per accelerate/decelerate/turn command, in percent.
    #[serde(default = "default_acceleration_rate")]
    pub acceleration_rate: u8,
}

fn default_duty_cycle_max() -> u8 {
    100
}

fn default_acceleration_rate() -> u8 {
    25
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            duty_cycle_max: default_duty_cycle_max(),
            acceleration_rate: default_acceleration_rate(),
        }
    }
}
