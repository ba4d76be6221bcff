//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, DriveConfig, RackConfig};

/// Validate a rack configuration.
///
/// Checks:
/// - Both axes have a usable stepper, a resolvable steps-per-degree, a
///   non-zero range and an angle file
/// - Drive settings are within percent range
pub fn validate_config(config: &RackConfig) -> Result<()> {
    validate_axis(&config.x_axis)?;
    validate_axis(&config.z_axis)?;
    validate_drive(&config.drive)?;

    Ok(())
}

fn validate_axis(config: &AxisConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    if config.steps_per_second == 0 {
        return Err(Error::Config(ConfigError::InvalidStepRate(config.steps_per_second)));
    }

    if let Some(ratio) = config.gear_ratio {
        if ratio <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidGearRatio(ratio)));
        }
    }

    // Covers an explicit zero, a ratio that rounds to zero, and neither given
    if config.steps_per_degree() == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerDegree(0)));
    }

    if config.max_angle == 0 {
        return Err(Error::Config(ConfigError::InvalidMaxAngle(config.max_angle)));
    }

    if config.angle_file.is_empty() {
        return Err(Error::Config(ConfigError::EmptyAngleFile));
    }

    Ok(())
}

fn validate_drive(config: &DriveConfig) -> Result<()> {
    if config.duty_cycle_max == 0 || config.duty_cycle_max > 100 {
        return Err(Error::Config(ConfigError::InvalidDutyCycleMax(config.duty_cycle_max)));
    }

    if config.acceleration_rate == 0 {
        return Err(Error::Config(ConfigError::InvalidAccelerationRate(
            config.acceleration_rate,
        )));
    }

    Ok(())
}
