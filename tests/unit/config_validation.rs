//! Unit tests for configuration validation.

use solar_rack::config::{validate_config, RackConfig};
use solar_rack::error::{ConfigError, Error};

fn reference() -> RackConfig {
    RackConfig::default()
}

/// Test that the reference rover validates.
#[test]
fn test_reference_is_valid() {
    assert!(validate_config(&reference()).is_ok());
}

/// Test that a zero step rate is rejected on either axis.
#[test]
fn test_zero_step_rate() {
    let mut config = reference();
    config.z_axis.steps_per_second = 0;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepRate(0)))
    );
}

/// Test that gearing must resolve to at least one step per degree.
#[test]
fn test_unresolvable_steps_per_degree() {
    let mut config = reference();
    config.x_axis.steps_per_degree = None;
    config.x_axis.gear_ratio = None;
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepsPerDegree(_)))
    ));

    // 2048 * 0.01 / 360 rounds to zero
    config.x_axis.gear_ratio = Some(0.01);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepsPerDegree(_)))
    ));
}

/// Test range and storage requirements.
#[test]
fn test_zero_range_and_empty_file() {
    let mut config = reference();
    config.z_axis.max_angle = 0;
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxAngle(0)))
    );

    let mut config = reference();
    config.x_axis.angle_file.clear();
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::EmptyAngleFile))
    );
}

/// Test drive percent bounds.
#[test]
fn test_drive_bounds() {
    let mut config = reference();
    config.drive.duty_cycle_max = 101;
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidDutyCycleMax(101)))
    );

    let mut config = reference();
    config.drive.acceleration_rate = 0;
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidAccelerationRate(0)))
    );
}
