//! Unit tests for TOML configuration parsing.

use solar_rack::config::{load_config, parse_config, Level, LimitPolicy, RackConfig};

const ROVER: &str = r#"
[x_axis]
name = "x"
steps_per_degree = 568
max_angle_deg = 25
angle_file = "cur_x.txt"

[z_axis]
name = "z"
steps_per_revolution = 2048
steps_per_second = 400
gear_ratio = 1.582
max_angle_deg = 90
angle_file = "cur_z.txt"

[limit_switch]
debounce_ms = 20
triggered_level = "high"

[rack]
limit_policy = "clamp"

[drive]
duty_cycle_max = 80
acceleration_rate = 20
"#;

/// Test parsing every section.
#[test]
fn test_parse_full_rack() {
    let config = parse_config(ROVER).expect("Failed to parse rack");

    assert_eq!(config.x_axis.name.as_str(), "x");
    assert_eq!(config.x_axis.steps_per_degree(), 568);
    assert_eq!(config.x_axis.max_angle, 25);
    // round(2048 * 1.582 / 360) = round(8.999...) = 9
    assert_eq!(config.z_axis.steps_per_degree(), 9);
    assert_eq!(config.z_axis.step_interval_ns(), 2_500_000);

    assert_eq!(config.limit_switch.debounce_ns(), 20_000_000);
    assert_eq!(config.limit_switch.triggered_level, Level::High);
    assert_eq!(config.rack.limit_policy, LimitPolicy::Clamp);
    assert_eq!(config.drive.duty_cycle_max, 80);
    assert_eq!(config.drive.acceleration_rate, 20);
}

/// Test that optional sections fall back to the reference rover.
#[test]
fn test_optional_sections_default() {
    let toml_str = r#"
[x_axis]
name = "x"
steps_per_degree = 568
max_angle_deg = 25
angle_file = "cur_x.txt"

[z_axis]
name = "z"
steps_per_degree = 9
max_angle_deg = 90
angle_file = "cur_z.txt"
"#;

    let config = parse_config(toml_str).expect("Failed to parse rack");
    let reference = RackConfig::default();

    assert_eq!(config.limit_switch, reference.limit_switch);
    assert_eq!(config.rack, reference.rack);
    assert_eq!(config.drive, reference.drive);
    assert_eq!(config.z_axis.steps_per_revolution, 2048);
    assert_eq!(config.z_axis.steps_per_second, 400);
}

/// Test that a missing axis section is a parse error.
#[test]
fn test_missing_axis_rejected() {
    let toml_str = r#"
[x_axis]
name = "x"
steps_per_degree = 568
max_angle_deg = 25
angle_file = "cur_x.txt"
"#;

    assert!(parse_config(toml_str).is_err());
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rack.toml");
    std::fs::write(&path, ROVER).unwrap();

    let config = load_config(&path).expect("Failed to load rack");
    assert_eq!(config.z_axis.angle_file.as_str(), "cur_z.txt");

    assert!(load_config(dir.path().join("absent.toml")).is_err());
}
