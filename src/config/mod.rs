//! Configuration module for solar-rack.
//!
//! Provides types for loading and validating axis, limit switch and drive
//! configuration from TOML files (with `std` feature) or pre-built values.

mod axis;
mod limits;
#[cfg(feature = "std")]
mod loader;
mod peripherals;
mod rack;
pub mod units;
mod validation;

pub use axis::AxisConfig;
pub use limits::{AngleLimits, LimitPolicy};
pub use peripherals::{DriveConfig, LimitSwitchConfig, RackSettings};
pub use rack::RackConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Level, Steps};
