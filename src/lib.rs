//! # solar-rack
//!
//! Two-axis solar tracking rack over embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Open-loop steppers**: four-phase drive paced against a monotonic clock
//! - **Persisted angles**: each axis rewrites its absolute angle after every move
//! - **Homing**: the z axis resynchronizes against a debounced limit switch
//! - **Light search**: seven candidate orientations visited greedily by
//!   weighted actuation cost, settling on the brightest
//! - **no_std compatible**: only file storage and TOML loading need `std`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solar_rack::{Rack, RackCommand, RackConfig, StepperMotorBuilder};
//!
//! let config: RackConfig = solar_rack::load_config("rack.toml")?;
//!
//! let x_motor = StepperMotorBuilder::new()
//!     .from_axis_config(&config.x_axis)
//!     .pins(x_coils)
//!     .clock(StdClock::new())
//!     .build()?;
//! // ... z motor, stores, limit switch and comparator alike
//!
//! let mut rack = Rack::from_config(&config, x_motor, x_store, z_motor, z_store, switch, ldr)?;
//! rack.update(RackCommand::LightSearch)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): file-backed angle storage, TOML loading, `StdClock`
//! - `defmt`: log through defmt instead of `log`

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

mod logging;

// Core modules
pub mod axis;
pub mod clock;
pub mod config;
pub mod drive;
pub mod error;
pub mod motor;
pub mod rack;
pub mod search;
pub mod sensor;
pub mod storage;

#[cfg(test)]
mod testing;

// Re-exports for ergonomic API
pub use axis::{AngleSource, AxisController, Homing, HomingStatus, MoveOutcome};
pub use clock::Clock;
pub use config::{validate_config, AxisConfig, LimitPolicy, RackConfig};
pub use drive::{BrushedMotor, Drive, DriveCommand};
pub use error::{Error, Result};
pub use motor::{Direction, StepperMotor, StepperMotorBuilder};
pub use rack::{CommandOutcome, Rack, RackCommand};
pub use search::{SearchReport, SolarSearch};
pub use sensor::{
    BrightnessComparator, DebouncedInput, LightComparator, LimitSwitch, LimitSwitchInput,
    NoLimitSwitch,
};
pub use storage::{AngleStore, MemoryAngleStore};

// std-only conveniences
#[cfg(feature = "std")]
pub use clock::StdClock;
#[cfg(feature = "std")]
pub use config::load_config;
#[cfg(feature = "std")]
pub use storage::FileAngleStore;

// Unit types
pub use config::units::{Degrees, Level, Steps};
