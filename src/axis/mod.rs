//! Axis module for solar-rack.
//!
//! An axis couples a stepper with its gear ratio, owns the absolute angle,
//! persists it after every move and, when it has a limit switch, re-homes.

mod controller;
mod homing;

pub use controller::{AngleSource, AxisController, MoveOutcome};
pub use homing::{Homing, HomingStatus};
