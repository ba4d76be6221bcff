//! Differential drive built from two brushed DC motors.
//!
//! Each motor sits behind an H-bridge: a PWM enable line sets the speed and
//! two direction lines pick forwards, backwards or stopped.

mod brushed;
mod differential;

pub use brushed::BrushedMotor;
pub use differential::{Drive, DriveCommand};
