//! Motor module for solar-rack.
//!
//! Provides the four-phase stepper driver used by both rack axes.

mod builder;
mod direction;
mod stepper;

pub use builder::StepperMotorBuilder;
pub use direction::Direction;
pub use stepper::{StepperMotor, PHASE_COUNT, PHASE_TABLE};
