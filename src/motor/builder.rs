//! Builder pattern for StepperMotor.

use embedded_hal::digital::OutputPin;

use crate::clock::{Clock, NANOS_PER_SEC};
use crate::config::AxisConfig;
use crate::error::{MotorError, Result};

use super::stepper::StepperMotor;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<PIN, CLOCK>
where
    PIN: OutputPin,
    CLOCK: Clock,
{
    pins: Option<[PIN; 4]>,
    clock: Option<CLOCK>,
    name: Option<heapless::String<32>>,
    steps_per_revolution: Option<u16>,
    steps_per_second: Option<u32>,
}

impl<PIN, CLOCK> Default for StepperMotorBuilder<PIN, CLOCK>
where
    PIN: OutputPin,
    CLOCK: Clock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<PIN, CLOCK> StepperMotorBuilder<PIN, CLOCK>
where
    PIN: OutputPin,
    CLOCK: Clock,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: None,
            clock: None,
            name: None,
            steps_per_revolution: None,
            steps_per_second: None,
        }
    }

    /// Set the coil lines, IN1 through IN4.
    pub fn pins(mut self, pins: [PIN; 4]) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the pacing clock.
    pub fn clock(mut self, clock: CLOCK) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set phase-steps per shaft revolution.
    pub fn steps_per_revolution(mut self, steps: u16) -> Self {
        self.steps_per_revolution = Some(steps);
        self
    }

    /// Set the stepping cadence.
    pub fn steps_per_second(mut self, rate: u32) -> Self {
        self.steps_per_second = Some(rate);
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.name = Some(config.name.clone());
        self.steps_per_revolution = Some(config.steps_per_revolution);
        self.steps_per_second = Some(config.steps_per_second);
        self
    }

    /// Build the StepperMotor.
    ///
    /// # Errors
    ///
    /// Returns an error if pins, clock, steps per revolution or step rate
    /// are missing.
    pub fn build(self) -> Result<StepperMotor<PIN, CLOCK>> {
        let pins = self.pins.ok_or(MotorError::MissingField("pins"))?;
        let clock = self.clock.ok_or(MotorError::MissingField("clock"))?;
        let steps_per_revolution = self
            .steps_per_revolution
            .filter(|&s| s > 0)
            .ok_or(MotorError::MissingField("steps_per_revolution"))?;
        let steps_per_second = self
            .steps_per_second
            .filter(|&s| s > 0)
            .ok_or(MotorError::MissingField("steps_per_second"))?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("stepper").unwrap_or_default());

        Ok(StepperMotor::new(
            pins,
            clock,
            name,
            steps_per_revolution,
            NANOS_PER_SEC / steps_per_second as u64,
        ))
    }
}
