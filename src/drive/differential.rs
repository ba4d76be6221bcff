//! Two-motor differential drive.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::DriveConfig;
use crate::error::Result;
use crate::logging::rack_debug;

use super::brushed::BrushedMotor;

/// Everything the drive accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveCommand {
    /// Both motors faster.
    Accelerate,
    /// Both motors slower.
    Decelerate,
    /// Left slower, right faster.
    TurnLeft,
    /// Left faster, right slower.
    TurnRight,
    /// Both motors stopped.
    Stop,
    /// Do nothing.
    NoOp,
}

/// Left and right brushed motors changed in fixed increments.
pub struct Drive<EN, IN1, IN2>
where
    EN: SetDutyCycle,
    IN1: OutputPin,
    IN2: OutputPin,
{
    left: BrushedMotor<EN, IN1, IN2>,
    right: BrushedMotor<EN, IN1, IN2>,
    acceleration_rate: i16,
}

impl<EN, IN1, IN2> Drive<EN, IN1, IN2>
where
    EN: SetDutyCycle,
    IN1: OutputPin,
    IN2: OutputPin,
{
    /// Drive whose commands change duty by `acceleration_rate` percent.
    pub fn new(
        left: BrushedMotor<EN, IN1, IN2>,
        right: BrushedMotor<EN, IN1, IN2>,
        acceleration_rate: u8,
    ) -> Self {
        Self {
            left,
            right,
            acceleration_rate: acceleration_rate as i16,
        }
    }

    /// Build both motors from their lines using `config`.
    pub fn from_config(
        left: (EN, IN1, IN2),
        right: (EN, IN1, IN2),
        config: &DriveConfig,
    ) -> Result<Self> {
        let left = BrushedMotor::new(left.0, left.1, left.2, config.duty_cycle_max)?;
        let right = BrushedMotor::new(right.0, right.1, right.2, config.duty_cycle_max)?;
        Ok(Self::new(left, right, config.acceleration_rate))
    }

    /// Signed left duty cycle in percent.
    pub fn left_duty_cycle(&self) -> i16 {
        self.left.duty_cycle()
    }

    /// Signed right duty cycle in percent.
    pub fn right_duty_cycle(&self) -> i16 {
        self.right.duty_cycle()
    }

    /// Apply one command.
    pub fn update(&mut self, command: DriveCommand) -> Result<()> {
        let rate = self.acceleration_rate;
        let (left, right) = match command {
            DriveCommand::Accelerate => (rate, rate),
            DriveCommand::Decelerate => (-rate, -rate),
            DriveCommand::TurnLeft => (-rate, rate),
            DriveCommand::TurnRight => (rate, -rate),
            DriveCommand::Stop => (0, 0),
            DriveCommand::NoOp => return Ok(()),
        };

        self.left.change_duty_cycle(left)?;
        self.right.change_duty_cycle(right)?;
        rack_debug!(
            "drive: left {}%, right {}%",
            self.left.duty_cycle(),
            self.right.duty_cycle()
        );
        Ok(())
    }

    /// Take the motors back.
    pub fn free(self) -> (BrushedMotor<EN, IN1, IN2>, BrushedMotor<EN, IN1, IN2>) {
        (self.left, self.right)
    }
}
