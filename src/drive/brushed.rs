//! One brushed DC motor on an H-bridge.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{MotorError, Result};

/// Brushed motor with a signed duty cycle in percent.
///
/// Positive duty spins forwards, negative backwards. The magnitude goes to
/// the enable line.
pub struct BrushedMotor<EN, IN1, IN2>
where
    EN: SetDutyCycle,
    IN1: OutputPin,
    IN2: OutputPin,
{
    enable: EN,
    in1: IN1,
    in2: IN2,
    duty_cycle: i16,
    duty_cycle_max: u8,
}

impl<EN, IN1, IN2> BrushedMotor<EN, IN1, IN2>
where
    EN: SetDutyCycle,
    IN1: OutputPin,
    IN2: OutputPin,
{
    /// Take the lines and start stopped, with the enable line at 0%.
    pub fn new(mut enable: EN, in1: IN1, in2: IN2, duty_cycle_max: u8) -> Result<Self> {
        enable
            .set_duty_cycle_fully_off()
            .map_err(|_| MotorError::PinError)?;
        Ok(Self {
            enable,
            in1,
            in2,
            duty_cycle: 0,
            duty_cycle_max: duty_cycle_max.min(100),
        })
    }

    /// Signed duty cycle in percent.
    #[inline]
    pub fn duty_cycle(&self) -> i16 {
        self.duty_cycle
    }

    /// Duty cycle ceiling in percent.
    #[inline]
    pub fn duty_cycle_max(&self) -> u8 {
        self.duty_cycle_max
    }

    /// Add `delta` to the duty cycle, clamped to `±duty_cycle_max`.
    ///
    /// The direction lines only flip when the change pushes the motor
    /// further the same way: forwards for a positive delta once duty is
    /// non-negative, backwards for a negative delta once duty is
    /// non-positive. A zero delta stops the motor outright.
    pub fn change_duty_cycle(&mut self, delta: i16) -> Result<()> {
        let max = self.duty_cycle_max as i16;
        self.duty_cycle = self.duty_cycle.saturating_add(delta).clamp(-max, max);

        if delta > 0 && self.duty_cycle >= 0 {
            self.forwards()?;
        } else if delta < 0 && self.duty_cycle <= 0 {
            self.backwards()?;
        } else if delta == 0 {
            self.stop()?;
            self.duty_cycle = 0;
        }

        self.enable
            .set_duty_cycle_percent(self.duty_cycle.unsigned_abs() as u8)
            .map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    fn forwards(&mut self) -> Result<()> {
        self.in1.set_high().map_err(|_| MotorError::PinError)?;
        self.in2.set_low().map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    fn backwards(&mut self) -> Result<()> {
        self.in1.set_low().map_err(|_| MotorError::PinError)?;
        self.in2.set_high().map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.in1.set_low().map_err(|_| MotorError::PinError)?;
        self.in2.set_low().map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    /// Release the lines.
    pub fn free(self) -> (EN, IN1, IN2) {
        (self.enable, self.in1, self.in2)
    }
}
