//! Axis controller: absolute angle bookkeeping over an open-loop stepper.

use embedded_hal::digital::OutputPin;

use crate::clock::Clock;
use crate::config::units::{Degrees, Steps};
use crate::config::{AngleLimits, AxisConfig, LimitPolicy};
use crate::error::{Error, MotorError, Result, StorageError};
use crate::logging::{rack_debug, rack_info, rack_warn};
use crate::motor::{Direction, StepperMotor};
use crate::sensor::LimitSwitch;
use crate::storage::AngleStore;

use super::homing::Homing;

/// How the current angle was established.
#[derive(Debug, Clone, PartialEq)]
pub enum AngleSource {
    /// Read back from the axis' store.
    Stored,
    /// Store was unusable; the angle started at 0 and may not match the
    /// hardware until the next homing.
    Defaulted(StorageError),
    /// Set by homing against the limit switch.
    Homed,
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The requested move ran to the end.
    Completed,
    /// The limit switch was already triggered; homing ran instead and the
    /// rest of the move was dropped.
    Homed,
}

/// One rack axis.
///
/// `current_angle` is the only record of where the axis physically is, so
/// it is written to the store after every public operation that changes it.
/// Only homing may overwrite it with a value that was not reached by
/// stepping.
///
/// Generic over:
/// - `PIN`, `CLOCK`: the stepper's coil lines and pacing clock
/// - `STORE`: where the angle is persisted
/// - `LIMIT`: the limit switch, [`NoLimitSwitch`](crate::sensor::NoLimitSwitch) if none
pub struct AxisController<PIN, CLOCK, STORE, LIMIT>
where
    PIN: OutputPin,
    CLOCK: Clock,
    STORE: AngleStore,
    LIMIT: LimitSwitch,
{
    pub(super) motor: StepperMotor<PIN, CLOCK>,
    pub(super) store: STORE,
    pub(super) limit_switch: LIMIT,
    pub(super) steps_per_degree: u32,
    pub(super) max_angle: u16,
    pub(super) current_angle: Degrees,
    pub(super) source: AngleSource,
}

impl<PIN, CLOCK, STORE, LIMIT> AxisController<PIN, CLOCK, STORE, LIMIT>
where
    PIN: OutputPin,
    CLOCK: Clock,
    STORE: AngleStore,
    LIMIT: LimitSwitch,
{
    /// Create an axis and load its angle from `store`.
    ///
    /// A missing or unparseable stored angle starts the axis at 0 and is
    /// reported through [`angle_source`](Self::angle_source).
    ///
    /// # Errors
    ///
    /// Any other storage failure.
    pub fn new(
        motor: StepperMotor<PIN, CLOCK>,
        mut store: STORE,
        limit_switch: LIMIT,
        steps_per_degree: u32,
        max_angle: u16,
    ) -> Result<Self> {
        let (angle, source) = match store.load() {
            Ok(angle) => (angle, AngleSource::Stored),
            Err(Error::Storage(reason @ (StorageError::Missing | StorageError::Corrupt(_)))) => {
                rack_warn!("axis {}: no usable stored angle, assuming 0", motor.name());
                (0, AngleSource::Defaulted(reason))
            }
            Err(e) => return Err(e),
        };

        rack_debug!("axis {}: starting at {} deg", motor.name(), angle);

        Ok(Self {
            motor,
            store,
            limit_switch,
            steps_per_degree,
            max_angle,
            current_angle: Degrees(angle),
            source,
        })
    }

    /// Create an axis using the gearing and range from `config`.
    pub fn from_config(
        motor: StepperMotor<PIN, CLOCK>,
        store: STORE,
        limit_switch: LIMIT,
        config: &AxisConfig,
    ) -> Result<Self> {
        Self::new(
            motor,
            store,
            limit_switch,
            config.steps_per_degree(),
            config.max_angle,
        )
    }

    /// Axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.motor.name()
    }

    /// Current absolute angle.
    #[inline]
    pub fn current_angle(&self) -> Degrees {
        self.current_angle
    }

    /// Axis travel is `-max_angle..=max_angle`.
    #[inline]
    pub fn max_angle(&self) -> u16 {
        self.max_angle
    }

    /// Phase-steps per degree.
    #[inline]
    pub fn steps_per_degree(&self) -> u32 {
        self.steps_per_degree
    }

    /// Range enforcement for this axis under `policy`.
    #[inline]
    pub fn limits(&self, policy: LimitPolicy) -> AngleLimits {
        AngleLimits::new(self.max_angle, policy)
    }

    /// How the current angle was established.
    #[inline]
    pub fn angle_source(&self) -> &AngleSource {
        &self.source
    }

    /// False while the angle is an unverified default.
    #[inline]
    pub fn is_synchronized(&self) -> bool {
        !matches!(self.source, AngleSource::Defaulted(_))
    }

    /// Whether this axis can home.
    #[inline]
    pub fn has_limit_switch(&self) -> bool {
        self.limit_switch.is_present()
    }

    /// The stepper.
    #[inline]
    pub fn motor(&self) -> &StepperMotor<PIN, CLOCK> {
        &self.motor
    }

    /// The angle store.
    #[inline]
    pub fn store(&self) -> &STORE {
        &self.store
    }

    /// Rotate one degree and persist the new angle.
    ///
    /// An anticlockwise move on an axis whose limit switch is already
    /// triggered homes instead.
    pub fn step_one_degree(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let outcome = self.move_one_degree(direction)?;
        if outcome == MoveOutcome::Completed {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Rotate to `target` one degree at a time, then persist the angle.
    ///
    /// The target is not range-checked here. If homing supersedes one of the
    /// single-degree moves, the remaining degrees are dropped and the homed
    /// angle stands.
    pub fn rotate_to(&mut self, target: Degrees) -> Result<MoveOutcome> {
        let delta = target - self.current_angle;
        let direction = if delta.value() > 0 {
            Direction::Clockwise
        } else {
            Direction::Anticlockwise
        };

        if delta.value() != 0 {
            rack_debug!(
                "axis {}: {} -> {} deg",
                self.motor.name(),
                self.current_angle.value(),
                target.value()
            );
        }

        for _ in 0..delta.abs() {
            if self.move_one_degree(direction)? == MoveOutcome::Homed {
                return Ok(MoveOutcome::Homed);
            }
        }

        self.persist()?;
        Ok(MoveOutcome::Completed)
    }

    /// Start a homing run against the limit switch.
    ///
    /// # Errors
    ///
    /// `MotorError::NoLimitSwitch` if the axis has none.
    pub fn homing(&mut self) -> Result<Homing<'_, PIN, CLOCK, STORE, LIMIT>> {
        if !self.limit_switch.is_present() {
            return Err(MotorError::NoLimitSwitch.into());
        }
        rack_info!("axis {}: homing from {} deg", self.motor.name(), self.current_angle.value());
        Ok(Homing::new(self))
    }

    /// Home against the limit switch, blocking until it triggers.
    ///
    /// Returns the number of degrees travelled.
    pub fn home(&mut self) -> Result<u32> {
        self.homing()?.run_to_completion()
    }

    fn move_one_degree(&mut self, direction: Direction) -> Result<MoveOutcome> {
        if direction == Direction::Anticlockwise
            && self.limit_switch.is_present()
            && self.limit_switch.is_triggered()?
        {
            self.home()?;
            return Ok(MoveOutcome::Homed);
        }

        self.step_degree(direction)?;
        Ok(MoveOutcome::Completed)
    }

    /// Drive the motor one degree and account for it, nothing else.
    pub(super) fn step_degree(&mut self, direction: Direction) -> Result<()> {
        let delta = Degrees(direction.sign());
        self.motor
            .step(Steps::from_degrees(delta, self.steps_per_degree).value())?;
        self.current_angle = self.current_angle + delta;
        Ok(())
    }

    pub(super) fn persist(&mut self) -> Result<()> {
        self.store.store(self.current_angle.value())
    }
}
