//! Four-phase unipolar stepper driver.
//!
//! Generic over embedded-hal 1.0 output pins and a monotonic [`Clock`].

use embedded_hal::digital::OutputPin;

use crate::clock::Clock;
use crate::error::{MotorError, Result};

use super::direction::Direction;

/// Number of coil phases in the drive sequence.
pub const PHASE_COUNT: usize = 4;

/// Coil energizing pattern per phase, two coils on at a time (IN1..IN4).
pub const PHASE_TABLE: [[bool; 4]; PHASE_COUNT] = [
    [true, true, false, false],
    [false, true, true, false],
    [false, false, true, true],
    [true, false, false, true],
];

/// Stepper motor driven through four coil lines.
///
/// Holds no notion of angle: it only knows which detent of its own
/// revolution it sits on. Each phase change waits until the configured
/// step interval has elapsed since the previous one.
///
/// Generic over:
/// - `PIN`: coil line type (must implement `OutputPin`)
/// - `CLOCK`: monotonic time source used for pacing
pub struct StepperMotor<PIN, CLOCK>
where
    PIN: OutputPin,
    CLOCK: Clock,
{
    /// Coil lines IN1..IN4.
    pins: [PIN; 4],

    /// Pacing clock.
    clock: CLOCK,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    /// Phase-steps per shaft revolution.
    steps_per_revolution: u16,

    /// Minimum time between phase changes.
    step_interval_ns: u64,

    /// Clock sample at the last phase change.
    last_step_ns: u64,

    /// Detent within one revolution, `0..steps_per_revolution`.
    step_number: u16,

    /// Direction of the last move, if any.
    last_direction: Option<Direction>,
}

impl<PIN, CLOCK> StepperMotor<PIN, CLOCK>
where
    PIN: OutputPin,
    CLOCK: Clock,
{
    /// Create a new motor. The first step is paced from this moment.
    pub(crate) fn new(
        pins: [PIN; 4],
        mut clock: CLOCK,
        name: heapless::String<32>,
        steps_per_revolution: u16,
        step_interval_ns: u64,
    ) -> Self {
        let last_step_ns = clock.now_ns();
        Self {
            pins,
            clock,
            name,
            steps_per_revolution: steps_per_revolution.max(1),
            step_interval_ns,
            last_step_ns,
            step_number: 0,
            last_direction: None,
        }
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Phase-steps per shaft revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> u16 {
        self.steps_per_revolution
    }

    /// Minimum time between two phase changes.
    #[inline]
    pub fn step_interval_ns(&self) -> u64 {
        self.step_interval_ns
    }

    /// Detent within the current revolution.
    #[inline]
    pub fn step_number(&self) -> u16 {
        self.step_number
    }

    /// Currently energized phase, `0..PHASE_COUNT`.
    #[inline]
    pub fn phase(&self) -> usize {
        self.step_number as usize % PHASE_COUNT
    }

    /// Direction of the last non-zero move.
    #[inline]
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Rotate `|steps|` phase-steps, clockwise for positive counts.
    ///
    /// Blocks until the last phase change has been issued. A zero count
    /// returns immediately without touching the coils.
    pub fn step(&mut self, steps: i64) -> Result<()> {
        if steps == 0 {
            return Ok(());
        }

        let direction = Direction::from_steps(steps);
        self.last_direction = Some(direction);

        for _ in 0..steps.unsigned_abs() {
            self.last_step_ns = self
                .clock
                .wait_until(self.last_step_ns, self.step_interval_ns);
            self.advance(direction);
            self.energize(self.phase())?;
        }

        Ok(())
    }

    fn advance(&mut self, direction: Direction) {
        let revolution = self.steps_per_revolution as u32;
        let current = self.step_number as u32;
        let next = match direction {
            Direction::Clockwise => (current + 1) % revolution,
            Direction::Anticlockwise => (current + revolution - 1) % revolution,
        };
        self.step_number = next as u16;
    }

    fn energize(&mut self, phase: usize) -> Result<()> {
        for (pin, high) in self.pins.iter_mut().zip(PHASE_TABLE[phase]) {
            if high {
                pin.set_high().map_err(|_| MotorError::PinError)?;
            } else {
                pin.set_low().map_err(|_| MotorError::PinError)?;
            }
        }
        Ok(())
    }
}
