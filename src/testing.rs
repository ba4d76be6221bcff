//! Fakes shared by unit tests.

use core::convert::Infallible;
use core::ops::RangeInclusive;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::axis::AxisController;
use crate::clock::Clock;
use crate::error::Result;
use crate::motor::StepperMotorBuilder;
use crate::sensor::{BrightnessComparator, LimitSwitch, NoLimitSwitch};
use crate::storage::MemoryAngleStore;

/// Coil line that accepts every write.
#[derive(Debug, Default)]
pub struct NullPin;

impl ErrorType for NullPin {
    type Error = Infallible;
}

impl OutputPin for NullPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Clock that jumps far enough per sample that waits never spin.
#[derive(Debug, Default)]
pub struct Ticker(pub u64);

impl Clock for Ticker {
    fn now_ns(&mut self) -> u64 {
        self.0 += 10_000_000;
        self.0
    }
}

/// Switch that reads open for `after` polls, then closed for `closed_for`.
#[derive(Debug)]
pub struct CountdownSwitch {
    pub after: u32,
    pub closed_for: u32,
    pub polls: u32,
}

impl CountdownSwitch {
    /// Closes after `after` polls and stays closed.
    pub fn new(after: u32) -> Self {
        Self::pulse(after, u32::MAX)
    }

    /// Closes after `after` polls and opens again once the axis moves on.
    pub fn pulse(after: u32, closed_for: u32) -> Self {
        Self {
            after,
            closed_for,
            polls: 0,
        }
    }
}

impl LimitSwitch for CountdownSwitch {
    fn is_triggered(&mut self) -> Result<bool> {
        self.polls += 1;
        Ok(self.polls > self.after && self.polls - self.after <= self.closed_for)
    }
}

/// Switch that reads closed on the listed (1-based) polls only.
#[derive(Debug)]
pub struct ScriptedSwitch {
    pub closed: heapless::Vec<RangeInclusive<u32>, 4>,
    pub polls: u32,
}

impl ScriptedSwitch {
    pub fn new(closed: &[RangeInclusive<u32>]) -> Self {
        Self {
            closed: closed.iter().cloned().collect(),
            polls: 0,
        }
    }
}

impl LimitSwitch for ScriptedSwitch {
    fn is_triggered(&mut self) -> Result<bool> {
        self.polls += 1;
        Ok(self.closed.iter().any(|window| window.contains(&self.polls)))
    }
}

/// Comparator answering from a script, then `false` forever.
#[derive(Debug, Default)]
pub struct ScriptedComparator {
    pub answers: heapless::Vec<bool, 16>,
    pub reads: usize,
}

impl ScriptedComparator {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: heapless::Vec::from_slice(answers).unwrap(),
            reads: 0,
        }
    }
}

impl BrightnessComparator for ScriptedComparator {
    fn read(&mut self) -> Result<bool> {
        let answer = self.answers.get(self.reads).copied().unwrap_or(false);
        self.reads += 1;
        Ok(answer)
    }
}

pub type TestAxis<L> = AxisController<NullPin, Ticker, MemoryAngleStore, L>;

fn motor(name: &str) -> crate::motor::StepperMotor<NullPin, Ticker> {
    StepperMotorBuilder::new()
        .name(name)
        .pins([NullPin, NullPin, NullPin, NullPin])
        .clock(Ticker::default())
        .steps_per_revolution(2048)
        .steps_per_second(400)
        .build()
        .unwrap()
}

/// Reference x axis (568 steps/°, ±25°) without a limit switch.
pub fn x_axis(store: MemoryAngleStore) -> TestAxis<NoLimitSwitch> {
    AxisController::new(motor("x"), store, NoLimitSwitch, 568, 25).unwrap()
}

/// Reference z axis (9 steps/°, ±90°) with the given switch.
pub fn z_axis<L: LimitSwitch>(store: MemoryAngleStore, switch: L) -> TestAxis<L> {
    AxisController::new(motor("z"), store, switch, 9, 90).unwrap()
}
