//! Homing against the limit switch.

use embedded_hal::digital::OutputPin;

use crate::clock::Clock;
use crate::config::units::Degrees;
use crate::error::Result;
use crate::logging::{rack_info, rack_trace};
use crate::motor::Direction;
use crate::sensor::LimitSwitch;
use crate::storage::AngleStore;

use super::controller::{AngleSource, AxisController};

/// Progress of a homing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomingStatus {
    /// The switch is open; the axis moved one more degree anticlockwise.
    Searching,
    /// The switch is closed; the angle was reset to `-max_angle`.
    Homed,
}

/// A homing run in progress.
///
/// Holds the axis exclusively until dropped, so nothing else can move it
/// between steps. Dropping a run before it reports [`HomingStatus::Homed`]
/// leaves the angle at whatever the stepping reached, unpersisted.
pub struct Homing<'a, PIN, CLOCK, STORE, LIMIT>
where
    PIN: OutputPin,
    CLOCK: Clock,
    STORE: AngleStore,
    LIMIT: LimitSwitch,
{
    axis: &'a mut AxisController<PIN, CLOCK, STORE, LIMIT>,
    travelled: u32,
    done: bool,
}

impl<'a, PIN, CLOCK, STORE, LIMIT> Homing<'a, PIN, CLOCK, STORE, LIMIT>
where
    PIN: OutputPin,
    CLOCK: Clock,
    STORE: AngleStore,
    LIMIT: LimitSwitch,
{
    pub(super) fn new(axis: &'a mut AxisController<PIN, CLOCK, STORE, LIMIT>) -> Self {
        Self {
            axis,
            travelled: 0,
            done: false,
        }
    }

    /// Degrees moved so far.
    pub fn travelled(&self) -> u32 {
        self.travelled
    }

    /// Poll the switch, then either finish or move one degree anticlockwise.
    ///
    /// Once homed, further calls return `Homed` without touching anything.
    pub fn step(&mut self) -> Result<HomingStatus> {
        if self.done {
            return Ok(HomingStatus::Homed);
        }

        if self.axis.limit_switch.is_triggered()? {
            let home = -Degrees(self.axis.max_angle as i32);
            self.axis.current_angle = home;
            self.axis.source = AngleSource::Homed;
            self.axis.persist()?;
            self.done = true;
            rack_info!(
                "axis {}: homed at {} deg after {} deg",
                self.axis.name(),
                home.value(),
                self.travelled
            );
            return Ok(HomingStatus::Homed);
        }

        self.axis.step_degree(Direction::Anticlockwise)?;
        self.travelled += 1;
        rack_trace!("axis {}: homing, {} deg so far", self.axis.name(), self.travelled);
        Ok(HomingStatus::Searching)
    }

    /// Step until the switch triggers. Returns the degrees travelled.
    ///
    /// Does not return if the switch never closes.
    pub fn run_to_completion(mut self) -> Result<u32> {
        while self.step()? == HomingStatus::Searching {}
        Ok(self.travelled)
    }
}
