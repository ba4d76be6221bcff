//! Limit switch abstraction used for homing.

use embedded_hal::digital::InputPin;

use crate::clock::Clock;
use crate::config::{LimitSwitchConfig, Level};
use crate::error::Result;

use super::debounce::DebouncedInput;

/// A physical end-of-travel switch on an axis.
pub trait LimitSwitch {
    /// Whether a switch is actually fitted. Axes without one cannot home.
    fn is_present(&self) -> bool {
        true
    }

    /// Poll the switch and report whether it is at the limit.
    fn is_triggered(&mut self) -> Result<bool>;
}

/// Stand-in for axes that have no limit switch.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLimitSwitch;

impl LimitSwitch for NoLimitSwitch {
    fn is_present(&self) -> bool {
        false
    }

    fn is_triggered(&mut self) -> Result<bool> {
        Ok(false)
    }
}

/// Debounced switch input with its active level.
pub struct LimitSwitchInput<PIN, CLOCK>
where
    PIN: InputPin,
    CLOCK: Clock,
{
    input: DebouncedInput<PIN, CLOCK>,
    triggered_level: Level,
}

impl<PIN, CLOCK> LimitSwitchInput<PIN, CLOCK>
where
    PIN: InputPin,
    CLOCK: Clock,
{
    /// Wrap a debounced input; `triggered_level` is the stable level at the limit.
    pub fn new(input: DebouncedInput<PIN, CLOCK>, triggered_level: Level) -> Self {
        Self {
            input,
            triggered_level,
        }
    }

    /// Build from configuration.
    pub fn from_config(pin: PIN, clock: CLOCK, config: &LimitSwitchConfig) -> Result<Self> {
        let input = DebouncedInput::new(pin, clock, config.debounce_ns())?;
        Ok(Self::new(input, config.triggered_level))
    }

    /// The underlying debounced input.
    pub fn input(&self) -> &DebouncedInput<PIN, CLOCK> {
        &self.input
    }
}

impl<PIN, CLOCK> LimitSwitch for LimitSwitchInput<PIN, CLOCK>
where
    PIN: InputPin,
    CLOCK: Clock,
{
    /// Blocks while a raw change is pending, until it either holds for the
    /// debounce window or the line reverts. The axis never steps on a level
    /// that is still settling.
    fn is_triggered(&mut self) -> Result<bool> {
        self.input.update()?;
        while self.input.is_settling() {
            self.input.update()?;
        }
        Ok(self.input.state() == self.triggered_level)
    }
}
