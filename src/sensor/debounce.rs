//! Debounced digital input.

use embedded_hal::digital::InputPin;

use crate::clock::Clock;
use crate::config::Level;
use crate::error::{Result, SensorError};
use crate::logging::rack_trace;

/// A noisy digital line filtered to a stable level plus one-shot edges.
///
/// The owner calls [`update`](Self::update) on its own cadence; nothing here
/// blocks or schedules. A raw change restarts the debounce window, and the
/// level becomes stable once it has held for the whole window.
pub struct DebouncedInput<PIN, CLOCK>
where
    PIN: InputPin,
    CLOCK: Clock,
{
    pin: PIN,
    clock: CLOCK,
    debounce_ns: u64,
    /// Most recent raw sample, still possibly bouncing.
    last_flickerable: Level,
    /// Stable level after the latest update.
    last_steady: Level,
    /// Stable level before the latest update.
    previous_steady: Level,
    /// Clock sample when the raw level last changed.
    last_change_ns: u64,
}

impl<PIN, CLOCK> DebouncedInput<PIN, CLOCK>
where
    PIN: InputPin,
    CLOCK: Clock,
{
    /// Wrap `pin`, seeding every tracked level from one initial read so the
    /// first update cannot report an edge.
    pub fn new(mut pin: PIN, mut clock: CLOCK, debounce_ns: u64) -> Result<Self> {
        let level = Level::from_high(pin.is_high().map_err(|_| SensorError::PinError)?);
        let last_change_ns = clock.now_ns();
        Ok(Self {
            pin,
            clock,
            debounce_ns,
            last_flickerable: level,
            last_steady: level,
            previous_steady: level,
            last_change_ns,
        })
    }

    /// Debounce window in nanoseconds.
    #[inline]
    pub fn debounce_ns(&self) -> u64 {
        self.debounce_ns
    }

    /// Sample the line and advance the filter.
    pub fn update(&mut self) -> Result<()> {
        let level = self.read_raw()?;

        if level != self.last_flickerable {
            self.last_change_ns = self.clock.now_ns();
            self.last_flickerable = level;
        }

        self.previous_steady = self.last_steady;
        if self.clock.has_elapsed(self.last_change_ns, self.debounce_ns) {
            self.last_steady = level;
            if self.previous_steady != level {
                rack_trace!("input settled high={}", level.is_high());
            }
        }

        Ok(())
    }

    /// Last stable level.
    #[inline]
    pub fn state(&self) -> Level {
        self.last_steady
    }

    /// Whether the last raw sample differs from the stable level, i.e. a
    /// change is still waiting out the debounce window.
    #[inline]
    pub fn is_settling(&self) -> bool {
        self.last_flickerable != self.last_steady
    }

    /// Unfiltered level, read from the pin now.
    pub fn read_raw(&mut self) -> Result<Level> {
        let high = self.pin.is_high().map_err(|_| SensorError::PinError)?;
        Ok(Level::from_high(high))
    }

    /// True only after the update on which the stable level fell high→low.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.previous_steady == Level::High && self.last_steady == Level::Low
    }

    /// True only after the update on which the stable level rose low→high.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.previous_steady == Level::Low && self.last_steady == Level::High
    }

    /// Release the pin and clock.
    pub fn free(self) -> (PIN, CLOCK) {
        (self.pin, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    /// Clock advanced by hand.
    struct Manual<'a>(&'a Cell<u64>);

    impl Clock for Manual<'_> {
        fn now_ns(&mut self) -> u64 {
            self.0.get()
        }
    }

    fn gets(levels: &[State]) -> heapless::Vec<Transaction, 8> {
        levels.iter().map(|&s| Transaction::get(s)).collect()
    }

    #[test]
    fn test_construction_seeds_without_edge() {
        let time = Cell::new(0);
        let pin = PinMock::new(&gets(&[State::Low, State::Low]));
        let mut check = pin.clone();
        let mut input = DebouncedInput::new(pin, Manual(&time), 10).unwrap();

        assert_eq!(input.state(), Level::Low);
        time.set(100);
        input.update().unwrap();
        assert!(!input.is_pressed());
        assert!(!input.is_released());

        check.done();
    }

    #[test]
    fn test_bounce_is_filtered_and_edge_fires_once() {
        use State::{High, Low};

        let time = Cell::new(0);
        // seed, then: bounce low, back high, low, low (settles), low, low
        let pin = PinMock::new(&gets(&[High, Low, High, Low, Low, Low, Low]));
        let mut check = pin.clone();
        let mut input = DebouncedInput::new(pin, Manual(&time), 10).unwrap();

        time.set(1);
        input.update().unwrap(); // low, window restarts
        assert_eq!(input.state(), Level::High);

        time.set(3);
        input.update().unwrap(); // high again, window restarts
        assert_eq!(input.state(), Level::High);

        time.set(5);
        input.update().unwrap(); // low, window restarts at 5
        assert!(!input.is_pressed());

        time.set(14);
        input.update().unwrap(); // 9ns held, not yet
        assert_eq!(input.state(), Level::High);
        assert!(input.is_settling());

        time.set(15);
        input.update().unwrap(); // 10ns held
        assert_eq!(input.state(), Level::Low);
        assert!(input.is_pressed());
        assert!(!input.is_released());
        assert!(!input.is_settling());

        time.set(40);
        input.update().unwrap();
        assert_eq!(input.state(), Level::Low);
        assert!(!input.is_pressed());

        check.done();
    }

    #[test]
    fn test_release_edge() {
        use State::{High, Low};

        let time = Cell::new(0);
        let pin = PinMock::new(&gets(&[Low, High, High]));
        let mut check = pin.clone();
        let mut input = DebouncedInput::new(pin, Manual(&time), 5).unwrap();

        time.set(10);
        input.update().unwrap(); // change seen at 10
        assert!(!input.is_released());

        time.set(15);
        input.update().unwrap();
        assert!(input.is_released());
        assert_eq!(input.state(), Level::High);

        check.done();
    }
}
