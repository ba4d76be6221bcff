//! Fakes shared by the integration suites.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use solar_rack::motor::PHASE_TABLE;
use solar_rack::{BrightnessComparator, Clock, Result, StepperMotor, StepperMotorBuilder};

/// Time shared by every fake, advanced by `tick` on each sample.
#[derive(Clone)]
pub struct SharedClock {
    now: Rc<Cell<u64>>,
    tick: u64,
}

impl SharedClock {
    pub fn new(tick: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            tick,
        }
    }

    /// Current time without advancing it.
    pub fn peek(&self) -> u64 {
        self.now.get()
    }

    pub fn advance(&self, ns: u64) {
        self.now.set(self.now.get() + ns);
    }
}

impl Clock for SharedClock {
    fn now_ns(&mut self) -> u64 {
        self.advance(self.tick);
        self.now.get()
    }
}

/// One coil write: which line, when, and the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoilWrite {
    pub coil: usize,
    pub at_ns: u64,
    pub high: bool,
}

/// Coil line that logs every write with the shared clock's time.
pub struct CoilPin {
    coil: usize,
    clock: SharedClock,
    log: Rc<RefCell<Vec<CoilWrite>>>,
}

impl ErrorType for CoilPin {
    type Error = Infallible;
}

impl OutputPin for CoilPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.record(true);
        Ok(())
    }
}

impl CoilPin {
    fn record(&self, high: bool) {
        self.log.borrow_mut().push(CoilWrite {
            coil: self.coil,
            at_ns: self.clock.peek(),
            high,
        });
    }
}

/// Four recording coils sharing one log.
pub fn coils(clock: &SharedClock) -> ([CoilPin; 4], Rc<RefCell<Vec<CoilWrite>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let pins = core::array::from_fn(|coil| CoilPin {
        coil,
        clock: clock.clone(),
        log: Rc::clone(&log),
    });
    (pins, log)
}

/// Times at which IN1 was written, one per phase change.
pub fn phase_change_times(log: &[CoilWrite]) -> Vec<u64> {
    log.iter().filter(|w| w.coil == 0).map(|w| w.at_ns).collect()
}

/// Reference stepper: 2048 steps/rev at 400 steps/s.
pub fn stepper(name: &str, clock: &SharedClock) -> (StepperMotor<CoilPin, SharedClock>, Rc<RefCell<Vec<CoilWrite>>>) {
    let (pins, log) = coils(clock);
    let motor = StepperMotorBuilder::new()
        .name(name)
        .pins(pins)
        .clock(clock.clone())
        .steps_per_revolution(2048)
        .steps_per_second(400)
        .build()
        .expect("reference stepper builds");
    (motor, log)
}

/// Input line driven from the test.
#[derive(Clone)]
pub struct Line {
    high: Rc<Cell<bool>>,
}

impl Line {
    pub fn new(high: bool) -> Self {
        Self {
            high: Rc::new(Cell::new(high)),
        }
    }

    pub fn set(&self, high: bool) {
        self.high.set(high);
    }
}

impl ErrorType for Line {
    type Error = Infallible;
}

impl InputPin for Line {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.high.get())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!self.high.get())
    }
}

/// Comparator that calls exactly one stop (1-based) the brightest.
pub struct BrightAt {
    pub stop: usize,
    pub reads: usize,
}

impl BrightnessComparator for BrightAt {
    fn read(&mut self) -> Result<bool> {
        self.reads += 1;
        Ok(self.reads == self.stop)
    }
}

/// Net phase-steps a motor has turned, recovered from its coil log.
pub fn net_steps(log: &[CoilWrite]) -> i64 {
    let mut previous = 0usize;
    let mut net = 0i64;
    for change in log.chunks_exact(4) {
        let pattern = [change[0].high, change[1].high, change[2].high, change[3].high];
        let Some(phase) = PHASE_TABLE.iter().position(|p| *p == pattern) else {
            continue;
        };
        match (phase + 4 - previous) % 4 {
            1 => net += 1,
            3 => net -= 1,
            _ => {}
        }
        previous = phase;
    }
    net
}

/// Pull-up end stop that closes (reads low) while the shaft it watches is at
/// or past `limit_steps`, counting from `start_steps`.
pub struct EndStop {
    log: Rc<RefCell<Vec<CoilWrite>>>,
    start_steps: i64,
    limit_steps: i64,
}

impl EndStop {
    pub fn new(log: &Rc<RefCell<Vec<CoilWrite>>>, start_steps: i64, limit_steps: i64) -> Self {
        Self {
            log: Rc::clone(log),
            start_steps,
            limit_steps,
        }
    }

    fn closed(&self) -> bool {
        self.start_steps + net_steps(&self.log.borrow()) <= self.limit_steps
    }
}

impl ErrorType for EndStop {
    type Error = Infallible;
}

impl InputPin for EndStop {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!self.closed())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.closed())
    }
}
