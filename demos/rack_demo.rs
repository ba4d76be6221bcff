//! Rack control example.
//!
//! Builds the reference rack from TOML on simulated hardware: coil lines
//! that turn a virtual shaft, an end stop on the z shaft, and a comparator
//! that knows where the sun is. Nudges both axes, then runs a light search.
//!
//! Time is virtual so the search finishes instantly.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use solar_rack::motor::PHASE_TABLE;
use solar_rack::{
    config::parse_config, BrightnessComparator, Clock, FileAngleStore, LimitSwitchInput, Rack,
    RackCommand, StepperMotorBuilder,
};

const RACK_TOML: &str = r#"
[x_axis]
name = "x"
steps_per_degree = 568
max_angle_deg = 25
angle_file = "cur_x.txt"

[z_axis]
name = "z"
steps_per_degree = 9
max_angle_deg = 90
angle_file = "cur_z.txt"

[limit_switch]
debounce_ms = 0
"#;

/// Clock that advances one millisecond per sample.
#[derive(Clone, Default)]
struct VirtualClock(Rc<Cell<u64>>);

impl Clock for VirtualClock {
    fn now_ns(&mut self) -> u64 {
        self.0.set(self.0.get() + 1_000_000);
        self.0.get()
    }
}

/// Shaft turned by four coil lines.
#[derive(Default)]
struct Shaft {
    pattern: [bool; 4],
    phase: usize,
    steps: i64,
}

impl Shaft {
    fn write(&mut self, coil: usize, high: bool) {
        self.pattern[coil] = high;
        if coil != 3 {
            return;
        }
        if let Some(phase) = PHASE_TABLE.iter().position(|p| *p == self.pattern) {
            match (phase + 4 - self.phase) % 4 {
                1 => self.steps += 1,
                3 => self.steps -= 1,
                _ => {}
            }
            self.phase = phase;
        }
    }
}

struct Coil {
    index: usize,
    shaft: Rc<RefCell<Shaft>>,
}

impl ErrorType for Coil {
    type Error = Infallible;
}

impl OutputPin for Coil {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.shaft.borrow_mut().write(self.index, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.shaft.borrow_mut().write(self.index, true);
        Ok(())
    }
}

fn coils(shaft: &Rc<RefCell<Shaft>>) -> [Coil; 4] {
    core::array::from_fn(|index| Coil {
        index,
        shaft: Rc::clone(shaft),
    })
}

/// Pull-up end stop closing at -90° on the z shaft.
struct EndStop {
    shaft: Rc<RefCell<Shaft>>,
    start_deg: i64,
}

impl EndStop {
    fn closed(&self) -> bool {
        self.start_deg * 9 + self.shaft.borrow().steps <= -90 * 9
    }
}

impl ErrorType for EndStop {
    type Error = Infallible;
}

impl InputPin for EndStop {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.closed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.closed())
    }
}

/// Comparator peripheral tracking the brightest sample of a series.
struct SunSensor {
    x: Rc<RefCell<Shaft>>,
    z: Rc<RefCell<Shaft>>,
    z_start_deg: i64,
    sun: (i64, i64),
    best: Option<i64>,
}

impl BrightnessComparator for SunSensor {
    fn read(&mut self) -> solar_rack::Result<bool> {
        let x = self.x.borrow().steps / 568;
        let z = self.z_start_deg + self.z.borrow().steps / 9;
        let light = -((x - self.sun.0).abs() * 4 + (z - self.sun.1).abs());
        let brightest = self.best.map_or(true, |best| light > best);
        if brightest {
            self.best = Some(light);
        }
        Ok(brightest)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Solar Rack Example ===\n");

    let config = parse_config(RACK_TOML)?;
    let dir = std::env::temp_dir().join("solar-rack-demo");
    std::fs::create_dir_all(&dir)?;
    let _ = std::fs::remove_file(dir.join("cur_x.txt"));
    let _ = std::fs::remove_file(dir.join("cur_z.txt"));

    let clock = VirtualClock::default();
    let x_shaft = Rc::new(RefCell::new(Shaft::default()));
    let z_shaft = Rc::new(RefCell::new(Shaft::default()));

    let x_motor = StepperMotorBuilder::new()
        .from_axis_config(&config.x_axis)
        .pins(coils(&x_shaft))
        .clock(clock.clone())
        .build()?;
    let z_motor = StepperMotorBuilder::new()
        .from_axis_config(&config.z_axis)
        .pins(coils(&z_shaft))
        .clock(clock.clone())
        .build()?;

    let end_stop = EndStop {
        shaft: Rc::clone(&z_shaft),
        start_deg: 0,
    };
    let switch = LimitSwitchInput::from_config(end_stop, clock.clone(), &config.limit_switch)?;
    let sensor = SunSensor {
        x: Rc::clone(&x_shaft),
        z: Rc::clone(&z_shaft),
        z_start_deg: 0,
        sun: (-25, 0),
        best: None,
    };

    let mut rack = Rack::from_config(
        &config,
        x_motor,
        FileAngleStore::in_dir(&dir, config.x_axis.angle_file.as_str()),
        z_motor,
        FileAngleStore::in_dir(&dir, config.z_axis.angle_file.as_str()),
        switch,
        sensor,
    )?;
    println!("Synchronized at start: {}", rack.is_synchronized());

    for command in [
        RackCommand::XClockwise,
        RackCommand::XClockwise,
        RackCommand::ZAnticlockwise,
        RackCommand::NoOp,
    ] {
        rack.update(command)?;
        let (x, z) = rack.orientation();
        println!("{:<6} -> x = {:>3}°, z = {:>3}°", command.label(), x.value(), z.value());
    }

    println!("\nSearching for light...");
    let report = rack.light_search()?;
    for (stop, (x, z)) in report.visits.iter().enumerate() {
        println!("  stop {}: ({:>3}°, {:>3}°)", stop + 1, x.value(), z.value());
    }

    let (x, z) = rack.orientation();
    println!("Settled on x = {}°, z = {}°", x.value(), z.value());
    println!("Angles persisted under {}", dir.display());

    println!("\n=== Example Complete ===");
    Ok(())
}
