//! Rack façade: the six-command surface over both axes and the search.

use embedded_hal::digital::OutputPin;

use crate::axis::{AxisController, MoveOutcome};
use crate::clock::Clock;
use crate::config::units::Degrees;
use crate::config::{LimitPolicy, RackConfig};
use crate::error::{bounded, RackError, Result};
use crate::logging::{rack_debug, rack_info};
use crate::motor::{Direction, StepperMotor};
use crate::search::{SearchReport, SolarSearch};
use crate::sensor::{BrightnessComparator, LimitSwitch, NoLimitSwitch};
use crate::storage::AngleStore;

/// Everything the rack accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RackCommand {
    /// Tilt x one degree clockwise.
    XClockwise,
    /// Tilt x one degree anticlockwise.
    XAnticlockwise,
    /// Turn z one degree clockwise.
    ZClockwise,
    /// Turn z one degree anticlockwise (may home instead).
    ZAnticlockwise,
    /// Run a full light search.
    LightSearch,
    /// Do nothing.
    NoOp,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// An axis moved; `Homed` if homing replaced the nudge.
    Moved(MoveOutcome),
    /// The nudge would leave the range under `LimitPolicy::Clamp`; nothing moved.
    Held,
    /// A search ran.
    Searched(SearchReport),
    /// `NoOp`.
    Ignored,
}

/// Two-axis solar rack.
///
/// The x axis has no limit switch; the z axis homes against `SWITCH`.
/// Nudges are range-checked here according to the [`LimitPolicy`], the
/// axes themselves move wherever they are told.
pub struct Rack<PIN, CLOCK, STORE, SWITCH, CMP>
where
    PIN: OutputPin,
    CLOCK: Clock,
    STORE: AngleStore,
    SWITCH: LimitSwitch,
    CMP: BrightnessComparator,
{
    x_axis: AxisController<PIN, CLOCK, STORE, NoLimitSwitch>,
    z_axis: AxisController<PIN, CLOCK, STORE, SWITCH>,
    comparator: CMP,
    search: SolarSearch,
    policy: LimitPolicy,
}

impl<PIN, CLOCK, STORE, SWITCH, CMP> Rack<PIN, CLOCK, STORE, SWITCH, CMP>
where
    PIN: OutputPin,
    CLOCK: Clock,
    STORE: AngleStore,
    SWITCH: LimitSwitch,
    CMP: BrightnessComparator,
{
    /// Assemble a rack from ready axes. The search constellation follows
    /// the axes' ranges.
    pub fn new(
        x_axis: AxisController<PIN, CLOCK, STORE, NoLimitSwitch>,
        z_axis: AxisController<PIN, CLOCK, STORE, SWITCH>,
        comparator: CMP,
        policy: LimitPolicy,
    ) -> Self {
        let search = SolarSearch::new(x_axis.max_angle(), z_axis.max_angle());
        Self {
            x_axis,
            z_axis,
            comparator,
            search,
            policy,
        }
    }

    /// Assemble a rack from built motors, stores and sensors using `config`.
    ///
    /// Loads both axis angles from their stores.
    #[allow(clippy::too_many_arguments)]
    pub fn from_config(
        config: &RackConfig,
        x_motor: StepperMotor<PIN, CLOCK>,
        x_store: STORE,
        z_motor: StepperMotor<PIN, CLOCK>,
        z_store: STORE,
        limit_switch: SWITCH,
        comparator: CMP,
    ) -> Result<Self> {
        let x_axis = AxisController::from_config(x_motor, x_store, NoLimitSwitch, &config.x_axis)?;
        let z_axis = AxisController::from_config(z_motor, z_store, limit_switch, &config.z_axis)?;
        Ok(Self::new(x_axis, z_axis, comparator, config.rack.limit_policy))
    }

    /// The x axis.
    pub fn x_axis(&self) -> &AxisController<PIN, CLOCK, STORE, NoLimitSwitch> {
        &self.x_axis
    }

    /// The z axis.
    pub fn z_axis(&self) -> &AxisController<PIN, CLOCK, STORE, SWITCH> {
        &self.z_axis
    }

    /// The search engine.
    pub fn search(&self) -> &SolarSearch {
        &self.search
    }

    /// Current `(x, z)` orientation.
    pub fn orientation(&self) -> (Degrees, Degrees) {
        (self.x_axis.current_angle(), self.z_axis.current_angle())
    }

    /// Whether both angles come from storage or homing rather than a default.
    pub fn is_synchronized(&self) -> bool {
        self.x_axis.is_synchronized() && self.z_axis.is_synchronized()
    }

    /// Run one command to completion.
    ///
    /// # Errors
    ///
    /// `RackError::OutOfRange` for a nudge past the axis range under
    /// [`LimitPolicy::Reject`], otherwise whatever the axes, the switch or
    /// the comparator report.
    pub fn update(&mut self, command: RackCommand) -> Result<CommandOutcome> {
        rack_debug!("rack: command {}", command.label());
        match command {
            RackCommand::XClockwise => {
                nudge(&mut self.x_axis, self.policy, Direction::Clockwise)
            }
            RackCommand::XAnticlockwise => {
                nudge(&mut self.x_axis, self.policy, Direction::Anticlockwise)
            }
            RackCommand::ZClockwise => {
                nudge(&mut self.z_axis, self.policy, Direction::Clockwise)
            }
            RackCommand::ZAnticlockwise => {
                nudge(&mut self.z_axis, self.policy, Direction::Anticlockwise)
            }
            RackCommand::LightSearch => self.light_search().map(CommandOutcome::Searched),
            RackCommand::NoOp => Ok(CommandOutcome::Ignored),
        }
    }

    /// Search for the brightest orientation and stay there.
    pub fn light_search(&mut self) -> Result<SearchReport> {
        self.search
            .run(&mut self.x_axis, &mut self.z_axis, &mut self.comparator)
    }

    /// Home the z axis. Returns the degrees travelled.
    pub fn home_z(&mut self) -> Result<u32> {
        self.z_axis.home()
    }

    /// Take the parts back.
    #[allow(clippy::type_complexity)]
    pub fn release(
        self,
    ) -> (
        AxisController<PIN, CLOCK, STORE, NoLimitSwitch>,
        AxisController<PIN, CLOCK, STORE, SWITCH>,
        CMP,
    ) {
        (self.x_axis, self.z_axis, self.comparator)
    }
}

impl RackCommand {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            RackCommand::XClockwise => "x+",
            RackCommand::XAnticlockwise => "x-",
            RackCommand::ZClockwise => "z+",
            RackCommand::ZAnticlockwise => "z-",
            RackCommand::LightSearch => "search",
            RackCommand::NoOp => "noop",
        }
    }
}

fn nudge<PIN, CLOCK, STORE, LIMIT>(
    axis: &mut AxisController<PIN, CLOCK, STORE, LIMIT>,
    policy: LimitPolicy,
    direction: Direction,
) -> Result<CommandOutcome>
where
    PIN: OutputPin,
    CLOCK: Clock,
    STORE: AngleStore,
    LIMIT: LimitSwitch,
{
    let current = axis.current_angle();
    let requested = current + Degrees(direction.sign());

    if !axis.limits(policy).permits(current, requested) {
        match policy {
            LimitPolicy::Reject => {
                return Err(RackError::OutOfRange {
                    axis: bounded(axis.name()),
                    target: requested.value(),
                    max: axis.max_angle(),
                }
                .into())
            }
            LimitPolicy::Clamp => {
                rack_info!("rack: axis {} held at {} deg", axis.name(), current.value());
                return Ok(CommandOutcome::Held);
            }
        }
    }

    axis.rotate_to(requested).map(CommandOutcome::Moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::MemoryAngleStore;
    use crate::testing::{
        x_axis, z_axis, CountdownSwitch, NullPin, ScriptedComparator, Ticker,
    };

    type TestRack = Rack<NullPin, Ticker, MemoryAngleStore, CountdownSwitch, ScriptedComparator>;

    fn rack(x: i32, z: i32, switch: CountdownSwitch, policy: LimitPolicy) -> TestRack {
        Rack::new(
            x_axis(MemoryAngleStore::with_angle(x)),
            z_axis(MemoryAngleStore::with_angle(z), switch),
            ScriptedComparator::new(&[true]),
            policy,
        )
    }

    #[test]
    fn test_nudges_move_one_degree() {
        let mut rack = rack(0, 0, CountdownSwitch::new(1000), LimitPolicy::Reject);

        rack.update(RackCommand::XClockwise).unwrap();
        rack.update(RackCommand::XClockwise).unwrap();
        rack.update(RackCommand::ZAnticlockwise).unwrap();
        rack.update(RackCommand::XAnticlockwise).unwrap();
        rack.update(RackCommand::ZClockwise).unwrap();
        rack.update(RackCommand::ZClockwise).unwrap();

        assert_eq!(rack.orientation(), (Degrees(1), Degrees(1)));
        assert_eq!(rack.x_axis().store().value(), Some(1));
        assert_eq!(rack.z_axis().store().value(), Some(1));
    }

    #[test]
    fn test_noop_is_ignored() {
        let mut rack = rack(3, -4, CountdownSwitch::new(1000), LimitPolicy::Reject);
        assert_eq!(rack.update(RackCommand::NoOp).unwrap(), CommandOutcome::Ignored);
        assert_eq!(rack.orientation(), (Degrees(3), Degrees(-4)));
        assert_eq!(rack.x_axis().store().writes(), 0);
    }

    #[test]
    fn test_reject_past_range() {
        let mut rack = rack(25, 0, CountdownSwitch::new(1000), LimitPolicy::Reject);

        let err = rack.update(RackCommand::XClockwise).unwrap_err();
        assert!(matches!(
            err,
            Error::Rack(RackError::OutOfRange { target: 26, max: 25, .. })
        ));
        assert_eq!(rack.orientation().0, Degrees(25));
    }

    #[test]
    fn test_clamp_holds_at_edge() {
        let mut rack = rack(-25, 90, CountdownSwitch::new(1000), LimitPolicy::Clamp);

        assert_eq!(rack.update(RackCommand::XAnticlockwise).unwrap(), CommandOutcome::Held);
        assert_eq!(rack.update(RackCommand::ZClockwise).unwrap(), CommandOutcome::Held);
        assert_eq!(rack.orientation(), (Degrees(-25), Degrees(90)));
    }

    #[test]
    fn test_clamp_never_turns_a_nudge_around() {
        // stored angle from before max_angle_deg was lowered
        let mut rack = rack(40, 0, CountdownSwitch::new(1000), LimitPolicy::Clamp);

        assert_eq!(rack.update(RackCommand::XClockwise).unwrap(), CommandOutcome::Held);
        assert_eq!(rack.orientation().0, Degrees(40));
        assert_eq!(rack.x_axis().motor().last_direction(), None);
        assert_eq!(rack.x_axis().store().writes(), 0);

        assert_eq!(
            rack.update(RackCommand::XAnticlockwise).unwrap(),
            CommandOutcome::Moved(MoveOutcome::Completed)
        );
        assert_eq!(rack.orientation().0, Degrees(39));
        assert_eq!(
            rack.x_axis().motor().last_direction(),
            Some(Direction::Anticlockwise)
        );
    }

    #[test]
    fn test_reject_allows_walking_back_into_range() {
        let mut rack = rack(-40, 0, CountdownSwitch::new(1000), LimitPolicy::Reject);

        let err = rack.update(RackCommand::XAnticlockwise).unwrap_err();
        assert!(matches!(
            err,
            Error::Rack(RackError::OutOfRange { target: -41, max: 25, .. })
        ));
        assert_eq!(rack.orientation().0, Degrees(-40));

        rack.update(RackCommand::XClockwise).unwrap();
        assert_eq!(rack.orientation().0, Degrees(-39));
        assert_eq!(rack.x_axis().store().value(), Some(-39));
    }

    #[test]
    fn test_z_anticlockwise_homes_when_triggered() {
        let mut rack = rack(0, 17, CountdownSwitch::new(0), LimitPolicy::Reject);

        assert_eq!(
            rack.update(RackCommand::ZAnticlockwise).unwrap(),
            CommandOutcome::Moved(MoveOutcome::Homed)
        );
        assert_eq!(rack.orientation().1, Degrees(-90));
    }

    #[test]
    fn test_light_search_commits_to_best() {
        // the first stop is the only brightest reading
        let mut rack = rack(0, 0, CountdownSwitch::pulse(90, 1), LimitPolicy::Reject);

        let outcome = rack.update(RackCommand::LightSearch).unwrap();
        let CommandOutcome::Searched(report) = outcome else {
            panic!("expected a search report");
        };

        assert_eq!(report.best, Some((Degrees(25), Degrees(-90))));
        assert_eq!(rack.orientation(), (Degrees(25), Degrees(-90)));
        assert!(rack
            .search()
            .constellation()
            .candidates()
            .iter()
            .all(|c| !c.visited));
    }
}
