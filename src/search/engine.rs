//! Greedy nearest-unvisited search over the constellation.

use embedded_hal::digital::OutputPin;

use crate::axis::{AxisController, MoveOutcome};
use crate::clock::Clock;
use crate::config::units::Degrees;
use crate::error::Result;
use crate::logging::{rack_debug, rack_info};
use crate::sensor::{BrightnessComparator, LimitSwitch};
use crate::storage::AngleStore;

use super::constellation::{Candidate, Constellation, CANDIDATE_COUNT};

/// Actuation cost of moving between two orientations, scaled by `max_x`.
///
/// The x gearing needs far more motor steps per degree than z, so an x
/// degree counts as `max_z / max_x` z degrees. Multiplying through by
/// `max_x` keeps the comparison exact:
/// `|dx| * max_z + |dz| * max_x`.
pub fn weighted_cost(
    from: (Degrees, Degrees),
    to: (Degrees, Degrees),
    max_x: u16,
    max_z: u16,
) -> u64 {
    let dx = (to.0 - from.0).abs() as u64;
    let dz = (to.1 - from.1).abs() as u64;
    dx * max_z as u64 + dz * max_x as u64
}

/// Outcome of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Angles the axes reached at each stop, in visiting order.
    pub visits: heapless::Vec<(Degrees, Degrees), CANDIDATE_COUNT>,
    /// Last stop the comparator called brightest, if any.
    pub best: Option<(Degrees, Degrees)>,
}

/// Search engine for one rack.
#[derive(Debug, Clone)]
pub struct SolarSearch {
    constellation: Constellation,
    max_x: u16,
    max_z: u16,
}

impl SolarSearch {
    /// Engine for a rack whose axes span `±max_x` and `±max_z`.
    pub fn new(max_x: u16, max_z: u16) -> Self {
        Self {
            constellation: Constellation::new(max_x, max_z),
            max_x,
            max_z,
        }
    }

    /// The candidate set.
    #[inline]
    pub fn constellation(&self) -> &Constellation {
        &self.constellation
    }

    /// Index of the cheapest unvisited candidate from `current`.
    ///
    /// Ties go to the candidate that comes first in scan order.
    pub fn next_candidate(&self, current: (Degrees, Degrees)) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (index, candidate) in self.constellation.candidates().iter().enumerate() {
            if candidate.visited {
                continue;
            }
            let cost = weighted_cost(current, candidate.position(), self.max_x, self.max_z);
            if best.map_or(true, |(_, lowest)| cost < lowest) {
                best = Some((index, cost));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Run a full search and leave the rack on the brightest candidate.
    ///
    /// Homes `z_axis` first, then visits all candidates, reading `comparator`
    /// at each. If the comparator never reports brightest, the axes stay on
    /// the last candidate visited. Visited flags are cleared when this
    /// returns, whether or not it succeeded.
    ///
    /// # Errors
    ///
    /// `MotorError::NoLimitSwitch` if `z_axis` cannot home, otherwise any
    /// pin, sensor or storage failure along the way.
    pub fn run<XP, XC, XS, XL, ZP, ZC, ZS, ZL, CMP>(
        &mut self,
        x_axis: &mut AxisController<XP, XC, XS, XL>,
        z_axis: &mut AxisController<ZP, ZC, ZS, ZL>,
        comparator: &mut CMP,
    ) -> Result<SearchReport>
    where
        XP: OutputPin,
        XC: Clock,
        XS: AngleStore,
        XL: LimitSwitch,
        ZP: OutputPin,
        ZC: Clock,
        ZS: AngleStore,
        ZL: LimitSwitch,
        CMP: BrightnessComparator,
    {
        let result = self.visit_all(x_axis, z_axis, comparator);
        self.constellation.reset();
        result
    }

    fn visit_all<XP, XC, XS, XL, ZP, ZC, ZS, ZL, CMP>(
        &mut self,
        x_axis: &mut AxisController<XP, XC, XS, XL>,
        z_axis: &mut AxisController<ZP, ZC, ZS, ZL>,
        comparator: &mut CMP,
    ) -> Result<SearchReport>
    where
        XP: OutputPin,
        XC: Clock,
        XS: AngleStore,
        XL: LimitSwitch,
        ZP: OutputPin,
        ZC: Clock,
        ZS: AngleStore,
        ZL: LimitSwitch,
        CMP: BrightnessComparator,
    {
        rack_info!("search: homing z before scan");
        z_axis.home()?;

        let mut report = SearchReport {
            visits: heapless::Vec::new(),
            best: None,
        };
        let mut current = (x_axis.current_angle(), z_axis.current_angle());

        while let Some(index) = self.next_candidate(current) {
            self.constellation.mark_visited(index);
            let Candidate { x, z, .. } = self.constellation.candidates()[index];

            approach(x_axis, x)?;
            approach(z_axis, z)?;
            current = (x_axis.current_angle(), z_axis.current_angle());
            let _ = report.visits.push(current);

            let brightest = comparator.read()?;
            rack_debug!(
                "search: visited ({}, {}) brightest={}",
                current.0.value(),
                current.1.value(),
                brightest
            );
            if brightest {
                report.best = Some(current);
            }
        }

        match report.best {
            Some((x, z)) => {
                approach(x_axis, x)?;
                approach(z_axis, z)?;
                rack_info!("search: settled on ({}, {})", x.value(), z.value());
            }
            None => rack_info!("search: no brightest reading, staying put"),
        }

        Ok(report)
    }
}

/// Move `axis` to `target`, going again if homing cut the move short.
///
/// Homing leaves the axis at `-max`, so the second move runs clockwise and
/// cannot be cut short again.
fn approach<P, C, S, L>(axis: &mut AxisController<P, C, S, L>, target: Degrees) -> Result<()>
where
    P: OutputPin,
    C: Clock,
    S: AngleStore,
    L: LimitSwitch,
{
    if axis.rotate_to(target)? == MoveOutcome::Homed {
        rack_debug!(
            "search: axis {} homed on the way, heading back to {}",
            axis.name(),
            target.value()
        );
        axis.rotate_to(target)?;
    }
    Ok(())
}
