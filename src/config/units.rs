//! Unit types for physical quantities.
//!
//! Angles on the rack are whole degrees; motor motion is whole phase-steps.
//! Keeping them in distinct types prevents passing one where the other is
//! expected.

use core::ops::{Add, Neg, Sub};

use serde::Deserialize;

/// Angular position in whole degrees, signed around the axis' flat position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub i32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Magnitude in degrees.
    #[inline]
    pub fn abs(self) -> u32 {
        self.0.unsigned_abs()
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Degrees {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i32> for Degrees {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Signed count of motor phase-steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Steps for a whole-degree move at `steps_per_degree`.
    #[inline]
    pub fn from_degrees(degrees: Degrees, steps_per_degree: u32) -> Self {
        Self(degrees.0 as i64 * steps_per_degree as i64)
    }
}

/// Logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Line reads low.
    #[default]
    Low,
    /// Line reads high.
    High,
}

impl Level {
    /// Level from an `is_high()` sample.
    #[inline]
    pub fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Whether this is [`Level::High`].
    #[inline]
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Degrees.
    fn degrees(self) -> Degrees;
}

impl UnitExt for i32 {
    #[inline]
    fn degrees(self) -> Degrees {
        Degrees(self)
    }
}
