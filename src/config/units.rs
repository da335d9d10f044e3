//! Unit types for physical quantities.
//!
//! Provides type-safe representations of lengths, speeds, motor steps and
//! timestamps so millimetres never get mixed up with steps.

use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Linear distance in millimetres.
///
/// Used on the wire and in configuration. Internally converted to [`Steps`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Millimeters(pub f32);

impl Millimeters {
    /// Create a new Millimeters value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Clamp into `[0, max]`.
    #[inline]
    pub fn clamp_to(self, max: Millimeters) -> Self {
        Self(self.0.clamp(0.0, max.0))
    }
}

impl Add for Millimeters {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Millimeters {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Stepping rate in steps per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Minimum delay between two pulses at this rate.
    ///
    /// Rounded to the nearest microsecond, never below one.
    #[inline]
    pub fn step_delay(self) -> Micros {
        if self.0 > 0.0 {
            Micros(libm::roundf(1_000_000.0 / self.0).max(1.0) as u64)
        } else {
            Micros(u64::MAX)
        }
    }
}

/// Signed count of motor steps.
///
/// Uses i64 for unlimited range in either direction.
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

    /// Convert to millimetres using the steps per mm ratio.
    #[inline]
    pub fn to_mm(self, steps_per_mm: f32) -> Millimeters {
        Millimeters(self.0 as f32 / steps_per_mm)
    }

    /// Create from millimetres, rounded to the nearest step.
    #[inline]
    pub fn from_mm(mm: Millimeters, steps_per_mm: f32) -> Self {
        Self(libm::roundf(mm.0 * steps_per_mm) as i64)
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Monotonic timestamp or duration in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Micros(pub u64);

impl Micros {
    /// Create a new Micros value.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`; zero if the clock went backwards.
    #[inline]
    pub fn since(self, earlier: Micros) -> Micros {
        Micros(self.0.saturating_sub(earlier.0))
    }
}

impl Add for Micros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}
