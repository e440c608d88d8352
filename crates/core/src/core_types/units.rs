//! Semantic unit types for the simulation's scalar quantities
//!
//! Newtype wrappers keep temperatures, percentages and probabilities from being
//! mixed up in signatures.
//!
//! # Usage
//! ```
//! use wildfire_core::core_types::units::{Celsius, Percent, Probability};
//!
//! let t = Celsius::new(27.5);
//! assert!(t > 25.0);
//!
//! let p = Probability::new(0.25, "fire_probability").unwrap();
//! assert_eq!(*p, 0.25);
//!
//! let burned = Percent::rounded(12.3456);
//! assert_eq!(*burned, 12.35);
//! ```

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Sub};

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Celsius {
    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Raw value in °C
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl From<Celsius> for f64 {
    fn from(c: Celsius) -> f64 {
        c.0
    }
}

impl Add<f64> for Celsius {
    type Output = Celsius;
    fn add(self, rhs: f64) -> Celsius {
        Celsius(self.0 + rhs)
    }
}

impl Sub for Celsius {
    type Output = f64;
    fn sub(self, rhs: Celsius) -> f64 {
        self.0 - rhs.0
    }
}

impl PartialEq<f64> for Celsius {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for Celsius {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

/// A percentage (0-100), rounded to two decimals when produced by statistics
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f64);

impl Percent {
    /// Create a percentage without rounding
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Create a percentage rounded to two decimal places, ties to even
    #[inline]
    #[must_use]
    pub fn rounded(value: f64) -> Self {
        Percent((value * 100.0).round_ties_even() / 100.0)
    }

    /// Share of `part` in `total`, as a rounded percentage
    ///
    /// An empty total yields 0 %.
    #[must_use]
    pub fn of(part: usize, total: usize) -> Self {
        if total == 0 {
            return Percent(0.0);
        }
        Self::rounded(part as f64 / total as f64 * 100.0)
    }

    /// Raw value in percent
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} %", self.0)
    }
}

/// A probability in `[0, 1]`
///
/// Construction rejects NaN and out-of-range values instead of clamping them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Never fires
    pub const ZERO: Probability = Probability(0.0);
    /// Always fires
    pub const ONE: Probability = Probability(1.0);

    /// Validate and wrap a probability; `name` identifies the parameter in errors
    pub fn new(value: f64, name: &'static str) -> SimResult<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Probability(value))
        } else {
            Err(SimError::InvalidProbability { name, value })
        }
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Deref for Probability {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounding() {
        assert_eq!(*Percent::rounded(33.333_333), 33.33);
        assert_eq!(*Percent::rounded(66.666_666), 66.67);
        assert_eq!(*Percent::of(1, 3), 33.33);
        assert_eq!(*Percent::of(0, 0), 0.0);
        assert_eq!(*Percent::of(100, 100), 100.0);
    }

    #[test]
    fn test_percent_ties_round_to_even() {
        // 8 of 256 cells is exactly 3.125 %
        assert_eq!(*Percent::of(8, 256), 3.12);
        assert_eq!(*Percent::of(24, 256), 9.38);
        assert_eq!(*Percent::rounded(0.125), 0.12);
        assert_eq!(*Percent::rounded(0.375), 0.38);
    }

    #[test]
    fn test_probability_validation() {
        assert!(Probability::new(0.0, "p").is_ok());
        assert!(Probability::new(1.0, "p").is_ok());
        assert!(Probability::new(-0.01, "p").is_err());
        assert!(Probability::new(1.01, "p").is_err());
        assert!(Probability::new(f64::NAN, "p").is_err());
    }

    #[test]
    fn test_celsius_display() {
        assert_eq!(Celsius::new(24.96).to_string(), "25.0°C");
        assert!(Celsius::new(25.1) > 25.0);
    }
}
