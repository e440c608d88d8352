//! Diurnal temperature cycle
//!
//! One shared daily curve drives ignition for the whole map. Each curve is a
//! sinusoid with its minimum at midnight and maximum at noon, plus independent
//! Gaussian noise per hour:
//!
//! `T(h) = average + amplitude · sin(2π·h/24 − π/2) + N(0, noise_level)`
//!
//! The curve is redrawn at the start of every step index that is a positive
//! multiple of 24 and reused unchanged in between.

use crate::core_types::units::Celsius;
use crate::error::{SimError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of hourly samples in a curve
pub const HOURS_PER_DAY: usize = 24;

/// Above this temperature spontaneous ignition is more likely
pub const HOT_THRESHOLD: Celsius = Celsius::new(25.0);

/// Spontaneous ignition multiplier on hot hours
pub const HOT_IGNITION_FACTOR: f64 = 2.0;

/// Hour of day for a step index
#[inline]
pub fn hour_of_day(step: u64) -> usize {
    (step % HOURS_PER_DAY as u64) as usize
}

/// Whether a new curve is drawn at the start of `step`
#[inline]
pub fn regenerates_at(step: u64) -> bool {
    step > 0 && step % HOURS_PER_DAY as u64 == 0
}

/// Parameters of the daily temperature curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiurnalCycle {
    /// Daily mean (°C)
    pub average: Celsius,
    /// Half the day/night swing (°C)
    pub amplitude: f64,
    /// Standard deviation of the hourly noise (°C)
    pub noise_level: f64,
}

impl Default for DiurnalCycle {
    fn default() -> Self {
        Self {
            average: Celsius::new(20.0),
            amplitude: 5.0,
            noise_level: 2.0,
        }
    }
}

impl DiurnalCycle {
    pub fn validate(&self) -> SimResult<()> {
        if !self.average.is_finite() {
            return Err(SimError::InvalidTemperature {
                name: "average",
                value: *self.average,
            });
        }
        if !self.amplitude.is_finite() {
            return Err(SimError::InvalidTemperature {
                name: "amplitude",
                value: self.amplitude,
            });
        }
        if !(self.noise_level.is_finite() && self.noise_level >= 0.0) {
            return Err(SimError::InvalidNoiseLevel(self.noise_level));
        }
        Ok(())
    }

    /// Noise-free temperature at `hour`
    pub fn baseline(&self, hour: usize) -> Celsius {
        let phase = 2.0 * PI * hour as f64 / HOURS_PER_DAY as f64 - PI / 2.0;
        self.average + self.amplitude * phase.sin()
    }
}

/// 24 hourly temperatures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureCurve([Celsius; HOURS_PER_DAY]);

impl TemperatureCurve {
    /// Curve without noise
    pub fn baseline(cycle: &DiurnalCycle) -> Self {
        Self(std::array::from_fn(|hour| cycle.baseline(hour)))
    }

    /// Temperature at `hour` (taken modulo 24)
    #[inline]
    pub fn at_hour(&self, hour: usize) -> Celsius {
        self.0[hour % HOURS_PER_DAY]
    }

    #[inline]
    pub fn values(&self) -> &[Celsius; HOURS_PER_DAY] {
        &self.0
    }

    /// Multiplier applied to the spontaneous ignition probability at `hour`
    pub fn ignition_coefficient(&self, hour: usize) -> f64 {
        if self.at_hour(hour) > *HOT_THRESHOLD {
            HOT_IGNITION_FACTOR
        } else {
            1.0
        }
    }
}

/// Current curve plus the noise source used to redraw it
#[derive(Debug, Clone)]
pub struct TemperatureCycle {
    params: DiurnalCycle,
    noise: Normal<f64>,
    curve: TemperatureCurve,
}

impl TemperatureCycle {
    /// Validate `params` and draw the first curve
    pub fn new<R: Rng + ?Sized>(params: DiurnalCycle, rng: &mut R) -> SimResult<Self> {
        params.validate()?;
        let noise = Normal::new(0.0, params.noise_level)
            .map_err(|_| SimError::InvalidNoiseLevel(params.noise_level))?;
        let mut cycle = Self {
            params,
            noise,
            curve: TemperatureCurve::baseline(&params),
        };
        cycle.regenerate(rng);
        Ok(cycle)
    }

    /// Draw a fresh curve
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let base = TemperatureCurve::baseline(&self.params);
        self.curve = TemperatureCurve(std::array::from_fn(|hour| {
            base.at_hour(hour) + self.noise.sample(rng)
        }));
    }

    /// Redraw the curve if `step` starts a new day; returns whether it did
    pub fn advance<R: Rng + ?Sized>(&mut self, step: u64, rng: &mut R) -> bool {
        if regenerates_at(step) {
            self.regenerate(rng);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn curve(&self) -> &TemperatureCurve {
        &self.curve
    }

    #[inline]
    pub fn params(&self) -> &DiurnalCycle {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;
    use approx::assert_relative_eq;

    #[test]
    fn test_baseline_shape() {
        let cycle = DiurnalCycle::default();
        assert_relative_eq!(*cycle.baseline(0), 15.0, epsilon = 1e-9);
        assert_relative_eq!(*cycle.baseline(6), 20.0, epsilon = 1e-9);
        assert_relative_eq!(*cycle.baseline(12), 25.0, epsilon = 1e-9);
        assert_relative_eq!(*cycle.baseline(18), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_noise_matches_baseline() {
        let params = DiurnalCycle {
            noise_level: 0.0,
            ..Default::default()
        };
        let mut rng = SimRng::from_seed_u64(5);
        let cycle = TemperatureCycle::new(params, &mut rng).unwrap();
        assert_eq!(cycle.curve(), &TemperatureCurve::baseline(&params));
    }

    #[test]
    fn test_regeneration_schedule() {
        assert!(!regenerates_at(0));
        assert!(!regenerates_at(1));
        assert!(!regenerates_at(23));
        assert!(regenerates_at(24));
        assert!(!regenerates_at(25));
        assert!(regenerates_at(48));
        assert_eq!(hour_of_day(49), 1);
    }

    #[test]
    fn test_advance_only_redraws_on_new_day() {
        let mut rng = SimRng::from_seed_u64(11);
        let mut cycle = TemperatureCycle::new(DiurnalCycle::default(), &mut rng).unwrap();
        let first = *cycle.curve();
        assert!(!cycle.advance(0, &mut rng));
        assert!(!cycle.advance(13, &mut rng));
        assert_eq!(cycle.curve(), &first);
        assert!(cycle.advance(24, &mut rng));
        assert_ne!(cycle.curve(), &first);
    }

    #[test]
    fn test_hot_hours_double_ignition() {
        let hot = DiurnalCycle {
            average: Celsius::new(40.0),
            amplitude: 0.0,
            noise_level: 0.0,
        };
        let curve = TemperatureCurve::baseline(&hot);
        assert_eq!(curve.ignition_coefficient(3), HOT_IGNITION_FACTOR);

        let mild = TemperatureCurve::baseline(&DiurnalCycle {
            average: Celsius::new(25.0),
            amplitude: 0.0,
            noise_level: 0.0,
        });
        // Exactly at the threshold is not hot
        assert_eq!(mild.ignition_coefficient(3), 1.0);
    }

    #[test]
    fn test_invalid_noise_rejected() {
        let mut rng = SimRng::from_seed_u64(0);
        let params = DiurnalCycle {
            noise_level: -1.0,
            ..Default::default()
        };
        assert_eq!(
            TemperatureCycle::new(params, &mut rng).unwrap_err(),
            SimError::InvalidNoiseLevel(-1.0)
        );
        let params = DiurnalCycle {
            amplitude: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
