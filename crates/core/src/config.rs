//! Simulation configuration
//!
//! Every tunable has its own default, so callers override only what they need:
//!
//! ```
//! use wildfire_core::{SimulationConfig, WindDirection};
//!
//! let config = SimulationConfig {
//!     rows: 64,
//!     cols: 64,
//!     wind: WindDirection::North,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::core_types::units::Probability;
use crate::core_types::WindDirection;
use crate::error::SimResult;
use crate::grid::landscape::validate_dimensions;
use crate::weather::DiurnalCycle;
use serde::{Deserialize, Serialize};

/// Parameters fixed for the lifetime of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid height in cells
    pub rows: usize,
    /// Grid width in cells
    pub cols: usize,
    /// Per-step chance that a tree ignites on its own (doubled on hot hours)
    pub fire_probability: f64,
    /// Per-step chance that empty ground grows a tree
    pub regrowth_probability: f64,
    /// Base chance of placing bedrock on a cell
    pub bedrock: f64,
    /// Base chance of placing water on a cell
    pub water: f64,
    /// Prevailing wind for the whole run
    pub wind: WindDirection,
    /// Per-step chance of spawning a cloud patch; drawn uniformly when `None`
    pub cloud_coverage: Option<f64>,
    /// Daily temperature curve parameters
    pub temperature: DiurnalCycle,
    /// RNG seed; OS entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            fire_probability: 0.01,
            regrowth_probability: 1e-4,
            bedrock: 0.005,
            water: 0.05,
            wind: WindDirection::NorthEast,
            cloud_coverage: None,
            temperature: DiurnalCycle::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter, returning the first violation
    pub fn validate(&self) -> SimResult<()> {
        validate_dimensions(self.rows, self.cols)?;
        Probability::new(self.fire_probability, "fire_probability")?;
        Probability::new(self.regrowth_probability, "regrowth_probability")?;
        Probability::new(self.bedrock, "bedrock")?;
        Probability::new(self.water, "water")?;
        if let Some(coverage) = self.cloud_coverage {
            Probability::new(coverage, "cloud_coverage")?;
        }
        self.temperature.validate()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}
