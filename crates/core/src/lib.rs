//! Wildfire Simulation Core Library
//!
//! A stochastic cellular-automaton model of wildfire spread on a 2-D grid.
//! Each step burns out fires, regrows trees, ignites trees spontaneously or
//! from burning neighbours on the upwind side, and moves clouds across the map.
//!
//! ## Environmental forcing
//!
//! - A single prevailing wind fixed for the run, biasing spread and carrying clouds
//! - A diurnal temperature curve redrawn every 24 steps; hot hours double the
//!   spontaneous ignition chance
//! - Random-walk cloud patches that temporarily cover the landscape
//!
//! ## Example
//!
//! ```
//! use wildfire_core::{SimulationConfig, WildfireSimulation, WindDirection};
//!
//! let config = SimulationConfig {
//!     rows: 32,
//!     cols: 32,
//!     wind: WindDirection::SouthWest,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let mut sim = WildfireSimulation::new(config).unwrap();
//! for step in 0..48 {
//!     sim.step(step);
//! }
//! assert!(*sim.burned_ratio() <= 100.0);
//! assert_eq!(sim.temperature().len(), 24);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;
pub mod rng;

// Landscape, weather and engine
pub mod config;
pub mod grid;
pub mod simulation;
pub mod weather;

// Re-export core types
pub use core_types::{CellState, Celsius, Offset, Percent, Probability, WindDirection};
pub use error::{SimError, SimResult};
pub use rng::SimRng;

// Re-export engine types
pub use config::SimulationConfig;
pub use grid::{CellMask, Landscape, SurfaceKind, TerrainGenerator};
pub use simulation::{SimulationStats, WildfireSimulation};
pub use weather::{DiurnalCycle, TemperatureCurve};
