//! Wildfire simulation engine
//!
//! `WildfireSimulation` owns the landscape and all mutable state and advances
//! it one synchronous step at a time:
//! - regenerate the temperature curve at the start of each new day
//! - run the per-cell rule chain from the committed snapshot into a working buffer
//! - record the working buffer as the next pre-cloud layer
//! - drift existing clouds with the wind and maybe spawn a new cloud patch
//! - commit the working buffer and recompute statistics

pub(crate) mod rules;
pub mod stats;

pub use rules::is_fire_adjacent;
pub use stats::SimulationStats;

use crate::config::SimulationConfig;
use crate::core_types::units::{Celsius, Percent, Probability};
use crate::core_types::{CellState, WindDirection};
use crate::error::{SimError, SimResult};
use crate::grid::{surface_neighbor, CellMask, Landscape, SurfaceKind, TerrainGenerator};
use crate::rng::SimRng;
use crate::weather::{
    drift_mask, generate_cloud_patch, hour_of_day, TemperatureCurve, TemperatureCycle,
    HOURS_PER_DAY,
};
use rand::Rng;
use rules::RuleContext;
use tracing::{debug, info, trace};

/// Cellular-automaton wildfire simulation
#[derive(Debug)]
pub struct WildfireSimulation {
    config: SimulationConfig,
    /// Committed grid (`S`)
    landscape: Landscape,
    /// Working buffer (`W`), swapped with `landscape` on commit
    working: Landscape,
    /// Previous step's grid before cloud overlay (`O`)
    pre_cloud: Landscape,
    temperature: TemperatureCycle,
    cloud_coverage: Probability,
    stats: SimulationStats,
    rng: SimRng,
}

impl WildfireSimulation {
    /// Create a simulation with generated terrain
    ///
    /// Seeds from `config.seed`, or from OS entropy when it is `None`.
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        let rng = config
            .seed
            .map_or_else(SimRng::from_entropy, SimRng::from_seed_u64);
        Self::with_rng(config, rng)
    }

    /// Create a simulation with generated terrain, drawing from `rng`
    pub fn with_rng(config: SimulationConfig, mut rng: SimRng) -> SimResult<Self> {
        config.validate()?;
        let cloud_coverage = resolve_cloud_coverage(&config, &mut rng)?;
        let temperature = TemperatureCycle::new(config.temperature, &mut rng)?;
        let landscape = TerrainGenerator::new(config.rows, config.cols, config.bedrock, config.water)?
            .generate(&mut rng)?;
        let pre_cloud = landscape.clone();
        Ok(Self::assemble(
            config,
            landscape,
            pre_cloud,
            temperature,
            cloud_coverage,
            rng,
        ))
    }

    /// Create a simulation from a prepared grid and pre-cloud layer
    ///
    /// Both grids must match the configured shape and `pre_cloud` must not
    /// contain clouds.
    pub fn from_layers(
        config: SimulationConfig,
        landscape: Landscape,
        pre_cloud: Landscape,
        mut rng: SimRng,
    ) -> SimResult<Self> {
        config.validate()?;
        landscape.ensure_shape(config.rows, config.cols)?;
        pre_cloud.ensure_shape(config.rows, config.cols)?;
        if let Some((row, col, _)) = pre_cloud
            .iter()
            .find(|&(_, _, state)| state == CellState::Cloud)
        {
            return Err(SimError::CloudInSnapshot { row, col });
        }
        let cloud_coverage = resolve_cloud_coverage(&config, &mut rng)?;
        let temperature = TemperatureCycle::new(config.temperature, &mut rng)?;
        Ok(Self::assemble(
            config,
            landscape,
            pre_cloud,
            temperature,
            cloud_coverage,
            rng,
        ))
    }

    /// Create a simulation from a prepared grid
    ///
    /// Cells under a cloud are assumed to cover empty ground.
    pub fn from_landscape(
        config: SimulationConfig,
        landscape: Landscape,
        rng: SimRng,
    ) -> SimResult<Self> {
        let mut pre_cloud = landscape.clone();
        for cell in pre_cloud.cells_mut() {
            if *cell == CellState::Cloud {
                *cell = CellState::Empty;
            }
        }
        Self::from_layers(config, landscape, pre_cloud, rng)
    }

    fn assemble(
        config: SimulationConfig,
        landscape: Landscape,
        pre_cloud: Landscape,
        temperature: TemperatureCycle,
        cloud_coverage: Probability,
        rng: SimRng,
    ) -> Self {
        let stats = SimulationStats::from_landscape(&landscape);
        info!(
            "Wildfire simulation initialized: {}x{} grid, wind={}, cloud_coverage={:.3}",
            config.rows, config.cols, config.wind, *cloud_coverage
        );
        Self {
            working: landscape.clone(),
            config,
            landscape,
            pre_cloud,
            temperature,
            cloud_coverage,
            stats,
            rng,
        }
    }

    /// Advance the simulation by one step
    ///
    /// `step` is the caller's step counter; it selects the hour of day and
    /// triggers a new temperature curve whenever it is a positive multiple of 24.
    pub fn step(&mut self, step: u64) {
        if self.temperature.advance(step, &mut self.rng) {
            trace!("Temperature curve regenerated at step {}", step);
        }

        let hour = hour_of_day(step);
        let curve = self.temperature.curve();
        let ctx = RuleContext {
            snapshot: &self.landscape,
            pre_cloud: &self.pre_cloud,
            spread_offsets: self.config.wind.spread_offsets(),
            ignition_probability: self.config.fire_probability * curve.ignition_coefficient(hour),
            regrowth_probability: self.config.regrowth_probability,
        };

        self.working.clone_from(&self.landscape);
        let step_seed = self.rng.random::<u64>();
        rules::sweep(&ctx, &mut self.working, step_seed);

        self.pre_cloud.clone_from(&self.working);
        debug_assert!(!self.pre_cloud.contains(CellState::Cloud));

        if !self.config.wind.is_calm() && self.landscape.contains(CellState::Cloud) {
            let drift = drift_mask(&self.landscape, self.config.wind);
            self.working.overlay(&drift, CellState::Cloud);
        }

        if *self.cloud_coverage > self.rng.random::<f64>() {
            let patch = generate_cloud_patch(self.config.rows, self.config.cols, &mut self.rng);
            trace!("Cloud patch spawned covering {} cells", patch.count());
            self.working.overlay(&patch, CellState::Cloud);
        }

        std::mem::swap(&mut self.landscape, &mut self.working);
        self.stats = SimulationStats::from_landscape(&self.landscape);

        debug!(
            "Step {}: hour={}, T={}, burned={}, trees={}, fires={}",
            step,
            hour,
            self.temperature.curve().at_hour(hour),
            self.stats.burned_ratio,
            self.stats.tree_cover,
            self.landscape.count(CellState::Fire)
        );
    }

    /// Committed grid (read-only)
    pub fn landscape(&self) -> &Landscape {
        &self.landscape
    }

    /// Pre-cloud layer recorded by the last step
    pub fn pre_cloud(&self) -> &Landscape {
        &self.pre_cloud
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.config.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn wind(&self) -> WindDirection {
        self.config.wind
    }

    /// Current 24-hour temperature curve
    pub fn temperature(&self) -> &[Celsius; HOURS_PER_DAY] {
        self.temperature.curve().values()
    }

    pub fn temperature_curve(&self) -> &TemperatureCurve {
        self.temperature.curve()
    }

    /// Temperature at the hour of `step`
    pub fn current_temperature(&self, step: u64) -> Celsius {
        self.temperature.curve().at_hour(hour_of_day(step))
    }

    pub fn cloud_coverage(&self) -> Probability {
        self.cloud_coverage
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// Share of burned cells (%), two decimals
    pub fn burned_ratio(&self) -> Percent {
        self.stats.burned_ratio
    }

    /// Share of tree cells (%), two decimals
    pub fn tree_cover(&self) -> Percent {
        self.stats.tree_cover
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Whether the tree at `(row, col)` would catch fire from a neighbour
    /// under the current wind
    pub fn is_fire_adjacent(&self, row: usize, col: usize) -> bool {
        is_fire_adjacent(&self.landscape, row, col, self.config.wind.spread_offsets())
    }

    /// Terrain clustering probe on the committed grid
    pub fn surface_neighbor(&self, row: usize, col: usize, kind: SurfaceKind) -> bool {
        surface_neighbor(&self.landscape, row, col, kind)
    }

    /// Draw a new cloud patch from the simulation's RNG without applying it
    pub fn generate_cloud(&mut self) -> CellMask {
        generate_cloud_patch(self.config.rows, self.config.cols, &mut self.rng)
    }

    /// Cells the current clouds would drift onto
    pub fn cloud_drift(&self) -> CellMask {
        drift_mask(&self.landscape, self.config.wind)
    }
}

fn resolve_cloud_coverage(config: &SimulationConfig, rng: &mut SimRng) -> SimResult<Probability> {
    match config.cloud_coverage {
        Some(coverage) => Probability::new(coverage, "cloud_coverage"),
        None => Probability::new(rng.random::<f64>(), "cloud_coverage"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config(rows: usize, cols: usize) -> SimulationConfig {
        SimulationConfig {
            rows,
            cols,
            fire_probability: 0.0,
            regrowth_probability: 0.0,
            bedrock: 0.0,
            water: 0.0,
            cloud_coverage: Some(0.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_construction_statistics() {
        let sim = WildfireSimulation::with_rng(quiet_config(10, 10), SimRng::from_seed_u64(1)).unwrap();
        let trees = sim.landscape().count(CellState::Tree);
        assert_eq!(sim.tree_cover(), Percent::of(trees, 100));
        assert_eq!(*sim.burned_ratio(), 0.0);
    }

    #[test]
    fn test_working_buffer_reused() {
        let mut sim = WildfireSimulation::with_rng(quiet_config(6, 7), SimRng::from_seed_u64(2)).unwrap();
        for step in 0..30 {
            sim.step(step);
            assert_eq!(sim.landscape().shape(), (6, 7));
            assert_eq!(sim.working.shape(), (6, 7));
            assert_eq!(sim.pre_cloud().shape(), (6, 7));
        }
    }

    #[test]
    fn test_drawn_cloud_coverage_in_range() {
        let config = SimulationConfig {
            cloud_coverage: None,
            ..quiet_config(4, 4)
        };
        let sim = WildfireSimulation::with_rng(config, SimRng::from_seed_u64(3)).unwrap();
        assert!((0.0..1.0).contains(&*sim.cloud_coverage()));
    }

    #[test]
    fn test_from_layers_rejects_cloud_in_pre_cloud() {
        let landscape = Landscape::new(3, 3).unwrap();
        let mut pre_cloud = Landscape::new(3, 3).unwrap();
        pre_cloud.set(1, 2, CellState::Cloud);
        let err = WildfireSimulation::from_layers(
            quiet_config(3, 3),
            landscape,
            pre_cloud,
            SimRng::from_seed_u64(4),
        )
        .err()
        .unwrap();
        assert_eq!(err, SimError::CloudInSnapshot { row: 1, col: 2 });
    }

    #[test]
    fn test_from_layers_checks_shape() {
        let err = WildfireSimulation::from_landscape(
            quiet_config(3, 3),
            Landscape::new(3, 4).unwrap(),
            SimRng::from_seed_u64(5),
        )
        .err()
        .unwrap();
        assert_eq!(
            err,
            SimError::ShapeMismatch {
                expected: (3, 3),
                actual: (3, 4)
            }
        );
    }

    #[test]
    fn test_from_landscape_resolves_clouds_to_empty() {
        let mut landscape = Landscape::filled(3, 3, CellState::Tree).unwrap();
        landscape.set(0, 0, CellState::Cloud);
        let sim = WildfireSimulation::from_landscape(
            quiet_config(3, 3),
            landscape,
            SimRng::from_seed_u64(6),
        )
        .unwrap();
        assert_eq!(sim.pre_cloud().get(0, 0), CellState::Empty);
        assert_eq!(sim.pre_cloud().get(1, 1), CellState::Tree);
    }
}
