//! Initial landscape generation
//!
//! Every cell starts as empty ground or a tree (fair coin), then a single
//! row-major sweep places bedrock and water. For each cell the bedrock draw is
//! made first and the water draw second; both probe the in-progress grid, so a
//! cell sees whatever earlier cells were turned into during the same sweep.
//!
//! The clustering probes keep their historical targets: the bedrock probe looks
//! for `Burned` neighbours (none exist during generation, so its boost never
//! applies) and the water probe looks for `Rock` neighbours.

use crate::core_types::units::Probability;
use crate::core_types::{CellState, MOORE_OFFSETS};
use crate::error::SimResult;
use crate::grid::landscape::{validate_dimensions, Landscape};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bedrock probability multiplier when the bedrock probe finds a match
pub const BEDROCK_CLUSTER_FACTOR: f64 = 5.0;
/// Water probability multiplier next to rock
pub const WATER_CLUSTER_FACTOR: f64 = 10.0;
/// Water probability multiplier away from rock
pub const WATER_ISOLATED_FACTOR: f64 = 0.1;

/// Surface kinds placed during terrain generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    Bedrock,
    Water,
}

impl SurfaceKind {
    /// State the clustering probe searches the neighbourhood for
    pub const fn probe_target(self) -> CellState {
        match self {
            SurfaceKind::Bedrock => CellState::Burned,
            SurfaceKind::Water => CellState::Rock,
        }
    }

    /// State written when the placement draw succeeds
    pub const fn placed_state(self) -> CellState {
        match self {
            SurfaceKind::Bedrock => CellState::Rock,
            SurfaceKind::Water => CellState::Water,
        }
    }
}

/// Whether the 8-neighbourhood of `(row, col)` holds the probe target of `kind`
pub fn surface_neighbor(landscape: &Landscape, row: usize, col: usize, kind: SurfaceKind) -> bool {
    landscape.any_neighbor(row, col, &MOORE_OFFSETS, kind.probe_target())
}

/// Builds the initial rock/water/empty/tree landscape
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    rows: usize,
    cols: usize,
    bedrock: Probability,
    water: Probability,
}

impl TerrainGenerator {
    /// Create a generator for a `rows × cols` map
    ///
    /// `bedrock` and `water` are base placement probabilities in `[0, 1]`.
    pub fn new(rows: usize, cols: usize, bedrock: f64, water: f64) -> SimResult<Self> {
        validate_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            bedrock: Probability::new(bedrock, "bedrock")?,
            water: Probability::new(water, "water")?,
        })
    }

    /// Generate a landscape using draws from `rng`
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<Landscape> {
        let cells = (0..self.rows * self.cols)
            .map(|_| {
                if rng.random_bool(0.5) {
                    CellState::Tree
                } else {
                    CellState::Empty
                }
            })
            .collect();
        let mut landscape = Landscape::from_cells(self.rows, self.cols, cells)?;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let coef = if surface_neighbor(&landscape, row, col, SurfaceKind::Bedrock) {
                    BEDROCK_CLUSTER_FACTOR
                } else {
                    1.0
                };
                if *self.bedrock * coef > rng.random::<f64>() {
                    landscape.set(row, col, SurfaceKind::Bedrock.placed_state());
                }

                let coef = if surface_neighbor(&landscape, row, col, SurfaceKind::Water) {
                    WATER_CLUSTER_FACTOR
                } else {
                    WATER_ISOLATED_FACTOR
                };
                if *self.water * coef > rng.random::<f64>() {
                    landscape.set(row, col, SurfaceKind::Water.placed_state());
                }
            }
        }

        Ok(landscape)
    }
}
