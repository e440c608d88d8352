//! Derived landscape statistics, recomputed from scratch after every commit

use crate::core_types::units::Percent;
use crate::core_types::CellState;
use crate::grid::Landscape;
use serde::{Deserialize, Serialize};

/// Burned-area and tree-cover shares of the whole map
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Share of `Burned` cells (%), rounded to two decimals
    pub burned_ratio: Percent,
    /// Share of `Tree` cells (%), rounded to two decimals
    pub tree_cover: Percent,
}

impl SimulationStats {
    pub fn from_landscape(landscape: &Landscape) -> Self {
        let total = landscape.len();
        Self {
            burned_ratio: Percent::of(landscape.count(CellState::Burned), total),
            tree_cover: Percent::of(landscape.count(CellState::Tree), total),
        }
    }
}
