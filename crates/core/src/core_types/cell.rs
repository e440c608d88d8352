//! Cell states of the wildfire landscape
//!
//! Every grid cell holds exactly one [`CellState`]. `Cloud` is an overlay: the
//! state underneath it lives in the simulation's pre-cloud layer and is restored
//! once the cloud moves on.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single landscape cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Lake or river, never burns
    Water,
    /// Bare bedrock, never burns
    Rock,
    /// Ash left behind by a fire, can be covered by cloud
    Burned,
    /// Open ground where trees may regrow
    #[default]
    Empty,
    /// Living tree, the only fuel
    Tree,
    /// Burning tree, becomes `Burned` on the next step
    Fire,
    /// Cloud overlay drifting over the underlying cell
    Cloud,
}

impl CellState {
    /// All seven states, ordered by legacy code
    pub const ALL: [CellState; 7] = [
        CellState::Water,
        CellState::Rock,
        CellState::Burned,
        CellState::Empty,
        CellState::Tree,
        CellState::Fire,
        CellState::Cloud,
    ];

    /// Legacy integer encoding (`Water = -3` .. `Cloud = 3`)
    #[inline]
    pub const fn code(self) -> i8 {
        match self {
            CellState::Water => -3,
            CellState::Rock => -2,
            CellState::Burned => -1,
            CellState::Empty => 0,
            CellState::Tree => 1,
            CellState::Fire => 2,
            CellState::Cloud => 3,
        }
    }

    /// Decode a legacy integer code
    ///
    /// Codes outside `-3..=3` are an internal-consistency fault.
    pub fn from_code(code: i8) -> SimResult<Self> {
        Self::try_from(code)
    }

    /// True for states that can never ignite or regrow
    #[inline]
    pub const fn is_barrier(self) -> bool {
        matches!(self, CellState::Water | CellState::Rock)
    }
}

impl TryFrom<i8> for CellState {
    type Error = SimError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -3 => Ok(CellState::Water),
            -2 => Ok(CellState::Rock),
            -1 => Ok(CellState::Burned),
            0 => Ok(CellState::Empty),
            1 => Ok(CellState::Tree),
            2 => Ok(CellState::Fire),
            3 => Ok(CellState::Cloud),
            other => Err(SimError::UndefinedCellState(other)),
        }
    }
}

impl From<CellState> for i8 {
    fn from(state: CellState) -> i8 {
        state.code()
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Water => "water",
            CellState::Rock => "rock",
            CellState::Burned => "burned",
            CellState::Empty => "empty",
            CellState::Tree => "tree",
            CellState::Fire => "fire",
            CellState::Cloud => "cloud",
        };
        f.write_str(name)
    }
}
