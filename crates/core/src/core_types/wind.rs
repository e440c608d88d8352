//! Prevailing wind and its neighbour offset tables
//!
//! Wind is fixed for the whole run. It selects two independent offset sets:
//! the subset of the Moore neighbourhood that is searched for burning
//! neighbours, and the single offset clouds are translated by each step.
//!
//! Offsets are `(d_row, d_col)` with row 0 at the top (north) of the map.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grid offset as `(d_row, d_col)`
pub type Offset = (isize, isize);

/// The full 8-neighbourhood, row-major
pub const MOORE_OFFSETS: [Offset; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const SPREAD_NORTH: [Offset; 5] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1)];
const SPREAD_SOUTH: [Offset; 5] = [(0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
const SPREAD_EAST: [Offset; 5] = [(-1, 0), (-1, 1), (0, 1), (1, 0), (1, 1)];
const SPREAD_WEST: [Offset; 5] = [(-1, -1), (-1, 0), (0, -1), (1, -1), (1, 0)];
const SPREAD_NORTH_EAST: [Offset; 3] = [(-1, 0), (-1, 1), (0, 1)];
const SPREAD_NORTH_WEST: [Offset; 3] = [(-1, -1), (-1, 0), (0, -1)];
const SPREAD_SOUTH_EAST: [Offset; 3] = [(0, 1), (1, 0), (1, 1)];
const SPREAD_SOUTH_WEST: [Offset; 3] = [(0, -1), (1, -1), (1, 0)];

/// Prevailing wind direction, named after where the wind blows from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindDirection {
    #[serde(rename = "calm", alias = "Calm")]
    Calm,
    #[serde(rename = "N", alias = "North")]
    North,
    #[serde(rename = "S", alias = "South")]
    South,
    #[serde(rename = "E", alias = "East")]
    East,
    #[serde(rename = "W", alias = "West")]
    West,
    #[default]
    #[serde(rename = "NE", alias = "NorthEast")]
    NorthEast,
    #[serde(rename = "NW", alias = "NorthWest")]
    NorthWest,
    #[serde(rename = "SE", alias = "SouthEast")]
    SouthEast,
    #[serde(rename = "SW", alias = "SouthWest")]
    SouthWest,
}

impl WindDirection {
    /// Every direction, calm first
    pub const ALL: [WindDirection; 9] = [
        WindDirection::Calm,
        WindDirection::North,
        WindDirection::South,
        WindDirection::East,
        WindDirection::West,
        WindDirection::NorthEast,
        WindDirection::NorthWest,
        WindDirection::SouthEast,
        WindDirection::SouthWest,
    ];

    /// Neighbour offsets searched for fire when deciding whether a tree ignites
    ///
    /// A tree at `(i, j)` catches fire from a burning cell at `(i + di, j + dj)`
    /// for each `(di, dj)` in this set. Calm air uses the full neighbourhood.
    pub const fn spread_offsets(self) -> &'static [Offset] {
        match self {
            WindDirection::Calm => &MOORE_OFFSETS,
            WindDirection::North => &SPREAD_NORTH,
            WindDirection::South => &SPREAD_SOUTH,
            WindDirection::East => &SPREAD_EAST,
            WindDirection::West => &SPREAD_WEST,
            WindDirection::NorthEast => &SPREAD_NORTH_EAST,
            WindDirection::NorthWest => &SPREAD_NORTH_WEST,
            WindDirection::SouthEast => &SPREAD_SOUTH_EAST,
            WindDirection::SouthWest => &SPREAD_SOUTH_WEST,
        }
    }

    /// Offset a cloud cell is carried by in one step; `None` in calm air
    pub const fn drift_offset(self) -> Option<Offset> {
        match self {
            WindDirection::Calm => None,
            WindDirection::North => Some((1, 0)),
            WindDirection::South => Some((-1, 0)),
            WindDirection::East => Some((0, -1)),
            WindDirection::West => Some((0, 1)),
            WindDirection::NorthEast => Some((1, -1)),
            WindDirection::NorthWest => Some((1, 1)),
            WindDirection::SouthEast => Some((-1, -1)),
            WindDirection::SouthWest => Some((-1, 1)),
        }
    }

    #[inline]
    pub const fn is_calm(self) -> bool {
        matches!(self, WindDirection::Calm)
    }

    /// Short label used in reports and config files
    pub const fn label(self) -> &'static str {
        match self {
            WindDirection::Calm => "calm",
            WindDirection::North => "N",
            WindDirection::South => "S",
            WindDirection::East => "E",
            WindDirection::West => "W",
            WindDirection::NorthEast => "NE",
            WindDirection::NorthWest => "NW",
            WindDirection::SouthEast => "SE",
            WindDirection::SouthWest => "SW",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WindDirection {
    type Err = SimError;

    /// Accepts labels (`NE`), full names (`north-east`, `northeast`) in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "calm" | "none" => Ok(WindDirection::Calm),
            "n" | "north" => Ok(WindDirection::North),
            "s" | "south" => Ok(WindDirection::South),
            "e" | "east" => Ok(WindDirection::East),
            "w" | "west" => Ok(WindDirection::West),
            "ne" | "northeast" => Ok(WindDirection::NorthEast),
            "nw" | "northwest" => Ok(WindDirection::NorthWest),
            "se" | "southeast" => Ok(WindDirection::SouthEast),
            "sw" | "southwest" => Ok(WindDirection::SouthWest),
            _ => Err(SimError::UnknownWind(s.to_string())),
        }
    }
}
