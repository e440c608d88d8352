//! Core types and utilities

pub mod cell;
pub mod units;
pub mod wind;

pub use cell::CellState;
pub use units::*;
pub use wind::{Offset, WindDirection, MOORE_OFFSETS};
