//! Grid-based landscape modules

pub mod landscape;
pub mod mask;
pub mod terrain;

// Re-export main types
pub use landscape::*;
pub use mask::*;
pub use terrain::*;
