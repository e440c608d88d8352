//! Cloud patches and cloud drift
//!
//! New clouds are random-walk patches: starting from a random cell, the walk
//! takes [`CLOUD_WALK_LENGTH`] steps to random neighbours and marks every
//! in-grid position it lands on. The cursor follows each step even when it
//! leaves the grid, so a walk that wanders off only resumes marking if later
//! steps happen to bring it back.
//!
//! Existing clouds are carried one cell per step by the wind's drift offset.

use crate::core_types::{CellState, WindDirection, MOORE_OFFSETS};
use crate::grid::{offset_position, CellMask, Landscape};
use rand::Rng;

/// Steps taken by the random walk that shapes a new cloud patch
pub const CLOUD_WALK_LENGTH: usize = 16;

/// Generate a random-walk cloud patch for a `rows × cols` map
pub fn generate_cloud_patch<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> CellMask {
    let mut mask = CellMask::new(rows, cols);
    if rows == 0 || cols == 0 {
        return mask;
    }

    let mut row = rng.random_range(0..rows) as isize;
    let mut col = rng.random_range(0..cols) as isize;
    for _ in 0..CLOUD_WALK_LENGTH {
        let (dr, dc) = MOORE_OFFSETS[rng.random_range(0..MOORE_OFFSETS.len())];
        row += dr;
        col += dc;
        if (0..rows as isize).contains(&row) && (0..cols as isize).contains(&col) {
            mask.mark(row as usize, col as usize);
        }
    }
    mask
}

/// Cells that clouds in `landscape` move onto under `wind`
///
/// Calm air yields an empty mask. Targets outside the grid are dropped.
pub fn drift_mask(landscape: &Landscape, wind: WindDirection) -> CellMask {
    let (rows, cols) = landscape.shape();
    let mut mask = CellMask::new(rows, cols);
    let Some(offset) = wind.drift_offset() else {
        return mask;
    };

    for (row, col, state) in landscape.iter() {
        if state != CellState::Cloud {
            continue;
        }
        if let Some((r, c)) = offset_position(row, col, offset, rows, cols) {
            mask.mark(r, c);
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    #[test]
    fn test_patch_has_grid_shape_and_bounded_size() {
        let mut rng = SimRng::from_seed_u64(21);
        for _ in 0..50 {
            let mask = generate_cloud_patch(10, 10, &mut rng);
            assert_eq!(mask.shape(), (10, 10));
            assert!(mask.count() <= CLOUD_WALK_LENGTH);
        }
    }

    #[test]
    fn test_patches_usually_cover_cells() {
        let mut rng = SimRng::from_seed_u64(22);
        let non_empty = (0..100)
            .filter(|_| generate_cloud_patch(10, 10, &mut rng).any())
            .count();
        assert!(non_empty > 80, "only {non_empty} of 100 patches marked cells");
    }

    #[test]
    fn test_single_cell_map() {
        // Every step leaves a 1x1 grid, so nothing is ever marked
        let mut rng = SimRng::from_seed_u64(23);
        let mask = generate_cloud_patch(1, 1, &mut rng);
        assert!(!mask.any());
    }

    #[test]
    fn test_patch_is_connected_walk() {
        let mut rng = SimRng::from_seed_u64(24);
        for _ in 0..20 {
            let mask = generate_cloud_patch(64, 64, &mut rng);
            let cells: Vec<_> = mask.iter_marked().collect();
            let (Some(min_r), Some(max_r)) = (
                cells.iter().map(|c| c.0).min(),
                cells.iter().map(|c| c.0).max(),
            ) else {
                continue;
            };
            let min_c = cells.iter().map(|c| c.1).min().unwrap();
            let max_c = cells.iter().map(|c| c.1).max().unwrap();
            // A 16-step walk spans at most 16 cells in any direction
            assert!(max_r - min_r <= CLOUD_WALK_LENGTH);
            assert!(max_c - min_c <= CLOUD_WALK_LENGTH);
        }
    }

    #[test]
    fn test_drift_follows_wind() {
        let mut land = Landscape::new(10, 10).unwrap();
        land.set(5, 5, CellState::Cloud);

        let north = drift_mask(&land, WindDirection::North);
        assert_eq!(north.iter_marked().collect::<Vec<_>>(), vec![(6, 5)]);

        let south_west = drift_mask(&land, WindDirection::SouthWest);
        assert_eq!(south_west.iter_marked().collect::<Vec<_>>(), vec![(4, 6)]);

        assert!(!drift_mask(&land, WindDirection::Calm).any());
    }

    #[test]
    fn test_drift_drops_targets_off_grid() {
        let mut land = Landscape::new(4, 4).unwrap();
        land.set(3, 0, CellState::Cloud);
        assert!(!drift_mask(&land, WindDirection::North).any());
        assert!(!drift_mask(&land, WindDirection::NorthEast).any());
        assert!(drift_mask(&land, WindDirection::South).is_marked(2, 0));
    }
}
