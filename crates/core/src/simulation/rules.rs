//! Per-cell transition rules
//!
//! Each step computes the working buffer `W` from the committed snapshot `S`
//! and the pre-cloud layer `O`. Rules run in this order for every cell:
//!
//! 1. Cloud resolution: a cloud cell reverts to the state it covered, except
//!    that covered fire or ash becomes empty ground.
//! 2. Burnout: fire becomes `Burned`.
//! 3. Regrowth: empty ground in `S` grows a tree with the regrowth probability.
//! 4. Ignition: a tree in `S` catches fire spontaneously, or when a burning
//!    cell sits at one of the wind's spread offsets in `S`.
//!
//! Neighbour reads only ever touch `S`, so rows are independent and the sweep
//! runs them in parallel.

use crate::core_types::{CellState, Offset};
use crate::grid::Landscape;
use crate::rng::SimRng;
use rand::Rng;
use rayon::prelude::*;

/// Read-only inputs shared by every cell of one sweep
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleContext<'a> {
    /// Committed grid at the start of the step (`S`)
    pub snapshot: &'a Landscape,
    /// Previous step's grid before cloud overlay (`O`)
    pub pre_cloud: &'a Landscape,
    /// Wind-dependent neighbour offsets searched for fire
    pub spread_offsets: &'a [Offset],
    /// Spontaneous ignition chance, already scaled for the hour's temperature
    pub ignition_probability: f64,
    /// Tree regrowth chance on empty ground
    pub regrowth_probability: f64,
}

/// Whether the tree at `(row, col)` has a burning neighbour at one of `offsets`
///
/// Cells that are not trees are never fire-adjacent.
pub fn is_fire_adjacent(snapshot: &Landscape, row: usize, col: usize, offsets: &[Offset]) -> bool {
    snapshot.get(row, col) == CellState::Tree
        && snapshot.any_neighbor(row, col, offsets, CellState::Fire)
}

/// Next state of one cell; `current` is its value in the working buffer
pub(crate) fn next_state<R: Rng + ?Sized>(
    ctx: &RuleContext<'_>,
    row: usize,
    col: usize,
    current: CellState,
    rng: &mut R,
) -> CellState {
    let before = ctx.snapshot.get(row, col);
    let mut next = current;

    if next == CellState::Cloud {
        next = match ctx.pre_cloud.get(row, col) {
            CellState::Burned | CellState::Fire => CellState::Empty,
            covered => covered,
        };
    }

    if next == CellState::Fire {
        next = CellState::Burned;
    }

    if ctx.regrowth_probability > rng.random::<f64>() && before == CellState::Empty {
        next = CellState::Tree;
    }

    let spontaneous = ctx.ignition_probability > rng.random::<f64>();
    if before == CellState::Tree
        && (spontaneous || is_fire_adjacent(ctx.snapshot, row, col, ctx.spread_offsets))
    {
        next = CellState::Fire;
    }

    next
}

/// Apply the rule chain to one row of the working buffer
pub(crate) fn apply_row<R: Rng + ?Sized>(
    ctx: &RuleContext<'_>,
    row: usize,
    cells: &mut [CellState],
    rng: &mut R,
) {
    for (col, cell) in cells.iter_mut().enumerate() {
        *cell = next_state(ctx, row, col, *cell, rng);
    }
}

/// Run the rule chain over every row of `working` in parallel
///
/// `working` must start as a copy of `ctx.snapshot`. Row `r` draws from
/// stream `r` of `step_seed`, so the result does not depend on scheduling.
pub(crate) fn sweep(ctx: &RuleContext<'_>, working: &mut Landscape, step_seed: u64) {
    let cols = working.cols();
    working
        .cells_mut()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, cells)| {
            let mut rng = SimRng::row_stream(step_seed, row);
            apply_row(ctx, row, cells, &mut rng);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{WindDirection, MOORE_OFFSETS};

    fn quiet_context<'a>(snapshot: &'a Landscape, pre_cloud: &'a Landscape) -> RuleContext<'a> {
        RuleContext {
            snapshot,
            pre_cloud,
            spread_offsets: &MOORE_OFFSETS,
            ignition_probability: 0.0,
            regrowth_probability: 0.0,
        }
    }

    fn sweep_once(ctx: &RuleContext<'_>, seed: u64) -> Landscape {
        let mut working = ctx.snapshot.clone();
        sweep(ctx, &mut working, seed);
        working
    }

    #[test]
    fn test_fire_burns_out() {
        let mut s = Landscape::new(3, 3).unwrap();
        s.set(1, 1, CellState::Fire);
        let o = s.clone();
        let w = sweep_once(&quiet_context(&s, &o), 1);
        assert_eq!(w.get(1, 1), CellState::Burned);
    }

    #[test]
    fn test_cloud_restores_covered_state() {
        let mut s = Landscape::new(3, 3).unwrap();
        let mut o = Landscape::new(3, 3).unwrap();
        s.set(0, 0, CellState::Cloud);
        o.set(0, 0, CellState::Water);
        s.set(0, 1, CellState::Cloud);
        o.set(0, 1, CellState::Fire);
        s.set(0, 2, CellState::Cloud);
        o.set(0, 2, CellState::Burned);
        s.set(1, 0, CellState::Cloud);
        o.set(1, 0, CellState::Tree);

        let w = sweep_once(&quiet_context(&s, &o), 2);
        assert_eq!(w.get(0, 0), CellState::Water);
        assert_eq!(w.get(0, 1), CellState::Empty);
        assert_eq!(w.get(0, 2), CellState::Empty);
        assert_eq!(w.get(1, 0), CellState::Tree);
    }

    #[test]
    fn test_spread_uses_wind_offsets() {
        let mut s = Landscape::filled(5, 5, CellState::Tree).unwrap();
        s.set(2, 2, CellState::Fire);
        let o = s.clone();
        let ctx = RuleContext {
            spread_offsets: WindDirection::North.spread_offsets(),
            ..quiet_context(&s, &o)
        };
        let w = sweep_once(&ctx, 3);

        // North wind: a tree catches fire from the row above or its own row
        assert_eq!(w.get(3, 1), CellState::Fire);
        assert_eq!(w.get(3, 2), CellState::Fire);
        assert_eq!(w.get(3, 3), CellState::Fire);
        assert_eq!(w.get(2, 1), CellState::Fire);
        assert_eq!(w.get(2, 3), CellState::Fire);
        assert_eq!(w.get(1, 2), CellState::Tree);
        assert_eq!(w.get(2, 2), CellState::Burned);
        assert_eq!(w.count(CellState::Fire), 5);
    }

    #[test]
    fn test_spread_reads_snapshot_only() {
        // A chain of trees only advances one cell per step
        let mut s = Landscape::filled(1, 6, CellState::Tree).unwrap();
        s.set(0, 0, CellState::Fire);
        let o = s.clone();
        let w = sweep_once(&quiet_context(&s, &o), 4);
        assert_eq!(w.get(0, 1), CellState::Fire);
        assert_eq!(w.get(0, 2), CellState::Tree);
    }

    #[test]
    fn test_certain_regrowth_and_ignition() {
        let mut s = Landscape::new(2, 2).unwrap();
        s.set(0, 0, CellState::Tree);
        s.set(1, 1, CellState::Rock);
        let o = s.clone();
        let ctx = RuleContext {
            ignition_probability: 1.0,
            regrowth_probability: 1.0,
            ..quiet_context(&s, &o)
        };
        // Probability 1.0 beats every draw from [0, 1)
        let mut rng = SimRng::from_seed_u64(6);
        assert_eq!(next_state(&ctx, 0, 0, CellState::Tree, &mut rng), CellState::Fire);
        assert_eq!(next_state(&ctx, 0, 1, CellState::Empty, &mut rng), CellState::Tree);
        assert_eq!(next_state(&ctx, 1, 1, CellState::Rock, &mut rng), CellState::Rock);
    }

    #[test]
    fn test_non_trees_never_ignite() {
        let mut s = Landscape::new(3, 3).unwrap();
        for (idx, state) in [
            CellState::Water,
            CellState::Rock,
            CellState::Burned,
            CellState::Empty,
            CellState::Cloud,
        ]
        .into_iter()
        .enumerate()
        {
            s.set(idx / 3, idx % 3, state);
        }
        s.set(2, 2, CellState::Fire);
        let o = Landscape::new(3, 3).unwrap();
        let ctx = RuleContext {
            ignition_probability: 1.0,
            ..quiet_context(&s, &o)
        };
        let w = sweep_once(&ctx, 5);
        assert_eq!(w.count(CellState::Fire), 0);
    }

    #[test]
    fn test_fire_adjacency_requires_tree() {
        let mut s = Landscape::new(10, 10).unwrap();
        s.set(4, 5, CellState::Fire);
        assert!(!is_fire_adjacent(&s, 5, 5, &MOORE_OFFSETS));
        s.set(5, 5, CellState::Tree);
        assert!(is_fire_adjacent(&s, 5, 5, WindDirection::North.spread_offsets()));
        assert!(!is_fire_adjacent(&s, 5, 5, WindDirection::South.spread_offsets()));
    }
}
