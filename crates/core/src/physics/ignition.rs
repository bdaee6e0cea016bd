//! Ignition decision for flammable cells
//!
//! A flammable cell (grass, tree, sapling, young tree) runs one independent
//! Bernoulli trial per burning neighbor and ignites if any trial succeeds, so
//! with `k` burning neighbors at probability `p` the effective chance is
//! `1 - (1 - p)^k`. When no neighbor ignites it and wind is enabled, ember
//! spotting gets a chance.

use super::spotting::spot_ignites;
use super::{bernoulli, WindModel};
use crate::core_types::{IgnitionParams, SimulationParams, Snapshot, VegetationClass};
use rand::Rng;

/// Base per-neighbor ignition probability for a vegetation class
pub fn base_probability(class: VegetationClass, params: &IgnitionParams) -> f64 {
    match class {
        VegetationClass::Grass => params.grass_probability,
        VegetationClass::Tree => params.tree_probability,
        VegetationClass::Sapling => params.tree_probability * params.sapling_multiplier,
        VegetationClass::YoungTree => params.tree_probability * params.young_tree_multiplier,
    }
}

/// Check if any burning 8-neighbor ignites the cell at `(x, y)`
pub fn neighbor_ignites<R: Rng + ?Sized>(
    snapshot: &Snapshot<'_>,
    x: usize,
    y: usize,
    class: VegetationClass,
    wind: &WindModel,
    params: &IgnitionParams,
    rng: &mut R,
) -> bool {
    let base = base_probability(class, params);
    snapshot
        .neighbors(x, y)
        .filter(|(_, _, cell)| cell.is_burning())
        .any(|(dx, dy, _)| bernoulli(rng, wind.adjusted_probability(base, dx, dy)))
}

/// Full ignition decision: neighbor spread, then spotting
pub fn ignites<R: Rng + ?Sized>(
    snapshot: &Snapshot<'_>,
    x: usize,
    y: usize,
    class: VegetationClass,
    wind: &WindModel,
    params: &SimulationParams,
    rng: &mut R,
) -> bool {
    neighbor_ignites(snapshot, x, y, class, wind, &params.ignition, rng)
        || spot_ignites(snapshot, x, y, wind, &params.spotting, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Cell, SpottingParams, WindShape};
    use crate::physics::WindConditions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn calm() -> WindModel {
        WindModel::new(
            WindConditions::calm(),
            &WindShape::default(),
            &SpottingParams::default(),
        )
    }

    /// 3x3 tree patch with `burning` of the 8 neighbors on fire
    fn patch(burning: usize) -> Vec<Cell> {
        let mut cells = vec![Cell::Tree; 9];
        let ring = [0, 1, 2, 3, 5, 6, 7, 8];
        for &i in ring.iter().take(burning) {
            cells[i] = Cell::BurningTree { stage: 1 };
        }
        cells
    }

    #[test]
    fn test_class_multipliers() {
        let params = IgnitionParams::default();
        let tree = base_probability(VegetationClass::Tree, &params);
        assert!((base_probability(VegetationClass::Sapling, &params) - tree * 1.2).abs() < 1e-12);
        assert!((base_probability(VegetationClass::YoungTree, &params) - tree * 1.1).abs() < 1e-12);
        assert_eq!(
            base_probability(VegetationClass::Grass, &params),
            params.grass_probability
        );
    }

    #[test]
    fn test_no_burning_neighbors_never_ignites() {
        let cells = patch(0);
        let snapshot = Snapshot::new(&cells, 3, 3);
        let params = IgnitionParams {
            tree_probability: 1.0,
            ..IgnitionParams::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!neighbor_ignites(
            &snapshot,
            1,
            1,
            VegetationClass::Tree,
            &calm(),
            &params,
            &mut rng
        ));
    }

    #[test]
    fn test_compound_probability_converges() {
        // Empirical rate with k burning neighbors approaches 1 - (1 - p)^k
        let p = 0.2;
        let params = IgnitionParams {
            tree_probability: p,
            ..IgnitionParams::default()
        };
        let wind = calm();
        let mut rng = StdRng::seed_from_u64(2024);
        let trials: u32 = 20_000;

        for k in [1_usize, 3, 8] {
            let cells = patch(k);
            let snapshot = Snapshot::new(&cells, 3, 3);
            let hits = (0..trials)
                .filter(|_| {
                    neighbor_ignites(&snapshot, 1, 1, VegetationClass::Tree, &wind, &params, &mut rng)
                })
                .count();
            let rate = hits as f64 / f64::from(trials);
            let expected = 1.0 - (1.0 - p).powi(k as i32);
            assert!(
                (rate - expected).abs() < 0.02,
                "k={k}: rate {rate:.4} vs expected {expected:.4}"
            );
        }
    }
}
