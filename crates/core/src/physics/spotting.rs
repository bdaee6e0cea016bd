//! Ember spotting (fire jump)
//!
//! Wind can carry embers past the 8-neighborhood. For each jump distance
//! `d ∈ {2, 3, 4}` the cell `d` cells upwind (wind direction quantized to the
//! grid) is checked; if it is burning, an independent trial with
//!
//! ```text
//! p = base_chance × jump_amplifier(strength) / (d × distance_factor)
//! ```
//!
//! decides whether an ember lands and ignites the target. Spotting only runs
//! when wind is enabled.

use super::{bernoulli, WindModel};
use crate::core_types::{Snapshot, SpottingParams};
use rand::Rng;

/// Jump distances checked along the wind direction, in cells
pub const SPOT_DISTANCES: [i32; 3] = [2, 3, 4];

/// Chance that a burning cell `distance` cells upwind ignites the target
pub fn spot_probability(jump_amplifier: f64, distance: i32, params: &SpottingParams) -> f64 {
    let p = params.base_chance * jump_amplifier / (f64::from(distance) * params.distance_factor);
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0)
}

/// Check if an ember from an upwind fire ignites the cell at `(x, y)`
pub fn spot_ignites<R: Rng + ?Sized>(
    snapshot: &Snapshot<'_>,
    x: usize,
    y: usize,
    wind: &WindModel,
    params: &SpottingParams,
    rng: &mut R,
) -> bool {
    if !wind.is_enabled() {
        return false;
    }

    SPOT_DISTANCES.iter().any(|&distance| {
        let (dx, dy) = wind.upwind_offset(distance);
        let source_burning = snapshot
            .offset(x, y, dx, dy)
            .is_some_and(|cell| cell.is_burning());
        source_burning
            && bernoulli(
                rng,
                spot_probability(wind.jump_amplifier(), distance, params),
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Cell, WindShape};
    use crate::physics::WindConditions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn north_wind(strength: f64) -> WindModel {
        WindModel::new(
            WindConditions::new(0.0, strength),
            &WindShape::default(),
            &SpottingParams::default(),
        )
    }

    #[test]
    fn test_probability_decays_with_distance() {
        let params = SpottingParams::default();
        let p2 = spot_probability(2.0, 2, &params);
        let p4 = spot_probability(2.0, 4, &params);
        assert!(p2 > p4);
        assert!((p2 - 2.0 * p4).abs() < 1e-12);
    }

    #[test]
    fn test_probability_clamped() {
        let params = SpottingParams {
            base_chance: 50.0,
            ..SpottingParams::default()
        };
        assert_eq!(spot_probability(4.0, 2, &params), 1.0);

        let degenerate = SpottingParams {
            base_chance: 0.0,
            distance_factor: 0.0,
            ..SpottingParams::default()
        };
        assert_eq!(spot_probability(1.0, 2, &degenerate), 0.0);
    }

    #[test]
    fn test_certain_jump_from_upwind_fire() {
        // Column of 6 cells, fire at the top (north), target at the bottom
        let mut cells = vec![Cell::Grass; 6];
        cells[1] = Cell::BurningTree { stage: 2 };
        let snapshot = Snapshot::new(&cells, 1, 6);
        let params = SpottingParams {
            base_chance: 100.0,
            ..SpottingParams::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        // Target at row 4 has the fire 3 cells upwind
        assert!(spot_ignites(&snapshot, 0, 4, &north_wind(30.0), &params, &mut rng));
        // Target at row 0 has nothing upwind
        assert!(!spot_ignites(&snapshot, 0, 0, &north_wind(30.0), &params, &mut rng));
    }

    #[test]
    fn test_no_spotting_without_wind() {
        let mut cells = vec![Cell::Grass; 6];
        cells[0] = Cell::BurningGrass;
        let snapshot = Snapshot::new(&cells, 1, 6);
        let calm = WindModel::new(
            WindConditions::calm(),
            &WindShape::default(),
            &SpottingParams::default(),
        );
        let params = SpottingParams {
            base_chance: 100.0,
            ..SpottingParams::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!spot_ignites(&snapshot, 0, 3, &calm, &params, &mut rng));
    }

    #[test]
    fn test_downwind_fire_does_not_jump() {
        let mut cells = vec![Cell::Grass; 6];
        cells[5] = Cell::BurningGrass;
        let snapshot = Snapshot::new(&cells, 1, 6);
        let params = SpottingParams {
            base_chance: 100.0,
            ..SpottingParams::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!spot_ignites(&snapshot, 0, 2, &north_wind(30.0), &params, &mut rng));
    }
}
