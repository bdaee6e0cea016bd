//! Initial landscape generation
//!
//! Water bodies come from thresholded shoreline noise so lakes are connected
//! regions; remaining land is seeded with trees at `tree_density`, the rest
//! grass. All randomness is drawn from the caller's source.

use crate::core_types::noise::shoreline_noise;
use crate::core_types::{Cell, TerrainParams};
use rand::Rng;

/// Generate a `width × height` row-major landscape
pub fn generate_terrain<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    params: &TerrainParams,
    rng: &mut R,
) -> Vec<Cell> {
    let noise_seed: u32 = rng.random();
    let mut cells = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let water = shoreline_noise(x as f32, y as f32, params.water_noise_scale, noise_seed);
            let cell = if water < params.water_threshold {
                Cell::Water
            } else if rng.random::<f64>() < params.tree_density {
                Cell::Tree
            } else {
                Cell::Grass
            };
            cells.push(cell);
        }
    }

    cells
}
