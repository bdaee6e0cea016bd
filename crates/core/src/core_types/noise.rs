//! Value noise for landscape generation
//!
//! Lakes and rivers in the initial landscape come from thresholding smooth
//! value noise, so water forms connected bodies instead of scattered single
//! cells. The noise is a pure function of cell coordinates and a seed drawn
//! from the grid's random source, which keeps terrain reproducible for a fixed
//! grid seed.

/// Hash multipliers, primes for better distribution
const SEED_X: i32 = 1619;
const SEED_Y: i32 = 31337;

/// Largest positive i32, as f64
const MAX_I32_POSITIVE: f64 = 2_147_483_647.0;

/// Integer lattice hash in [0, 1]
#[inline]
fn hash_2d(x: i32, y: i32, seed: u32) -> f32 {
    let mut n = x
        .wrapping_mul(SEED_X)
        .wrapping_add(y.wrapping_mul(SEED_Y))
        .wrapping_add(seed as i32);
    n = (n << 13) ^ n;
    n = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589);
    (f64::from(n & 0x7fff_ffff) / MAX_I32_POSITIVE) as f32
}

/// Hermite smoothing of the interpolation weight
#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// 2D value noise in [-1, 1]
///
/// # Parameters
/// - `x`, `y`: Cell coordinates
/// - `scale`: Feature size in cells (larger = bigger lakes)
/// - `seed`: Layer seed
pub fn spatial_noise_2d(x: f32, y: f32, scale: f32, seed: u32) -> f32 {
    let sx = x / scale;
    let sy = y / scale;

    let x0 = sx.floor() as i32;
    let y0 = sy.floor() as i32;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = smoothstep(sx - sx.floor());
    let fy = smoothstep(sy - sy.floor());

    let v00 = hash_2d(x0, y0, seed);
    let v10 = hash_2d(x1, y0, seed);
    let v01 = hash_2d(x0, y1, seed);
    let v11 = hash_2d(x1, y1, seed);

    // Bilinear interpolation
    let v0 = v00 + fx * (v10 - v00);
    let v1 = v01 + fx * (v11 - v01);
    let v = v0 + fy * (v1 - v0);

    v * 2.0 - 1.0
}

/// Two-octave fractal noise in [-1, 1]
///
/// The second octave roughens lake shorelines.
pub fn shoreline_noise(x: f32, y: f32, scale: f32, seed: u32) -> f32 {
    const PERSISTENCE: f32 = 0.5;
    let coarse = spatial_noise_2d(x, y, scale, seed);
    let fine = spatial_noise_2d(x * 2.0, y * 2.0, scale, seed.wrapping_add(1));
    (coarse + fine * PERSISTENCE) / (1.0 + PERSISTENCE)
}
