//! Tunable parameters for the forest automaton
//!
//! All constants that shape ignition, wind response, spotting, succession and
//! terrain generation live here. Every struct deserializes with
//! `#[serde(default)]`, so a partial JSON parameter file only overrides the
//! fields it names.

use serde::{Deserialize, Serialize};

/// Base ignition probabilities per vegetation class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnitionParams {
    /// Chance a mature tree catches from one burning neighbor
    pub tree_probability: f64,
    /// Chance grass catches from one burning neighbor
    pub grass_probability: f64,
    /// Sapling chance relative to `tree_probability`
    pub sapling_multiplier: f64,
    /// Young tree chance relative to `tree_probability`
    pub young_tree_multiplier: f64,
}

impl Default for IgnitionParams {
    fn default() -> Self {
        Self {
            tree_probability: 0.35,
            grass_probability: 0.5,
            sapling_multiplier: 1.2,
            young_tree_multiplier: 1.1,
        }
    }
}

/// Sigmoid shaping of the wind amplifier
///
/// `amplifier(w) = 1 + (max_multiplier - 1) * sigmoid(steepness * (w - midpoint))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindShape {
    pub steepness: f64,
    /// Wind strength at which the amplifier reaches half its range
    pub midpoint: f64,
    /// Upper bound of the amplifier
    pub max_multiplier: f64,
}

impl Default for WindShape {
    fn default() -> Self {
        Self {
            steepness: 0.2,
            midpoint: 15.0,
            max_multiplier: 3.0,
        }
    }
}

/// Long-range ember spotting constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpottingParams {
    /// Spot chance before wind amplification and distance decay
    pub base_chance: f64,
    /// Divisor applied per cell of jump distance
    pub distance_factor: f64,
    /// Upper bound of the jump amplifier
    pub max_multiplier: f64,
}

impl Default for SpottingParams {
    fn default() -> Self {
        Self {
            base_chance: 0.05,
            distance_factor: 1.5,
            max_multiplier: 4.0,
        }
    }
}

/// Growth thresholds (in steps) and succession probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    pub sapling_to_young_steps: u32,
    pub young_to_tree_steps: u32,
    /// Steps a burned tree must age before it can regrow
    pub burned_tree_regrowth_steps: u32,
    /// Steps burned grass must age before it can regrow
    pub burned_grass_regrowth_steps: u32,
    /// Probability a regrowing burned tree becomes a sapling (else grass)
    pub burned_tree_to_sapling: f64,
    /// Probability regrowing burned grass becomes grass (else a sapling)
    pub burned_grass_to_grass: f64,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            sapling_to_young_steps: 20,
            young_to_tree_steps: 30,
            burned_tree_regrowth_steps: 25,
            burned_grass_regrowth_steps: 10,
            burned_tree_to_sapling: 0.6,
            burned_grass_to_grass: 0.8,
        }
    }
}

/// Initial landscape generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Noise values below this become water (noise range is [-1, 1])
    pub water_threshold: f32,
    /// Spatial scale of the water noise, in cells
    pub water_noise_scale: f32,
    /// Fraction of dry land seeded with trees, the rest is grass
    pub tree_density: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            water_threshold: -0.6,
            water_noise_scale: 8.0,
            tree_density: 0.6,
        }
    }
}

/// Complete parameter bundle owned by a [`crate::ForestGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub ignition: IgnitionParams,
    pub wind: WindShape,
    pub spotting: SpottingParams,
    pub growth: GrowthParams,
    pub terrain: TerrainParams,
}

impl SimulationParams {
    /// Parse a (possibly partial) JSON parameter document
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
