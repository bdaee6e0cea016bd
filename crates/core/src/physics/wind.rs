//! Wind amplification of fire spread
//!
//! Wind biases ignition toward cells lying downwind of a burning neighbor.
//! Two factors combine:
//!
//! 1. **Alignment** - cosine between the wind vector and the offset from the
//!    cell to its burning neighbor, in [-1, 1]
//! 2. **Amplifier** - sigmoid response to wind strength, in [1, max_multiplier]
//!
//! ```text
//! p_wind = p_base × (1 + alignment) × amplifier(strength)
//! amplifier(w) = 1 + (max - 1) × sigmoid(steepness × (w - midpoint))
//! ```
//!
//! # Direction convention
//!
//! `angle` is in degrees clockwise from north, where north is decreasing row
//! index. The wind vector `(sin θ, -cos θ)` in (column, row) space points to
//! the side the wind blows *from*: a burning neighbor at that offset is
//! upwind and spreads fire most strongly (alignment +1), one on the opposite
//! side cannot spread against the wind (alignment -1).

use crate::core_types::{SpottingParams, WindShape};
use nalgebra::Vector2;

/// Logistic function
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Strength-dependent spread amplifier, in [1, `shape.max_multiplier`]
pub fn wind_amplifier(strength: f64, shape: &WindShape) -> f64 {
    1.0 + (shape.max_multiplier - 1.0) * sigmoid(shape.steepness * (strength - shape.midpoint))
}

/// Strength-dependent spotting amplifier
///
/// Same sigmoid as [`wind_amplifier`] shifted two units to the right, so
/// embers need slightly stronger wind than surface spread to take off.
pub fn jump_amplifier(strength: f64, shape: &WindShape, spotting: &SpottingParams) -> f64 {
    const JUMP_MIDPOINT_SHIFT: f64 = 2.0;
    1.0 + (spotting.max_multiplier - 1.0)
        * sigmoid(shape.steepness * (strength - (shape.midpoint + JUMP_MIDPOINT_SHIFT)))
}

/// Unit wind vector for an angle in degrees
pub fn wind_direction(angle_degrees: f64) -> Vector2<f64> {
    let radians = angle_degrees.to_radians();
    Vector2::new(radians.sin(), -radians.cos())
}

/// Cosine between `direction` and the neighbor offset `(dx, dy)`
///
/// Returns 0 for a zero offset or a zero direction.
pub fn alignment(direction: &Vector2<f64>, dx: i32, dy: i32) -> f64 {
    let offset = Vector2::new(f64::from(dx), f64::from(dy));
    let denominator = offset.norm() * direction.norm();
    if denominator == 0.0 {
        return 0.0;
    }
    (direction.dot(&offset) / denominator).clamp(-1.0, 1.0)
}

/// Wind direction quantized to a whole-cell offset at `distance` cells
pub fn quantized_offset(angle_degrees: f64, distance: i32) -> (i32, i32) {
    let radians = angle_degrees.to_radians();
    let d = f64::from(distance);
    (
        (radians.sin() * d).round() as i32,
        (-radians.cos() * d).round() as i32,
    )
}

/// Wind settings for a single step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindConditions {
    pub enabled: bool,
    /// Degrees clockwise from north
    pub angle_degrees: f64,
    /// Arbitrary speed unit, same scale as [`WindShape::midpoint`]
    pub strength: f64,
}

impl WindConditions {
    /// Windless conditions
    pub fn calm() -> Self {
        Self::default()
    }

    pub fn new(angle_degrees: f64, strength: f64) -> Self {
        Self {
            enabled: true,
            angle_degrees,
            strength,
        }
    }
}

/// Wind state resolved once per step
///
/// Caches the direction vector and both amplifiers so the per-cell work is a
/// dot product and a multiply.
#[derive(Debug, Clone)]
pub struct WindModel {
    conditions: WindConditions,
    direction: Vector2<f64>,
    amplifier: f64,
    jump_amplifier: f64,
}

impl WindModel {
    pub fn new(conditions: WindConditions, shape: &WindShape, spotting: &SpottingParams) -> Self {
        Self {
            conditions,
            direction: wind_direction(conditions.angle_degrees),
            amplifier: wind_amplifier(conditions.strength, shape),
            jump_amplifier: jump_amplifier(conditions.strength, shape, spotting),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.conditions.enabled
    }

    pub fn conditions(&self) -> &WindConditions {
        &self.conditions
    }

    pub fn amplifier(&self) -> f64 {
        self.amplifier
    }

    pub fn jump_amplifier(&self) -> f64 {
        self.jump_amplifier
    }

    /// Ignition probability from a burning neighbor at `(dx, dy)`
    ///
    /// With wind disabled this is `base` unmodified. The result is always
    /// clamped to [0, 1].
    pub fn adjusted_probability(&self, base: f64, dx: i32, dy: i32) -> f64 {
        if !self.conditions.enabled {
            return base.clamp(0.0, 1.0);
        }
        let alignment = alignment(&self.direction, dx, dy);
        (base * (1.0 + alignment) * self.amplifier).clamp(0.0, 1.0)
    }

    /// Offset of the cell `distance` cells upwind
    pub fn upwind_offset(&self, distance: i32) -> (i32, i32) {
        quantized_offset(self.conditions.angle_degrees, distance)
    }
}
