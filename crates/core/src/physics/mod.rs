//! Fire spread and succession rules
//!
//! Leaf modules first: [`wind`] and [`spotting`] shape probabilities,
//! [`ignition`] and [`regrowth`] decide individual transitions,
//! [`transition`] composes them into the per-cell state machine, and
//! [`thunder`] injects lightning after a step.

pub mod ignition;
pub mod regrowth;
pub mod spotting;
pub mod thunder;
pub mod transition;
pub mod wind;

pub use thunder::{inject_thunder, ThunderSchedule};
pub use transition::{next_cell, TransitionContext};
pub use wind::{wind_amplifier, WindConditions, WindModel};

use rand::Rng;

/// Single Bernoulli trial
///
/// A non-positive (or NaN) probability never draws from `rng`.
#[inline]
pub(crate) fn bernoulli<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    probability > 0.0 && rng.random::<f64>() < probability
}
