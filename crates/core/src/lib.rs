//! Wildfire Succession Core Library
//!
//! A stochastic cellular automaton of a forest landscape under fire. Each
//! cell is water, grass or a growing tree; fire spreads between neighbors
//! with wind-biased probabilities, embers jump several cells downwind,
//! lightning strikes mature trees, and burned ground regrows through
//! saplings and young trees back to forest.
//!
//! ## Layout
//!
//! - [`core_types`]: cell states, tunable parameters and the snapshot view
//! - [`physics`]: ignition, wind, spotting, regrowth, thunder and the
//!   per-cell transition function
//! - [`grid`]: the double-buffered [`ForestGrid`] and landscape generation
//! - [`simulation`]: control channel, NDJSON frame stream and the main loop

// Core types and utilities
pub mod core_types;

// Cell-level rules
pub mod physics;

// Grid and orchestration
pub mod grid;
pub mod simulation;

// Re-export core types
pub use core_types::{Cell, SimulationParams, Snapshot, VegetationClass};

// Re-export grid types
pub use grid::{ForestGrid, ForestStats, GridError, InitialIgnition, StepInputs, StepReport};
pub use physics::{ThunderSchedule, WindConditions, WindModel};

// Re-export simulation types
pub use simulation::{
    ControlChannel, ControlSettings, ControlSource, FileControlSource, LoopConfig, SimulationError,
    SimulationLoop, StreamWriter, TickOutcome,
};
