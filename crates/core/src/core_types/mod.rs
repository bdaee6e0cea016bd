//! Core types and utilities

pub mod cell;
pub mod lattice;
pub mod noise;
pub mod params;

pub use cell::{Cell, VegetationClass, TREE_BURN_STAGES, YOUNG_TREE_BURN_STAGES};
pub use lattice::{Snapshot, NEIGHBOR_OFFSETS};
pub use params::{
    GrowthParams, IgnitionParams, SimulationParams, SpottingParams, TerrainParams, WindShape,
};
