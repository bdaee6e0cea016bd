//! Forest grid, landscape generation and population statistics

pub mod forest_grid;
pub mod stats;
pub mod terrain;

pub use forest_grid::{ForestGrid, GridError, InitialIgnition, StepInputs, StepReport};
pub use stats::ForestStats;
pub use terrain::generate_terrain;
