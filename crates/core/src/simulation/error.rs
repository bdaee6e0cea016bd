//! Errors surfaced by the simulation loop

use crate::grid::GridError;
use std::io;

/// Fatal simulation errors
///
/// Control-channel problems never appear here; they are recovered inside
/// the channel by falling back to the last known settings.
#[derive(Debug)]
pub enum SimulationError {
    /// Output stream could not be created or written
    Io(io::Error),
    /// A frame or header could not be serialized
    Serialize(serde_json::Error),
    /// Grid construction was rejected
    Grid(GridError),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::Io(err) => write!(f, "Output stream error: {err}"),
            SimulationError::Serialize(err) => write!(f, "Failed to serialize frame: {err}"),
            SimulationError::Grid(err) => write!(f, "Invalid grid: {err}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Io(err) => Some(err),
            SimulationError::Serialize(err) => Some(err),
            SimulationError::Grid(err) => Some(err),
        }
    }
}

impl From<io::Error> for SimulationError {
    fn from(err: io::Error) -> Self {
        SimulationError::Io(err)
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Serialize(err)
    }
}

impl From<GridError> for SimulationError {
    fn from(err: GridError) -> Self {
        SimulationError::Grid(err)
    }
}
