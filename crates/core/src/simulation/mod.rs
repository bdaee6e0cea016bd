//! Simulation orchestration: control channel, frame stream and the main loop

pub mod control;
pub mod error;
pub mod runner;
pub mod stream;

pub use control::{
    ControlChannel, ControlDocument, ControlPoll, ControlSettings, ControlSource, FileControlSource,
};
pub use error::SimulationError;
pub use runner::{LoopConfig, LoopState, SimulationLoop, TickOutcome};
pub use stream::{StreamHeader, StreamWriter};
