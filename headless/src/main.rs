//! Headless wildfire simulation
//!
//! Generates a landscape, writes the initial control document if none
//! exists, then steps forever, appending one NDJSON frame per step to the
//! output stream. Exits non-zero only when the grid cannot be built or the
//! stream cannot be written.

mod args;

use args::Args;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wildfire_core::{
    ControlChannel, FileControlSource, ForestGrid, SimulationError, SimulationLoop,
    SimulationParams, StreamWriter,
};

/// Startup and runtime failures
#[derive(Debug)]
enum RunError {
    /// Parameter file missing or malformed
    Params { path: PathBuf, reason: String },
    Simulation(SimulationError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Params { path, reason } => {
                write!(f, "Failed to load parameters from {}: {reason}", path.display())
            }
            RunError::Simulation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<SimulationError> for RunError {
    fn from(err: SimulationError) -> Self {
        RunError::Simulation(err)
    }
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_params(args: &Args) -> Result<SimulationParams, RunError> {
    let Some(path) = &args.params else {
        return Ok(SimulationParams::default());
    };
    let text = fs::read_to_string(path).map_err(|e| RunError::Params {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    let params = SimulationParams::from_json(&text).map_err(|e| RunError::Params {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    info!("Loaded simulation parameters from {}", path.display());
    Ok(params)
}

fn run(args: &Args) -> Result<(), RunError> {
    let params = load_params(args)?;
    let settings = args.control_settings();

    let grid = ForestGrid::generate(args.width(), args.height(), params, args.ignition(), args.seed)
        .map_err(SimulationError::from)?;

    let source = FileControlSource::new(&args.control);
    match source.initialize(&settings) {
        Ok(true) => info!("Wrote initial control document {}", args.control.display()),
        Ok(false) => info!("Using existing control document {}", args.control.display()),
        Err(err) => warn!(
            "Could not write control document {}: {}",
            args.control.display(),
            err
        ),
    }

    let stream = StreamWriter::create(&args.output)?;
    info!("Streaming frames to {}", args.output.display());

    let mut simulation = SimulationLoop::new(
        grid,
        ControlChannel::new(source, settings),
        stream,
        args.loop_config(),
    );
    simulation.run()?;
    Ok(())
}
