//! Double-buffered forest grid
//!
//! The grid owns two fixed-size cell matrices. Each step reads only the front
//! buffer, writes every successor into the back buffer, then swaps them, so
//! no cell ever observes a partially updated neighborhood and no matrix is
//! allocated after construction. Thunder injection runs as a final pass over
//! the freshly swapped front buffer.
//!
//! A single seeded [`StdRng`] is carried for the lifetime of the grid; with a
//! fixed seed the whole run is reproducible.

use super::stats::ForestStats;
use super::terrain::generate_terrain;
use crate::core_types::{Cell, SimulationParams, Snapshot};
use crate::physics::thunder::convert_sample;
use crate::physics::{inject_thunder, next_cell, TransitionContext, WindConditions, WindModel};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Percentages of the initial landscape set alight at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitialIgnition {
    /// Percent of trees (0-100) starting as burning trees
    pub tree_percentage: u32,
    /// Percent of grass (0-100) starting as burning grass
    pub grass_percentage: u32,
}

/// Per-step inputs supplied by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepInputs {
    pub wind: WindConditions,
    pub thunder_enabled: bool,
    /// Percent of mature trees struck when thunder triggers (0-100)
    pub thunder_percentage: u32,
    /// Strike this step (scheduled or on demand)
    pub trigger_thunder: bool,
}

/// Result of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Step number just completed, starting at 1
    pub step: u64,
    /// Trees converted to thunder in the final pass
    pub thunder_strikes: usize,
}

/// Errors raised while constructing a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero
    ZeroDimension { width: usize, height: usize },
    /// Supplied cells do not fill `width × height`
    CellCountMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ZeroDimension { width, height } => {
                write!(f, "Grid dimensions must be non-zero, got {width}x{height}")
            }
            GridError::CellCountMismatch { expected, actual } => {
                write!(f, "Expected {expected} cells, got {actual}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Forest cellular automaton
#[derive(Debug, Clone)]
pub struct ForestGrid {
    width: usize,
    height: usize,
    // Ping-pong buffers (read from one, write to other, then swap)
    cells: Vec<Cell>,
    cells_back: Vec<Cell>,
    rng: StdRng,
    params: SimulationParams,
    step_count: u64,
}

impl ForestGrid {
    /// Generate a random landscape and apply the initial ignition
    ///
    /// `seed` fixes the random source; `None` seeds from the OS.
    pub fn generate(
        width: usize,
        height: usize,
        params: SimulationParams,
        ignition: InitialIgnition,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut cells = generate_terrain(width, height, &params.terrain, &mut rng);
        let burning_trees = convert_sample(
            &mut cells,
            |cell| *cell == Cell::Tree,
            ignition.tree_percentage,
            Cell::BurningTree { stage: 1 },
            &mut rng,
        );
        let burning_grass = convert_sample(
            &mut cells,
            |cell| *cell == Cell::Grass,
            ignition.grass_percentage,
            Cell::BurningGrass,
            &mut rng,
        );

        info!(
            "Forest grid generated: {}x{}, {} trees and {} grass cells ignited",
            width, height, burning_trees, burning_grass
        );

        Ok(Self::with_rng(width, height, cells, params, rng))
    }

    /// Build a grid from explicit cells with a fixed seed
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        params: SimulationParams,
        seed: u64,
    ) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(GridError::CellCountMismatch {
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self::with_rng(
            width,
            height,
            cells,
            params,
            StdRng::seed_from_u64(seed),
        ))
    }

    fn with_rng(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        params: SimulationParams,
        rng: StdRng,
    ) -> Self {
        let cells_back = cells.clone();
        Self {
            width,
            height,
            cells,
            cells_back,
            rng,
            params,
            step_count: 0,
        }
    }

    /// Advance every cell by one step
    pub fn step(&mut self, inputs: &StepInputs) -> StepReport {
        let wind = WindModel::new(inputs.wind, &self.params.wind, &self.params.spotting);
        let ctx = TransitionContext {
            snapshot: Snapshot::new(&self.cells, self.width, self.height),
            wind: &wind,
            params: &self.params,
        };

        for y in 0..self.height {
            let row = &mut self.cells_back[y * self.width..(y + 1) * self.width];
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = next_cell(&ctx, x, y, &mut self.rng);
            }
        }

        std::mem::swap(&mut self.cells, &mut self.cells_back);
        self.step_count += 1;

        let thunder_strikes = if inputs.thunder_enabled && inputs.trigger_thunder {
            inject_thunder(&mut self.cells, inputs.thunder_percentage, &mut self.rng)
        } else {
            0
        };

        debug!(
            "Step {} complete: wind={} angle={:.0} strength={:.1}, thunder strikes={}",
            self.step_count,
            inputs.wind.enabled,
            inputs.wind.angle_degrees,
            inputs.wind.strength,
            thunder_strikes
        );

        StepReport {
            step: self.step_count,
            thunder_strikes,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Current snapshot in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Read-only view of the current snapshot
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.cells, self.width, self.height)
    }

    /// Cell at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.snapshot().get(x, y)
    }

    /// Rows of the current snapshot, top to bottom
    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.width)
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Number of completed steps
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Population counts for the current snapshot
    pub fn stats(&self) -> ForestStats {
        ForestStats::from_cells(&self.cells)
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::ZeroDimension { width, height });
    }
    Ok(())
}
