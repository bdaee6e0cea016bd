//! Simulation loop
//!
//! Each tick polls the control channel, decides whether to advance, steps
//! the grid and appends the new frame to the output stream. With `paused`
//! set the loop idles and only advances on a `step` edge. Scheduled thunder
//! is counted in advancing steps, so pausing also pauses the schedule.

use super::control::{ControlChannel, ControlSource};
use super::error::SimulationError;
use super::stream::StreamWriter;
use crate::grid::{ForestGrid, StepInputs};
use crate::physics::ThunderSchedule;
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Timing and logging configuration of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Sleep after an advancing tick
    pub tick_interval: Duration,
    /// Sleep after an idle tick
    pub idle_interval: Duration,
    /// Advancing steps between `info` level population summaries, 0 disables
    pub stats_log_interval: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            idle_interval: Duration::from_millis(50),
            stats_log_interval: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The grid advanced and a frame was written
    Advanced { step: u64, thunder_strikes: usize },
    /// Paused without a step request
    Idle,
}

/// Drives a [`ForestGrid`] from a control channel into a frame stream
pub struct SimulationLoop<S, W: Write> {
    grid: ForestGrid,
    control: ControlChannel<S>,
    stream: StreamWriter<W>,
    schedule: ThunderSchedule,
    config: LoopConfig,
    state: LoopState,
    pending_thunder: bool,
    started: bool,
}

impl<S: ControlSource, W: Write> SimulationLoop<S, W> {
    pub fn new(
        grid: ForestGrid,
        control: ControlChannel<S>,
        stream: StreamWriter<W>,
        config: LoopConfig,
    ) -> Self {
        Self {
            grid,
            control,
            stream,
            schedule: ThunderSchedule::new(),
            config,
            state: LoopState::Running,
            pending_thunder: false,
            started: false,
        }
    }

    /// Write the stream header and the initial snapshot as the first frame
    ///
    /// Called by the first [`tick`](Self::tick) if not called explicitly.
    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.started {
            return Ok(());
        }
        self.stream
            .write_header(self.grid.width(), self.grid.height())?;
        self.stream.write_frame(self.grid.snapshot())?;
        self.started = true;

        let stats = self.grid.stats();
        info!(
            "Simulation started: {}x{} grid, {} trees, {} grass, {} water, {} burning",
            self.grid.width(),
            self.grid.height(),
            stats.trees,
            stats.grass,
            stats.water,
            stats.burning()
        );
        Ok(())
    }

    /// Run one iteration of the loop without sleeping
    pub fn tick(&mut self) -> Result<TickOutcome, SimulationError> {
        self.start()?;

        let poll = self.control.poll();
        let settings = poll.settings;
        if poll.thunder_requested {
            debug!("Thunder requested");
            self.pending_thunder = true;
        }

        let state = if settings.paused {
            LoopState::Paused
        } else {
            LoopState::Running
        };
        if state != self.state {
            info!(
                "Simulation {} at step {}",
                if state == LoopState::Paused { "paused" } else { "resumed" },
                self.grid.step_count()
            );
            self.state = state;
        }

        if state == LoopState::Paused && !poll.step_requested {
            // Thunder requests are latched and cleared right away
            self.control.consume_requests(false, poll.thunder_requested);
            return Ok(TickOutcome::Idle);
        }

        let scheduled = self.schedule.advance(settings.steps_between_thunder);
        let inputs = StepInputs {
            wind: settings.wind(),
            thunder_enabled: settings.thunder_percentage > 0,
            thunder_percentage: settings.thunder_percentage,
            trigger_thunder: scheduled || self.pending_thunder,
        };
        let report = self.grid.step(&inputs);
        self.pending_thunder = false;

        self.stream.write_frame(self.grid.snapshot())?;
        self.control
            .consume_requests(poll.step_requested, poll.thunder_requested);

        if inputs.trigger_thunder && report.thunder_strikes > 0 {
            info!(
                "Thunder at step {}: {} trees struck",
                report.step, report.thunder_strikes
            );
        }
        self.log_stats(report.step);

        Ok(TickOutcome::Advanced {
            step: report.step,
            thunder_strikes: report.thunder_strikes,
        })
    }

    /// Run forever, sleeping between ticks
    ///
    /// Only returns on a fatal output error.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        self.start()?;
        loop {
            let pause = match self.tick()? {
                TickOutcome::Advanced { .. } => self.config.tick_interval,
                TickOutcome::Idle => self.config.idle_interval,
            };
            thread::sleep(pause);
        }
    }

    pub fn grid(&self) -> &ForestGrid {
        &self.grid
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stream(&self) -> &StreamWriter<W> {
        &self.stream
    }

    pub fn control(&self) -> &ControlChannel<S> {
        &self.control
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    fn log_stats(&self, step: u64) {
        let stats = self.grid.stats();
        debug!(
            "Step {}: living={} burning={} burned={} thunder={}",
            step,
            stats.living(),
            stats.burning(),
            stats.burned(),
            stats.thunder
        );
        let interval = self.config.stats_log_interval;
        if interval > 0 && step % interval == 0 {
            info!(
                "Step {}: {} trees, {} young, {} saplings, {} grass, {} burning, {:.1}% burned",
                step,
                stats.trees,
                stats.young_trees,
                stats.saplings,
                stats.grass,
                stats.burning(),
                stats.percent_burned()
            );
        }
    }
}
