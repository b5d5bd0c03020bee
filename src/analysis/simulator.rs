// src/analysis/simulator.rs

use std::time::Duration;
use crate::config::SimulationConfig;
use crate::error::SimResult;
use super::distribution::{theoretical, OutcomeSpace, Sampler, TheoreticalModel};
use super::statistics::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Paused,
    Complete,
}

/// Everything a run mutates. Cleared on reset and whenever the outcome space
/// changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunState {
    pub counts: Vec<u64>,
    pub samples: Vec<u32>,
    pub completed: usize,
    pub running: bool,
    pub paused: bool,
    /// Set once every trial of the run has been drawn.
    pub finished: bool,
}

impl RunState {
    pub fn new(bins: usize) -> Self {
        Self {
            counts: vec![0; bins],
            ..Default::default()
        }
    }

    /// Bins the value, appends it to the log and returns the bin index.
    pub fn record_value(&mut self, value: u32, outcomes: &OutcomeSpace) -> SimResult<usize> {
        let index = outcomes.bin_index(value)?;
        self.counts[index] += 1;
        self.samples.push(value);
        self.completed += 1;
        Ok(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A batch was drawn and more remain.
    Advanced { drawn: usize },
    /// Paused; nothing was drawn.
    Paused,
    /// The final batch was drawn.
    Complete,
    /// No run in flight (never started, finished, or reset).
    Stopped,
}

impl StepOutcome {
    /// How long the host should wait before calling `step` again.
    pub fn wake_after(&self, batch_delay: Duration, pause_poll: Duration) -> Option<Duration> {
        match self {
            StepOutcome::Advanced { .. } => Some(batch_delay),
            StepOutcome::Paused => Some(pause_poll),
            StepOutcome::Complete | StepOutcome::Stopped => None,
        }
    }
}

/// Payload for the rendering surface: one entry per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub expected: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    outcomes: OutcomeSpace,
    state: RunState,
    sampler: Sampler,
    seed: Option<u64>,
}

impl Simulator {
    pub fn new(config: SimulationConfig, seed: Option<u64>) -> Self {
        let config = config.sanitized();
        let outcomes = OutcomeSpace::from_config(&config);
        Self {
            state: RunState::new(outcomes.len()),
            outcomes,
            config,
            sampler: Sampler::new(seed),
            seed,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn outcomes(&self) -> &OutcomeSpace {
        &self.outcomes
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn samples(&self) -> &[u32] {
        &self.state.samples
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn phase(&self) -> RunPhase {
        match (self.state.running, self.state.paused) {
            (true, true) => RunPhase::Paused,
            (true, false) => RunPhase::Running,
            (false, _) if self.state.finished => RunPhase::Complete,
            _ => RunPhase::Idle,
        }
    }

    /// Applies a new config. A change to the distribution or its parameters
    /// rebuilds the outcome space and discards the current run; returns
    /// whether that happened.
    pub fn set_config(&mut self, config: SimulationConfig) -> bool {
        let config = config.sanitized();
        let invalidates = !self.config.same_distribution(&config);
        self.config = config;
        if invalidates {
            self.reset();
        }
        invalidates
    }

    pub fn reset(&mut self) {
        if self.state.running {
            log::info!("Cancelling {} run after {} samples", self.config.distribution.name(), self.state.completed);
        }
        self.outcomes = OutcomeSpace::from_config(&self.config);
        self.state = RunState::new(self.outcomes.len());
    }

    fn begin_run(&mut self) {
        self.reset();
        if let Some(seed) = self.seed {
            self.sampler.reseed(seed);
        }
        self.state.running = true;
    }

    /// Draws up to `count` samples, stopping at the trial count.
    fn draw(&mut self, count: usize) -> SimResult<usize> {
        let remaining = self.config.trial_count.saturating_sub(self.state.completed);
        let count = count.min(remaining);
        for _ in 0..count {
            let value = self.sampler.sample_one(&self.config);
            self.state.record_value(value, &self.outcomes)?;
        }
        Ok(count)
    }

    /// Runs every trial synchronously and returns the summary.
    pub fn run_instant(&mut self) -> SimResult<RunSummary> {
        self.begin_run();
        log::info!(
            "Instant {} run: {} trials",
            self.config.distribution.name(),
            self.config.trial_count
        );

        let result = self.draw(self.config.trial_count);
        self.state.running = false;
        result?;
        self.state.finished = true;

        let summary = self.summary();
        log::info!(
            "Run complete: mean {:.4} (theoretical {:.4})",
            summary.sample_mean.unwrap_or(f64::NAN),
            summary.theoretical.mean
        );
        Ok(summary)
    }

    /// Starts a batched run driven by repeated `step` calls. Ignored while a
    /// run is already in flight.
    pub fn start_animated(&mut self) -> bool {
        if self.state.running {
            log::warn!("Ignoring start request: a run is already in progress");
            return false;
        }
        self.begin_run();
        log::info!(
            "Animated {} run: {} trials in batches of {}",
            self.config.distribution.name(),
            self.config.trial_count,
            self.config.batch_size
        );
        true
    }

    /// Draws one batch unless paused or stopped. Pause takes effect between
    /// batches, never inside one.
    pub fn step(&mut self) -> SimResult<StepOutcome> {
        if !self.state.running {
            return Ok(StepOutcome::Stopped);
        }
        if self.state.paused {
            return Ok(StepOutcome::Paused);
        }

        let drawn = match self.draw(self.config.batch_size) {
            Ok(drawn) => drawn,
            Err(e) => {
                self.state.running = false;
                return Err(e);
            }
        };
        log::debug!("Batch of {} drawn, {}/{}", drawn, self.state.completed, self.config.trial_count);

        if self.state.completed >= self.config.trial_count {
            self.state.running = false;
            self.state.paused = false;
            self.state.finished = true;
            log::info!("Animated run complete after {} samples", self.state.completed);
            Ok(StepOutcome::Complete)
        } else {
            Ok(StepOutcome::Advanced { drawn })
        }
    }

    pub fn pause(&mut self) {
        if self.state.running {
            self.state.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.state.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.state.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn theoretical(&self) -> TheoreticalModel {
        theoretical(&self.config)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::new(&self.state.samples, self.theoretical())
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData {
            labels: self.outcomes.labels(),
            counts: self.state.counts.clone(),
            expected: self.theoretical().expected_counts(self.state.completed),
        }
    }
}
