// src/state/mod.rs
use std::time::{Duration, Instant};
use anyhow::Result;

use crate::analysis::{RunSummary, Simulator, StepOutcome};
use crate::config::{AppSettings, SimulationConfig};
use crate::error::SimError;
use crate::file::ExportFile;

pub mod input_state;

pub use input_state::ConfigInputs;

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub simulator: Simulator,
    pub settings: AppSettings,
    pub inputs: ConfigInputs,
    pub show_overlay: bool,
    pub last_summary: Option<RunSummary>,

    // Minimal UI state
    pub error_message: Option<String>,
    pub notice: Option<String>,

    // When the animated run should draw its next batch
    pub next_step_at: Option<Instant>,
}

impl AppState {
    pub fn new(settings: AppSettings, config: SimulationConfig) -> Self {
        let simulator = Simulator::new(config, settings.seed);
        Self {
            inputs: ConfigInputs::from_config(simulator.config()),
            simulator,
            settings,
            show_overlay: true,
            last_summary: None,
            error_message: None,
            notice: None,
            next_step_at: None,
        }
    }

    /// Pushes the widget text into the simulator. Returns true when the
    /// outcome space changed and the previous run was discarded.
    pub fn apply_inputs(&mut self) -> bool {
        self.inputs.normalize();
        let invalidated = self.simulator.set_config(self.inputs.to_config());
        if invalidated {
            self.last_summary = None;
            self.next_step_at = None;
        }
        invalidated
    }

    pub fn run_instant(&mut self) {
        if self.simulator.is_running() {
            log::warn!("Ignoring instant run: an animated run is in progress");
            return;
        }
        self.apply_inputs();
        match self.simulator.run_instant() {
            Ok(summary) => self.last_summary = Some(summary),
            Err(e) => self.error_message = Some(format!("Simulation failed: {}", e)),
        }
    }

    pub fn start_animated(&mut self, now: Instant) {
        if self.simulator.is_running() {
            log::warn!("Ignoring animated run: a run is already in progress");
            return;
        }
        self.apply_inputs();
        if self.simulator.start_animated() {
            self.last_summary = None;
            self.next_step_at = Some(now);
        }
    }

    /// Advances the animated run if it is due. Returns how long the host
    /// should wait before calling again, or `None` once nothing is pending.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        let due = self.next_step_at?;
        if now < due {
            return Some(due - now);
        }

        let outcome = match self.simulator.step() {
            Ok(outcome) => outcome,
            Err(e) => {
                self.error_message = Some(format!("Simulation failed: {}", e));
                StepOutcome::Stopped
            }
        };

        if outcome == StepOutcome::Complete {
            self.last_summary = Some(self.simulator.summary());
        }

        let wait = outcome.wake_after(self.settings.batch_delay(), self.settings.pause_poll());
        self.next_step_at = wait.map(|w| now + w);
        wait
    }

    pub fn toggle_pause(&mut self) {
        self.simulator.toggle_pause();
    }

    pub fn reset(&mut self) {
        if !self.apply_inputs() {
            self.simulator.reset();
        }
        self.last_summary = None;
        self.next_step_at = None;
        log::info!("Simulator reset");
    }

    /// Builds the CSV export. `Ok(None)` means there was nothing to export;
    /// the notice is set for the user in that case.
    pub fn prepare_export(&mut self) -> Result<Option<ExportFile>> {
        match ExportFile::new(self.simulator.config().distribution, self.simulator.samples()) {
            Ok(file) => Ok(Some(file)),
            Err(e) if matches!(e.downcast_ref::<SimError>(), Some(SimError::NoData)) => {
                log::info!("Export requested with no samples recorded");
                self.notice = Some(e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RunPhase;
    use crate::config::DistributionKind;

    fn state() -> AppState {
        let settings = AppSettings { seed: Some(11), ..Default::default() };
        AppState::new(settings, SimulationConfig::dice(6).with_trials(100).with_batch_size(30))
    }

    #[test]
    fn test_tick_drives_animated_run_to_completion() {
        let mut state = state();
        let mut now = Instant::now();
        state.start_animated(now);

        let mut ticks = 0;
        while let Some(wait) = state.tick(now) {
            now += wait;
            ticks += 1;
            assert!(ticks < 100);
        }

        assert_eq!(ticks, 3);
        assert_eq!(state.simulator.phase(), RunPhase::Complete);
        assert_eq!(state.last_summary.as_ref().map(|s| s.completed), Some(100));
    }

    #[test]
    fn test_tick_waits_until_due() {
        let mut state = state();
        let now = Instant::now();
        state.start_animated(now);
        assert_eq!(state.tick(now), Some(state.settings.batch_delay()));
        assert_eq!(state.simulator.state().completed, 30);

        // Not due yet: nothing drawn.
        let wait = state.tick(now + Duration::from_millis(10)).unwrap();
        assert_eq!(wait, Duration::from_millis(20));
        assert_eq!(state.simulator.state().completed, 30);
    }

    #[test]
    fn test_paused_tick_polls() {
        let mut state = state();
        let now = Instant::now();
        state.start_animated(now);
        state.tick(now);
        state.toggle_pause();

        let later = now + Duration::from_secs(1);
        assert_eq!(state.tick(later), Some(state.settings.pause_poll()));
        assert_eq!(state.simulator.state().completed, 30);
    }

    #[test]
    fn test_reset_stops_ticking() {
        let mut state = state();
        let now = Instant::now();
        state.start_animated(now);
        state.tick(now);
        state.reset();
        assert_eq!(state.tick(now + Duration::from_secs(1)), None);
        assert!(state.simulator.samples().is_empty());
    }

    #[test]
    fn test_reset_with_new_distribution_mid_run() {
        let mut state = state();
        let now = Instant::now();
        state.start_animated(now);
        state.tick(now);
        assert_eq!(state.simulator.state().completed, 30);

        state.inputs.distribution = DistributionKind::Bernoulli;
        state.reset();

        assert_eq!(state.simulator.phase(), RunPhase::Idle);
        assert_eq!(state.simulator.outcomes().len(), 2);
        assert_eq!(state.simulator.state().counts, vec![0, 0]);
        assert!(state.simulator.samples().is_empty());
        assert_eq!(state.tick(now + Duration::from_secs(1)), None);

        // A second reset with unchanged inputs still leaves a clean state.
        state.reset();
        assert_eq!(state.simulator.state().counts, vec![0, 0]);
        assert_eq!(state.simulator.phase(), RunPhase::Idle);
    }

    #[test]
    fn test_export_without_samples_sets_notice() {
        let mut state = state();
        assert!(state.prepare_export().unwrap().is_none());
        assert_eq!(state.notice.as_deref(), Some("no data to export: run a simulation first"));

        state.run_instant();
        let file = state.prepare_export().unwrap().unwrap();
        assert!(file.file_name.starts_with("dice_samples_"));
        assert_eq!(file.row_count(), 100);
    }

    #[test]
    fn test_changing_distribution_discards_run() {
        let mut state = state();
        state.run_instant();
        assert!(state.last_summary.is_some());

        state.inputs.distribution = DistributionKind::Binomial;
        state.inputs.n = "3".to_string();
        assert!(state.apply_inputs());
        assert!(state.last_summary.is_none());
        assert_eq!(state.simulator.outcomes().len(), 4);
    }
}
