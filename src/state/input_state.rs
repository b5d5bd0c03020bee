// src/state/input_state.rs
use crate::config::simulation::{
    parse_batch_size, parse_probability, parse_sides, parse_trial_count,
    parse_trials_per_sample,
};
use crate::config::{DistributionKind, DistributionParams, SimulationConfig};

/// Raw text of the configuration widgets. Values are only validated when
/// turned into a `SimulationConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigInputs {
    pub distribution: DistributionKind,
    pub p: String,
    pub sides: String,
    pub n: String,
    pub trial_count: String,
    pub batch_size: String,
}

impl ConfigInputs {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            distribution: config.distribution,
            p: config.params.p.to_string(),
            sides: config.params.sides.to_string(),
            n: config.params.n.to_string(),
            trial_count: config.trial_count.to_string(),
            batch_size: config.batch_size.to_string(),
        }
    }

    pub fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            distribution: self.distribution,
            params: DistributionParams {
                p: parse_probability(&self.p),
                sides: parse_sides(&self.sides),
                n: parse_trials_per_sample(&self.n),
            },
            trial_count: parse_trial_count(&self.trial_count),
            batch_size: parse_batch_size(&self.batch_size),
        }
    }

    /// Rewrites the text so corrected values show up in the widgets.
    pub fn normalize(&mut self) {
        *self = Self::from_config(&self.to_config());
    }
}
