// src/analysis/statistics.rs
use serde::{Serialize, Deserialize};
use statrs::statistics::Statistics;
use super::distribution::TheoreticalModel;

/// Arithmetic mean of the recorded samples, `None` before any sample exists.
pub fn sample_mean(samples: &[u32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().map(|&v| v as f64).mean())
}

/// Population variance (divides by the sample count, not count - 1).
pub fn sample_variance(samples: &[u32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().map(|&v| v as f64).population_variance())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub completed: usize,
    pub sample_mean: Option<f64>,
    pub sample_variance: Option<f64>,
    pub theoretical: TheoreticalModel,
}

impl RunSummary {
    pub fn new(samples: &[u32], theoretical: TheoreticalModel) -> Self {
        Self {
            completed: samples.len(),
            sample_mean: sample_mean(samples),
            sample_variance: sample_variance(samples),
            theoretical,
        }
    }

    pub fn mean_error(&self) -> Option<f64> {
        self.sample_mean.map(|m| m - self.theoretical.mean)
    }
}
