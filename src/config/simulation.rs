// src/config/simulation.rs
use serde::{Serialize, Deserialize};

pub const DEFAULT_PROBABILITY: f64 = 0.5;
pub const DEFAULT_SIDES: u32 = 6;
pub const DEFAULT_TRIALS_PER_SAMPLE: u32 = 10;
pub const DEFAULT_TRIAL_COUNT: usize = 1000;
pub const DEFAULT_BATCH_SIZE: usize = 50;

// Upper bounds keep the bin count and per-sample work small enough for the UI
// thread; larger values are treated as invalid and fall back to the defaults.
pub const MAX_SIDES: u32 = 1000;
pub const MAX_TRIALS_PER_SAMPLE: u32 = 10_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DistributionKind {
    Bernoulli,
    Dice,
    Binomial,
}

impl Default for DistributionKind {
    fn default() -> Self {
        DistributionKind::Bernoulli
    }
}

impl DistributionKind {
    pub const ALL: [DistributionKind; 3] = [
        DistributionKind::Bernoulli,
        DistributionKind::Dice,
        DistributionKind::Binomial,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DistributionKind::Bernoulli => "bernoulli",
            DistributionKind::Dice => "dice",
            DistributionKind::Binomial => "binomial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistributionKind::Bernoulli => "Bernoulli",
            DistributionKind::Dice => "Dice",
            DistributionKind::Binomial => "Binomial",
        }
    }
}

/// Distribution-specific parameters. Only the fields relevant to the selected
/// kind are read; the others are kept so switching back restores them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DistributionParams {
    pub p: f64,
    pub sides: u32,
    pub n: u32,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            p: DEFAULT_PROBABILITY,
            sides: DEFAULT_SIDES,
            n: DEFAULT_TRIALS_PER_SAMPLE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub distribution: DistributionKind,
    pub params: DistributionParams,
    pub trial_count: usize,
    pub batch_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            distribution: DistributionKind::default(),
            params: DistributionParams::default(),
            trial_count: DEFAULT_TRIAL_COUNT,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SimulationConfig {
    pub fn bernoulli(p: f64) -> Self {
        Self {
            distribution: DistributionKind::Bernoulli,
            params: DistributionParams { p, ..Default::default() },
            ..Default::default()
        }.sanitized()
    }

    pub fn dice(sides: u32) -> Self {
        Self {
            distribution: DistributionKind::Dice,
            params: DistributionParams { sides, ..Default::default() },
            ..Default::default()
        }.sanitized()
    }

    pub fn binomial(n: u32, p: f64) -> Self {
        Self {
            distribution: DistributionKind::Binomial,
            params: DistributionParams { p, n, ..Default::default() },
            ..Default::default()
        }.sanitized()
    }

    pub fn with_trials(mut self, trial_count: usize) -> Self {
        self.trial_count = trial_count;
        self.sanitized()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self.sanitized()
    }

    /// Replaces every out-of-range value with its documented default.
    pub fn sanitized(mut self) -> Self {
        self.params.p = valid_probability(self.params.p);
        if !(2..=MAX_SIDES).contains(&self.params.sides) {
            self.params.sides = DEFAULT_SIDES;
        }
        if !(1..=MAX_TRIALS_PER_SAMPLE).contains(&self.params.n) {
            self.params.n = DEFAULT_TRIALS_PER_SAMPLE;
        }
        if self.trial_count < 1 {
            self.trial_count = DEFAULT_TRIAL_COUNT;
        }
        if self.batch_size < 1 {
            self.batch_size = DEFAULT_BATCH_SIZE;
        }
        self
    }

    /// True when both configs describe the same outcome space and probabilities.
    pub fn same_distribution(&self, other: &SimulationConfig) -> bool {
        if self.distribution != other.distribution {
            return false;
        }
        match self.distribution {
            DistributionKind::Bernoulli => self.params.p == other.params.p,
            DistributionKind::Dice => self.params.sides == other.params.sides,
            DistributionKind::Binomial => {
                self.params.n == other.params.n && self.params.p == other.params.p
            }
        }
    }
}

fn valid_probability(p: f64) -> f64 {
    if p.is_finite() && p > 0.0 && p < 1.0 {
        p
    } else {
        DEFAULT_PROBABILITY
    }
}

pub fn parse_probability(input: &str) -> f64 {
    input.trim().parse::<f64>().map(valid_probability).unwrap_or(DEFAULT_PROBABILITY)
}

pub fn parse_sides(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(sides) if (2..=MAX_SIDES).contains(&sides) => sides,
        _ => DEFAULT_SIDES,
    }
}

pub fn parse_trials_per_sample(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_TRIALS_PER_SAMPLE).contains(&n) => n,
        _ => DEFAULT_TRIALS_PER_SAMPLE,
    }
}

pub fn parse_trial_count(input: &str) -> usize {
    match input.trim().parse::<usize>() {
        Ok(count) if count >= 1 => count,
        _ => DEFAULT_TRIAL_COUNT,
    }
}

pub fn parse_batch_size(input: &str) -> usize {
    match input.trim().parse::<usize>() {
        Ok(size) if size >= 1 => size,
        _ => DEFAULT_BATCH_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_params_fall_back_to_defaults() {
        let config = SimulationConfig {
            distribution: DistributionKind::Dice,
            params: DistributionParams { p: 1.5, sides: 1, n: 0 },
            trial_count: 0,
            batch_size: 0,
        }.sanitized();

        assert_eq!(config.params.p, 0.5);
        assert_eq!(config.params.sides, 6);
        assert_eq!(config.params.n, 10);
        assert_eq!(config.trial_count, DEFAULT_TRIAL_COUNT);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_oversized_params_fall_back_to_defaults() {
        assert_eq!(SimulationConfig::dice(4_000_000_000).params.sides, DEFAULT_SIDES);
        assert_eq!(SimulationConfig::dice(MAX_SIDES).params.sides, MAX_SIDES);
        assert_eq!(SimulationConfig::binomial(u32::MAX, 0.5).params.n, DEFAULT_TRIALS_PER_SAMPLE);
        assert_eq!(
            SimulationConfig::binomial(MAX_TRIALS_PER_SAMPLE, 0.5).params.n,
            MAX_TRIALS_PER_SAMPLE
        );
    }

    #[test]
    fn test_parse_helpers_correct_bad_input() {
        assert_eq!(parse_probability("0.25"), 0.25);
        assert_eq!(parse_probability("abc"), 0.5);
        assert_eq!(parse_probability("0"), 0.5);
        assert_eq!(parse_probability("1"), 0.5);
        assert_eq!(parse_probability("NaN"), 0.5);
        assert_eq!(parse_sides(" 20 "), 20);
        assert_eq!(parse_sides("1"), 6);
        assert_eq!(parse_sides("-3"), 6);
        assert_eq!(parse_trials_per_sample("0"), 10);
        assert_eq!(parse_trials_per_sample(""), 10);
        assert_eq!(parse_sides("1000"), MAX_SIDES);
        assert_eq!(parse_sides("1001"), 6);
        assert_eq!(parse_sides("4000000000"), 6);
        assert_eq!(parse_trials_per_sample("10000"), MAX_TRIALS_PER_SAMPLE);
        assert_eq!(parse_trials_per_sample("10001"), 10);
        assert_eq!(parse_trials_per_sample("3000000000"), 10);
        assert_eq!(parse_trial_count("250"), 250);
        assert_eq!(parse_trial_count("0"), DEFAULT_TRIAL_COUNT);
        assert_eq!(parse_batch_size("x"), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_same_distribution_ignores_unused_params() {
        let a = SimulationConfig::dice(8);
        let mut b = a;
        b.params.p = 0.9;
        b.trial_count = 5;
        assert!(a.same_distribution(&b));

        b.params.sides = 10;
        assert!(!a.same_distribution(&b));
        assert!(!a.same_distribution(&SimulationConfig::binomial(8, 0.5)));
    }
}
