// src/analysis/distribution.rs

use rand::prelude::*;
use rand_distr::{Distribution, Uniform};
use serde::{Serialize, Deserialize};
use crate::config::{DistributionKind, SimulationConfig};
use crate::error::{SimError, SimResult};

/// Ordered bins for the outcomes a config can produce.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeSpace {
    kind: DistributionKind,
    values: Vec<u32>,
}

impl OutcomeSpace {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let values = match config.distribution {
            DistributionKind::Bernoulli => vec![0, 1],
            DistributionKind::Dice => (1..=config.params.sides).collect(),
            DistributionKind::Binomial => (0..=config.params.n).collect(),
        };
        Self { kind: config.distribution, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn labels(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_string()).collect()
    }

    /// Bin index for a sampled value. Dice bins are 1-offset.
    pub fn bin_index(&self, value: u32) -> SimResult<usize> {
        let index = match self.kind {
            DistributionKind::Dice => value.checked_sub(1),
            DistributionKind::Bernoulli | DistributionKind::Binomial => Some(value),
        };

        index
            .map(|i| i as usize)
            .filter(|&i| i < self.values.len())
            .ok_or(SimError::OutOfRange { value, bins: self.values.len() })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TheoreticalModel {
    pub mean: f64,
    pub variance: f64,
    pub probs: Vec<f64>,
}

impl TheoreticalModel {
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Expected count per bin after `samples` draws.
    pub fn expected_counts(&self, samples: usize) -> Vec<f64> {
        self.probs.iter().map(|p| p * samples as f64).collect()
    }
}

pub fn theoretical(config: &SimulationConfig) -> TheoreticalModel {
    let p = config.params.p;
    match config.distribution {
        DistributionKind::Bernoulli => TheoreticalModel {
            mean: p,
            variance: p * (1.0 - p),
            probs: vec![1.0 - p, p],
        },
        DistributionKind::Dice => {
            let sides = config.params.sides as f64;
            TheoreticalModel {
                mean: (sides + 1.0) / 2.0,
                variance: (sides * sides - 1.0) / 12.0,
                probs: vec![1.0 / sides; config.params.sides as usize],
            }
        },
        DistributionKind::Binomial => {
            let n = config.params.n;
            TheoreticalModel {
                mean: n as f64 * p,
                variance: n as f64 * p * (1.0 - p),
                probs: binomial_pmf(n, p),
            }
        },
    }
}

/// P(X = k) for k = 0..=n. Starting from the mode, neighbouring terms follow
/// the multiplicative recurrence P(k) = P(k-1)·(n-k+1)/k·p/q, so every weight
/// stays in (0, 1] relative to the mode and never overflows; far tails may
/// underflow to 0. The weights are then normalized to sum to 1.
fn binomial_pmf(n: u32, p: f64) -> Vec<f64> {
    let odds = p / (1.0 - p);
    let mode = (((n as f64 + 1.0) * p).floor() as u32).min(n);

    let mut weights = vec![0.0_f64; n as usize + 1];
    weights[mode as usize] = 1.0;
    for k in mode + 1..=n {
        let i = k as usize;
        weights[i] = weights[i - 1] * ((n - k + 1) as f64 / k as f64) * odds;
    }
    for k in (1..=mode).rev() {
        let i = k as usize;
        weights[i - 1] = weights[i] * (k as f64 / (n - k + 1) as f64) / odds;
    }

    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Random source for single outcomes. A seeded sampler replays the same
/// sequence every time it is reseeded with the same value.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
    unit: Uniform<f64>,
}

impl Sampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Self {
            rng,
            unit: Uniform::new(0.0, 1.0),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Uniform draw in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.unit.sample(&mut self.rng)
    }

    fn bernoulli(&mut self, p: f64) -> u32 {
        if self.uniform() < p { 1 } else { 0 }
    }

    pub fn sample_one(&mut self, config: &SimulationConfig) -> u32 {
        match config.distribution {
            DistributionKind::Bernoulli => self.bernoulli(config.params.p),
            DistributionKind::Dice => {
                let die = Uniform::new_inclusive(1, config.params.sides);
                die.sample(&mut self.rng)
            },
            DistributionKind::Binomial => {
                (0..config.params.n).map(|_| self.bernoulli(config.params.p)).sum()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{Binomial, Discrete};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_probs_sum_to_one() {
        let mut configs = Vec::new();
        for p in [0.01, 0.1, 0.3, 0.5, 0.77, 0.99] {
            configs.push(SimulationConfig::bernoulli(p));
            for n in [1, 2, 5, 10, 50, 200, 2000] {
                configs.push(SimulationConfig::binomial(n, p));
            }
        }
        for sides in [2, 3, 6, 12, 20, 100] {
            configs.push(SimulationConfig::dice(sides));
        }

        for config in configs {
            let total: f64 = theoretical(&config).probs.iter().sum();
            assert!((total - 1.0).abs() < EPS, "{:?} sums to {}", config, total);
        }
    }

    #[test]
    fn test_large_binomial_probs_stay_finite() {
        for n in [1030, 2000, 5000, crate::config::simulation::MAX_TRIALS_PER_SAMPLE] {
            for p in [0.01, 0.5, 0.93] {
                let probs = theoretical(&SimulationConfig::binomial(n, p)).probs;
                assert_eq!(probs.len(), n as usize + 1);
                assert!(probs.iter().all(|x| x.is_finite() && *x >= 0.0), "n={} p={}", n, p);
                let total: f64 = probs.iter().sum();
                assert!((total - 1.0).abs() < EPS, "n={} p={} sums to {}", n, p, total);
            }
        }
    }

    #[test]
    fn test_binomial_center_mass() {
        let model = theoretical(&SimulationConfig::binomial(10, 0.5));
        assert_eq!(model.probs.len(), 11);
        assert!((model.probs[5] - 252.0 / 1024.0).abs() < 1e-12);
        assert!((model.probs[5] - 0.2460938).abs() < 1e-7);
        assert_eq!(model.mean, 5.0);
        assert_eq!(model.variance, 2.5);
    }

    #[test]
    fn test_binomial_matches_reference_pmf() {
        for (n, p) in [(7, 0.2), (30, 0.65), (120, 0.05), (1500, 0.4), (4000, 0.02)] {
            let model = theoretical(&SimulationConfig::binomial(n, p));
            let reference = Binomial::new(p, n as u64).unwrap();
            for (k, prob) in model.probs.iter().enumerate() {
                assert!((prob - reference.pmf(k as u64)).abs() < 1e-10, "n={} p={} k={}", n, p, k);
            }
        }
    }

    #[test]
    fn test_dice_moments() {
        let model = theoretical(&SimulationConfig::dice(6));
        assert_eq!(model.mean, 3.5);
        assert_eq!(model.variance, 35.0 / 12.0);
        assert_eq!(model.probs.len(), 6);
    }

    #[test]
    fn test_bernoulli_moments() {
        let model = theoretical(&SimulationConfig::bernoulli(0.25));
        assert_eq!(model.mean, 0.25);
        assert_eq!(model.variance, 0.1875);
        assert_eq!(model.probs, vec![0.75, 0.25]);
    }

    #[test]
    fn test_outcome_space_bins() {
        assert_eq!(OutcomeSpace::from_config(&SimulationConfig::bernoulli(0.5)).values(), &[0, 1]);
        assert_eq!(OutcomeSpace::from_config(&SimulationConfig::dice(4)).values(), &[1, 2, 3, 4]);
        assert_eq!(OutcomeSpace::from_config(&SimulationConfig::binomial(3, 0.5)).len(), 4);
    }

    #[test]
    fn test_bin_index_rejects_out_of_range() {
        let dice = OutcomeSpace::from_config(&SimulationConfig::dice(6));
        assert_eq!(dice.bin_index(1), Ok(0));
        assert_eq!(dice.bin_index(6), Ok(5));
        assert_eq!(dice.bin_index(0), Err(SimError::OutOfRange { value: 0, bins: 6 }));
        assert_eq!(dice.bin_index(7), Err(SimError::OutOfRange { value: 7, bins: 6 }));

        let coin = OutcomeSpace::from_config(&SimulationConfig::bernoulli(0.5));
        assert_eq!(coin.bin_index(1), Ok(1));
        assert!(coin.bin_index(2).is_err());
    }

    #[test]
    fn test_samples_stay_in_outcome_space() {
        let mut sampler = Sampler::new(Some(7));
        for config in [
            SimulationConfig::bernoulli(0.3),
            SimulationConfig::dice(20),
            SimulationConfig::binomial(15, 0.4),
        ] {
            let space = OutcomeSpace::from_config(&config);
            for _ in 0..2000 {
                let value = sampler.sample_one(&config);
                assert!(space.bin_index(value).is_ok(), "{} outside {:?}", value, space);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let config = SimulationConfig::binomial(12, 0.35);
        let mut a = Sampler::new(Some(99));
        let mut b = Sampler::new(Some(99));
        let xs: Vec<u32> = (0..500).map(|_| a.sample_one(&config)).collect();
        let ys: Vec<u32> = (0..500).map(|_| b.sample_one(&config)).collect();
        assert_eq!(xs, ys);

        a.reseed(99);
        let zs: Vec<u32> = (0..500).map(|_| a.sample_one(&config)).collect();
        assert_eq!(xs, zs);
    }

    #[test]
    fn test_uniform_is_half_open() {
        let mut sampler = Sampler::new(Some(1));
        for _ in 0..10_000 {
            let u = sampler.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
