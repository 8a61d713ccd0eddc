//! Monte-Carlo baseline of RANDOM selection scores
//!
//! Every trial is an independent `select(size, Random)` against the shared,
//! read-only population. Trials fan out on the rayon pool and are collected
//! back in trial order, so each size owns one contiguous block of
//! `repetitions` scores regardless of completion order.

use crate::{Error, Result, Strategy, SurrogateSelector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

pub const DEFAULT_REPETITIONS: usize = 100;

/// Configuration for a baseline simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Trials per size
    pub repetitions: usize,
    /// Run trials on the rayon pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            parallel: true,
        }
    }
}

/// Empirical score distribution: `scores[i]` was produced at `sizes[i]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scores: Vec<f64>,
    pub sizes: Vec<usize>,
}

impl SimulationResult {
    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sizes in output order, each listed once
    pub fn distinct_sizes(&self) -> Vec<usize> {
        let mut sizes = self.sizes.clone();
        sizes.dedup();
        sizes
    }

    /// Scores collected at `size`
    pub fn scores_for(&self, size: usize) -> Vec<f64> {
        self.scores
            .iter()
            .zip(&self.sizes)
            .filter(|(_, s)| **s == size)
            .map(|(&score, _)| score)
            .collect()
    }
}

/// Runs repeated RANDOM selections through a bound selector
pub struct BaselineSimulator<'a> {
    selector: &'a SurrogateSelector,
    config: SimulationConfig,
}

impl<'a> BaselineSimulator<'a> {
    pub fn new(selector: &'a SurrogateSelector) -> Self {
        Self::with_config(selector, SimulationConfig::default())
    }

    pub fn with_config(selector: &'a SurrogateSelector, config: SimulationConfig) -> Self {
        Self { selector, config }
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// Simulate every size in ascending order, duplicates collapsed
    ///
    /// All sizes are checked before the first trial; any failure discards
    /// the whole run.
    pub fn run(&self, sizes: &[usize]) -> Result<SimulationResult> {
        let repetitions = self.config.repetitions;
        if repetitions == 0 {
            return Err(Error::InvalidConfig("repetitions must be positive".to_string()));
        }

        let mut sizes = sizes.to_vec();
        sizes.sort_unstable();
        sizes.dedup();

        let population_len = self.selector.population().len();
        if let Some(&size) = sizes.iter().find(|&&s| s == 0 || s > population_len) {
            return Err(Error::InvalidSize(format!(
                "size {} outside [1, {}]",
                size, population_len
            )));
        }

        let started = Instant::now();
        let trials = sizes.len() * repetitions;
        let trial = |t: usize| {
            self.selector
                .select(sizes[t / repetitions], Strategy::Random)
                .map(|selection| selection.score)
        };

        let scores: Vec<f64> = if self.config.parallel {
            (0..trials).into_par_iter().map(trial).collect::<Result<_>>()?
        } else {
            (0..trials).map(trial).collect::<Result<_>>()?
        };

        let sizes: Vec<usize> = sizes
            .iter()
            .flat_map(|&s| std::iter::repeat(s).take(repetitions))
            .collect();

        info!(
            "Baseline simulation: {} trials over {} sizes in {:?}",
            trials,
            sizes.len() / repetitions,
            started.elapsed()
        );

        Ok(SimulationResult { scores, sizes })
    }
}
