//! Caller-side size handling
//!
//! A user-facing size below 1 is a fraction of the population, anything from
//! 1 upwards is a literal count. The engine itself only accepts counts.

use serde::{Deserialize, Serialize};
use surrosel_core::{Error, Result};
use tracing::debug;

/// Reference fractions every baseline simulation covers
pub const DEFAULT_REFERENCE_FRACTIONS: [f64; 4] = [0.01, 0.1, 0.2, 0.5];

/// Fraction used when the user gives no size
pub const DEFAULT_SIZE: f64 = 0.2;

/// Resolve a user-supplied size into a concrete count for a population of
/// `population_len`
///
/// Fractions are rounded half to even, so `0.5 * 5` resolves to 2.
pub fn resolve_size(n: f64, population_len: usize) -> Result<usize> {
    if !n.is_finite() || n <= 0.0 {
        return Err(Error::InvalidSize(format!("{} is not a positive size", n)));
    }

    let count = if n < 1.0 {
        let count = (population_len as f64 * n).round_ties_even();
        if count < 1.0 {
            return Err(Error::InvalidSize(format!(
                "fraction {} of {} entities selects nothing",
                n, population_len
            )));
        }
        count as usize
    } else {
        if n.fract() != 0.0 {
            return Err(Error::InvalidSize(format!("count {} is not a whole number", n)));
        }
        n as usize
    };

    if count > population_len {
        return Err(Error::InvalidSize(format!(
            "size {} exceeds population of {}",
            count, population_len
        )));
    }
    Ok(count)
}

/// Which sizes a baseline simulation should cover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPlan {
    pub reference_fractions: Vec<f64>,
}

impl Default for SimulationPlan {
    fn default() -> Self {
        Self {
            reference_fractions: DEFAULT_REFERENCE_FRACTIONS.to_vec(),
        }
    }
}

impl SimulationPlan {
    #[inline]
    #[must_use]
    pub fn new(reference_fractions: Vec<f64>) -> Self {
        Self { reference_fractions }
    }

    /// Sorted, duplicate-free counts: the resolved references plus the
    /// counts actually used by real selections
    ///
    /// References that resolve to nothing on a small population are skipped;
    /// an invalid `used` count is an error.
    pub fn sizes(&self, population_len: usize, used: &[usize]) -> Result<Vec<usize>> {
        let mut sizes = Vec::with_capacity(self.reference_fractions.len() + used.len());

        for &fraction in &self.reference_fractions {
            match resolve_size(fraction, population_len) {
                Ok(count) => sizes.push(count),
                Err(e) => debug!("Skipping reference size {}: {}", fraction, e),
            }
        }

        for &count in used {
            if count == 0 || count > population_len {
                return Err(Error::InvalidSize(format!(
                    "size {} outside [1, {}]",
                    count, population_len
                )));
            }
            sizes.push(count);
        }

        sizes.sort_unstable();
        sizes.dedup();
        Ok(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_and_counts() {
        assert_eq!(resolve_size(0.2, 100).unwrap(), 20);
        assert_eq!(resolve_size(0.01, 100).unwrap(), 1);
        assert_eq!(resolve_size(1.0, 100).unwrap(), 1);
        assert_eq!(resolve_size(37.0, 100).unwrap(), 37);
    }

    #[test]
    fn test_half_to_even() {
        assert_eq!(resolve_size(0.5, 5).unwrap(), 2);
        assert_eq!(resolve_size(0.5, 7).unwrap(), 4);
    }

    #[test]
    fn test_invalid_sizes() {
        for n in [0.0, -3.0, f64::NAN, 2.5, 101.0] {
            assert!(matches!(resolve_size(n, 100), Err(Error::InvalidSize(_))), "{}", n);
        }
        assert!(matches!(resolve_size(0.001, 100), Err(Error::InvalidSize(_))));
    }

    #[test]
    fn test_plan_sizes() {
        let plan = SimulationPlan::default();
        assert_eq!(plan.sizes(100, &[20, 7]).unwrap(), vec![1, 7, 10, 20, 50]);
    }

    #[test]
    fn test_plan_skips_empty_references() {
        let plan = SimulationPlan::default();
        // 1% of 30 rounds to 0
        assert_eq!(plan.sizes(30, &[]).unwrap(), vec![3, 6, 15]);
        assert!(matches!(plan.sizes(30, &[31]), Err(Error::InvalidSize(_))));
    }
}
