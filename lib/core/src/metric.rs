//! Leveraged Averaged Representative Distance (LARD)
//!
//! For every entity of the population, the Euclidean distance to its nearest
//! surrogate is taken; the score is the mean of those distances over all N
//! entities. Surrogates contribute a distance of zero, so a subset equal to
//! the population scores exactly 0 and lower is always better.

use crate::distance::euclidean;
use crate::subset::validate;
use crate::{EmbeddingPopulation, Result};

/// Score `subset` against `population`
///
/// Fails with [`crate::Error::InvalidSelection`] for an empty subset, an
/// out-of-range index or a duplicate index.
pub fn lard_score(population: &EmbeddingPopulation, subset: &[usize]) -> Result<f64> {
    validate(subset, population.len())?;
    Ok(lard_score_unchecked(population, subset))
}

/// Score a subset already known to be valid
pub(crate) fn lard_score_unchecked(population: &EmbeddingPopulation, subset: &[usize]) -> f64 {
    let total: f64 = population
        .rows()
        .map(|row| {
            subset
                .iter()
                .map(|&s| euclidean(row, population.row(s)))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();

    total / population.len() as f64
}
