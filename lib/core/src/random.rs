use crate::strategy::{check_size, SelectionStrategy};
use crate::{EmbeddingPopulation, Result, Subset};
use rand::RngCore;

/// Uniform sampling without replacement
///
/// Holds no state; every call draws from the generator it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl SelectionStrategy for RandomStrategy {
    fn execute(
        &self,
        population: &EmbeddingPopulation,
        size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Subset> {
        check_size(population, size)?;
        let indices = rand::seq::index::sample(rng, population.len(), size).into_vec();
        Ok(Subset::from_valid(indices))
    }
}
