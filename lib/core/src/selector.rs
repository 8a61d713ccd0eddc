use crate::hierarchical::Linkage;
use crate::metric::{lard_score, lard_score_unchecked};
use crate::{EmbeddingPopulation, Result, SelectionLabel, Strategy, Subset};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Configuration for a selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub linkage: Linkage,
}

/// A chosen subset together with its LARD score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub subset: Subset,
    pub score: f64,
}

/// Selection results keyed by strategy, or `user` for a manual pick
pub type SelectionSet = BTreeMap<SelectionLabel, Selection>;

/// Façade binding one embedding population to the strategies and the metric
///
/// Holds nothing but the shared, read-only population; every call is
/// independent, so one selector may serve many threads.
#[derive(Debug, Clone)]
pub struct SurrogateSelector {
    population: Arc<EmbeddingPopulation>,
    config: SelectorConfig,
}

impl SurrogateSelector {
    pub fn new(population: impl Into<Arc<EmbeddingPopulation>>) -> Self {
        Self::with_config(population, SelectorConfig::default())
    }

    pub fn with_config(population: impl Into<Arc<EmbeddingPopulation>>, config: SelectorConfig) -> Self {
        Self {
            population: population.into(),
            config,
        }
    }

    pub fn population(&self) -> &EmbeddingPopulation {
        &self.population
    }

    pub fn config(&self) -> SelectorConfig {
        self.config
    }

    /// Select `size` surrogates with `strategy` and score them
    pub fn select(&self, size: usize, strategy: Strategy) -> Result<Selection> {
        self.select_with_rng(size, strategy, &mut rand::rng())
    }

    /// Same as [`select`](Self::select) with an injected generator
    pub fn select_with_rng(
        &self,
        size: usize,
        strategy: Strategy,
        rng: &mut dyn RngCore,
    ) -> Result<Selection> {
        let subset = strategy.build(&self.config).execute(&self.population, size, rng)?;
        let score = lard_score_unchecked(&self.population, subset.as_slice());
        debug!("Selected {} surrogates with {} (LARD {:.4})", subset.len(), strategy, score);
        Ok(Selection { subset, score })
    }

    /// Parse `strategy` before selecting; unknown tokens fail before any work
    pub fn select_named(&self, size: usize, strategy: &str) -> Result<Selection> {
        let strategy: Strategy = strategy.parse()?;
        self.select(size, strategy)
    }

    /// Score a caller-supplied subset
    pub fn score(&self, subset: &[usize]) -> Result<f64> {
        lard_score(&self.population, subset)
    }

    /// Score a manual pick and wrap it as a [`Selection`]
    pub fn score_user(&self, subset: Vec<usize>) -> Result<Selection> {
        let subset = Subset::new(subset, self.population.len())?;
        let score = lard_score_unchecked(&self.population, subset.as_slice());
        debug!("Scored {} user surrogates (LARD {:.4})", subset.len(), score);
        Ok(Selection { subset, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn selector() -> SurrogateSelector {
        let population = EmbeddingPopulation::new(
            (0..6).map(|i| format!("c{}", i)).collect(),
            vec![
                vec![0.0, 0.0],
                vec![0.5, 0.0],
                vec![0.0, 0.5],
                vec![9.0, 9.0],
                vec![9.5, 9.0],
                vec![9.0, 9.5],
            ],
        )
        .unwrap();
        SurrogateSelector::new(population)
    }

    #[test]
    fn test_select_reports_score_of_subset() {
        let selector = selector();
        for strategy in Strategy::ALL {
            let selection = selector.select(2, strategy).unwrap();
            assert_eq!(selection.subset.len(), 2);
            assert_eq!(selection.score, selector.score(selection.subset.as_slice()).unwrap());
        }
    }

    #[test]
    fn test_hierarchical_beats_worst_pair() {
        let selector = selector();
        let selection = selector.select(2, Strategy::Hierarchical).unwrap();
        let clumped = selector.score(&[0, 1]).unwrap();
        assert!(selection.score < clumped);
    }

    #[test]
    fn test_full_population_scores_zero() {
        let selector = selector();
        assert_eq!(selector.score(&[5, 4, 3, 2, 1, 0]).unwrap(), 0.0);
        assert_eq!(selector.select(6, Strategy::Random).unwrap().score, 0.0);
    }

    #[test]
    fn test_select_named() {
        let selector = selector();
        assert!(selector.select_named(2, "Hierarchical").is_ok());
        assert_eq!(
            selector.select_named(2, "greedy").unwrap_err(),
            Error::UnknownStrategy("greedy".to_string())
        );
    }

    #[test]
    fn test_score_user() {
        let selector = selector();
        let selection = selector.score_user(vec![0, 3]).unwrap();
        assert_eq!(selection.subset.as_slice(), &[0, 3]);
        assert!(matches!(selector.score_user(vec![]), Err(Error::InvalidSelection(_))));
        assert!(matches!(selector.score(&[0, 0]), Err(Error::InvalidSelection(_))));
    }

    #[test]
    fn test_selection_set_serializes_by_label() {
        let selector = selector();
        let mut set = SelectionSet::new();
        set.insert(Strategy::Hierarchical.into(), selector.select(2, Strategy::Hierarchical).unwrap());
        set.insert(SelectionLabel::User, selector.score_user(vec![1]).unwrap());
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.get("hierarchical").is_some());
        assert_eq!(json["user"]["subset"], serde_json::json!([1]));
    }
}
