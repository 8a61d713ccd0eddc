//! End-to-end selection flow for one loaded dataset
//!
//! Bind the embedding, run every enabled strategy, score the user's pick,
//! then simulate random baselines over the reference sizes plus every size
//! actually used.

use serde::Serialize;
use surrosel_core::{
    BaselineSimulator, EmbeddingPopulation, Error, Result, SelectionLabel, SelectionSet,
    SelectorConfig, SimulationConfig, SimulationResult, Strategy, SurrogateSelector,
};
use surrosel_report::{resolve_size, surrogate_labels, BaselineSummary, SimulationPlan, DEFAULT_SIZE};
use tracing::info;

/// What the user asked for
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    /// Fraction below 1, count otherwise; `None` skips automated selection
    pub size: Option<f64>,
    pub strategies: Vec<Strategy>,
    /// Manually picked identifiers; `None` skips the user selection
    pub user_ids: Option<Vec<String>>,
    pub selector: SelectorConfig,
    pub simulation: SimulationConfig,
    pub plan: SimulationPlan,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            size: Some(DEFAULT_SIZE),
            strategies: vec![Strategy::Hierarchical],
            user_ids: None,
            selector: SelectorConfig::default(),
            simulation: SimulationConfig::default(),
            plan: SimulationPlan::default(),
        }
    }
}

/// Everything a presentation layer needs to render one run
#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutcome {
    pub selections: SelectionSet,
    pub simulation: SimulationResult,
    pub summary: BaselineSummary,
    pub labels: Vec<String>,
}

impl SelectionOutcome {
    /// Percentile of each selection's score within the baseline at its size
    pub fn percentiles(&self) -> Vec<(SelectionLabel, Option<f64>)> {
        self.selections
            .iter()
            .map(|(label, s)| (*label, self.summary.percentile(s.subset.len(), s.score)))
            .collect()
    }
}

pub fn run_selection(population: EmbeddingPopulation, request: &SelectionRequest) -> Result<SelectionOutcome> {
    let population_len = population.len();
    let selector = SurrogateSelector::with_config(population, request.selector);

    let mut selections = SelectionSet::new();
    let mut used = Vec::new();

    if let Some(n) = request.size {
        if request.strategies.is_empty() {
            return Err(Error::InvalidConfig("no selection strategy given".to_string()));
        }
        let size = resolve_size(n, population_len)?;
        for &strategy in &request.strategies {
            selections.insert(strategy.into(), selector.select(size, strategy)?);
        }
        used.push(size);
    }

    if let Some(ids) = &request.user_ids {
        let positions = selector.population().positions_of(ids);
        if positions.is_empty() {
            return Err(Error::InvalidSelection("none of the user identifiers are known".to_string()));
        }
        used.push(positions.len());
        selections.insert(SelectionLabel::User, selector.score_user(positions)?);
    }

    if selections.is_empty() {
        return Err(Error::InvalidConfig("nothing to select".to_string()));
    }

    let sizes = request.plan.sizes(population_len, &used)?;
    let simulation = BaselineSimulator::with_config(&selector, request.simulation).run(&sizes)?;
    let summary = BaselineSummary::from_simulation(&simulation);
    let labels = surrogate_labels(&selections, population_len);

    info!(
        "Selected {} surrogate sets from {} entities; baseline over sizes {:?}",
        selections.len(),
        population_len,
        sizes
    );

    Ok(SelectionOutcome {
        selections,
        simulation,
        summary,
        labels,
    })
}
