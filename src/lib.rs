//! # surrosel
//!
//! Surrogate selection: choose a small subset of chemical entities that best
//! represents a larger dataset in an embedding space, and justify the choice
//! against random baselines.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! surrosel --input descriptors.json --features e0,e1 --size 0.2 --strategies hierarchical,random
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use surrosel::prelude::*;
//!
//! let table = EmbeddingTable::new(vec!["TSNE1".into(), "e0".into(), "e1".into()])
//!     .with_row("DTXSID1", vec![3.0, 0.0, 0.0])
//!     .with_row("DTXSID2", vec![1.0, 0.1, 0.0])
//!     .with_row("DTXSID3", vec![2.0, 4.0, 4.0])
//!     .with_row("DTXSID4", vec![0.0, 4.1, 4.0]);
//!
//! // Only the feature columns take part in selection
//! let population = table.population(&["e0", "e1"]).unwrap();
//!
//! let request = SelectionRequest {
//!     size: Some(2.0),
//!     ..Default::default()
//! };
//! let outcome = run_selection(population.clone(), &request).unwrap();
//! println!("{}", render_report(&population, &outcome.selections));
//! ```
//!
//! ## Crate Structure
//!
//! - `surrosel-core` - Embedding population, LARD metric, strategies, selector, baseline simulator
//! - `surrosel-report` - Size resolution, simulation planning, labels, text report, baseline statistics

pub mod pipeline;

// Re-export core types
pub use surrosel_core::{
    lard_score, BaselineSimulator, EmbeddingPopulation, EmbeddingRow, EmbeddingTable, Error,
    HierarchicalStrategy, Linkage, RandomStrategy, Result, Selection, SelectionLabel,
    SelectionSet, SelectionStrategy, SelectorConfig, SimulationConfig, SimulationResult,
    Strategy, Subset, SurrogateSelector, DEFAULT_REPETITIONS,
};

// Re-export caller-side helpers
pub use surrosel_report::{
    format_general, render_report, resolve_size, surrogate_labels, BaselineSummary,
    SimulationPlan, SizeSummary, DEFAULT_REFERENCE_FRACTIONS, DEFAULT_SIZE,
};

pub use pipeline::{run_selection, SelectionOutcome, SelectionRequest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        render_report, resolve_size, run_selection, BaselineSimulator, BaselineSummary,
        EmbeddingPopulation, EmbeddingTable, Error, Linkage, Result, Selection, SelectionLabel,
        SelectionOutcome, SelectionRequest, SelectionSet, SelectorConfig, SimulationConfig,
        SimulationPlan, SimulationResult, Strategy, SurrogateSelector,
    };
}
