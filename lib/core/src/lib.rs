//! # surrosel Core
//!
//! Core library for surrogate selection.
//!
//! This crate provides the engine that picks a small, representative subset
//! of an embedding and scores how well any subset stands in for the whole:
//!
//! - [`EmbeddingPopulation`] - Immutable, identifier-indexed feature matrix
//! - [`lard_score`] - Leveraged Averaged Representative Distance (lower is better)
//! - [`Strategy`] - Selection algorithms: hierarchical clustering and random sampling
//! - [`SurrogateSelector`] - Façade binding a population to strategies and metric
//! - [`BaselineSimulator`] - Monte-Carlo distribution of random-selection scores
//!
//! ## Example
//!
//! ```rust
//! use surrosel_core::{BaselineSimulator, EmbeddingPopulation, Strategy, SurrogateSelector};
//!
//! let population = EmbeddingPopulation::new(
//!     vec!["a".into(), "b".into(), "c".into(), "d".into()],
//!     vec![vec![0.0, 0.0], vec![0.1, 0.0], vec![5.0, 5.0], vec![5.1, 5.0]],
//! ).unwrap();
//! let selector = SurrogateSelector::new(population);
//!
//! // Pick two surrogates and get their LARD score
//! let selection = selector.select(2, Strategy::Hierarchical).unwrap();
//! assert_eq!(selection.subset.len(), 2);
//!
//! // Score a hand-picked subset
//! let score = selector.score(&[0, 1]).unwrap();
//! assert!(score > selection.score);
//!
//! // Compare against chance
//! let baseline = BaselineSimulator::new(&selector).run(&[1, 2]).unwrap();
//! assert_eq!(baseline.len(), 200);
//! ```

pub mod error;
pub mod population;
pub mod subset;
pub mod distance;
pub mod metric;
pub mod strategy;
pub mod random;
pub mod hierarchical;
pub mod selector;
pub mod simulator;

pub use error::{Error, Result};
pub use population::{EmbeddingPopulation, EmbeddingRow, EmbeddingTable};
pub use subset::Subset;
pub use metric::lard_score;
pub use strategy::{SelectionLabel, SelectionStrategy, Strategy};
pub use random::RandomStrategy;
pub use hierarchical::{HierarchicalStrategy, Linkage};
pub use selector::{Selection, SelectionSet, SelectorConfig, SurrogateSelector};
pub use simulator::{BaselineSimulator, SimulationConfig, SimulationResult, DEFAULT_REPETITIONS};
