//! # surrosel Report
//!
//! Caller-side helpers around the surrogate selection engine.
//!
//! The engine only accepts concrete counts and returns plain value
//! structures; this crate covers what sits between it and a user:
//!
//! - **Size resolution**: fractions below 1 become `round(N * n)`, larger values are counts
//! - **Simulation planning**: reference fractions plus the sizes really used, sorted and deduplicated
//! - **Labels**: per-entity names of the selections that picked it
//! - **Report**: plain-text listing of every selection, its LARD score and identifiers
//! - **Baseline statistics**: per-size summaries and percentiles against chance
//!
//! ## Flow
//!
//! ```text
//! ┌────────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  resolve_size  │────>│  Selector   │────>│ SelectionSet │──> labels / report
//! └────────────────┘     └─────────────┘     └──────────────┘
//!                               │
//! ┌────────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ SimulationPlan │────>│  Simulator  │────>│   Baseline   │──> percentiles
//! └────────────────┘     └─────────────┘     │   Summary    │
//!                                            └──────────────┘
//! ```

pub mod sizes;
pub mod labels;
pub mod report;
pub mod stats;

pub use sizes::{resolve_size, SimulationPlan, DEFAULT_REFERENCE_FRACTIONS, DEFAULT_SIZE};
pub use labels::{surrogate_labels, UNSELECTED_LABEL};
pub use report::{format_general, render_report, BLOCK_SEPARATOR};
pub use stats::{BaselineSummary, SizeSummary};
