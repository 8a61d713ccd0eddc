use crate::hierarchical::HierarchicalStrategy;
use crate::random::RandomStrategy;
use crate::{EmbeddingPopulation, Error, Result, SelectorConfig, Subset};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability shared by every selection algorithm
pub trait SelectionStrategy {
    /// Pick `size` distinct entities of `population`
    ///
    /// `size` is a concrete count in `[1, N]`; anything else is
    /// [`Error::InvalidSize`].
    fn execute(
        &self,
        population: &EmbeddingPopulation,
        size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Subset>;
}

/// Closed set of selection algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Hierarchical,
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Hierarchical, Strategy::Random];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Hierarchical => "hierarchical",
            Strategy::Random => "random",
        }
    }

    /// Algorithm behind this strategy, configured from `config`
    pub fn build(&self, config: &SelectorConfig) -> Box<dyn SelectionStrategy> {
        match self {
            Strategy::Hierarchical => Box::new(HierarchicalStrategy::new(config.linkage)),
            Strategy::Random => Box::new(RandomStrategy),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hierarchical" => Ok(Strategy::Hierarchical),
            "random" => Ok(Strategy::Random),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

/// Key of a selection result: an algorithm, or a manual user pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionLabel {
    Strategy(Strategy),
    User,
}

impl SelectionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionLabel::Strategy(strategy) => strategy.as_str(),
            SelectionLabel::User => "user",
        }
    }
}

impl From<Strategy> for SelectionLabel {
    fn from(strategy: Strategy) -> Self {
        SelectionLabel::Strategy(strategy)
    }
}

// Serialized as its plain name so it can key a JSON object
impl Serialize for SelectionLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for SelectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared size check for all strategies
pub(crate) fn check_size(population: &EmbeddingPopulation, size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::InvalidSize("size must be positive".to_string()));
    }
    if size > population.len() {
        return Err(Error::InvalidSize(format!(
            "size {} exceeds population of {}",
            size,
            population.len()
        )));
    }
    Ok(())
}
