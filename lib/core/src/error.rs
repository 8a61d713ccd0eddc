use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Embedding population is empty")]
    EmptyPopulation,

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Invalid embedding: {0}")]
    InvalidEmbedding(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
