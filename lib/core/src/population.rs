use crate::{Error, Result};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One row of an [`EmbeddingTable`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingRow {
    pub id: String,
    pub values: Vec<f64>,
}

/// Identifier-indexed descriptor table as produced by the embedding generator
///
/// May carry purely visual projection columns next to the feature columns;
/// only the columns bound through [`EmbeddingTable::population`] take part in
/// selection and scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingTable {
    pub columns: Vec<String>,
    pub rows: Vec<EmbeddingRow>,
}

impl EmbeddingTable {
    #[inline]
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_row(mut self, id: impl Into<String>, values: Vec<f64>) -> Self {
        self.rows.push(EmbeddingRow {
            id: id.into(),
            values,
        });
        self
    }

    /// Bind the given feature columns into a population
    ///
    /// An empty column list binds every column of the table.
    pub fn population<S: AsRef<str>>(&self, feature_columns: &[S]) -> Result<EmbeddingPopulation> {
        let positions: Vec<usize> = if feature_columns.is_empty() {
            (0..self.columns.len()).collect()
        } else {
            feature_columns
                .iter()
                .map(|name| {
                    let name = name.as_ref();
                    self.columns
                        .iter()
                        .position(|c| c == name)
                        .ok_or_else(|| Error::UnknownColumn(name.to_string()))
                })
                .collect::<Result<_>>()?
        };

        let mut ids = Vec::with_capacity(self.rows.len());
        let mut vectors = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            if row.values.len() != self.columns.len() {
                return Err(Error::InvalidDimension {
                    expected: self.columns.len(),
                    actual: row.values.len(),
                });
            }
            ids.push(row.id.clone());
            vectors.push(positions.iter().map(|&p| row.values[p]).collect());
        }

        EmbeddingPopulation::new(ids, vectors)
    }
}

/// Ordered, immutable set of entities with their feature vectors
///
/// Vectors are stored row-major in one contiguous buffer. The position of an
/// entity defines the index space used by every [`crate::Subset`].
#[derive(Debug, Clone)]
pub struct EmbeddingPopulation {
    ids: Vec<String>,
    data: Vec<f64>,
    dim: usize,
    positions: AHashMap<String, usize>,
}

impl EmbeddingPopulation {
    pub fn new(ids: Vec<String>, vectors: Vec<Vec<f64>>) -> Result<Self> {
        if ids.is_empty() || vectors.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        if ids.len() != vectors.len() {
            return Err(Error::InvalidEmbedding(format!(
                "{} identifiers for {} vectors",
                ids.len(),
                vectors.len()
            )));
        }

        let dim = vectors[0].len();
        if dim == 0 {
            return Err(Error::InvalidEmbedding("feature vectors cannot be empty".to_string()));
        }

        // Keeps every squared distance between rows representable
        let max_abs = (f64::MAX / dim as f64).sqrt() / 2.0;

        let mut positions = AHashMap::with_capacity(ids.len());
        let mut data = Vec::with_capacity(ids.len() * dim);
        for (position, (id, vector)) in ids.iter().zip(vectors.iter()).enumerate() {
            if vector.len() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            if vector.iter().any(|x| !x.is_finite()) {
                return Err(Error::InvalidEmbedding(format!("non-finite value for {}", id)));
            }
            if vector.iter().any(|x| x.abs() > max_abs) {
                return Err(Error::InvalidEmbedding(format!(
                    "value for {} exceeds magnitude {:e}",
                    id, max_abs
                )));
            }
            if positions.insert(id.clone(), position).is_some() {
                return Err(Error::DuplicateIdentifier(id.clone()));
            }
            data.extend_from_slice(vector);
        }

        Ok(Self {
            ids,
            data,
            dim,
            positions,
        })
    }

    /// Number of entities (N)
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Feature dimensionality (D)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[inline]
    pub fn id(&self, position: usize) -> Option<&str> {
        self.ids.get(position).map(String::as_str)
    }

    /// Feature vector at `position`
    ///
    /// Panics when `position >= len()`.
    #[inline]
    pub fn row(&self, position: usize) -> &[f64] {
        &self.data[position * self.dim..(position + 1) * self.dim]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.dim)
    }

    #[inline]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Resolve identifiers to positions, in population order
    ///
    /// Unknown identifiers are skipped and repeated ones collapse.
    pub fn positions_of<S: AsRef<str>>(&self, ids: &[S]) -> Vec<usize> {
        let mut found = AHashSet::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref().trim();
            if id.is_empty() {
                continue;
            }
            match self.position(id) {
                Some(position) => {
                    found.insert(position);
                }
                None => warn!("Identifier {} is not part of the population", id),
            }
        }
        let mut positions: Vec<usize> = found.into_iter().collect();
        positions.sort_unstable();
        positions
    }

    /// Number of distinct feature vectors
    pub fn distinct_count(&self) -> usize {
        self.rows()
            .map(|row| {
                // -0.0 and 0.0 describe the same point
                row.iter()
                    .map(|x| if *x == 0.0 { 0u64 } else { x.to_bits() })
                    .collect::<Vec<u64>>()
            })
            .collect::<AHashSet<_>>()
            .len()
    }
}
