use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A surrogate set: distinct positional indices into a population
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subset(Vec<usize>);

impl Subset {
    /// Validate `indices` against a population of `population_len` entities
    ///
    /// Rejects empty sets, out-of-range indices and duplicates. Order is kept.
    pub fn new(indices: Vec<usize>, population_len: usize) -> Result<Self> {
        validate(&indices, population_len)?;
        Ok(Self(indices))
    }

    /// Wrap indices a strategy already knows to be valid
    #[inline]
    pub(crate) fn from_valid(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl AsRef<[usize]> for Subset {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

pub(crate) fn validate(indices: &[usize], population_len: usize) -> Result<()> {
    if indices.is_empty() {
        return Err(Error::InvalidSelection("subset cannot be empty".to_string()));
    }

    let mut seen = vec![false; population_len];
    for &index in indices {
        if index >= population_len {
            return Err(Error::InvalidSelection(format!(
                "index {} out of range for population of {}",
                index, population_len
            )));
        }
        if seen[index] {
            return Err(Error::InvalidSelection(format!("duplicate index {}", index)));
        }
        seen[index] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_subset() {
        let subset = Subset::new(vec![4, 0, 2], 5).unwrap();
        assert_eq!(subset.len(), 3);
        assert!(subset.contains(4));
        assert_eq!(subset.as_slice(), &[4, 0, 2]);
    }

    #[test]
    fn test_invalid_subsets() {
        assert!(matches!(Subset::new(vec![], 5), Err(Error::InvalidSelection(_))));
        assert!(matches!(Subset::new(vec![5], 5), Err(Error::InvalidSelection(_))));
        assert!(matches!(Subset::new(vec![1, 1], 5), Err(Error::InvalidSelection(_))));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let subset = Subset::new(vec![3, 1], 4).unwrap();
        assert_eq!(serde_json::to_string(&subset).unwrap(), "[3,1]");
    }
}
