//! Agglomerative clustering strategy
//!
//! The dendrogram is built with the nearest-neighbour-chain algorithm over a
//! condensed pairwise dissimilarity matrix, updated with the Lance-Williams
//! formulas. All supported linkages are reducible, which is what makes the
//! chain algorithm exact. The flat partition into `size` clusters applies the
//! `N - size` lowest merges; each cluster then contributes the member closest
//! to its centroid, ties going to the smallest position.

use crate::distance::{euclidean, squared_euclidean};
use crate::strategy::{check_size, SelectionStrategy};
use crate::{EmbeddingPopulation, Error, Result, Subset};
use ordered_float::OrderedFloat;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Inter-cluster dissimilarity used while agglomerating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Minimum increase of within-cluster variance (on squared Euclidean distances)
    #[default]
    Ward,
    /// Mean pairwise distance
    Average,
    /// Largest pairwise distance
    Complete,
    /// Smallest pairwise distance
    Single,
}

impl Linkage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Linkage::Ward => "ward",
            Linkage::Average => "average",
            Linkage::Complete => "complete",
            Linkage::Single => "single",
        }
    }

    #[inline]
    fn dissimilarity(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Linkage::Ward => squared_euclidean(a, b),
            _ => euclidean(a, b),
        }
    }

    /// Dissimilarity between `k` and the union of `x` and `y`
    #[inline]
    fn update(&self, d_kx: f64, d_ky: f64, d_xy: f64, n_x: usize, n_y: usize, n_k: usize) -> f64 {
        match self {
            Linkage::Single => d_kx.min(d_ky),
            Linkage::Complete => d_kx.max(d_ky),
            Linkage::Average => {
                let (n_x, n_y) = (n_x as f64, n_y as f64);
                (n_x * d_kx + n_y * d_ky) / (n_x + n_y)
            }
            Linkage::Ward => {
                let (n_x, n_y, n_k) = (n_x as f64, n_y as f64, n_k as f64);
                ((n_x + n_k) * d_kx + (n_y + n_k) * d_ky - n_k * d_xy) / (n_x + n_y + n_k)
            }
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ward" => Ok(Linkage::Ward),
            "average" => Ok(Linkage::Average),
            "complete" => Ok(Linkage::Complete),
            "single" => Ok(Linkage::Single),
            _ => Err(Error::InvalidConfig(format!("unknown linkage: {}", s))),
        }
    }
}

/// Cluster-then-pick-medoid selection
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalStrategy {
    linkage: Linkage,
}

impl HierarchicalStrategy {
    #[inline]
    #[must_use]
    pub fn new(linkage: Linkage) -> Self {
        Self { linkage }
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Flat cluster assignment: one root position per entity
    pub fn cluster(&self, population: &EmbeddingPopulation, size: usize) -> Result<Vec<usize>> {
        check_size(population, size)?;
        let distinct = population.distinct_count();
        if distinct < size {
            return Err(Error::InvalidSize(format!(
                "cannot form {} clusters from {} distinct feature vectors",
                size, distinct
            )));
        }

        let n = population.len();
        let mut roots = DisjointSet::new(n);
        if size < n {
            let mut merges = nn_chain(CondensedMatrix::new(population, self.linkage), self.linkage);
            if merges.len() != n - 1 {
                return Err(Error::InvalidSize(format!(
                    "dendrogram has {} merges for {} entities",
                    merges.len(),
                    n
                )));
            }
            // Stable: on equal heights children still precede their parents
            merges.sort_by_key(|m| OrderedFloat(m.height));
            for merge in merges.iter().take(n - size) {
                roots.union(merge.a, merge.b);
            }
        }

        Ok((0..n).map(|i| roots.find(i)).collect())
    }
}

impl SelectionStrategy for HierarchicalStrategy {
    fn execute(
        &self,
        population: &EmbeddingPopulation,
        size: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<Subset> {
        let assignment = self.cluster(population, size)?;

        let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (position, root) in assignment.into_iter().enumerate() {
            clusters.entry(root).or_default().push(position);
        }

        let mut representatives: Vec<usize> = clusters
            .values()
            .filter_map(|members| representative(population, members))
            .collect();
        representatives.sort_unstable();

        trace!(
            "Hierarchical ({}) picked {} representatives",
            self.linkage,
            representatives.len()
        );
        Ok(Subset::from_valid(representatives))
    }
}

/// Member closest to the cluster centroid, smallest position on ties
fn representative(population: &EmbeddingPopulation, members: &[usize]) -> Option<usize> {
    let mut centroid = vec![0.0f64; population.dim()];
    for &m in members {
        for (c, x) in centroid.iter_mut().zip(population.row(m)) {
            *c += x;
        }
    }
    let count = members.len() as f64;
    for c in &mut centroid {
        *c /= count;
    }

    members
        .iter()
        .copied()
        .min_by_key(|&m| (OrderedFloat(squared_euclidean(population.row(m), &centroid)), m))
}

/// Clusters held in slots `a` and `b` joined at `height`
///
/// A slot index is always the position of one member of the cluster it holds.
#[derive(Debug, Clone, Copy)]
struct Merge {
    a: usize,
    b: usize,
    height: f64,
}

/// Upper triangle of a symmetric dissimilarity matrix, row-major
struct CondensedMatrix {
    n: usize,
    values: Vec<f64>,
}

impl CondensedMatrix {
    fn new(population: &EmbeddingPopulation, linkage: Linkage) -> Self {
        let n = population.len();
        let mut values = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            let row = population.row(i);
            for j in (i + 1)..n {
                values.push(linkage.dissimilarity(row, population.row(j)));
            }
        }
        Self { n, values }
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.n * i - i * (i + 1) / 2 + (j - i - 1)
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        self.values[self.offset(i, j)]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: f64) {
        let offset = self.offset(i, j);
        self.values[offset] = value;
    }
}

/// Full dendrogram in discovery order
fn nn_chain(mut d: CondensedMatrix, linkage: Linkage) -> Vec<Merge> {
    let n = d.n;
    let mut sizes = vec![1usize; n];
    let mut active = vec![true; n];
    let mut chain: Vec<usize> = Vec::with_capacity(n);
    let mut merges = Vec::with_capacity(n.saturating_sub(1));

    while merges.len() + 1 < n {
        if chain.is_empty() {
            match active.iter().position(|&a| a) {
                Some(first) => chain.push(first),
                None => break,
            }
        }

        let (x, y, height) = loop {
            let x = chain[chain.len() - 1];
            let previous = (chain.len() >= 2).then(|| chain[chain.len() - 2]);

            // The previous chain element wins ties, then the smallest slot
            let mut nearest = previous;
            let mut nearest_d = previous.map_or(f64::INFINITY, |p| d.get(x, p));
            for k in 0..n {
                if k == x || !active[k] {
                    continue;
                }
                let dist = d.get(x, k);
                if dist < nearest_d {
                    nearest_d = dist;
                    nearest = Some(k);
                }
            }

            match nearest {
                Some(y) if Some(y) == previous => {
                    chain.truncate(chain.len() - 2);
                    break (x, y, nearest_d);
                }
                Some(y) => chain.push(y),
                // Every dissimilarity is infinite or NaN: join the first active slot
                None => match (0..n).find(|&k| k != x && active[k]) {
                    Some(y) => chain.push(y),
                    None => return merges,
                },
            }
        };

        let (keep, gone) = if x < y { (x, y) } else { (y, x) };
        for k in 0..n {
            if k == x || k == y || !active[k] {
                continue;
            }
            let value = linkage.update(d.get(k, x), d.get(k, y), height, sizes[x], sizes[y], sizes[k]);
            d.set(k, keep, value);
        }
        active[gone] = false;
        sizes[keep] = sizes[x] + sizes[y];
        merges.push(Merge { a: x, b: y, height });
    }

    merges
}

/// Union-find over entity positions
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[high] = low;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(points: &[[f64; 2]]) -> EmbeddingPopulation {
        EmbeddingPopulation::new(
            (0..points.len()).map(|i| format!("c{}", i)).collect(),
            points.iter().map(|p| p.to_vec()).collect(),
        )
        .unwrap()
    }

    fn three_blobs() -> EmbeddingPopulation {
        population(&[
            [0.0, 0.0],
            [0.2, 0.1],
            [0.1, 0.3],
            [10.0, 10.0],
            [10.3, 9.9],
            [9.8, 10.1],
            [10.1, 10.2],
            [-8.0, 5.0],
            [-8.2, 5.1],
        ])
    }

    fn select(population: &EmbeddingPopulation, size: usize, linkage: Linkage) -> Result<Vec<usize>> {
        let mut rng = StdRng::seed_from_u64(0);
        HierarchicalStrategy::new(linkage)
            .execute(population, size, &mut rng)
            .map(Subset::into_vec)
    }

    #[test]
    fn test_line_picks_one_per_cluster_with_tie_break() {
        let population = population(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [10.0, 0.0], [11.0, 0.0]]);
        // centroid of {3, 4} is equidistant from both; smallest position wins
        assert_eq!(select(&population, 2, Linkage::Ward).unwrap(), vec![1, 3]);
        assert_eq!(select(&population, 2, Linkage::Ward).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_every_linkage_recovers_blobs() {
        let population = three_blobs();
        for linkage in [Linkage::Ward, Linkage::Average, Linkage::Complete, Linkage::Single] {
            let assignment = HierarchicalStrategy::new(linkage).cluster(&population, 3).unwrap();
            assert_eq!(assignment[0], assignment[1], "{}", linkage);
            assert_eq!(assignment[1], assignment[2], "{}", linkage);
            assert_eq!(assignment[3], assignment[6], "{}", linkage);
            assert_eq!(assignment[7], assignment[8], "{}", linkage);
            assert_ne!(assignment[0], assignment[3], "{}", linkage);
            assert_ne!(assignment[3], assignment[7], "{}", linkage);
            assert_ne!(assignment[0], assignment[7], "{}", linkage);

            let subset = select(&population, 3, linkage).unwrap();
            assert_eq!(subset.len(), 3);
            assert!(subset.iter().any(|&i| i <= 2));
            assert!(subset.iter().any(|&i| (3..=6).contains(&i)));
            assert!(subset.iter().any(|&i| i >= 7));
        }
    }

    #[test]
    fn test_subset_is_valid_for_every_size() {
        let population = three_blobs();
        for size in 1..=population.len() {
            let subset = select(&population, size, Linkage::Ward).unwrap();
            assert_eq!(subset.len(), size);
            assert!(Subset::new(subset, population.len()).is_ok());
        }
    }

    #[test]
    fn test_duplicate_vectors() {
        let population = population(&[[0.0, 0.0], [0.0, 0.0], [5.0, 5.0], [5.0, 5.0]]);
        assert_eq!(select(&population, 2, Linkage::Ward).unwrap(), vec![0, 2]);
        assert!(matches!(select(&population, 3, Linkage::Ward), Err(Error::InvalidSize(_))));
    }

    #[test]
    fn test_invalid_sizes() {
        let population = three_blobs();
        assert!(matches!(select(&population, 0, Linkage::Ward), Err(Error::InvalidSize(_))));
        assert!(matches!(select(&population, 10, Linkage::Ward), Err(Error::InvalidSize(_))));
    }

    #[test]
    fn test_single_entity() {
        let population = population(&[[3.0, 4.0]]);
        assert_eq!(select(&population, 1, Linkage::Ward).unwrap(), vec![0]);
    }

    #[test]
    fn test_large_coordinates() {
        let population = population(&[[0.0, 0.0], [1e150, 0.0], [2e150, 0.0], [3e150, 0.0]]);
        for linkage in [Linkage::Ward, Linkage::Average, Linkage::Complete, Linkage::Single] {
            for size in 1..=4 {
                let subset = select(&population, size, linkage).unwrap();
                assert_eq!(subset.len(), size, "{}", linkage);
            }
        }
    }

    #[test]
    fn test_unbounded_dissimilarities_still_merge_everything() {
        let d = CondensedMatrix {
            n: 4,
            values: vec![f64::INFINITY; 6],
        };
        let merges = nn_chain(d, Linkage::Ward);
        assert_eq!(merges.len(), 3);

        let mut roots = DisjointSet::new(4);
        for merge in &merges {
            roots.union(merge.a, merge.b);
        }
        assert!((0..4).all(|i| roots.find(i) == 0));
    }

    #[test]
    fn test_parse_linkage() {
        assert_eq!("Ward".parse::<Linkage>().unwrap(), Linkage::Ward);
        assert_eq!("single".parse::<Linkage>().unwrap(), Linkage::Single);
        assert!(matches!("median".parse::<Linkage>(), Err(Error::InvalidConfig(_))));
    }
}
