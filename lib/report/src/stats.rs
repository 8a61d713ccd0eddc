use serde::Serialize;
use surrosel_core::SimulationResult;

/// Distribution of baseline scores at one subset size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeSummary {
    pub size: usize,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (0 for a single trial)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    #[serde(skip)]
    sorted: Vec<f64>,
}

impl SizeSummary {
    fn compute(size: usize, mut scores: Vec<f64>) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        scores.sort_by(f64::total_cmp);

        let count = scores.len();
        let mean = scores.iter().sum::<f64>() / count as f64;
        let std_dev = if count > 1 {
            let var = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };

        Some(Self {
            size,
            count,
            mean,
            std_dev,
            min: scores[0],
            max: scores[count - 1],
            sorted: scores,
        })
    }

    /// Fraction of baseline scores less than or equal to `score`
    ///
    /// Near 0 means `score` beats almost every random pick of this size.
    pub fn percentile(&self, score: f64) -> f64 {
        let at_or_below = self.sorted.partition_point(|&s| s <= score);
        at_or_below as f64 / self.count as f64
    }
}

/// Per-size summary of a baseline simulation, in ascending size order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaselineSummary {
    pub sizes: Vec<SizeSummary>,
}

impl BaselineSummary {
    pub fn from_simulation(simulation: &SimulationResult) -> Self {
        let sizes = simulation
            .distinct_sizes()
            .into_iter()
            .filter_map(|size| SizeSummary::compute(size, simulation.scores_for(size)))
            .collect();
        Self { sizes }
    }

    pub fn get(&self, size: usize) -> Option<&SizeSummary> {
        self.sizes.iter().find(|s| s.size == size)
    }

    /// Percentile of `score` within the baseline at `size`, if simulated
    pub fn percentile(&self, size: usize, score: f64) -> Option<f64> {
        self.get(size).map(|s| s.percentile(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation() -> SimulationResult {
        SimulationResult {
            scores: vec![4.0, 2.0, 3.0, 1.0, 0.5, 0.7, 0.6, 0.6],
            sizes: vec![1, 1, 1, 1, 3, 3, 3, 3],
        }
    }

    #[test]
    fn test_summary() {
        let summary = BaselineSummary::from_simulation(&simulation());
        assert_eq!(summary.sizes.len(), 2);

        let one = summary.get(1).unwrap();
        assert_eq!(one.count, 4);
        assert!((one.mean - 2.5).abs() < 1e-12);
        assert!((one.std_dev - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(one.min, 1.0);
        assert_eq!(one.max, 4.0);
        assert!(summary.get(2).is_none());
    }

    #[test]
    fn test_percentile() {
        let summary = BaselineSummary::from_simulation(&simulation());
        assert_eq!(summary.percentile(1, 0.5), Some(0.0));
        assert_eq!(summary.percentile(1, 2.0), Some(0.5));
        assert_eq!(summary.percentile(3, 0.6), Some(0.75));
        assert_eq!(summary.percentile(3, 9.0), Some(1.0));
        assert_eq!(summary.percentile(7, 1.0), None);
    }
}
