// Euclidean distance over f64 feature rows

/// Squared Euclidean distance
///
/// Returns `f64::INFINITY` when the slices differ in length. Can overflow to
/// infinity for very large coordinates; [`euclidean`] does not.
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }

    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// Euclidean (L2) distance
///
/// Differences are scaled by the largest one before squaring, so the result
/// is finite whenever the true distance is representable.
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }

    let scale = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f64, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }

    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let ratio = (x - y) / scale;
            ratio * ratio
        })
        .sum();
    scale * sum.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        assert!((euclidean(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(euclidean(&[1.5, -2.0], &[1.5, -2.0]), 0.0);
    }

    #[test]
    fn test_squared_euclidean() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [0.0; 6];
        assert!((squared_euclidean(&a, &b) - 91.0).abs() < 1e-12);
        assert!((euclidean(&a, &b) - 91.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_large_coordinates_stay_finite() {
        // the squared difference alone would overflow
        let d = euclidean(&[0.0, 0.0], &[3e200, 4e200]);
        assert!(d.is_finite());
        assert!((d / 5e200 - 1.0).abs() < 1e-12);
        assert!(squared_euclidean(&[0.0], &[1e200]).is_infinite());
    }

    #[test]
    fn test_length_mismatch() {
        assert!(euclidean(&[1.0], &[1.0, 2.0]).is_infinite());
        assert!(squared_euclidean(&[1.0], &[1.0, 2.0]).is_infinite());
    }
}
