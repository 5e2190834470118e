//! Small numeric helpers shared by the demos.

use num_traits::Float;

use crate::common_types::Point2D;

/// Euclidean distance between two points.
pub fn euclidean_distance(p1: &Point2D, p2: &Point2D) -> f64 {
    squared_distance(p1, p2).sqrt()
}

#[inline]
pub(crate) fn squared_distance(p1: &Point2D, p2: &Point2D) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    dx * dx + dy * dy
}

/// Arithmetic mean of a slice. Returns `None` for an empty slice.
pub fn mean<F: Float + std::iter::Sum>(values: &[F]) -> Option<F> {
    if values.is_empty() {
        return None;
    }
    let n = F::from(values.len())?;
    Some(values.iter().copied().sum::<F>() / n)
}

/// Population standard deviation (divides by `n`, not `n - 1`) around a given mean.
///
/// Returns zero for an empty slice.
pub fn population_std<F: Float + std::iter::Sum>(values: &[F], mean: F) -> F {
    if values.is_empty() {
        return F::zero();
    }
    let n = match F::from(values.len()) {
        Some(n) => n,
        None => return F::zero(),
    };
    let variance = values
        .iter()
        .map(|&v| {
            let d = v - mean;
            d * d
        })
        .sum::<F>()
        / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance_3_4_5() {
        let d = euclidean_distance(&Point2D::new(0.0, 0.0), &Point2D::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12, "Expected 5.0, got {}", d);
    }

    #[test]
    fn test_mean_empty_is_none() {
        let empty: [f64; 0] = [];
        assert_eq!(mean(&empty), None);
        assert_eq!(mean(&[2.0_f32, 4.0]), Some(3.0));
    }

    #[test]
    fn test_population_std_divides_by_n() {
        // Values 2,4,4,4,5,5,7,9 have population std exactly 2 (sample std would be ~2.138).
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values).unwrap();
        let std = population_std(&values, m);
        assert!((std - 2.0).abs() < 1e-12, "Expected 2.0, got {}", std);
    }

    #[test]
    fn test_population_std_constant_is_zero() {
        let values = [3.5_f64; 4];
        assert_eq!(population_std(&values, 3.5), 0.0);
    }
}
