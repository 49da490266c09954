/// Utility function to compute the Euclidean distance between two points.
///
/// # Arguments
///
/// * `a` - A point in 3D space.
/// * `b` - Another point in 3D space.
///
/// # Returns
///
/// The Euclidean distance between the two points.
///
/// Example:
/// ```
/// use pcfit_3d::ops::euclidean_distance;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 6.0, 3.0];
/// assert_eq!(euclidean_distance(&a, &b), 5.0);
/// ```
pub fn euclidean_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    squared_euclidean_distance(a, b).sqrt()
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn squared_euclidean_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}

/// Compute the centroid (arithmetic mean) of a set of points.
///
/// Returns NaN components for an empty set.
pub fn compute_centroid(points: &[[f64; 3]]) -> [f64; 3] {
    let sum = points.iter().fold([0.0; 3], |mut acc, p| {
        acc[0] += p[0];
        acc[1] += p[1];
        acc[2] += p[2];
        acc
    });
    let n = points.len() as f64;
    [sum[0] / n, sum[1] / n, sum[2] / n]
}

/// Compute the 3x3 sample covariance of a set of points around `mean`.
///
/// Normalized by `N - 1` (unbiased estimator).
///
/// PRECONDITION: points has at least two elements.
pub fn covariance_matrix(points: &[[f64; 3]], mean: &[f64; 3]) -> [[f64; 3]; 3] {
    let mut cov = [[0.0; 3]; 3];
    for p in points {
        let d = [p[0] - mean[0], p[1] - mean[1], p[2] - mean[2]];
        for (i, row) in cov.iter_mut().enumerate() {
            for (j, val) in row.iter_mut().enumerate() {
                *val += d[i] * d[j];
            }
        }
    }

    let denom = (points.len() as f64 - 1.0).max(1.0);
    for row in cov.iter_mut() {
        for val in row.iter_mut() {
            *val /= denom;
        }
    }
    cov
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euclidean_distance() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_relative_eq!(euclidean_distance(&a, &b), 27f64.sqrt());
        assert_eq!(squared_euclidean_distance(&a, &b), 27.0);
    }

    #[test]
    fn test_compute_centroid() {
        let points = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(compute_centroid(&points), [2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_covariance_matrix() {
        // variance 1 along x (values -1, 0, 1), nothing along y and z
        let points = vec![[-1.0, 2.0, 0.0], [0.0, 2.0, 0.0], [1.0, 2.0, 0.0]];
        let mean = compute_centroid(&points);
        let cov = covariance_matrix(&points, &mean);

        assert_relative_eq!(cov[0][0], 1.0);
        for (i, row) in cov.iter().enumerate() {
            for (j, val) in row.iter().enumerate() {
                if (i, j) != (0, 0) {
                    assert_relative_eq!(*val, 0.0);
                }
            }
        }
    }
}
