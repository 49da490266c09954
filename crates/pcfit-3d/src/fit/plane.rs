use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ransac::{self, RansacResult};
use super::{check_min_points, FitError};
use crate::{linalg, ops};

/// A plane through `center` with unit `normal`.
///
/// The sign of the normal is arbitrary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneModel {
    /// Unit normal of the plane.
    pub normal: [f64; 3],
    /// A point on the plane.
    pub center: [f64; 3],
}

impl PlaneModel {
    /// Unsigned perpendicular distance from a point to the plane.
    #[inline]
    pub fn distance_to_point(&self, point: &[f64; 3]) -> f64 {
        linalg::dot_product3(&linalg::sub3(point, &self.center), &self.normal).abs()
    }
}

/// Parameters for RANSAC plane fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneRansacParams {
    /// Number of hypotheses to evaluate.
    pub max_iterations: usize,
    /// Maximum point to plane distance for an inlier.
    pub inlier_threshold: f64,
    /// Optional fixed seed for reproducible sampling.
    pub random_seed: Option<u64>,
}

impl Default for PlaneRansacParams {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            inlier_threshold: 1e-4,
            random_seed: None,
        }
    }
}

/// Fit a least squares plane to a set of points.
///
/// The center is the mean of the points and the normal is the eigenvector of
/// the sample covariance with the smallest eigenvalue.
///
/// Collinear input gives a rank deficient covariance; the returned normal is
/// then any direction orthogonal to the line.
///
/// # Arguments
///
/// * `points` - Points in 3D space, at least 3.
///
/// # Returns
///
/// The fitted plane.
///
/// Example:
///
/// ```
/// use pcfit_3d::fit::fit_plane_eigen;
///
/// let points = vec![[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]];
/// let plane = fit_plane_eigen(&points).unwrap();
/// assert!((plane.normal[2].abs() - 1.0).abs() < 1e-9);
/// assert_eq!(plane.center, [0.5, 0.5, 1.0]);
/// ```
pub fn fit_plane_eigen(points: &[[f64; 3]]) -> Result<PlaneModel, FitError> {
    check_min_points(points, 3)?;

    let center = ops::compute_centroid(points);
    let cov = ops::covariance_matrix(points, &center);
    let (eigenvalues, eigenvectors) = linalg::symmetric_eigen33(&cov);

    let min_idx = (0..3)
        .min_by(|&i, &j| eigenvalues[i].total_cmp(&eigenvalues[j]))
        .unwrap_or(0);
    let normal = [
        eigenvectors[0][min_idx],
        eigenvectors[1][min_idx],
        eigenvectors[2][min_idx],
    ];

    Ok(PlaneModel { normal, center })
}

/// Fit a plane with RANSAC, sampling from a generator seeded by `params`.
///
/// See [`fit_plane_ransac_with_rng`].
pub fn fit_plane_ransac(
    points: &[[f64; 3]],
    params: &PlaneRansacParams,
) -> Result<RansacResult<PlaneModel>, FitError> {
    let mut rng = ransac::make_rng(params.random_seed);
    fit_plane_ransac_with_rng(points, params, &mut rng)
}

/// Fit a plane with RANSAC.
///
/// Each hypothesis passes through 3 distinct random points: the normal is the
/// normalized cross product of the two edges leaving the first point and the
/// center is the centroid of the triple. Collinear triples produce a NaN normal
/// which scores no inliers.
///
/// # Arguments
///
/// * `points` - Points in 3D space, at least 3.
/// * `params` - Iteration budget and inlier threshold. The seed is ignored.
/// * `rng` - Random generator used for sampling.
pub fn fit_plane_ransac_with_rng<R: Rng + ?Sized>(
    points: &[[f64; 3]],
    params: &PlaneRansacParams,
    rng: &mut R,
) -> Result<RansacResult<PlaneModel>, FitError> {
    check_min_points(points, 3)?;
    ransac::check_iterations_and_threshold(params.max_iterations, params.inlier_threshold)?;

    let threshold = params.inlier_threshold;

    let result = ransac::ransac_fold(
        params.max_iterations,
        points.len(),
        rng,
        |rng| {
            let sample = rand::seq::index::sample(rng, points.len(), 3);
            let (p0, p1, p2) = (
                &points[sample.index(0)],
                &points[sample.index(1)],
                &points[sample.index(2)],
            );

            let normal = linalg::cross_normalize(&linalg::sub3(p1, p0), &linalg::sub3(p2, p0));
            let center = ops::compute_centroid(&[*p0, *p1, *p2]);
            PlaneModel { normal, center }
        },
        |model, i| model.distance_to_point(&points[i]) <= threshold,
    )?;

    log::debug!(
        "plane RANSAC: {} / {} inliers",
        result.num_inliers,
        points.len()
    );

    Ok(result)
}
