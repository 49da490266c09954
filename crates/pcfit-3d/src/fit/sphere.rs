use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ransac::{self, RansacResult};
use super::{check_min_points, check_normals, FitError};
use crate::{linalg, ops};

/// A sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereModel {
    /// Center of the sphere.
    pub center: [f64; 3],
    /// Radius of the sphere.
    pub radius: f64,
}

impl SphereModel {
    /// Unsigned distance from a point to the sphere surface.
    #[inline]
    pub fn distance_to_point(&self, point: &[f64; 3]) -> f64 {
        (ops::euclidean_distance(point, &self.center) - self.radius).abs()
    }
}

/// Parameters for RANSAC sphere fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereRansacParams {
    /// Number of hypotheses to evaluate.
    pub max_iterations: usize,
    /// Lower bound of the candidate radius.
    pub min_radius: f64,
    /// Upper bound of the candidate radius.
    pub max_radius: f64,
    /// Maximum distance to the candidate surface for an inlier.
    pub inlier_threshold: f64,
    /// Optional fixed seed for reproducible sampling.
    pub random_seed: Option<u64>,
}

impl Default for SphereRansacParams {
    fn default() -> Self {
        Self {
            max_iterations: 1_000,
            min_radius: 0.05,
            max_radius: 0.11,
            inlier_threshold: 0.01,
            random_seed: None,
        }
    }
}

/// Fit a sphere with RANSAC, sampling from a generator seeded by `params`.
///
/// See [`fit_sphere_ransac_with_rng`].
pub fn fit_sphere_ransac(
    points: &[[f64; 3]],
    normals: &[[f64; 3]],
    params: &SphereRansacParams,
) -> Result<RansacResult<SphereModel>, FitError> {
    let mut rng = ransac::make_rng(params.random_seed);
    fit_sphere_ransac_with_rng(points, normals, params, &mut rng)
}

/// Fit a sphere to oriented points with RANSAC.
///
/// A hypothesis is built from a single point: a radius is drawn uniformly from
/// `[min_radius, max_radius]` and the center is placed at `point + radius *
/// normal`. The normals must therefore point towards the sphere center; flip
/// outward facing normals before calling.
///
/// # Arguments
///
/// * `points` - Points in 3D space, at least 1.
/// * `normals` - Unit normals index aligned with `points`.
/// * `params` - Iteration budget, radius range and inlier threshold. The seed is ignored.
/// * `rng` - Random generator used for sampling.
pub fn fit_sphere_ransac_with_rng<R: Rng + ?Sized>(
    points: &[[f64; 3]],
    normals: &[[f64; 3]],
    params: &SphereRansacParams,
    rng: &mut R,
) -> Result<RansacResult<SphereModel>, FitError> {
    check_normals(points, normals)?;
    check_min_points(points, 1)?;
    ransac::check_iterations_and_threshold(params.max_iterations, params.inlier_threshold)?;
    ransac::check_radius_range(params.min_radius, params.max_radius)?;

    let threshold = params.inlier_threshold;

    let result = ransac::ransac_fold(
        params.max_iterations,
        points.len(),
        rng,
        |rng| {
            let idx = rng.random_range(0..points.len());
            let radius = rng.random_range(params.min_radius..=params.max_radius);
            let center = linalg::add_scaled3(&points[idx], radius, &normals[idx]);
            SphereModel { center, radius }
        },
        |model, i| model.distance_to_point(&points[i]) <= threshold,
    )?;

    log::debug!(
        "sphere RANSAC: radius {:.4}, {} / {} inliers",
        result.model.radius,
        result.num_inliers,
        points.len()
    );

    Ok(result)
}
