use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ransac::{self, RansacResult};
use super::{check_min_points, check_normals, FitError};
use crate::linalg;

/// An infinite cylinder given by a point on its axis, the axis direction and
/// the radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderModel {
    /// A point of the axis. The fitter returns the point where the axis
    /// crosses the plane through the origin orthogonal to `axis`.
    pub center: [f64; 3],
    /// Unit direction of the axis.
    pub axis: [f64; 3],
    /// Radius of the cylinder.
    pub radius: f64,
}

impl CylinderModel {
    /// Distance from a point to the axis line, measured in the plane
    /// orthogonal to the axis.
    #[inline]
    pub fn radial_distance(&self, point: &[f64; 3]) -> f64 {
        let d = linalg::sub3(point, &self.center);
        linalg::norm3(&linalg::project_orthogonal(&d, &self.axis))
    }

    /// Unsigned distance from a point to the cylinder surface.
    #[inline]
    pub fn distance_to_point(&self, point: &[f64; 3]) -> f64 {
        (self.radial_distance(point) - self.radius).abs()
    }
}

/// Parameters for RANSAC cylinder fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderRansacParams {
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

impl Default for CylinderRansacParams {
    fn default() -> Self {
        Self {
            max_iterations: 5_000,
            min_radius: 0.05,
            max_radius: 0.10,
            inlier_threshold: 1e-3,
            random_seed: None,
        }
    }
}

/// Fit a cylinder with RANSAC, sampling from a generator seeded by `params`.
///
/// See [`fit_cylinder_ransac_with_rng`].
pub fn fit_cylinder_ransac(
    points: &[[f64; 3]],
    normals: &[[f64; 3]],
    params: &CylinderRansacParams,
) -> Result<RansacResult<CylinderModel>, FitError> {
    let mut rng = ransac::make_rng(params.random_seed);
    fit_cylinder_ransac_with_rng(points, normals, params, &mut rng)
}

/// Fit a cylinder to oriented points with RANSAC.
///
/// A hypothesis is built from two distinct points. The axis is the normalized
/// cross product of their normals, a radius is drawn uniformly from
/// `[min_radius, max_radius]` and one of the two points (coin flip) is offset
/// by the radius along its normal to give a point on the axis. That point and
/// the cloud are projected onto the plane orthogonal to the axis, where the
/// fit reduces to a circle: inliers lie within `inlier_threshold` of the
/// radius from the projected center.
///
/// The returned center is the projected one. As for the sphere fitter, the
/// normals must point towards the axis.
///
/// # Arguments
///
/// * `points` - Points in 3D space, at least 2.
/// * `normals` - Unit normals index aligned with `points`.
/// * `params` - Iteration budget, radius range and inlier threshold. The seed is ignored.
/// * `rng` - Random generator used for sampling.
pub fn fit_cylinder_ransac_with_rng<R: Rng + ?Sized>(
    points: &[[f64; 3]],
    normals: &[[f64; 3]],
    params: &CylinderRansacParams,
    rng: &mut R,
) -> Result<RansacResult<CylinderModel>, FitError> {
    check_normals(points, normals)?;
    check_min_points(points, 2)?;
    ransac::check_iterations_and_threshold(params.max_iterations, params.inlier_threshold)?;
    ransac::check_radius_range(params.min_radius, params.max_radius)?;

    let threshold = params.inlier_threshold;

    let result = ransac::ransac_fold(
        params.max_iterations,
        points.len(),
        rng,
        |rng| {
            let sample = rand::seq::index::sample(rng, points.len(), 2);
            let (i0, i1) = (sample.index(0), sample.index(1));
            let radius = rng.random_range(params.min_radius..=params.max_radius);

            let axis = linalg::cross_normalize(&normals[i0], &normals[i1]);

            let on_axis = if rng.random::<f64>() > 0.5 {
                linalg::add_scaled3(&points[i0], radius, &normals[i0])
            } else {
                linalg::add_scaled3(&points[i1], radius, &normals[i1])
            };
            let center = linalg::project_orthogonal(&on_axis, &axis);

            CylinderModel {
                center,
                axis,
                radius,
            }
        },
        |model, i| {
            // the center is already in the projection plane
            let projected = linalg::project_orthogonal(&points[i], &model.axis);
            let dist = linalg::norm3(&linalg::sub3(&projected, &model.center));
            dist >= model.radius - threshold && dist <= model.radius + threshold
        },
    )?;

    log::debug!(
        "cylinder RANSAC: radius {:.4}, {} / {} inliers",
        result.model.radius,
        result.num_inliers,
        points.len()
    );

    Ok(result)
}
