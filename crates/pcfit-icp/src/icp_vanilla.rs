use serde::{Deserialize, Serialize};

use crate::ops::{find_correspondences, fit_transformation};
use crate::ICPError;
use pcfit_3d::{pointcloud::PointCloud, transforms::RigidTransform};

/// Result of the ICP algorithm.
///
/// The transformation is from the source to the target frame.
#[derive(Debug, Clone)]
pub struct ICPResult {
    /// Estimated transformation, applies to the original source points.
    pub transform: RigidTransform,
    /// The total number of iterations performed.
    pub num_iterations: usize,
    /// Root mean square nearest neighbour distance of the last correspondence step.
    pub rmse: f64,
}

/// Structure to define the ICP parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ICPConvergenceCriteria {
    /// Maximum number of iterations to perform.
    pub max_iterations: usize,
    /// Convergence tolerance on the Frobenius norm of `T - I` for the
    /// accumulated transformation `T`.
    pub tolerance: f64,
}

impl Default for ICPConvergenceCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-6,
        }
    }
}

/// Iterative Closest Point (ICP) algorithm using point to point distance.
///
/// Every iteration matches each target point to its nearest point in the
/// current source (brute force), aligns the matched source points to the
/// target with [`fit_transformation`], moves the working source copy by that
/// increment and accumulates it as `T <- T_i * T`. The loop stops when the
/// accumulated transformation is within `criteria.tolerance` of the identity
/// or the iteration budget is spent. Running out of budget is not an error.
///
/// # Arguments
///
/// * `source` - Source point cloud, not modified.
/// * `target` - Target point cloud, at least 3 points.
/// * `initial` - Initial transformation from the source to the target frame.
/// * `criteria` - Convergence criteria.
///
/// # Returns
///
/// * `result` - Result of the ICP algorithm containing the transformation, rmse and number of iterations.
pub fn icp_vanilla(
    source: &PointCloud,
    target: &PointCloud,
    initial: &RigidTransform,
    criteria: &ICPConvergenceCriteria,
) -> Result<ICPResult, ICPError> {
    if source.is_empty() {
        return Err(ICPError::InsufficientPoints {
            name: "source point cloud",
            required: 1,
            actual: 0,
        });
    }
    if target.len() < 3 {
        return Err(ICPError::InsufficientPoints {
            name: "target point cloud",
            required: 3,
            actual: target.len(),
        });
    }

    // initialize the result structure with the initial transformation given by the user
    let mut result = ICPResult {
        transform: *initial,
        num_iterations: 0,
        rmse: f64::INFINITY,
    };

    // working copy of the source, the caller's cloud is never touched
    let mut current_source = initial.apply_points(source.points());

    // main icp loop
    for i in 0..criteria.max_iterations {
        log::debug!("Iteration: {}", i);
        let now = std::time::Instant::now();

        // find closest source point for every target point
        let (indices, distances) = find_correspondences(&current_source, target.points());
        let current_source_match = indices
            .iter()
            .map(|&idx| current_source[idx])
            .collect::<Vec<_>>();

        log::debug!("Num correspondences: {}", current_source_match.len());

        // compute incremental transformation between matched source and target
        let delta = fit_transformation(&current_source_match, target.points())?;

        // T <- T_i * T, then move the working copy by T_i only
        result.transform = delta.compose(&result.transform);
        current_source = delta.apply_points(&current_source);

        result.rmse =
            (distances.iter().map(|d| d * d).sum::<f64>() / distances.len() as f64).sqrt();
        result.num_iterations += 1;

        let norm = result.transform.distance_from_identity();
        log::debug!("rmse: {}, |T - I|: {}", result.rmse, norm);
        log::debug!("elapsed: {:?}", now.elapsed());

        // check convergence and exit if below tolerance
        if norm < criteria.tolerance {
            log::debug!("ICP converged in {} iterations", result.num_iterations);
            break;
        }
    }

    Ok(result)
}

/// Register two point sets with ICP from the identity using default criteria.
///
/// Returns the 4x4 homogeneous matrix `T` such that `T * m` best aligns with `d`.
///
/// Example:
///
/// ```
/// use pcfit_icp::register_icp;
///
/// let m = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]];
/// let d = m.iter().map(|p| [p[0] + 0.01, p[1], p[2]]).collect::<Vec<_>>();
/// let t = register_icp(&m, &d).unwrap();
/// assert!((t[0][3] - 0.01).abs() < 1e-9);
/// ```
pub fn register_icp(m: &[[f64; 3]], d: &[[f64; 3]]) -> Result<[[f64; 4]; 4], ICPError> {
    let source = PointCloud::new(m.to_vec(), None);
    let target = PointCloud::new(d.to_vec(), None);
    let result = icp_vanilla(
        &source,
        &target,
        &RigidTransform::identity(),
        &ICPConvergenceCriteria::default(),
    )?;
    Ok(result.transform.to_matrix())
}
