use rand::{rngs::StdRng, Rng, SeedableRng};

use super::FitError;

/// Outcome of a RANSAC fit.
#[derive(Debug, Clone)]
pub struct RansacResult<M> {
    /// Best model found.
    pub model: M,
    /// Number of points consistent with the model.
    pub num_inliers: usize,
    /// Indices of the points consistent with the model.
    pub inliers: Vec<usize>,
    /// Number of hypotheses evaluated.
    pub num_iterations: usize,
}

/// Build the generator used by the parameter-driven entry points.
pub(crate) fn make_rng(random_seed: Option<u64>) -> StdRng {
    match random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub(crate) fn check_iterations_and_threshold(
    max_iterations: usize,
    inlier_threshold: f64,
) -> Result<(), FitError> {
    if max_iterations == 0 {
        return Err(FitError::InvalidParameter("max_iterations must be positive"));
    }
    if inlier_threshold.is_nan() || inlier_threshold < 0.0 {
        return Err(FitError::InvalidParameter(
            "inlier_threshold must be non-negative",
        ));
    }
    Ok(())
}

pub(crate) fn check_radius_range(min_radius: f64, max_radius: f64) -> Result<(), FitError> {
    if min_radius.is_nan()
        || min_radius <= 0.0
        || max_radius < min_radius
        || !max_radius.is_finite()
    {
        return Err(FitError::InvalidParameter(
            "radius range must satisfy 0 < min_radius <= max_radius",
        ));
    }
    Ok(())
}

/// Keep the best of `max_iterations` independent hypotheses.
///
/// Each trial draws a candidate with `hypothesize` and scores it by the number
/// of the `num_points` indices accepted by `is_inlier`. The best score wins and
/// ties keep the candidate seen first, so a trial never replaces the running
/// best unless it strictly improves on it. The first candidate is always
/// retained even when it scores zero.
pub(crate) fn ransac_fold<M, R, H, I>(
    max_iterations: usize,
    num_points: usize,
    rng: &mut R,
    mut hypothesize: H,
    is_inlier: I,
) -> Result<RansacResult<M>, FitError>
where
    R: Rng + ?Sized,
    H: FnMut(&mut R) -> M,
    I: Fn(&M, usize) -> bool,
{
    let mut best: Option<(M, usize)> = None;

    for iter in 0..max_iterations {
        let candidate = hypothesize(&mut *rng);
        let score = (0..num_points).filter(|&i| is_inlier(&candidate, i)).count();

        let improves = match &best {
            Some((_, best_score)) => score > *best_score,
            None => true,
        };
        if improves {
            log::debug!("RANSAC iteration {}: {} inliers", iter, score);
            best = Some((candidate, score));
        }
    }

    let (model, num_inliers) =
        best.ok_or(FitError::InvalidParameter("max_iterations must be positive"))?;

    if num_inliers == 0 {
        log::warn!(
            "RANSAC found no inliers after {} iterations over {} points",
            max_iterations,
            num_points
        );
    }

    let inliers = (0..num_points)
        .filter(|&i| is_inlier(&model, i))
        .collect::<Vec<_>>();

    Ok(RansacResult {
        model,
        num_inliers,
        inliers,
        num_iterations: max_iterations,
    })
}
