//! Robust fitting of geometric primitives to point clouds.
//!
//! Every fitter has a parameter-driven entry point that owns its random
//! generator (seeded from [`random_seed`](PlaneRansacParams::random_seed) when
//! set) and a `*_with_rng` variant that samples from a caller supplied
//! generator.

/// Least squares and RANSAC plane fitting.
pub mod plane;

/// RANSAC sphere fitting from oriented points.
pub mod sphere;

/// RANSAC cylinder fitting from oriented points.
pub mod cylinder;

mod ransac;

pub use cylinder::{
    fit_cylinder_ransac, fit_cylinder_ransac_with_rng, CylinderModel, CylinderRansacParams,
};
pub use plane::{
    fit_plane_eigen, fit_plane_ransac, fit_plane_ransac_with_rng, PlaneModel, PlaneRansacParams,
};
pub use ransac::RansacResult;
pub use sphere::{fit_sphere_ransac, fit_sphere_ransac_with_rng, SphereModel, SphereRansacParams};

use thiserror::Error;

/// Error types for the primitive fitters.
#[derive(Debug, Error)]
pub enum FitError {
    /// Fewer points than the minimal sample of the model.
    #[error("Fitting requires at least {required} points, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points required by the model.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Invalid input data - mismatched array lengths with descriptive labels.
    #[error("Mismatched array lengths: {left_name} ({left_len}) != {right_name} ({right_len})")]
    MismatchedArrayLengths {
        /// Label for the left-hand slice.
        left_name: &'static str,
        /// Length of the left-hand slice.
        left_len: usize,
        /// Label for the right-hand slice.
        right_name: &'static str,
        /// Length of the right-hand slice.
        right_len: usize,
    },

    /// A fitting parameter is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

pub(crate) fn check_min_points(points: &[[f64; 3]], required: usize) -> Result<(), FitError> {
    if points.len() < required {
        return Err(FitError::InsufficientPoints {
            required,
            actual: points.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_normals(points: &[[f64; 3]], normals: &[[f64; 3]]) -> Result<(), FitError> {
    if points.len() != normals.len() {
        return Err(FitError::MismatchedArrayLengths {
            left_name: "points",
            left_len: points.len(),
            right_name: "normals",
            right_len: normals.len(),
        });
    }
    Ok(())
}
