#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod icp_vanilla;
pub use icp_vanilla::*;

mod ops;
pub use ops::{compute_centroids, find_correspondences, fit_transformation};

/// Error types for rigid alignment and ICP.
#[derive(Debug, thiserror::Error)]
pub enum ICPError {
    /// Not enough points to estimate a transformation.
    #[error("{name} requires at least {required} points, got {actual}")]
    InsufficientPoints {
        /// Label of the offending point set.
        name: &'static str,
        /// Minimum number of points required.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Corresponding point sets differ in length.
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
}
