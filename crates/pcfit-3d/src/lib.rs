#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Robust geometric primitive fitting (plane, sphere, cylinder).
pub mod fit;

/// Linear algebra utilities.
pub mod linalg;

/// Operations on 3D data processing.
pub mod ops;

/// Point cloud container.
pub mod pointcloud;

/// 3D transforms algorithms.
pub mod transforms;

/// Conversions between plain arrays and faer views.
pub mod utils;
