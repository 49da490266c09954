use crate::{linalg, ops, transforms::RigidTransform};

/// Error types for point cloud construction.
#[derive(Debug, thiserror::Error)]
pub enum PointCloudError {
    /// The normal field is not index aligned with the points.
    #[error("Point cloud has {points} points but {normals} normals")]
    NormalsLengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of normals.
        normals: usize,
    },
}

/// A point cloud with points and optional per-point normals.
#[derive(Debug, Clone)]
pub struct PointCloud {
    // The points in the point cloud.
    points: Vec<[f64; 3]>,
    // The normals of the points, index aligned with `points`.
    normals: Option<Vec<[f64; 3]>>,
}

impl PointCloud {
    /// Create a new point cloud from points and normals (optional).
    ///
    /// The normal field is not validated, see [`PointCloud::try_new`].
    pub fn new(points: Vec<[f64; 3]>, normals: Option<Vec<[f64; 3]>>) -> Self {
        Self { points, normals }
    }

    /// Create a new point cloud checking that normals match the points 1:1.
    pub fn try_new(
        points: Vec<[f64; 3]>,
        normals: Option<Vec<[f64; 3]>>,
    ) -> Result<Self, PointCloudError> {
        if let Some(normals) = &normals {
            if normals.len() != points.len() {
                return Err(PointCloudError::NormalsLengthMismatch {
                    points: points.len(),
                    normals: normals.len(),
                });
            }
        }
        Ok(Self { points, normals })
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point cloud.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Get as reference the normals of the points in the point cloud.
    pub fn normals(&self) -> Option<&[[f64; 3]]> {
        self.normals.as_deref()
    }

    /// Mean of all the points.
    pub fn centroid(&self) -> [f64; 3] {
        ops::compute_centroid(&self.points)
    }

    /// Return a transformed copy of the point cloud.
    ///
    /// Points are mapped by `R * p + t`, normals are rotated only.
    pub fn transformed(&self, transform: &RigidTransform) -> PointCloud {
        let points = transform.apply_points(&self.points);
        let normals = self.normals.as_ref().map(|normals| {
            normals
                .iter()
                .map(|n| linalg::mat33_mul_vec3(&transform.rotation, n))
                .collect()
        });
        PointCloud { points, normals }
    }
}
