use serde::{Deserialize, Serialize};

use crate::linalg;

/// A rigid transformation `p' = R * p + t`.
///
/// The rotation is stored row-major. No orthonormality check is performed, the
/// transforms produced by SVD alignment may in degenerate cases be reflections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Rotation matrix.
    pub rotation: [[f64; 3]; 3],
    /// Translation vector.
    pub translation: [f64; 3],
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    /// Create a transform from a rotation and a translation.
    pub fn new(rotation: [[f64; 3]; 3], translation: [f64; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Pack the transform as a 4x4 homogeneous matrix `[[R, t], [0, 0, 0, 1]]`.
    pub fn to_matrix(&self) -> [[f64; 4]; 4] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            [r[0][0], r[0][1], r[0][2], t[0]],
            [r[1][0], r[1][1], r[1][2], t[1]],
            [r[2][0], r[2][1], r[2][2], t[2]],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    /// Unpack a 4x4 homogeneous matrix. The last row is ignored.
    pub fn from_matrix(m: &[[f64; 4]; 4]) -> Self {
        Self {
            rotation: [
                [m[0][0], m[0][1], m[0][2]],
                [m[1][0], m[1][1], m[1][2]],
                [m[2][0], m[2][1], m[2][2]],
            ],
            translation: [m[0][3], m[1][3], m[2][3]],
        }
    }

    /// Compose two transforms as `self * other`: `other` is applied first.
    pub fn compose(&self, other: &RigidTransform) -> RigidTransform {
        let mut rotation = [[0.0; 3]; 3];
        linalg::matmul33(&self.rotation, &other.rotation, &mut rotation);
        let rt = linalg::mat33_mul_vec3(&self.rotation, &other.translation);
        RigidTransform {
            rotation,
            translation: [
                rt[0] + self.translation[0],
                rt[1] + self.translation[1],
                rt[2] + self.translation[2],
            ],
        }
    }

    /// Inverse transform, assuming the rotation is orthonormal.
    pub fn inverse(&self) -> RigidTransform {
        let rotation = linalg::transpose33(&self.rotation);
        let t = linalg::mat33_mul_vec3(&rotation, &self.translation);
        RigidTransform {
            rotation,
            translation: [-t[0], -t[1], -t[2]],
        }
    }

    /// Apply the transform to a single point.
    #[inline]
    pub fn apply(&self, point: &[f64; 3]) -> [f64; 3] {
        let p = linalg::mat33_mul_vec3(&self.rotation, point);
        [
            p[0] + self.translation[0],
            p[1] + self.translation[1],
            p[2] + self.translation[2],
        ]
    }

    /// Apply the transform to a set of points, returning a new vector.
    pub fn apply_points(&self, points: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let mut dst_points = vec![[0.0; 3]; points.len()];
        linalg::transform_points(points, &self.rotation, &self.translation, &mut dst_points);
        dst_points
    }

    /// Frobenius norm of `T - I` over the 4x4 homogeneous form.
    pub fn distance_from_identity(&self) -> f64 {
        let mut sum = 0.0;
        for (i, row) in self.rotation.iter().enumerate() {
            for (j, val) in row.iter().enumerate() {
                let id = if i == j { 1.0 } else { 0.0 };
                sum += (val - id).powi(2);
            }
        }
        sum += self.translation.iter().map(|t| t * t).sum::<f64>();
        sum.sqrt()
    }
}

/// Compute the rotation matrix from an axis and angle.
///
/// # Arguments
///
/// * `axis` - The axis of rotation, normalized internally.
/// * `angle` - The angle of rotation in radians.
///
/// # Returns
///
/// The rotation matrix.
///
/// Example:
///
/// ```
/// use pcfit_3d::transforms::axis_angle_to_rotation_matrix;
///
/// let axis = [1.0, 0.0, 0.0];
/// let angle = std::f64::consts::PI / 2.0;
/// let rotation = axis_angle_to_rotation_matrix(&axis, angle).unwrap();
/// assert!((rotation[1][2] + 1.0).abs() < 1e-12);
/// ```
pub fn axis_angle_to_rotation_matrix(
    axis: &[f64; 3],
    angle: f64,
) -> Result<[[f64; 3]; 3], &'static str> {
    // normalize the vector
    let axis_norm = {
        let magnitude = linalg::norm3(axis);
        match magnitude < 1e-10 {
            true => return Err("cannot compute rotation matrix from a zero vector"),
            false => [
                axis[0] / magnitude,
                axis[1] / magnitude,
                axis[2] / magnitude,
            ],
        }
    };

    let [x, y, z] = axis_norm;

    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let tmp1 = x * y * t;
    let tmp2 = z * s;

    let m10 = tmp1 + tmp2;
    let m01 = tmp1 - tmp2;

    let tmp3 = x * z * t;
    let tmp4 = y * s;

    let m20 = tmp3 - tmp4;
    let m02 = tmp3 + tmp4;

    let tmp5 = y * z * t;
    let tmp6 = x * s;

    let m12 = tmp5 - tmp6;
    let m21 = tmp5 + tmp6;

    Ok([[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]])
}
