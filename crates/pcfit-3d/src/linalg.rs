use crate::utils;

/// Transform a set of points using a rotation and translation.
///
/// Computes `dst = R * src + t` for every point.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `dst_r_src` - A rotation matrix.
/// * `dst_t_src` - A translation vector.
/// * `dst_points` - A pre-allocated vector to store the transformed points.
///
/// PRECONDITION: dst_points is a pre-allocated vector of the same size as source.
///
/// Example:
///
/// ```
/// use pcfit_3d::linalg::transform_points;
///
/// let src_points = vec![[2.0, 2.0, 2.0], [3.0, 4.0, 5.0]];
/// let rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
/// let translation = [0.0, 0.0, 0.0];
/// let mut dst_points = vec![[0.0; 3]; src_points.len()];
/// transform_points(&src_points, &rotation, &translation, &mut dst_points);
/// ```
pub fn transform_points(
    src_points: &[[f64; 3]],
    dst_r_src: &[[f64; 3]; 3],
    dst_t_src: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) {
    assert_eq!(src_points.len(), dst_points.len());

    if src_points.is_empty() {
        return;
    }

    // create views of the rotation and translation matrices
    let dst_r_src_mat = utils::array33_to_faer_mat33(dst_r_src);
    let dst_t_src_col = utils::array3_to_faer_col(dst_t_src);

    // create view of the source points
    let points_in_src = {
        // SAFETY: [[f64; 3]] is laid out as 3 * len contiguous f64 values
        let src_points_slice = unsafe {
            std::slice::from_raw_parts(src_points.as_ptr() as *const f64, src_points.len() * 3)
        };
        // Nx3 matrix where each row represents a 3D point
        faer::mat::from_row_major_slice(src_points_slice, src_points.len(), 3)
    };

    // create a mutable view of the destination points
    let mut points_in_dst = {
        // SAFETY: same layout argument as for the source points
        let dst_points_slice = unsafe {
            std::slice::from_raw_parts_mut(
                dst_points.as_mut_ptr() as *mut f64,
                dst_points.len() * 3,
            )
        };
        // 3xN matrix where each column represents a 3D point
        faer::mat::from_column_major_slice_mut(dst_points_slice, 3, dst_points.len())
    };

    // dst = R * src^T
    faer::linalg::matmul::matmul(
        &mut points_in_dst,
        dst_r_src_mat,
        points_in_src.transpose(),
        None,
        1.0,
        faer::Parallelism::None,
    );

    let (tx, ty, tz) = (
        dst_t_src_col.read(0),
        dst_t_src_col.read(1),
        dst_t_src_col.read(2),
    );

    for mut col in points_in_dst.col_iter_mut() {
        col.write(0, col.read(0) + tx);
        col.write(1, col.read(1) + ty);
        col.write(2, col.read(2) + tz);
    }
}

/// Dot product of two 3D vectors.
#[inline]
pub fn dot_product3(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product of two 3D vectors.
#[inline]
pub fn cross_vec3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean norm of a 3D vector.
#[inline]
pub fn norm3(a: &[f64; 3]) -> f64 {
    dot_product3(a, a).sqrt()
}

/// Subtract two 3D vectors, `a - b`.
#[inline]
pub fn sub3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Compute `p + s * d`.
#[inline]
pub fn add_scaled3(p: &[f64; 3], s: f64, d: &[f64; 3]) -> [f64; 3] {
    [p[0] + s * d[0], p[1] + s * d[1], p[2] + s * d[2]]
}

/// Normalized cross product of two vectors.
///
/// No guard is applied: parallel (or zero) inputs produce a zero cross product
/// and the division yields NaN components. Callers scoring candidates with the
/// result treat NaN as "no inliers".
///
/// Example:
///
/// ```
/// use pcfit_3d::linalg::cross_normalize;
///
/// let n = cross_normalize(&[2.0, 0.0, 0.0], &[0.0, 3.0, 0.0]);
/// assert_eq!(n, [0.0, 0.0, 1.0]);
/// ```
pub fn cross_normalize(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    let c = cross_vec3(a, b);
    let norm = norm3(&c);
    [c[0] / norm, c[1] / norm, c[2] / norm]
}

/// Project a point onto the plane through the origin orthogonal to `axis`.
///
/// Computes `p - (p . axis) axis`, equivalent to `p (I - axis axis^T)`.
///
/// PRECONDITION: axis is a unit vector.
#[inline]
pub fn project_orthogonal(point: &[f64; 3], axis: &[f64; 3]) -> [f64; 3] {
    add_scaled3(point, -dot_product3(point, axis), axis)
}

/// Project a set of points onto the plane orthogonal to `axis`.
///
/// PRECONDITION: axis is a unit vector.
pub fn project_points_orthogonal(points: &[[f64; 3]], axis: &[f64; 3]) -> Vec<[f64; 3]> {
    points
        .iter()
        .map(|p| project_orthogonal(p, axis))
        .collect()
}

/// Multiply two 3x3 matrices, `m = a * b`.
pub fn matmul33(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3], m: &mut [[f64; 3]; 3]) {
    for (i, row) in m.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
}

/// Multiply a 3x3 matrix with a 3D vector.
#[inline]
pub fn mat33_mul_vec3(a: &[[f64; 3]; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        dot_product3(&a[0], v),
        dot_product3(&a[1], v),
        dot_product3(&a[2], v),
    ]
}

/// Transpose of a 3x3 matrix.
pub fn transpose33(a: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [a[0][0], a[1][0], a[2][0]],
        [a[0][1], a[1][1], a[2][1]],
        [a[0][2], a[1][2], a[2][2]],
    ]
}

/// Determinant of a 3x3 matrix.
pub fn det_mat33(a: &[[f64; 3]; 3]) -> f64 {
    dot_product3(&a[0], &cross_vec3(&a[1], &a[2]))
}

/// Eigen decomposition of a symmetric 3x3 matrix.
///
/// Returns the eigenvalues and a matrix whose columns are the matching unit
/// eigenvectors. Only the lower triangle of `a` is read.
pub fn symmetric_eigen33(a: &[[f64; 3]; 3]) -> ([f64; 3], [[f64; 3]; 3]) {
    let mat = faer::Mat::<f64>::from_fn(3, 3, |i, j| a[i][j]);
    let eig = mat.selfadjoint_eigendecomposition(faer::Side::Lower);

    let s = eig.s().column_vector();
    let eigenvalues = [s.read(0), s.read(1), s.read(2)];
    let eigenvectors = utils::faer_mat33_to_array33(eig.u());

    (eigenvalues, eigenvectors)
}

/// Singular value decomposition of a 3x3 matrix, `a = U * S * V^T`.
///
/// Returns `(U, V)` as row-major arrays.
pub fn svd33(a: &[[f64; 3]; 3]) -> ([[f64; 3]; 3], [[f64; 3]; 3]) {
    let mat = faer::Mat::<f64>::from_fn(3, 3, |i, j| a[i][j]);
    let svd = mat.svd();
    (
        utils::faer_mat33_to_array33(svd.u()),
        utils::faer_mat33_to_array33(svd.v()),
    )
}
