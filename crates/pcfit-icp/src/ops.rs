use pcfit_3d::{linalg, ops, transforms::RigidTransform};

use crate::ICPError;

/// Compute the transformation between two sets of corresponding points.
///
/// Finds `R`, `t` minimizing `Σ |R * src_i + t - dst_i|²`:
///
/// 1. Compute the centroids of both sets and center the points.
/// 2. Compute the cross-covariance `W = Σ src_c * dst_c^T`.
/// 3. Decompose `W = U * S * V^T`.
/// 4. `R = V * U^T` and `t = dst_mean - R * src_mean`.
///
/// For more details, see: Arun, K., Huang, T. S., and Blostein, S. D.
/// "Least-squares fitting of two 3-D point sets." IEEE PAMI, 1987.
///
/// The determinant of `R` is not corrected. When the optimal orthogonal
/// alignment is a reflection (mirrored or planar degenerate input) the
/// returned rotation has determinant -1.
///
/// # Arguments
///
/// * `points_in_src` - Source points, at least 3.
/// * `points_in_dst` - Destination points, index aligned with `points_in_src`.
///
/// # Returns
///
/// The transformation mapping `points_in_src` onto `points_in_dst`.
pub fn fit_transformation(
    points_in_src: &[[f64; 3]],
    points_in_dst: &[[f64; 3]],
) -> Result<RigidTransform, ICPError> {
    if points_in_src.len() != points_in_dst.len() {
        return Err(ICPError::MismatchedArrayLengths {
            left_name: "source points",
            left_len: points_in_src.len(),
            right_name: "destination points",
            right_len: points_in_dst.len(),
        });
    }
    if points_in_src.len() < 3 {
        return Err(ICPError::InsufficientPoints {
            name: "transformation estimation",
            required: 3,
            actual: points_in_src.len(),
        });
    }

    // compute centroids
    let (src_centroid, dst_centroid) = compute_centroids(points_in_src, points_in_dst);

    // compute cross-covariance matrix W = Σ[(src - src_mean) * (dst - dst_mean)^T]
    let mut w = [[0.0; 3]; 3];
    for (p_in_src, p_in_dst) in points_in_src.iter().zip(points_in_dst.iter()) {
        let src_centered = linalg::sub3(p_in_src, &src_centroid);
        let dst_centered = linalg::sub3(p_in_dst, &dst_centroid);
        for (i, row) in w.iter_mut().enumerate() {
            for (j, val) in row.iter_mut().enumerate() {
                *val += src_centered[i] * dst_centered[j];
            }
        }
    }

    // R = V * U^T
    let (u, v) = linalg::svd33(&w);
    let mut rotation = [[0.0; 3]; 3];
    linalg::matmul33(&v, &linalg::transpose33(&u), &mut rotation);

    // t = dst_mean - R * src_mean
    let r_src = linalg::mat33_mul_vec3(&rotation, &src_centroid);
    let translation = linalg::sub3(&dst_centroid, &r_src);

    Ok(RigidTransform {
        rotation,
        translation,
    })
}

/// Compute the centroids of two sets of points.
///
/// # Arguments
///
/// * `points1` - A set of points.
/// * `points2` - Another set of points.
///
/// # Returns
///
/// The centroids of the two sets of points.
pub fn compute_centroids(points1: &[[f64; 3]], points2: &[[f64; 3]]) -> ([f64; 3], [f64; 3]) {
    (ops::compute_centroid(points1), ops::compute_centroid(points2))
}

/// Find for every target point its nearest neighbour in the source.
///
/// Brute force search, O(N * M). Ties keep the lowest source index.
///
/// # Returns
///
/// A pair of vectors the length of `target`: the index of the closest
/// source point and the Euclidean distance to it.
///
/// PRECONDITION: source is not empty.
pub fn find_correspondences(
    source: &[[f64; 3]],
    target: &[[f64; 3]],
) -> (Vec<usize>, Vec<f64>) {
    target
        .iter()
        .map(|p_dst| {
            let (best_idx, best_dist_sq) = source.iter().enumerate().fold(
                (0, f64::INFINITY),
                |(best_idx, best_dist_sq), (i, p_src)| {
                    let d = ops::squared_euclidean_distance(p_src, p_dst);
                    if d < best_dist_sq {
                        (i, d)
                    } else {
                        (best_idx, best_dist_sq)
                    }
                },
            );
            (best_idx, best_dist_sq.sqrt())
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pcfit_3d::transforms::axis_angle_to_rotation_matrix;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn create_random_points(num_points: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
        (0..num_points)
            .map(|_| [rng.random(), rng.random(), rng.random()])
            .collect()
    }

    fn create_random_rotation(
        factor: f64,
        rng: &mut StdRng,
    ) -> Result<[[f64; 3]; 3], &'static str> {
        let axis = [rng.random(), rng.random(), rng.random()];
        let angle = rng.random::<f64>() * factor;
        axis_angle_to_rotation_matrix(&axis, angle)
    }

    fn create_random_translation(factor: f64, rng: &mut StdRng) -> [f64; 3] {
        [
            rng.random::<f64>() * factor,
            rng.random::<f64>() * factor,
            rng.random::<f64>() * factor,
        ]
    }

    #[test]
    fn test_compute_centroids() {
        let points1 = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let points2 = vec![[7.0, 8.0, 9.0], [10.0, 11.0, 12.0]];
        let (centroid1, centroid2) = compute_centroids(&points1, &points2);
        assert_eq!(centroid1, [2.5, 3.5, 4.5]);
        assert_eq!(centroid2, [8.5, 9.5, 10.5]);
    }

    #[test]
    fn test_fit_transformation_identity() -> Result<(), ICPError> {
        let mut rng = StdRng::seed_from_u64(0);
        let points_src = create_random_points(30, &mut rng);
        let points_dst = points_src.clone();

        let transform = fit_transformation(&points_src, &points_dst)?;
        assert_relative_eq!(transform.distance_from_identity(), 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_fit_transformation_rotation() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(1);
        let points_src = create_random_points(30, &mut rng);

        let expected = RigidTransform::new(
            axis_angle_to_rotation_matrix(&[1.0, 0.0, 0.0], std::f64::consts::PI / 2.0)?,
            [0.0, 0.0, 0.0],
        );
        let points_dst = expected.apply_points(&points_src);

        let transform = fit_transformation(&points_src, &points_dst)?;

        for (res, exp) in transform.rotation.iter().zip(expected.rotation.iter()) {
            for (r, e) in res.iter().zip(exp.iter()) {
                assert_relative_eq!(r, e, epsilon = 1e-9);
            }
        }
        for (res, exp) in transform.translation.iter().zip(expected.translation.iter()) {
            assert_relative_eq!(res, exp, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_fit_transformation_random() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(2);
        let num_points = 30;
        let points_src = create_random_points(num_points, &mut rng);

        for _ in 0..10 {
            let expected = RigidTransform::new(
                create_random_rotation(1.0, &mut rng)?,
                create_random_translation(2.0, &mut rng),
            );
            let points_dst = expected.apply_points(&points_src);

            let transform = fit_transformation(&points_src, &points_dst)?;

            // estimate(M, T(M)) == T
            for i in 0..3 {
                assert_relative_eq!(
                    transform.translation[i],
                    expected.translation[i],
                    epsilon = 1e-9
                );
                for j in 0..3 {
                    assert_relative_eq!(
                        transform.rotation[i][j],
                        expected.rotation[i][j],
                        epsilon = 1e-9
                    );
                }
            }

            // and reconstructs the destination
            let reconstructed = transform.apply_points(&points_src);
            for (res, exp) in reconstructed.iter().zip(points_dst.iter()) {
                for (r, e) in res.iter().zip(exp.iter()) {
                    assert_relative_eq!(r, e, epsilon = 1e-9);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_fit_transformation_mirror_is_not_corrected() -> Result<(), ICPError> {
        let mut rng = StdRng::seed_from_u64(3);
        let points_src = create_random_points(20, &mut rng);
        let points_dst = points_src
            .iter()
            .map(|p| [-p[0], p[1], p[2]])
            .collect::<Vec<_>>();

        let transform = fit_transformation(&points_src, &points_dst)?;
        assert_relative_eq!(linalg::det_mat33(&transform.rotation), -1.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_fit_transformation_errors() {
        let a = vec![[0.0; 3]; 4];
        let b = vec![[0.0; 3]; 3];
        assert!(matches!(
            fit_transformation(&a, &b),
            Err(ICPError::MismatchedArrayLengths {
                left_len: 4,
                right_len: 3,
                ..
            })
        ));
        assert!(matches!(
            fit_transformation(&a[..2], &b[..2]),
            Err(ICPError::InsufficientPoints {
                required: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_find_correspondences() {
        let points_src = vec![[1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        let points_dst = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
        ];

        let (indices, distances) = find_correspondences(&points_src, &points_dst);

        assert_eq!(indices, vec![0, 0, 1, 1]);
        assert_eq!(distances, vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_find_correspondences_ties_keep_first() {
        let points_src = vec![[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]];
        let (indices, distances) = find_correspondences(&points_src, &[[0.0, 0.0, 0.0]]);
        assert_eq!(indices, vec![0]);
        assert_eq!(distances, vec![1.0]);
    }
}
