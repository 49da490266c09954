use approx::assert_relative_eq;
use pcfit::icp::{icp_vanilla, ICPConvergenceCriteria};
use pcfit::k3d::{
    fit::{fit_plane_eigen, fit_plane_ransac, PlaneRansacParams},
    linalg,
    pointcloud::PointCloud,
    transforms::{axis_angle_to_rotation_matrix, RigidTransform},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

// A tabletop scene: fit the table plane in a moved copy of the scene, register
// the copy back and check the plane normal maps onto the original one.
#[test]
fn test_plane_fit_survives_registration() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(10);

    let mut points = (0..150)
        .map(|_| [rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5), 0.0])
        .collect::<Vec<[f64; 3]>>();
    // a few objects on the table
    for _ in 0..40 {
        points.push([
            rng.random_range(-0.2..0.2),
            rng.random_range(-0.2..0.2),
            rng.random_range(0.05..0.3),
        ]);
    }
    let scene = PointCloud::new(points, None);

    let world_t_scene = RigidTransform::new(
        axis_angle_to_rotation_matrix(&[0.2, 1.0, 0.0], 0.02)?,
        [0.005, 0.0, 0.003],
    );
    let moved = scene.transformed(&world_t_scene);

    let params = PlaneRansacParams {
        max_iterations: 300,
        random_seed: Some(1),
        ..Default::default()
    };
    let table = fit_plane_ransac(moved.points(), &params)?;
    assert!(table.num_inliers >= 150);

    let inlier_points = table
        .inliers
        .iter()
        .map(|&i| moved.points()[i])
        .collect::<Vec<_>>();
    let refined = fit_plane_eigen(&inlier_points)?;

    let result = icp_vanilla(
        &moved,
        &scene,
        &RigidTransform::identity(),
        &ICPConvergenceCriteria::default(),
    )?;
    let back = result.transform.compose(&world_t_scene);
    assert!(back.distance_from_identity() < 1e-6);

    let normal_in_scene = linalg::mat33_mul_vec3(&result.transform.rotation, &refined.normal);
    assert_relative_eq!(normal_in_scene[2].abs(), 1.0, epsilon = 1e-6);
    Ok(())
}
