use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pcfit_3d::linalg;

// transform point by point using faer column vectors
fn transform_points_col(
    src_points: &[[f64; 3]],
    dst_r_src: &[[f64; 3]; 3],
    dst_t_src: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) {
    assert_eq!(src_points.len(), dst_points.len());

    let dst_r_src_mat = faer::Mat::<f64>::from_fn(3, 3, |i, j| dst_r_src[i][j]);
    let dst_t_src_col = faer::col![dst_t_src[0], dst_t_src[1], dst_t_src[2]];

    for (point_dst, point_src) in dst_points.iter_mut().zip(src_points.iter()) {
        let point_src_col = faer::col![point_src[0], point_src[1], point_src[2]];
        let point_dst_col = &dst_r_src_mat * point_src_col + &dst_t_src_col;
        for (i, point_dst_col_val) in point_dst_col.iter().enumerate().take(3) {
            point_dst[i] = *point_dst_col_val;
        }
    }
}

fn bench_transform_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_points");

    for num_points in [1000, 10000, 100000].iter() {
        group.throughput(criterion::Throughput::Elements(*num_points as u64));
        let parameter_string = format!("{}", num_points);

        let src_points = vec![[2.0, 2.0, 2.0]; *num_points];
        let rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let translation = [0.0, 0.0, 0.0];
        let mut dst_points = vec![[0.0; 3]; src_points.len()];

        group.bench_function(
            BenchmarkId::new("transform_points", &parameter_string),
            |b| {
                b.iter(|| {
                    linalg::transform_points(&src_points, &rotation, &translation, &mut dst_points);
                    black_box(&dst_points);
                });
            },
        );

        group.bench_function(
            BenchmarkId::new("transform_points_col", &parameter_string),
            |b| {
                b.iter(|| {
                    transform_points_col(&src_points, &rotation, &translation, &mut dst_points);
                    black_box(&dst_points);
                });
            },
        );

        let axis = [0.0, 0.0, 1.0];
        group.bench_function(
            BenchmarkId::new("project_points_orthogonal", &parameter_string),
            |b| {
                b.iter(|| black_box(linalg::project_points_orthogonal(&src_points, &axis)));
            },
        );
    }
}

fn bench_decompositions(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompositions33");

    let a_mat = [[4.0, 1.0, 0.5], [1.0, 3.0, 0.2], [0.5, 0.2, 1.0]];

    group.bench_function(BenchmarkId::new("symmetric_eigen33", ""), |b| {
        b.iter(|| black_box(linalg::symmetric_eigen33(black_box(&a_mat))));
    });

    group.bench_function(BenchmarkId::new("svd33", ""), |b| {
        b.iter(|| black_box(linalg::svd33(black_box(&a_mat))));
    });
}

criterion_group!(benches, bench_transform_points, bench_decompositions);
criterion_main!(benches);
