//! End-to-end tests for composing, decomposing and inverting homogeneous transforms.

use lina::{assert_approx_eq, batch, vec2, vec3, EulerOrder, Mat4f, Matrix, Quat, Vec3f};
use ndarray::array;

const SQRT_HALF: f32 = std::f32::consts::FRAC_1_SQRT_2;

#[rustfmt::skip]
fn reference_transform() -> Mat4f {
    // Translation (2, 2, 2), 90° rotation about z, scale (1, 2, 1).
    Matrix::from_rows([
        [0.0, -2.0, 0.0, 2.0],
        [1.0,  0.0, 0.0, 2.0],
        [0.0,  0.0, 1.0, 2.0],
        [0.0,  0.0, 0.0, 1.0],
    ])
}

#[test]
fn compose() {
    let mat = Mat4f::compose(
        vec3(2.0, 2.0, 2.0),
        Quat::from_xyzw(0.0, 0.0, SQRT_HALF, SQRT_HALF),
        vec3(1.0, 2.0, 1.0),
    );
    assert_approx_eq!(mat, reference_transform()).abs(1e-6);
}

#[test]
fn decompose() {
    let (translation, rotation, scaling) = reference_transform().decompose();
    assert_eq!(translation, vec3(2.0, 2.0, 2.0));
    assert_approx_eq!(
        rotation,
        Quat::from_xyzw(0.0, 0.0, SQRT_HALF, SQRT_HALF)
    )
    .abs(1e-6);
    assert_eq!(scaling, vec3(1.0, 2.0, 1.0));
}

#[test]
fn compose_decompose_round_trip() {
    fastrand::seed(0x1a2b3c4d);
    for _ in 0..100 {
        let angle = || (fastrand::f32() - 0.5) * std::f32::consts::TAU;
        let translation = vec3(fastrand::f32(), fastrand::f32(), fastrand::f32()) * 10.0;
        let rotation = Quat::from_euler(EulerOrder::Zxy, vec3(angle(), angle(), angle()));
        let scaling = vec3(
            fastrand::f32() + 0.5,
            fastrand::f32() + 0.5,
            fastrand::f32() + 0.5,
        );

        let mat = Mat4f::compose(translation, rotation, scaling);
        let (t, r, s) = mat.decompose();
        assert_approx_eq!(t, translation).abs(1e-4);
        assert_approx_eq!(s, scaling).abs(1e-4);
        // Either of `r` and `-r` is a valid decomposition.
        let sign = if r.dot(rotation) < 0.0 { -1.0 } else { 1.0 };
        assert_approx_eq!(r.into_vec() * sign, rotation.into_vec()).abs(1e-4);
    }
}

#[test]
fn inverse() {
    let mut mat = Mat4f::IDENTITY;
    mat[(0, 1)] = 5.0;
    let inv = mat.invert();
    assert_ne!(inv, mat);
    assert_eq!(inv * mat, Mat4f::IDENTITY);
    assert_eq!(mat * inv, Mat4f::IDENTITY);

    assert_approx_eq!(
        reference_transform() * reference_transform().invert(),
        Mat4f::IDENTITY
    )
    .abs(1e-6);
}

#[test]
fn multiply_and_premultiply() {
    let a = Matrix::from_fn(|row, col| (row * 4 + col) as f32);
    let b = a.map(|elem| elem + 1.0);

    let ab: Mat4f = a * b;
    let ba = b * a;
    assert_ne!(ab, ba);

    // In-place multiplication appends the transform like `a = a * b`; premultiplication is
    // written with the operands flipped.
    let mut m = a;
    m *= b;
    assert_eq!(m, ab);
    let mut m = a;
    m = b * m;
    assert_eq!(m, ba);
}

#[test]
fn unproject_perspective() {
    let projection = Mat4f::perspective(-1.0, 1.0, -1.0, 1.0, 1.0, 100.0);

    let world = vec3(0.3, -0.2, -50.0);
    let clip = projection * world.extend(1.0);
    let ndc = clip.truncate() / clip.w;

    let unprojected = ndc.truncate().unproject(&projection, ndc.z);
    assert_approx_eq!(unprojected, world).abs(1e-3);
}

#[test]
fn unproject_selects_depth() {
    let projection = Mat4f::orthographic(-2.0, 2.0, -2.0, 2.0, 0.1, 10.0);
    let point = vec2(1.0, -1.0).unproject(&projection, 0.0);
    // Projecting the unprojected point reproduces the input coordinates, with z from `depth`.
    let reprojected = projection.transform_point(point);
    assert_approx_eq!(reprojected, vec3(1.0, -1.0, 0.0)).abs(1e-6);
}

#[test]
fn batch_transform_matches_scalar() {
    let mat = Mat4f::compose(
        vec3(5.0, -1.0, 2.0),
        Quat::from_rotation_xyz(0.4, 0.0, -1.3),
        vec3(2.0, 2.0, 2.0),
    );
    let points = array![
        [0.0f32, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [-3.0, 0.5, 12.0],
    ];

    let transformed = batch::apply_matrix(points.view(), &mat, 1.0);
    for (row, out) in points.rows().into_iter().zip(transformed.rows()) {
        let v = vec3(row[0], row[1], row[2]);
        let expected = mat.transform_point(v);
        assert_approx_eq!(vec3(out[0], out[1], out[2]), expected).abs(1e-5);
    }

    // Directions ignore the translation component.
    let dirs = batch::apply_matrix(points.view(), &mat, 0.0);
    let x = vec3(dirs[[1, 0]], dirs[[1, 1]], dirs[[1, 2]]);
    assert_approx_eq!(x, mat.transform_direction(Vec3f::X)).abs(1e-5);
}

#[test]
fn quaternion_and_matrix_rotation_agree() {
    fastrand::seed(0xfeedbeef);
    for _ in 0..50 {
        let axis = vec3(
            fastrand::f32() - 0.5,
            fastrand::f32() - 0.5,
            fastrand::f32() - 0.5,
        );
        if axis.length2() < 1e-3 {
            continue;
        }
        let angle = (fastrand::f32() - 0.5) * std::f32::consts::TAU;
        let q = Quat::from_axis_angle(axis, angle);
        let v = vec3(fastrand::f32(), fastrand::f32(), fastrand::f32());

        assert_approx_eq!(q.to_mat3() * v, q * v).abs(1e-5);
        assert_approx_eq!(Mat4f::from_rotation(q).transform_point(v), q * v).abs(1e-5);
    }
}
