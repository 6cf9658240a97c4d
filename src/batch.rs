//! Batch operations over arrays of vectors, backed by [`ndarray`].
//!
//! Perception workloads rarely transform a single point; they transform a few hundred landmarks
//! at once. The functions in this module operate on 2-dimensional [`ndarray`] views where *each
//! row is one vector*, so an `n x 3` array holds `n` 3D points. Results are allocated as owned
//! arrays; every operation also has an `*_into` variant that writes into a caller-provided view
//! instead, for callers that reuse buffers across frames.
//!
//! Operations that require a fixed number of columns (3 for euclidean points) panic when handed
//! arrays of a different width, just like the fixed-size types panic on out-of-bounds indexing.
//!
//! # Examples
//!
//! ```
//! # use lina::*;
//! use ndarray::array;
//!
//! let points = array![
//!     [1.0, 0.0, 0.0],
//!     [0.0, 2.0, 0.0],
//! ];
//! let rotated = batch::rotate(points.view(), Quat::from_rotation_z(std::f32::consts::TAU / 4.0));
//! assert_approx_eq!(rotated[[0, 1]], 1.0).abs(1e-6);
//! assert_approx_eq!(rotated[[1, 0]], -2.0).abs(1e-6);
//! ```

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Zip};

use crate::{Mat4, Number, Quat, Sqrt, Trig, Vec3, Vector};

fn to_vec3<T: Copy>(row: ArrayView1<'_, T>) -> Vec3<T> {
    Vector::from_fn(|i| row[i])
}

fn write_vec3<T: Copy>(mut row: ArrayViewMut1<'_, T>, v: Vec3<T>) {
    for i in 0..3 {
        row[i] = v[i];
    }
}

/// Applies `f` to each row of `vectors`, writing the results to the rows of `out`.
fn map_rows3<T: Copy>(
    vectors: ArrayView2<'_, T>,
    mut out: ArrayViewMut2<'_, T>,
    f: impl FnMut(Vec3<T>) -> Vec3<T>,
) {
    let mut f = f;
    assert_eq!(
        vectors.ncols(),
        3,
        "expected rows of 3 elements, got {}",
        vectors.ncols()
    );
    assert_eq!(
        vectors.dim(),
        out.dim(),
        "mismatched output shape: {:?} vs {:?}",
        out.dim(),
        vectors.dim()
    );
    Zip::from(out.rows_mut())
        .and(vectors.rows())
        .for_each(|out, row| write_vec3(out, f(to_vec3(row))));
}

/// Normalizes each row of `vectors` to unit length.
///
/// # Examples
///
/// ```
/// # use lina::*;
/// use ndarray::array;
///
/// let normalized = batch::normalize(array![[3.0f32, 0.0, 0.0], [0.0, 0.0, -2.0]].view());
/// assert_eq!(normalized, array![[1.0, 0.0, 0.0], [0.0, 0.0, -1.0]]);
/// ```
pub fn normalize<T>(vectors: ArrayView2<'_, T>) -> Array2<T>
where
    T: Number + Sqrt,
{
    let mut out = Array2::from_shape_fn(vectors.raw_dim(), |_| T::ZERO);
    normalize_into(vectors, out.view_mut());
    out
}

/// Normalizes each row of `vectors` to unit length, writing the results to `out`.
///
/// # Panics
///
/// Panics if `out` does not have the exact shape of `vectors`.
pub fn normalize_into<T>(vectors: ArrayView2<'_, T>, mut out: ArrayViewMut2<'_, T>)
where
    T: Number + Sqrt,
{
    assert_eq!(
        vectors.dim(),
        out.dim(),
        "mismatched output shape: {:?} vs {:?}",
        out.dim(),
        vectors.dim()
    );
    Zip::from(out.rows_mut())
        .and(vectors.rows())
        .for_each(|mut out, row| {
            let length = row.fold(T::ZERO, |acc, &elem| acc + elem * elem).sqrt();
            out.iter_mut()
                .zip(row.iter())
                .for_each(|(out, &elem)| *out = elem / length);
        });
}

/// Appends a homogeneous coordinate with value `w` to each row of `vectors`.
///
/// Use `w` = 1 for positions (so that translation transforms apply to them) and `w` = 0 for
/// directions (so that they don't).
///
/// # Examples
///
/// ```
/// # use lina::*;
/// use ndarray::array;
///
/// let hom = batch::make_homogeneous(array![[1.0, 2.0, 3.0]].view(), 1.0);
/// assert_eq!(hom, array![[1.0, 2.0, 3.0, 1.0]]);
/// ```
pub fn make_homogeneous<T>(vectors: ArrayView2<'_, T>, w: T) -> Array2<T>
where
    T: Number,
{
    let (rows, cols) = vectors.dim();
    let mut out = Array2::from_shape_fn((rows, cols + 1), |_| T::ZERO);
    make_homogeneous_into(vectors, w, out.view_mut());
    out
}

/// Appends a homogeneous coordinate with value `w` to each row of `vectors`, writing the results
/// to `out`.
///
/// # Panics
///
/// Panics if `out` does not have exactly one column more than `vectors`.
pub fn make_homogeneous_into<T>(vectors: ArrayView2<'_, T>, w: T, mut out: ArrayViewMut2<'_, T>)
where
    T: Number,
{
    let (rows, cols) = vectors.dim();
    assert_eq!(
        out.dim(),
        (rows, cols + 1),
        "mismatched output shape: {:?} vs {:?}",
        out.dim(),
        (rows, cols + 1)
    );
    Zip::from(out.rows_mut())
        .and(vectors.rows())
        .for_each(|mut out, row| {
            for (i, &elem) in row.iter().enumerate() {
                out[i] = elem;
            }
            out[cols] = w;
        });
}

/// Transforms each row of `vectors` by a homogeneous transformation matrix.
///
/// Rows are lifted into homogeneous coordinates with the given `w` (1 for positions, 0 for
/// directions), multiplied with `matrix`, and the resulting `w` coordinate is sliced off again.
///
/// # Examples
///
/// ```
/// # use lina::*;
/// use ndarray::array;
///
/// let mat = Mat4f::from_translation(vec3(0.0, 0.0, 5.0));
/// let points = batch::apply_matrix(array![[1.0, 2.0, 3.0]].view(), &mat, 1.0);
/// assert_eq!(points, array![[1.0, 2.0, 8.0]]);
///
/// // With w = 0 the translation does not apply.
/// let directions = batch::apply_matrix(array![[1.0, 2.0, 3.0]].view(), &mat, 0.0);
/// assert_eq!(directions, array![[1.0, 2.0, 3.0]]);
/// ```
pub fn apply_matrix<T>(vectors: ArrayView2<'_, T>, matrix: &Mat4<T>, w: T) -> Array2<T>
where
    T: Number,
{
    let mut out = Array2::from_shape_fn(vectors.raw_dim(), |_| T::ZERO);
    apply_matrix_into(vectors, matrix, w, out.view_mut());
    out
}

/// Transforms each row of `vectors` by a homogeneous transformation matrix, writing the results
/// to `out`.
///
/// # Panics
///
/// Panics if the rows don't have 3 elements, or if `out` does not have the exact shape of
/// `vectors`.
pub fn apply_matrix_into<T>(
    vectors: ArrayView2<'_, T>,
    matrix: &Mat4<T>,
    w: T,
    out: ArrayViewMut2<'_, T>,
) where
    T: Number,
{
    map_rows3(vectors, out, |v| (*matrix * v.extend(w)).truncate());
}

/// Computes the euclidean distance between corresponding rows of `a` and `b`.
///
/// # Examples
///
/// ```
/// # use lina::*;
/// use ndarray::array;
///
/// let a = array![[0.0f32, 0.0, 0.0], [1.0, 1.0, 1.0]];
/// let b = array![[3.0f32, 4.0, 0.0], [1.0, 1.0, 3.0]];
/// assert_eq!(batch::distance(a.view(), b.view()), ndarray::arr1(&[5.0, 2.0]));
/// ```
pub fn distance<T>(a: ArrayView2<'_, T>, b: ArrayView2<'_, T>) -> Array1<T>
where
    T: Number + Sqrt,
{
    let mut out = Array1::from_shape_fn(a.nrows(), |_| T::ZERO);
    distance_into(a, b, out.view_mut());
    out
}

/// Computes the euclidean distance between corresponding rows of `a` and `b`, writing the
/// results to `out`.
///
/// # Panics
///
/// Panics if `a` and `b` have different shapes, or if `out` has fewer or more elements than the
/// inputs have rows.
pub fn distance_into<T>(a: ArrayView2<'_, T>, b: ArrayView2<'_, T>, mut out: ArrayViewMut1<'_, T>)
where
    T: Number + Sqrt,
{
    assert_eq!(
        a.dim(),
        b.dim(),
        "mismatched input shapes: {:?} vs {:?}",
        a.dim(),
        b.dim()
    );
    assert_eq!(
        out.len(),
        a.nrows(),
        "mismatched output length: {} vs {} rows",
        out.len(),
        a.nrows()
    );
    Zip::from(&mut out)
        .and(a.rows())
        .and(b.rows())
        .for_each(|out, a, b| {
            *out = a
                .iter()
                .zip(b.iter())
                .fold(T::ZERO, |acc, (&a, &b)| acc + (a - b) * (a - b))
                .sqrt();
        });
}

/// Converts each euclidean `(x, y, z)` row into spherical `(r, phi, theta)` coordinates.
///
/// See [`Vector::to_spherical`] for the convention used.
pub fn euclidean_to_spherical<T>(vectors: ArrayView2<'_, T>) -> Array2<T>
where
    T: Number + Sqrt + Trig + PartialOrd,
{
    let mut out = Array2::from_shape_fn(vectors.raw_dim(), |_| T::ZERO);
    euclidean_to_spherical_into(vectors, out.view_mut());
    out
}

/// Converts each euclidean `(x, y, z)` row into spherical `(r, phi, theta)` coordinates, writing
/// the results to `out`.
pub fn euclidean_to_spherical_into<T>(vectors: ArrayView2<'_, T>, out: ArrayViewMut2<'_, T>)
where
    T: Number + Sqrt + Trig + PartialOrd,
{
    map_rows3(vectors, out, |v| v.to_spherical());
}

/// Converts each spherical `(r, phi, theta)` row into euclidean `(x, y, z)` coordinates.
///
/// See [`Vector::from_spherical`] for the convention used.
pub fn spherical_to_euclidean<T>(vectors: ArrayView2<'_, T>) -> Array2<T>
where
    T: Number + Trig,
{
    let mut out = Array2::from_shape_fn(vectors.raw_dim(), |_| T::ZERO);
    spherical_to_euclidean_into(vectors, out.view_mut());
    out
}

/// Converts each spherical `(r, phi, theta)` row into euclidean `(x, y, z)` coordinates, writing
/// the results to `out`.
pub fn spherical_to_euclidean_into<T>(vectors: ArrayView2<'_, T>, out: ArrayViewMut2<'_, T>)
where
    T: Number + Trig,
{
    map_rows3(vectors, out, |v| v.from_spherical());
}

/// Rotates each row of `vectors` by the unit quaternion `rotation`.
pub fn rotate<T>(vectors: ArrayView2<'_, T>, rotation: Quat<T>) -> Array2<T>
where
    T: Number,
{
    let mut out = Array2::from_shape_fn(vectors.raw_dim(), |_| T::ZERO);
    rotate_into(vectors, rotation, out.view_mut());
    out
}

/// Rotates each row of `vectors` by the unit quaternion `rotation`, writing the results to `out`.
pub fn rotate_into<T>(vectors: ArrayView2<'_, T>, rotation: Quat<T>, out: ArrayViewMut2<'_, T>)
where
    T: Number,
{
    map_rows3(vectors, out, |v| rotation * v);
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use crate::{assert_approx_eq, vec3, Mat4f, Quat};

    use super::*;

    #[test]
    fn normalize_rows() {
        let out = normalize(array![[3.0f32, 4.0, 0.0], [0.0, 0.0, 0.5]].view());
        assert_approx_eq!(out[[0, 0]], 0.6);
        assert_approx_eq!(out[[0, 1]], 0.8);
        assert_approx_eq!(out[[1, 2]], 1.0);
    }

    #[test]
    fn normalize_reuses_buffer() {
        let input = array![[2.0f32, 0.0, 0.0]];
        let mut out = Array2::from_shape_fn((1, 3), |_| 0.0f32);
        normalize_into(input.view(), out.view_mut());
        assert_eq!(out, array![[1.0, 0.0, 0.0]]);
    }

    #[test]
    #[should_panic(expected = "mismatched output shape")]
    fn normalize_shape_mismatch() {
        let input = array![[2.0f32, 0.0, 0.0]];
        let mut out = Array2::from_shape_fn((2, 3), |_| 0.0f32);
        normalize_into(input.view(), out.view_mut());
    }

    #[test]
    fn homogeneous() {
        let hom = make_homogeneous(array![[1, 2, 3], [4, 5, 6]].view(), 9);
        assert_eq!(hom, array![[1, 2, 3, 9], [4, 5, 6, 9]]);
    }

    #[test]
    fn apply_matrix_matches_scalar() {
        let mat = Mat4f::compose(
            vec3(1.0, 2.0, 3.0),
            Quat::from_rotation_y(0.5),
            vec3(1.0, -2.0, 1.5),
        );
        let points = array![[1.0f32, 0.5, -2.0], [0.0, 0.0, 0.0]];
        let out = apply_matrix(points.view(), &mat, 1.0);
        for (row, out) in points.rows().into_iter().zip(out.rows()) {
            let expected = mat.transform_point(to_vec3(row));
            assert_approx_eq!(to_vec3(out), expected).abs(1e-6);
        }
    }

    #[test]
    #[should_panic(expected = "expected rows of 3 elements")]
    fn apply_matrix_wrong_width() {
        let _ = apply_matrix(array![[1.0f32, 2.0]].view(), &Mat4f::IDENTITY, 1.0);
    }

    #[test]
    fn distances() {
        let a = array![[0.0f32, 0.0, 0.0], [1.0, 2.0, 3.0]];
        let b = array![[1.0f32, 2.0, 2.0], [1.0, 2.0, 3.0]];
        let d = distance(a.view(), b.view());
        assert_eq!(d, ndarray::arr1(&[3.0, 0.0]));
    }

    #[test]
    fn spherical_round_trip() {
        let points = array![[1.0f32, 2.0, 3.0], [-0.5, 0.25, 1.0]];
        let back = spherical_to_euclidean(euclidean_to_spherical(points.view()).view());
        for (a, b) in points.rows().into_iter().zip(back.rows()) {
            assert_approx_eq!(to_vec3(a), to_vec3(b)).abs(1e-5);
        }
    }

    #[test]
    fn rotate_matches_scalar() {
        let q = Quat::from_rotation_xyz(0.2f32, -0.8, 0.5);
        let points = array![[1.0f32, 2.0, 3.0], [0.0, -1.0, 0.5]];
        let out = rotate(points.view(), q);
        for (row, out) in points.rows().into_iter().zip(out.rows()) {
            assert_approx_eq!(to_vec3(out), q * to_vec3(row)).abs(1e-6);
        }
    }
}
