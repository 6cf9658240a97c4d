use std::{array, fmt};

use crate::{Number, One, Quat, Sqrt, Trig, Vector, Zero};

mod ops;

/// A 1x1 matrix.
pub type Mat1<T> = Matrix<T, 1, 1>;
/// A 1x1 matrix with [`f32`] elements.
pub type Mat1f = Mat1<f32>;
/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;

/// A matrix with 2 rows and 3 columns.
pub type Mat2x3<T> = Matrix<T, 2, 3>;
/// A matrix with 2 rows and 4 columns.
pub type Mat2x4<T> = Matrix<T, 2, 4>;
/// A matrix with 3 rows and 2 columns.
pub type Mat3x2<T> = Matrix<T, 3, 2>;
/// A matrix with 3 rows and 4 columns.
pub type Mat3x4<T> = Matrix<T, 3, 4>;
/// A matrix with 4 rows and 2 columns.
pub type Mat4x2<T> = Matrix<T, 4, 2>;
/// A matrix with 4 rows and 3 columns.
pub type Mat4x3<T> = Matrix<T, 4, 3>;

/// A column-major matrix with `R` rows and `C` columns, and element type `T`.
///
/// # Construction
///
/// There are several ways to create a [`Matrix`]:
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] allow filling a matrix with raw elements,
///   as well as creating them from an array of row or column vectors.
/// - [`Matrix::from_fn`] will create each element by invoking a closure with its row and column.
/// - For square matrices (where `R` equals `C`), [`Matrix::from_diagonal`] can be used to create a
///   matrix with a specified diagonal and zero outside of its diagonal.
/// - [`Matrix::rotation_clockwise`] and [`Matrix::rotation_counterclockwise`] allow creating 2D
///   rotation matrices from a rotation angle.
/// - 4x4 matrices have a family of constructors for homogeneous 3D transforms:
///   [`Matrix::from_translation`], [`Matrix::from_scale`], [`Matrix::from_rotation`],
///   [`Matrix::compose`], as well as the [`Matrix::orthographic`] and [`Matrix::perspective`]
///   projections.
///
/// Additionally, some associated constants for commonly used matrices are defined:
///
/// - [`Matrix::ZERO`] is a matrix with every element set to 0.
/// - [`Matrix::IDENTITY`] is a square matrix with 1 on its diagonal and 0 everywhere else.
///
/// # Element Access
///
/// [`Matrix`] implements the [`Index`] and [`IndexMut`] traits for tuples of `(usize, usize)`. The
/// first element of the tuple is the *row* (Y coordinate), the second is the *column* (X
/// coordinate), matching common mathematical notation. Indices are 0-based.
///
/// ```
/// # use lina::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// mat[(0, 0)] = 4;
/// assert_eq!(mat[(0, 0)], 4);
/// assert_eq!(mat[(0, 1)], 1);
/// ```
///
/// Indexing out of bounds will result in a panic, just like it does for slices. [`Matrix::get`] and
/// [`Matrix::get_mut`] return [`Option`]s instead and can be used for checked indexing.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>([[T; R]; C]);

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> {}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The smallest dimension of the matrix (`R` or `C`).
    const MIN_DIMENSION: usize = if R > C { C } else { R };

    /// Creates a [`Matrix`] from an array of row vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<Vector<T, C>>>(rows: [U; R]) -> Self
    where
        T: Copy,
    {
        Matrix::from_columns(rows).transpose()
    }

    /// Creates a [`Matrix`] from an array of column vectors.
    pub fn from_columns<U: Into<Vector<T, R>>>(columns: [U; C]) -> Self {
        Self(columns.map(|col| col.into().into_array()))
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each element.
    ///
    /// This mirrors [`array::from_fn`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Matrix::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|col| array::from_fn(|row| cb(row, col))))
    }

    /// Applies a closure to each element, returning a new matrix.
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|column| column.map(|v| f(v))))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]).transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(self) -> Matrix<T, C, R>
    where
        T: Copy,
    {
        Matrix::from_fn(|row, col| self.0[row][col])
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.get(0, 0), Some(&0));
    /// assert_eq!(mat.get(1, 0), Some(&3));
    /// assert_eq!(mat.get(2, 0), None);
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(col).and_then(|col| col.get(row))
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0.get_mut(col).and_then(|col| col.get_mut(row))
    }

    /// Returns the `col`-th column as a [`Vector`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.column(1), vec2(1, 4));
    /// ```
    pub fn column(&self, col: usize) -> Vector<T, R>
    where
        T: Copy,
    {
        self.0[col].into()
    }

    /// Returns the `row`-th row as a [`Vector`].
    pub fn row(&self, row: usize) -> Vector<T, C>
    where
        T: Copy,
    {
        Vector::from_fn(|col| self.0[col][row])
    }

    /// Returns a matrix with the contents of `self`, but a potentially different size.
    ///
    /// Elements not present in `self` will be initialized with [`T::ZERO`][`Zero::ZERO`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2, 3],
    /// ]);
    /// let resized = mat.resize::<2, 2>();
    /// assert_eq!(resized, Matrix::from_rows([
    ///     [1, 2],
    ///     [0, 0],
    /// ]));
    /// ```
    pub fn resize<const R2: usize, const C2: usize>(self) -> Matrix<T, R2, C2>
    where
        T: Zero + Copy,
    {
        Matrix::from_fn(|row, col| {
            if col < C && row < R {
                self.0[col][row]
            } else {
                T::ZERO
            }
        })
    }
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T: fmt::Debug, const R: usize, const C: usize>(
            &'a Matrix<T, R, C>,
            usize,
        );
        impl<'a, T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for FormatRow<'a, T, R, C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for col in 0..C {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", self.0[(self.1, col)])?;
                }
                write!(f, "]")?;
                Ok(())
            }
        }

        let mut list = f.debug_list();
        for row in 0..R {
            list.entry(&FormatRow(self, row));
        }
        list.finish()
    }
}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    const ZERO_COLUMN: [T; R] = [T::ZERO; R];

    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([Self::ZERO_COLUMN; C]);
}

impl<T: Zero + One + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The identity matrix.
    ///
    /// The matrix has the value 1 on its diagonal and 0 everywhere else.
    ///
    /// Multiplying any vector with this matrix returns the vector unchanged.
    pub const IDENTITY: Self = {
        let mut mat = Self::ZERO;
        let mut i = 0;
        while i < Self::MIN_DIMENSION {
            mat.0[i][i] = T::ONE;
            i += 1;
        }
        mat
    };
}

impl<T, const N: usize> Matrix<T, N, N> {
    /// Returns a [`Vector`] holding the diagonal elements of this square matrix.
    ///
    /// *Note*: This method is restricted to square matrices due to limitations in Rust's const
    /// generics.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.into_diagonal(), [1, 4]);
    /// ```
    pub fn into_diagonal(self) -> Vector<T, N>
    where
        T: Copy,
    {
        array::from_fn(|i| self[(i, i)]).into()
    }

    /// Creates a square matrix from its diagonal.
    ///
    /// Elements outside the diagonal will be initialized with zero.
    ///
    /// *Note*: This method is intentionally restricted to square matrices to allow type inference
    /// of the created [`Matrix`]. To create a non-square matrix from its diagonal, use
    /// [`Matrix::from_fn`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag, Matrix::from_rows([
    ///     [1, 0, 0],
    ///     [0, 2, 0],
    ///     [0, 0, 3],
    /// ]));
    /// ```
    pub fn from_diagonal<D: Into<Vector<T, N>>>(diag: D) -> Self
    where
        T: Zero + Copy,
    {
        let diag = diag.into();
        Self::from_fn(|row, col| if row == col { diag[row] } else { T::ZERO })
    }

    /// Returns the *trace* of the matrix (the sum of all elements on the diagonal).
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag.trace(), 1 + 2 + 3);
    ///
    /// assert_eq!(Mat3f::IDENTITY.trace(), 3.0);
    /// ```
    pub fn trace(&self) -> T
    where
        T: Number,
    {
        (0..N).fold(T::ZERO, |acc, i| acc + self[(i, i)])
    }
}

impl<T: Number> Matrix<T, 1, 1> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    #[inline]
    pub fn determinant(&self) -> T {
        self[(0, 0)]
    }

    /// Inverts this 1x1 matrix.
    ///
    /// # Panics
    ///
    /// This method will panic if `self` is not invertible (ie. if its [`determinant()`] is zero).
    ///
    /// [`determinant()`]: Self::determinant
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if det == T::ZERO {
            panic!("attempt to invert a non-invertible matrix");
        }

        Matrix::from_columns([[T::ONE / self[(0, 0)]]])
    }
}

impl<T: Number> Matrix<T, 2, 2> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    #[inline]
    pub fn determinant(&self) -> T {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }

    /// Inverts this 2x2 matrix.
    ///
    /// # Panics
    ///
    /// This method will panic if `self` is not invertible (ie. if its [`determinant()`] is zero).
    ///
    /// [`determinant()`]: Self::determinant
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// assert_eq!(Mat2::<i32>::IDENTITY.invert(), Mat2::<i32>::IDENTITY);
    /// assert_eq!(Mat2f::IDENTITY.invert(), Mat2f::IDENTITY);
    /// ```
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if det == T::ZERO {
            panic!("attempt to invert a non-invertible matrix");
        }

        let [[a, c], [b, d]] = self.0;
        Matrix::from_columns([[d, -c], [-b, a]]) * (T::ONE / det)
    }

    /// Creates a 2x2 rotation matrix for a clockwise rotation in the XY plane.
    pub fn rotation_clockwise(radians: T) -> Self
    where
        T: Trig,
    {
        Self::rotation_counterclockwise(-radians)
    }

    /// Creates a 2x2 rotation matrix for a counterclockwise rotation in the XY plane.
    pub fn rotation_counterclockwise(radians: T) -> Self
    where
        T: Trig,
    {
        Self::from_columns([
            [radians.cos(), radians.sin()],
            [-radians.sin(), radians.cos()],
        ])
    }
}

impl<T: Number> Matrix<T, 3, 3> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> T {
        let [[a, d, g], [b, e, h], [c, f, i]] = self.0;
        a * e * i + b * f * g + c * d * h - c * e * g - b * d * i - a * f * h
    }

    /// Inverts this 3x3 matrix.
    ///
    /// # Panics
    ///
    /// This method will panic if `self` is not invertible (ie. if its [`determinant()`] is zero).
    ///
    /// [`determinant()`]: Self::determinant
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if det == T::ZERO {
            panic!("attempt to invert a non-invertible matrix");
        }

        let m = |r, c| self[(r, c)];
        #[rustfmt::skip]
        let adjugate = Matrix::from_rows([
            [m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1), m(0, 2) * m(2, 1) - m(0, 1) * m(2, 2), m(0, 1) * m(1, 2) - m(0, 2) * m(1, 1)],
            [m(1, 2) * m(2, 0) - m(1, 0) * m(2, 2), m(0, 0) * m(2, 2) - m(0, 2) * m(2, 0), m(0, 2) * m(1, 0) - m(0, 0) * m(1, 2)],
            [m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0), m(0, 1) * m(2, 0) - m(0, 0) * m(2, 1), m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0)],
        ]);
        adjugate * (T::ONE / det)
    }
}

impl<T: Number> Matrix<T, 4, 4> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> T {
        let (s, c) = self.subfactors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// 2x2 subdeterminants of the upper and lower half, used by [`determinant`][Self::determinant]
    /// and [`invert`][Self::invert].
    fn subfactors(&self) -> ([T; 6], [T; 6]) {
        let m = |r, c| self[(r, c)];
        let s = [
            m(0, 0) * m(1, 1) - m(1, 0) * m(0, 1),
            m(0, 0) * m(1, 2) - m(1, 0) * m(0, 2),
            m(0, 0) * m(1, 3) - m(1, 0) * m(0, 3),
            m(0, 1) * m(1, 2) - m(1, 1) * m(0, 2),
            m(0, 1) * m(1, 3) - m(1, 1) * m(0, 3),
            m(0, 2) * m(1, 3) - m(1, 2) * m(0, 3),
        ];
        let c = [
            m(2, 0) * m(3, 1) - m(3, 0) * m(2, 1),
            m(2, 0) * m(3, 2) - m(3, 0) * m(2, 2),
            m(2, 0) * m(3, 3) - m(3, 0) * m(2, 3),
            m(2, 1) * m(3, 2) - m(3, 1) * m(2, 2),
            m(2, 1) * m(3, 3) - m(3, 1) * m(2, 3),
            m(2, 2) * m(3, 3) - m(3, 2) * m(2, 3),
        ];
        (s, c)
    }

    /// Inverts this 4x4 matrix.
    ///
    /// # Panics
    ///
    /// This method will panic if `self` is not invertible (ie. if its [`determinant()`] is zero).
    ///
    /// [`determinant()`]: Self::determinant
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Mat4f::from_translation(vec3(1.0, 2.0, 3.0));
    /// let inv = mat.invert();
    /// assert_eq!(inv * mat, Mat4f::IDENTITY);
    /// ```
    pub fn invert(&self) -> Self {
        let (s, c) = self.subfactors();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if det == T::ZERO {
            panic!("attempt to invert a non-invertible matrix");
        }
        let inv_det = T::ONE / det;

        let m = |r, c| self[(r, c)];
        #[rustfmt::skip]
        let inverse = Matrix::from_rows([
            [
                (m(1, 1) * c[5] - m(1, 2) * c[4] + m(1, 3) * c[3]) * inv_det,
                (-m(0, 1) * c[5] + m(0, 2) * c[4] - m(0, 3) * c[3]) * inv_det,
                (m(3, 1) * s[5] - m(3, 2) * s[4] + m(3, 3) * s[3]) * inv_det,
                (-m(2, 1) * s[5] + m(2, 2) * s[4] - m(2, 3) * s[3]) * inv_det,
            ],
            [
                (-m(1, 0) * c[5] + m(1, 2) * c[2] - m(1, 3) * c[1]) * inv_det,
                (m(0, 0) * c[5] - m(0, 2) * c[2] + m(0, 3) * c[1]) * inv_det,
                (-m(3, 0) * s[5] + m(3, 2) * s[2] - m(3, 3) * s[1]) * inv_det,
                (m(2, 0) * s[5] - m(2, 2) * s[2] + m(2, 3) * s[1]) * inv_det,
            ],
            [
                (m(1, 0) * c[4] - m(1, 1) * c[2] + m(1, 3) * c[0]) * inv_det,
                (-m(0, 0) * c[4] + m(0, 1) * c[2] - m(0, 3) * c[0]) * inv_det,
                (m(3, 0) * s[4] - m(3, 1) * s[2] + m(3, 3) * s[0]) * inv_det,
                (-m(2, 0) * s[4] + m(2, 1) * s[2] - m(2, 3) * s[0]) * inv_det,
            ],
            [
                (-m(1, 0) * c[3] + m(1, 1) * c[1] - m(1, 2) * c[0]) * inv_det,
                (m(0, 0) * c[3] - m(0, 1) * c[1] + m(0, 2) * c[0]) * inv_det,
                (-m(3, 0) * s[3] + m(3, 1) * s[1] - m(3, 2) * s[0]) * inv_det,
                (m(2, 0) * s[3] - m(2, 1) * s[1] + m(2, 2) * s[0]) * inv_det,
            ],
        ]);
        inverse
    }

    /// Creates a homogeneous transform that translates points by `translation`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Mat4f::from_translation(vec3(1.0, 2.0, 3.0));
    /// assert_eq!(mat.transform_point(Vec3f::ZERO), vec3(1.0, 2.0, 3.0));
    /// assert_eq!(mat.transform_direction(Vec3f::X), Vec3f::X);
    /// ```
    pub fn from_translation(translation: Vector<T, 3>) -> Self {
        let mut mat = Self::IDENTITY;
        mat.0[3] = translation.extend(T::ONE).into_array();
        mat
    }

    /// Creates a homogeneous transform that scales each axis by the corresponding element of
    /// `scaling`.
    pub fn from_scale(scaling: Vector<T, 3>) -> Self {
        Self::from_diagonal(scaling.extend(T::ONE))
    }

    /// Creates a homogeneous transform that rotates by `rotation`.
    pub fn from_rotation(rotation: Quat<T>) -> Self {
        Self::compose(Vector::ZERO, rotation, crate::vec3(T::ONE, T::ONE, T::ONE))
    }

    /// Builds a homogeneous transform from translation, rotation and scaling components.
    ///
    /// The resulting matrix scales first, then rotates, then translates (ie. it is the product
    /// of the three individual transforms in that order).
    ///
    /// Inverse of [`Matrix::decompose`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Mat4f::compose(
    ///     vec3(2.0, 2.0, 2.0),
    ///     Quat::from_rotation_z(std::f32::consts::TAU / 4.0),
    ///     vec3(1.0, 2.0, 1.0),
    /// );
    /// assert_approx_eq!(mat.transform_point(vec3(1.0, 0.0, 0.0)), vec3(2.0, 3.0, 2.0)).abs(1e-6);
    /// ```
    pub fn compose(translation: Vector<T, 3>, rotation: Quat<T>, scaling: Vector<T, 3>) -> Self {
        let rot = rotation.to_mat3();
        Self::from_columns([
            (rot.column(0) * scaling.x).extend(T::ZERO),
            (rot.column(1) * scaling.y).extend(T::ZERO),
            (rot.column(2) * scaling.z).extend(T::ZERO),
            translation.extend(T::ONE),
        ])
    }

    /// Splits a homogeneous transform into translation, rotation and scaling components.
    ///
    /// Inverse of [`Matrix::compose`]. If the upper 3x3 part of `self` has a negative
    /// determinant (a reflection), the X axis scale is reported as negative.
    ///
    /// The result is only meaningful for matrices built from translation, rotation and scaling
    /// transforms; perspective matrices cannot be decomposed this way.
    pub fn decompose(&self) -> (Vector<T, 3>, Quat<T>, Vector<T, 3>)
    where
        T: Sqrt + PartialOrd + fmt::Debug,
    {
        let translation = self.translation();

        let mut scaling = crate::vec3(
            self.column(0).truncate().length(),
            self.column(1).truncate().length(),
            self.column(2).truncate().length(),
        );
        if self.upper_left().determinant() < T::ZERO {
            scaling.x = -scaling.x;
        }

        let rot = Matrix::from_columns([
            self.column(0).truncate() / scaling.x,
            self.column(1).truncate() / scaling.y,
            self.column(2).truncate() / scaling.z,
        ]);
        let rotation = Quat::from_rotation_matrix(&rot);
        log::trace!("decompose: t = {translation:?}, r = {rotation:?}, s = {scaling:?}");

        (translation, rotation, scaling)
    }

    /// Returns the translation component of this homogeneous transform.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let mat = Mat4f::from_translation(vec3(1.0, 2.0, 3.0));
    /// assert_eq!(mat.translation(), vec3(1.0, 2.0, 3.0));
    /// ```
    pub fn translation(&self) -> Vector<T, 3> {
        self.column(3).truncate()
    }

    /// Returns the upper-left 3x3 part of this matrix.
    pub fn upper_left(&self) -> Matrix<T, 3, 3> {
        Matrix::from_fn(|row, col| self[(row, col)])
    }

    /// Transforms a 3D point, applying the translation component of `self`.
    ///
    /// The point is lifted into homogeneous coordinates with `w = 1` and the `w` coordinate of
    /// the product is sliced off again. No perspective division takes place; use
    /// [`Vec2::unproject`][Vector::unproject] to invert a projection.
    pub fn transform_point(&self, point: Vector<T, 3>) -> Vector<T, 3> {
        (*self * point.extend(T::ONE)).truncate()
    }

    /// Transforms a 3D direction vector, ignoring the translation component of `self`.
    pub fn transform_direction(&self, direction: Vector<T, 3>) -> Vector<T, 3> {
        (*self * direction.extend(T::ZERO)).truncate()
    }

    /// Creates an orthographic projection matrix mapping the given axis-aligned box onto the
    /// canonical view volume.
    ///
    /// `near` and `far` are the distances of the near and far clip planes along the -Z axis (the
    /// camera looks down -Z).
    pub fn orthographic(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
        let two = T::ONE + T::ONE;
        let mut mat = Self::IDENTITY;
        mat[(0, 0)] = two / (right - left);
        mat[(1, 1)] = two / (top - bottom);
        mat[(2, 2)] = -two / (far - near);
        mat[(0, 3)] = -(right + left) / (right - left);
        mat[(1, 3)] = -(top + bottom) / (top - bottom);
        mat[(2, 3)] = -(far + near) / (far - near);
        mat
    }

    /// Creates a perspective projection matrix from the given view frustum.
    ///
    /// The frustum is described by the `left`/`right`/`bottom`/`top` extents of the near clip
    /// plane and the distances `near` and `far` of the two clip planes (the camera looks down
    /// -Z). Points on the near plane project onto Z = -1, points on the far plane onto Z = 1.
    pub fn perspective(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
        let two = T::ONE + T::ONE;
        let mut mat = Self::ZERO;
        mat[(0, 0)] = two * near / (right - left);
        mat[(1, 1)] = two * near / (top - bottom);
        mat[(0, 2)] = (right + left) / (right - left);
        mat[(1, 2)] = (top + bottom) / (top - bottom);
        mat[(2, 2)] = -(far + near) / (far - near);
        mat[(2, 3)] = -two * far * near / (far - near);
        mat[(3, 2)] = -T::ONE;
        mat
    }
}

impl<T, const R: usize, const C: usize> Default for Matrix<T, R, C>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use crate::{assert_approx_eq, vec2, vec3, Quat};

    use super::*;

    #[test]
    fn from_rows_columns() {
        assert_eq!(
            Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]),
            Mat2x3::from_columns([[1, 4], [2, 5], [3, 6]]),
        );
    }

    #[test]
    fn diagonal() {
        let mat = Matrix::from_diagonal([1, 2]);

        #[rustfmt::skip]
        assert_eq!(mat, Matrix::from_rows([
            [1, 0],
            [0, 2],
        ]));

        assert_eq!(mat.into_diagonal(), [1, 2]);
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);

        // Natural writing order (row-wise) for debug output.
        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");

        // `#` modifier prints each row in its own line, but not each individual element.
        assert_eq!(
            format!("{:#?}", mat),
            "
[
    [0, 1],
    [2, 3],
]
"
            .trim()
        );
    }

    #[test]
    fn constants() {
        assert_eq!(format!("{:?}", Mat2f::ZERO), "[[0.0, 0.0], [0.0, 0.0]]");
        assert_eq!(format!("{:?}", Mat2f::IDENTITY), "[[1.0, 0.0], [0.0, 1.0]]");
    }

    #[rustfmt::skip]
    #[test]
    fn resize() {
        let mat = Matrix::from_rows([
            [1, 2],
            [3, 4],
        ]);

        let larger = mat.resize::<3, 3>();
        assert_eq!(larger, Matrix::from_rows([
            [1, 2, 0],
            [3, 4, 0],
            [0, 0, 0],
        ]));

        let smaller = mat.resize::<1, 2>();
        assert_eq!(smaller, Matrix::from_rows([
            [1, 2]
        ]));
    }

    #[test]
    fn mat_vec_mul() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);
        let vec = vec2(4, 5);
        let out = mat * vec;
        assert_eq!(out, [4 * 0 + 5 * 1, 4 * 2 + 5 * 3]);
    }

    #[test]
    fn mat_mat_mul() {
        #[rustfmt::skip]
        let a = Matrix::from_rows([
            [1, 2],
            [3, 4],
            [5, 6],
            [7, 8],
        ]);
        #[rustfmt::skip]
        let b = Matrix::from_rows([
            [9, 10, 11],
            [12, 13, 14],
        ]);
        let c = a * b;
        assert_eq!(c[(0, 1)], a[(0, 0)] * b[(0, 1)] + a[(0, 1)] * b[(1, 1)]);
        assert_eq!(c[(2, 2)], a[(2, 0)] * b[(0, 2)] + a[(2, 1)] * b[(1, 2)]);
    }

    #[test]
    fn determinant() {
        assert_eq!(Mat1f::ZERO.determinant(), 0.0);
        assert_eq!(Mat2f::ZERO.determinant(), 0.0);
        assert_eq!(Mat3f::ZERO.determinant(), 0.0);
        assert_eq!(Mat4f::ZERO.determinant(), 0.0);
        assert_eq!(Mat1f::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat2f::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat3f::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat4f::IDENTITY.determinant(), 1.0);

        #[rustfmt::skip]
        let testmat = Matrix::from_rows([
            [-2, -1,  2],
            [ 2,  1,  4],
            [-3,  3, -1],
        ]);
        assert_eq!(testmat.determinant(), 54);
        assert_eq!(testmat.transpose().determinant(), 54);

        // Determinant is multiplicative; the scale matrix contributes a factor of 2 * 3 * 4.
        let scaled = Mat4f::from_scale(vec3(2.0, 3.0, 4.0)) * Mat4f::from_translation(vec3(5.0, 6.0, 7.0));
        assert_approx_eq!(scaled.determinant(), 24.0);
    }

    #[test]
    fn rotation() {
        let cw = Mat2f::rotation_clockwise(0.0);
        assert_eq!(cw, cw.invert());

        let ccw = Mat2f::rotation_counterclockwise(0.0);
        assert_eq!(ccw, ccw.invert());

        assert_eq!(ccw, cw);

        let cw = Mat2f::rotation_clockwise(PI);
        assert_approx_eq!(cw, cw.invert()).abs(1e-6);
    }

    #[test]
    fn invert() {
        // From an identity matrix with a single off-diagonal element, inversion flips the sign of
        // that element.
        let mut mat = Mat4f::IDENTITY;
        mat[(0, 1)] = 5.0;
        let mut expected = Mat4f::IDENTITY;
        expected[(0, 1)] = -5.0;
        assert_eq!(mat.invert(), expected);
        assert_eq!(mat.invert() * mat, Mat4f::IDENTITY);

        let mat = Mat3f::from_diagonal(vec3(2.0, 4.0, 8.0));
        assert_eq!(mat.invert(), Mat3f::from_diagonal(vec3(0.5, 0.25, 0.125)));

        let transform = Mat4f::compose(
            vec3(1.0, -2.0, 0.5),
            Quat::from_rotation_y(1.0),
            vec3(2.0, 2.0, 2.0),
        );
        assert_approx_eq!(transform * transform.invert(), Mat4f::IDENTITY).abs(1e-6);
    }

    #[test]
    #[should_panic(expected = "attempt to invert a non-invertible matrix")]
    fn invert_singular() {
        let _ = Mat4f::ZERO.invert();
    }

    #[test]
    fn compose_components() {
        // 90° rotation about the z-axis, with per-axis scale and a translation.
        let mat = Mat4f::compose(
            vec3(2.0, 2.0, 2.0),
            Quat::from_xyzw(0.0, 0.0, (2.0f32).sqrt() / 2.0, (2.0f32).sqrt() / 2.0),
            vec3(1.0, 2.0, 1.0),
        );
        #[rustfmt::skip]
        let expected = Matrix::from_rows([
            [0.0, -2.0, 0.0, 2.0],
            [1.0,  0.0, 0.0, 2.0],
            [0.0,  0.0, 1.0, 2.0],
            [0.0,  0.0, 0.0, 1.0],
        ]);
        assert_approx_eq!(mat, expected).abs(1e-6);
    }

    #[test]
    fn decompose_components() {
        #[rustfmt::skip]
        let mat = Mat4f::from_rows([
            [0.0, -2.0, 0.0, 2.0],
            [1.0,  0.0, 0.0, 2.0],
            [0.0,  0.0, 1.0, 2.0],
            [0.0,  0.0, 0.0, 1.0],
        ]);
        let (translation, rotation, scaling) = mat.decompose();
        assert_eq!(translation, vec3(2.0, 2.0, 2.0));
        let expected = Quat::from_xyzw(0.0, 0.0, (2.0f32).sqrt() / 2.0, (2.0f32).sqrt() / 2.0);
        assert_approx_eq!(rotation, expected).abs(1e-6);
        assert_eq!(scaling, vec3(1.0, 2.0, 1.0));
    }

    #[test]
    fn decompose_reflection() {
        let mat = Mat4f::from_scale(vec3(-1.0, 1.0, 1.0));
        let (_, _, scaling) = mat.decompose();
        assert_eq!(scaling, vec3(-1.0, 1.0, 1.0));
    }

    #[test]
    fn transform() {
        let mat = Mat4f::compose(
            vec3(0.0, 1.0, 0.0),
            Quat::from_rotation_z(TAU / 4.0),
            vec3(1.0, 1.0, 1.0),
        );
        assert_approx_eq!(mat.transform_point(vec3(1.0, 0.0, 0.0)), vec3(0.0, 2.0, 0.0)).abs(1e-6);
        assert_approx_eq!(mat.transform_direction(vec3(1.0, 0.0, 0.0)), vec3(0.0, 1.0, 0.0))
            .abs(1e-6);
    }

    #[test]
    fn orthographic_maps_box() {
        let mat = Mat4f::orthographic(-2.0, 2.0, -1.0, 1.0, 0.5, 10.5);
        assert_approx_eq!(mat.transform_point(vec3(-2.0, -1.0, -0.5)), vec3(-1.0, -1.0, -1.0))
            .abs(1e-6);
        assert_approx_eq!(mat.transform_point(vec3(2.0, 1.0, -10.5)), vec3(1.0, 1.0, 1.0))
            .abs(1e-6);
    }

    #[test]
    fn perspective_maps_frustum() {
        let mat = Mat4f::perspective(-1.0, 1.0, -1.0, 1.0, 1.0, 11.0);
        // A point on the near plane ends up on Z = -1 after the perspective divide.
        let p = mat * vec3(1.0, 1.0, -1.0).extend(1.0);
        assert_approx_eq!(p.truncate() / p.w, vec3(1.0, 1.0, -1.0)).abs(1e-6);
        // A point on the far plane ends up on Z = 1.
        let p = mat * vec3(0.0, 0.0, -11.0).extend(1.0);
        assert_approx_eq!((p.truncate() / p.w).z, 1.0).abs(1e-6);
    }
}
