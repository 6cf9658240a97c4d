use std::fmt;

use crate::{vec3, vec4, Mat3, Number, One, Sqrt, Trig, Vector, Zero};

mod ops;
mod view;

/// A quaternion consisting of 3 imaginary numbers and a real number.
///
/// Unit-length quaternions ("*versors*") are commonly used to represent rotations in 3D space,
/// and the operations on this type assume unit length unless documented otherwise: it is the
/// caller's responsibility to [`normalize`][Self::normalize] quaternions obtained from unreliable
/// sources.
///
/// Quaternions are represented similar to a 4-dimensional vector, with an `x`, `y`, `z` and `w`
/// component, where `x`, `y` and `z` are the imaginary parts and `w` is the real part.
///
/// # Construction
///
/// - [`Quat::IDENTITY`] is the no-op rotation.
/// - [`Quat::from_rotation_x`], [`Quat::from_rotation_y`] and [`Quat::from_rotation_z`] rotate
///   around a single coordinate axis.
/// - [`Quat::from_axis_angle`] rotates around an arbitrary axis.
/// - [`Quat::from_rotation_xyz`] and [`Quat::from_euler`] build a rotation from euler angles.
/// - [`Quat::from_unit_vectors`] computes the rotation that maps one direction onto another.
/// - [`Quat::from_rotation_matrix`] extracts the rotation from an orthonormal 3x3 matrix.
///
/// # Applying rotations
///
/// Quaternions compose via multiplication (`a * b` rotates by `b`, then by `a`... in the frame
/// conventions of this crate, by `a` *extrinsically* followed by `b`), and rotate 3D vectors via
/// `quat * vector`.
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Quat<T> {
    vec: Vector<T, 4>,
}

/// A quaternion with [`f32`] components.
pub type Quatf = Quat<f32>;

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quat<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quat<T> {}

/// The order in which the axis rotations of a set of euler angles are applied.
///
/// All orders compose *extrinsically*: each successive rotation is about the fixed world axis,
/// not the rotated body axis. The intrinsic application of an order is obtained by reversing it
/// (eg. intrinsic X-Y-Z equals extrinsic [`EulerOrder::Zyx`] with the angles swapped
/// accordingly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl EulerOrder {
    fn axes(self) -> [usize; 3] {
        match self {
            Self::Xyz => [0, 1, 2],
            Self::Xzy => [0, 2, 1],
            Self::Yxz => [1, 0, 2],
            Self::Yzx => [1, 2, 0],
            Self::Zxy => [2, 0, 1],
            Self::Zyx => [2, 1, 0],
        }
    }
}

impl<T: Zero + One> Quat<T> {
    /// The multiplicative identity.
    ///
    /// This is a unit quaternion that will not change a vector it is multiplied with.
    pub const IDENTITY: Self = Self {
        vec: vec4(T::ZERO, T::ZERO, T::ZERO, T::ONE),
    };
}

impl<T> Quat<T> {
    /// Creates a quaternion from a 4-dimensional [`Vector`].
    ///
    /// The `x`, `y`, and `z` coordinates correspond to the `i`, `j`, and `k` imaginary parts,
    /// while the `w` component corresponds to the real number part of the quaternion.
    pub fn from_vec(vec: Vector<T, 4>) -> Self {
        Self { vec }
    }

    /// Creates a quaternion from its four components.
    pub fn from_xyzw(x: T, y: T, z: T, w: T) -> Self {
        Self {
            vec: [x, y, z, w].into(),
        }
    }

    /// Returns the components of this quaternion as a 4-dimensional [`Vector`].
    pub fn into_vec(self) -> Vector<T, 4> {
        self.vec
    }

    fn one_half() -> T
    where
        T: Number,
    {
        T::ONE / (T::ONE + T::ONE)
    }

    /// Creates a quaternion representing a rotation of `radians` around the X axis.
    pub fn from_rotation_x(radians: T) -> Self
    where
        T: Number + Trig,
    {
        let (sin, cos) = (radians * Self::one_half()).sin_cos();
        Self::from_xyzw(sin, T::ZERO, T::ZERO, cos)
    }

    /// Creates a quaternion representing a rotation of `radians` around the Y axis.
    pub fn from_rotation_y(radians: T) -> Self
    where
        T: Number + Trig,
    {
        let (sin, cos) = (radians * Self::one_half()).sin_cos();
        Self::from_xyzw(T::ZERO, sin, T::ZERO, cos)
    }

    /// Creates a quaternion representing a rotation of `radians` around the Z axis.
    pub fn from_rotation_z(radians: T) -> Self
    where
        T: Number + Trig,
    {
        let (sin, cos) = (radians * Self::one_half()).sin_cos();
        Self::from_xyzw(T::ZERO, T::ZERO, sin, cos)
    }

    /// Creates a quaternion representing a rotation around the X, Y, and Z axis, in sequence.
    ///
    /// Shorthand for [`Quat::from_euler`] with [`EulerOrder::Xyz`].
    #[doc(alias = "euler")]
    pub fn from_rotation_xyz(x: T, y: T, z: T) -> Self
    where
        T: Number + Trig,
    {
        Self::from_rotation_x(x) * Self::from_rotation_y(y) * Self::from_rotation_z(z)
    }

    /// Creates a quaternion from a set of euler angles.
    ///
    /// `angles[i]` is the rotation (in radians) around the `i`-th axis of `order`; the rotations
    /// are applied in that order, each around the fixed world axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let q = Quat::from_euler(EulerOrder::Xyz, vec3(0.1, 0.2, 0.3));
    /// assert_approx_eq!(q, Quat::from_rotation_xyz(0.1, 0.2, 0.3));
    /// ```
    pub fn from_euler(order: EulerOrder, angles: Vector<T, 3>) -> Self
    where
        T: Number + Trig,
    {
        let axes = order.axes();
        let angles = angles.into_array();

        let mut out = Self::axis_rotation(axes[0], angles[0]);
        for i in 1..3 {
            out = out * Self::axis_rotation(axes[i], angles[i]);
        }
        out
    }

    fn axis_rotation(axis: usize, radians: T) -> Self
    where
        T: Number + Trig,
    {
        match axis {
            0 => Self::from_rotation_x(radians),
            1 => Self::from_rotation_y(radians),
            _ => Self::from_rotation_z(radians),
        }
    }

    /// Creates a quaternion representing a rotation of `radians` around `axis`.
    ///
    /// The result is independent of the length of `axis`, which does not have to be a unit
    /// vector (but must be non-zero).
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// use std::f32::consts::TAU;
    ///
    /// let q = Quat::from_axis_angle(vec3(0.0, 0.0, 2.0), TAU / 4.0);
    /// assert_approx_eq!(q * Vec3f::X, Vec3f::Y).abs(1e-6);
    /// ```
    pub fn from_axis_angle(axis: Vector<T, 3>, radians: T) -> Self
    where
        T: Number + Trig + Sqrt,
    {
        let axis = axis.normalize();
        let (sin, cos) = (radians * Self::one_half()).sin_cos();
        Self::from_vec((axis * sin).extend(cos))
    }

    /// Computes the rotation that maps the direction `source` onto the direction `target`.
    ///
    /// Among all the possible rotations that send `source` onto `target` this function always
    /// chooses the right-hand rotation around the origin. In cases where more than one right-hand
    /// rotation around the origin exists (`source` and `target` are parallel), an arbitrary one
    /// is returned.
    ///
    /// While this function is intended to be used with unit vectors, it also works on non-unit
    /// vectors, in which case the returned rotation will point `source` in the direction of
    /// `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// let q = Quat::from_unit_vectors(Vec3f::X, Vec3f::Y);
    /// assert_approx_eq!(q * Vec3f::X, Vec3f::Y).abs(1e-6);
    /// ```
    pub fn from_unit_vectors(source: Vector<T, 3>, target: Vector<T, 3>) -> Self
    where
        T: Number + Trig + Sqrt + fmt::Debug,
    {
        let axis = source.cross(target);
        let angle = axis.length().atan2(source.dot(target));

        // If source and target are parallel, the cross product is 0 and any axis orthogonal to
        // source works. If one of the y/z coordinates is zero, the corresponding coordinate axis
        // is orthogonal already.
        let axis = if axis.length2() == T::ZERO {
            let fallback = if source.y == T::ZERO {
                Vector::<T, 3>::Y
            } else if source.z == T::ZERO {
                Vector::<T, 3>::Z
            } else {
                vec3(T::ZERO, -source.z, source.y)
            };
            log::trace!("parallel vectors {source:?} / {target:?}; fallback axis {fallback:?}");
            fallback
        } else {
            axis
        };

        Self::from_axis_angle(axis, angle)
    }

    /// Extracts a quaternion from a (orthonormal) rotation matrix.
    ///
    /// `matrix` must be a pure rotation; matrices with scaling or shear produce meaningless
    /// results.
    pub fn from_rotation_matrix(matrix: &Mat3<T>) -> Self
    where
        T: Number + Sqrt + PartialOrd,
    {
        let two = T::ONE + T::ONE;
        let half = Self::one_half();
        let quarter = half * half;
        let m = |r, c| matrix[(r, c)];

        // Shepperd's method: pick the largest of the four candidate denominators to stay
        // numerically stable.
        let trace = matrix.trace();
        if trace > T::ZERO {
            let s = half / (trace + T::ONE).sqrt();
            Self::from_xyzw(
                (m(2, 1) - m(1, 2)) * s,
                (m(0, 2) - m(2, 0)) * s,
                (m(1, 0) - m(0, 1)) * s,
                quarter / s,
            )
        } else if m(0, 0) > m(1, 1) && m(0, 0) > m(2, 2) {
            let s = two * (T::ONE + m(0, 0) - m(1, 1) - m(2, 2)).sqrt();
            Self::from_xyzw(
                quarter * s,
                (m(0, 1) + m(1, 0)) / s,
                (m(0, 2) + m(2, 0)) / s,
                (m(2, 1) - m(1, 2)) / s,
            )
        } else if m(1, 1) > m(2, 2) {
            let s = two * (T::ONE + m(1, 1) - m(0, 0) - m(2, 2)).sqrt();
            Self::from_xyzw(
                (m(0, 1) + m(1, 0)) / s,
                quarter * s,
                (m(1, 2) + m(2, 1)) / s,
                (m(0, 2) - m(2, 0)) / s,
            )
        } else {
            let s = two * (T::ONE + m(2, 2) - m(0, 0) - m(1, 1)).sqrt();
            Self::from_xyzw(
                (m(0, 2) + m(2, 0)) / s,
                (m(1, 2) + m(2, 1)) / s,
                quarter * s,
                (m(1, 0) - m(0, 1)) / s,
            )
        }
    }

    /// Converts this quaternion to the equivalent 3x3 rotation matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lina::*;
    /// use std::f32::consts::TAU;
    ///
    /// let q = Quat::from_rotation_z(TAU / 4.0);
    /// let v = vec3(1.0, 2.0, 3.0);
    /// assert_approx_eq!(q.to_mat3() * v, q * v).abs(1e-6);
    /// ```
    pub fn to_mat3(self) -> Mat3<T>
    where
        T: Number,
    {
        let [x, y, z, w] = self.vec.into_array();
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;
        let xx = x * x2;
        let xy = x * y2;
        let xz = x * z2;
        let yy = y * y2;
        let yz = y * z2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        #[rustfmt::skip]
        let mat = Mat3::from_rows([
            [T::ONE - (yy + zz), xy - wz,            xz + wy           ],
            [xy + wz,            T::ONE - (xx + zz), yz - wx           ],
            [xz - wy,            yz + wx,            T::ONE - (xx + yy)],
        ]);
        mat
    }

    /// Returns the squared length of this quaternion.
    ///
    /// If the squared length is not equal to one, multiplying a vector with this quaternion will
    /// scale the vector in addition to rotating it. When using quaternions to model rotations, it
    /// is advisable to ensure that quaternions are always of length one.
    pub fn length2(&self) -> T
    where
        T: Number,
    {
        self.vec.length2()
    }

    /// Returns the length of this quaternion.
    #[doc(alias = "norm", alias = "magnitude")]
    pub fn length(&self) -> T
    where
        T: Number + Sqrt,
    {
        self.vec.length()
    }

    /// Returns a normalized copy of this quaternion (whose length equals one).
    pub fn normalize(self) -> Self
    where
        T: Number + Sqrt,
    {
        Self {
            vec: self.vec.normalize(),
        }
    }

    /// Computes the dot product of `self` and `other`, interpreted as 4-dimensional vectors.
    pub fn dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.vec.dot(other.vec)
    }

    /// Returns the conjugate of this quaternion (its imaginary parts negated).
    pub fn conjugate(self) -> Self
    where
        T: Number,
    {
        let [x, y, z, w] = self.vec.into_array();
        Self::from_xyzw(-x, -y, -z, w)
    }

    /// Returns the inverse rotation of `self`.
    ///
    /// This assumes that `self` has unit length, in which case the inverse equals the
    /// [`conjugate`][Self::conjugate].
    pub fn inverse(self) -> Self
    where
        T: Number,
    {
        self.conjugate()
    }

    /// Returns the rotation angle of this quaternion, in radians.
    pub fn angle(&self) -> T
    where
        T: Number + Trig,
    {
        self.vec.w.acos() * (T::ONE + T::ONE)
    }

    /// Returns the rotation axis of this quaternion.
    ///
    /// For a quaternion with no rotation (eg. [`Quat::IDENTITY`]), the axis is unconstrained and
    /// the X axis is returned.
    pub fn axis(&self) -> Vector<T, 3>
    where
        T: Number + Sqrt + PartialOrd,
    {
        let [x, y, z, w] = self.vec.into_array();
        let sin2 = T::ONE - w * w;
        if sin2 <= T::ZERO {
            Vector::<T, 3>::X
        } else {
            vec3(x, y, z) / sin2.sqrt()
        }
    }
}

impl<T: Zero + One> Default for Quat<T> {
    /// Returns [`Quat::IDENTITY`].
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: fmt::Debug> fmt::Debug for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Quat")
            .field(&self.vec.x)
            .field(&self.vec.y)
            .field(&self.vec.z)
            .field(&self.vec.w)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use crate::{assert_approx_eq, vec3, Vec3f};

    use super::*;

    #[test]
    fn identity() {
        let v = vec3(1.0, -2.0, 3.0);
        assert_eq!(Quatf::IDENTITY * v, v);
        assert_eq!(Quatf::IDENTITY.to_mat3(), Mat3::IDENTITY);
        assert_eq!(Quatf::default(), Quatf::IDENTITY);
    }

    #[test]
    fn axis_rotations() {
        assert_approx_eq!(Quat::from_rotation_x(TAU / 4.0) * Vec3f::Y, Vec3f::Z).abs(1e-6);
        assert_approx_eq!(Quat::from_rotation_y(TAU / 4.0) * Vec3f::Z, Vec3f::X).abs(1e-6);
        assert_approx_eq!(Quat::from_rotation_z(TAU / 4.0) * Vec3f::X, Vec3f::Y).abs(1e-6);
        assert_approx_eq!(Quat::from_rotation_z(-TAU / 4.0) * Vec3f::Y, Vec3f::X).abs(1e-6);
    }

    #[test]
    fn multiply_composes() {
        let a = Quat::from_rotation_x(0.3);
        let b = Quat::from_rotation_y(-1.2);
        let v = vec3(0.5f32, -2.0, 1.5);
        assert_approx_eq!((a * b) * v, a * (b * v)).abs(1e-6);

        // Composition with the inverse cancels out.
        assert_approx_eq!((a * a.inverse()) * v, v).abs(1e-6);
    }

    #[test]
    fn double_rotation() {
        // Two 90° rotations about z compose into a 180° rotation.
        let q = Quat::from_rotation_z(TAU / 4.0);
        assert_approx_eq!((q * q) * Vec3f::X, -Vec3f::X).abs(1e-6);
    }

    #[test]
    fn euler_orders() {
        let angles = vec3(0.3f32, -0.6, 1.1);
        let [x, y, z] = angles.into_array();

        let xyz = Quat::from_euler(EulerOrder::Xyz, angles);
        assert_approx_eq!(
            xyz,
            Quat::from_rotation_x(x) * Quat::from_rotation_y(y) * Quat::from_rotation_z(z)
        );

        let zxy = Quat::from_euler(EulerOrder::Zxy, vec3(z, x, y));
        assert_approx_eq!(
            zxy,
            Quat::from_rotation_z(z) * Quat::from_rotation_x(x) * Quat::from_rotation_y(y)
        );
    }

    #[test]
    fn axis_angle() {
        // Non-unit axes are normalized.
        let q = Quat::from_axis_angle(vec3(0.0, 0.0, 0.1), TAU / 2.0);
        assert_approx_eq!(q * Vec3f::X, -Vec3f::X).abs(1e-6);

        let q = Quat::from_axis_angle(vec3(1.0, 1.0, 0.0), TAU / 2.0);
        assert_approx_eq!(q * Vec3f::X, Vec3f::Y).abs(1e-6);

        assert_approx_eq!(q.angle(), TAU / 2.0).abs(1e-3);
    }

    #[test]
    fn unit_vectors() {
        let q = Quat::from_unit_vectors(Vec3f::X, Vec3f::Z);
        assert_approx_eq!(q * Vec3f::X, Vec3f::Z).abs(1e-6);

        // Non-unit vectors still produce the right direction.
        let q = Quat::from_unit_vectors(vec3(2.0, 0.0, 0.0), vec3(0.0, 3.0, 0.0));
        assert_approx_eq!(q * Vec3f::X, Vec3f::Y).abs(1e-6);
    }

    #[test]
    fn unit_vectors_parallel() {
        // Identical vectors produce (some) rotation that keeps the vector in place.
        let q = Quat::from_unit_vectors(Vec3f::X, Vec3f::X);
        assert_approx_eq!(q * Vec3f::X, Vec3f::X).abs(1e-6);

        // Opposing vectors produce a half turn around (some) perpendicular axis.
        for v in [Vec3f::X, Vec3f::Y, Vec3f::Z, vec3(1.0, 2.0, 3.0).normalize()] {
            let q = Quat::from_unit_vectors(v, -v);
            assert_approx_eq!(q * v, -v).abs(1e-5);
        }
    }

    #[test]
    fn rotation_matrix_round_trip() {
        for q in [
            Quat::from_rotation_x(0.5f32),
            Quat::from_rotation_y(2.5),
            Quat::from_rotation_z(-1.0),
            Quat::from_rotation_xyz(3.0, -2.0, 0.7),
            Quat::from_rotation_xyz(0.0, TAU / 2.0, 0.0),
        ] {
            let back = Quat::from_rotation_matrix(&q.to_mat3());
            // A quaternion and its negation describe the same rotation.
            let sign = if q.dot(back) < 0.0 { -1.0 } else { 1.0 };
            assert_approx_eq!(back.into_vec() * sign, q.into_vec()).abs(1e-5);
        }
    }

    #[test]
    fn conjugate_inverts_rotation() {
        let q = Quat::from_rotation_xyz(0.1f32, 0.2, 0.3);
        let v = vec3(4.0, 5.0, -6.0);
        assert_approx_eq!(q.conjugate() * (q * v), v).abs(1e-5);
        assert_eq!(q.conjugate().w, q.w);
        assert_eq!(q.conjugate().x, -q.x);
    }

    #[test]
    fn rotation_preserves_length() {
        let q = Quat::from_rotation_xyz(1.0f32, 2.0, 3.0);
        let v = vec3(0.1, -0.5, 2.0);
        assert_approx_eq!((q * v).length(), v.length()).abs(1e-6);
    }
}
