//! Implementations of `std::ops`.

use std::ops::{Mul, MulAssign};

use crate::{approx::ApproxEq, Number, Quat, Vector};

// More general impl than what the derive generates.
impl<T, U> PartialEq<Quat<U>> for Quat<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Quat<U>) -> bool {
        self.vec == other.vec
    }
}

impl<T: Eq> Eq for Quat<T> {}

impl<T> ApproxEq for Quat<T>
where
    T: ApproxEq,
{
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.vec.abs_diff_eq(&other.vec, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.vec.rel_diff_eq(&other.vec, rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        self.vec.ulps_diff_eq(&other.vec, ulps_tolerance)
    }
}

/// The Hamilton product, composing two rotations.
///
/// The product first applies the rotation `rhs`, then `self` (when rotating column vectors, as
/// `self * rhs * vector` suggests).
impl<T> Mul for Quat<T>
where
    T: Number,
{
    type Output = Quat<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        let a = self.vec;
        let b = rhs.vec;
        let (av, bv) = (a.truncate(), b.truncate());

        let xyz = bv * a.w + av * b.w + av.cross(bv);
        let w = a.w * b.w - av.dot(bv);
        Quat::from_vec(xyz.extend(w))
    }
}

/// The Hamilton product, composing two rotations.
impl<T> MulAssign for Quat<T>
where
    T: Number,
{
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Rotates a vector.
///
/// `self` must have unit length; the vector can have any length, which is preserved.
impl<T> Mul<Vector<T, 3>> for Quat<T>
where
    T: Number,
{
    type Output = Vector<T, 3>;

    fn mul(self, rhs: Vector<T, 3>) -> Self::Output {
        // Expansion of `q * v * q⁻¹` for unit quaternions, saving a few multiplications.
        let two = T::ONE + T::ONE;
        let u = self.vec.truncate();
        let t = u.cross(rhs) * two;
        rhs + t * self.vec.w + u.cross(t)
    }
}
