use std::ops::{Deref, DerefMut};

use crate::{vector::view::XYZW, Quat};

// Quaternions share the xyzw layout of 4-dimensional vectors, so the same field view applies.

impl<T> Deref for Quat<T> {
    type Target = XYZW<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.vec
    }
}

impl<T> DerefMut for Quat<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.vec
    }
}
