//! Linear algebra utilities for computer graphics and machine perception.
//!
//! # Motivation
//!
//! Graphics and perception pipelines constantly shuffle small, fixed-size objects around: 2D and
//! 3D points, homogeneous 4x4 transforms, rotation quaternions. This library provides exactly
//! those objects with an API that is small enough to expose in other crates' public interfaces,
//! plus a [`batch`] layer for applying the same operations to whole arrays of vectors at once.
//!
//! Existing Rust libraries have problems and limitations that make them unsuitable for this use
//! case:
//!
//! - Some of them aim for maximum flexibility, and pay the complexity cost associated with that.
//! - Many libraries still see frequent breaking changes, causing unnecessary churn for dependants
//!   that expose their types.
//! - Some libraries are designed exclusively for GPU-oriented computer graphics, and leave out the
//!   batch-processing operations that perception workloads need.
//!
//! # Goals & Non-Goals
//!
//! - Don't support dynamically-sized vectors and matrices. The API can be significantly simplified
//!   by relying on const generics to specify vector and matrix dimensions.
//! - Support only a single, column-major, unpadded data layout for matrices and vectors, further
//!   simplifying their API.
//! - Be generic over the element type, but don't try to support non-[`Copy`] numeric types (eg.
//!   "big decimals").
//! - Batch operations are layered on [`ndarray`], the de-facto standard for shaped numeric buffers,
//!   rather than on a bespoke array type.
//! - No interpolation and no general-purpose decompositions (SVD/QR/LU); the only decomposition
//!   offered is the translation/rotation/scale split of affine transforms.

pub mod approx;
pub mod batch;
mod matrix;
mod quat;
mod traits;
mod vector;

pub use matrix::*;
pub use quat::*;
pub use traits::*;
pub use vector::*;
