//! Host reference backend for the unisolve protocol.
//!
//! Implements the same two-phase query/execute calling convention as the
//! vendor backends, with the execution queue modeled as an owned worker
//! thread and every decomposition delegated to `nalgebra`. No factorization
//! code lives in this crate; it packs, unpacks, and permutes what the
//! library computes.
//!
//! # Coverage
//!
//! A few routines consume the packed-reflector storage format of a prior
//! factorization. That format belongs to the vendor libraries and is not
//! reproduced here, so the affected entry points report the not-supported
//! status instead:
//!
//! - `orgqr` / `ormqr` / `orgbr` (all precisions)
//! - `gesvd` with the full-factor job on a non-square input
//!
//! The tridiagonal family is fully covered: `sytrd` stores the accumulated
//! orthogonal factor explicitly, which `orgtr` and `ormtr` then consume.

pub mod buffer;
pub mod queue;
#[doc(hidden)]
pub mod routines;
pub mod solver;

pub use buffer::CpuBuf;
pub use queue::CpuQueue;
pub use solver::CpuDenseSolver;

use nalgebra::ComplexField;
use unisolve_core::Scalar;

/// Scalar types this backend can hand to `nalgebra`.
///
/// Blanket-implemented for the whole [`Scalar`] family; the associated-type
/// equality ties the protocol's real type to `nalgebra`'s, so eigenvalue
/// and singular-value buffers type-check without conversions.
pub trait CpuScalar:
    Scalar<Real = <Self as ComplexField>::RealField> + ComplexField<RealField: Scalar>
{
}

impl<T> CpuScalar for T where
    T: Scalar<Real = <T as ComplexField>::RealField> + ComplexField<RealField: Scalar>
{
}
