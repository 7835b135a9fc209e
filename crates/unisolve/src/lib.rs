//! # Unisolve
//!
//! A uniform two-phase calling convention over dense solver backends.
//!
//! Every routine family (LU, QR, Cholesky, batched Cholesky, eigen- and
//! singular-value decompositions, the reductions and their orthogonal
//! factors) is split into a workspace query and an execute call against
//! an opaque session handle bound to an execution queue. Execute calls
//! enqueue asynchronous work and report algorithmic outcomes through
//! per-call completion slots; the calls themselves return a closed set of
//! protocol status codes. The numerical work is supplied entirely by the
//! dispatched backend: cuSOLVER dense on the CUDA path, `nalgebra` on the
//! always-available host path.
//!
//! ## Quick Start
//!
//! ```rust
//! use unisolve::prelude::*;
//!
//! // Factor a 3x3 matrix with the two-phase convention.
//! let solver = CpuDenseSolver::new().unwrap();
//! let p = GetrfParams { m: 3, n: 3, lda: 3 };
//!
//! let lwork = solver.getrf_workspace::<f64>(p).unwrap();
//! let a = CpuBuf::from_host(&[12.0, 6.0, -4.0, -51.0, 167.0, 24.0, 4.0, -68.0, -41.0]);
//! let work = CpuBuf::<f64>::zeros(lwork);
//! let ipiv = CpuBuf::<i32>::zeros(3);
//! let info = CpuBuf::<i32>::zeros(1);
//!
//! solver.getrf(p, &a, &work, lwork, &ipiv, &info).unwrap();
//! solver.synchronize().unwrap();
//! assert_eq!(info.to_host()[0], 0);
//! ```
//!
//! ## Features
//!
//! - `cuda` - Enable the cuSOLVER dense backend (requires an NVIDIA GPU)
//! - `full` - Enable all optional backends

pub mod backend;

// Re-export the protocol crates.
pub use unisolve_backend_cpu as backend_cpu;
pub use unisolve_core as core;

#[cfg(feature = "cuda")]
pub use unisolve_backend_cuda as backend_cuda;

pub use backend::Backend;

// ============================================================================
// Convenient re-exports from unisolve_core
// ============================================================================

pub use unisolve_core::{
    // Fixed-layout complex types
    Complex32,
    Complex64,
    // Mode enums
    EigMode,
    EigType,
    // Errors and status codes
    Error,
    FillMode,
    Op,
    Result,
    Scalar,
    Side,
    Status,
    SvdJob,
};

pub use unisolve_core::params;

/// Re-export of the underlying generic complex type.
pub use num_complex::Complex;

// ============================================================================
// Convenient re-exports from the reference backend
// ============================================================================

pub use unisolve_backend_cpu::{CpuBuf, CpuDenseSolver, CpuQueue, CpuScalar};

// ============================================================================
// Conditional re-exports from the CUDA backend
// ============================================================================

#[cfg(feature = "cuda")]
pub use unisolve_backend_cuda::{CudaContext, CudaDenseSolver, CudaScalar};

/// Prelude module containing commonly used types.
///
/// ```rust
/// use unisolve::prelude::*;
/// ```
pub mod prelude {
    pub use crate::params::{
        GebrdParams, GeqrfParams, GesvdParams, GetrfParams, GetrsParams, OrgbrParams,
        OrgqrParams, OrgtrParams, OrmqrParams, OrmtrParams, PotrfBatchedParams, PotrfParams,
        SyevdParams, SygvdParams, SytrdParams,
    };
    pub use crate::{
        Backend, Complex32, Complex64, CpuBuf, CpuDenseSolver, CpuQueue, EigMode, EigType,
        Error, FillMode, Op, Result, Scalar, Side, Status, SvdJob,
    };

    #[cfg(feature = "cuda")]
    pub use crate::{CudaContext, CudaDenseSolver};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_covers_a_full_two_phase_call() {
        let solver = CpuDenseSolver::new().unwrap();
        let p = PotrfParams {
            uplo: FillMode::Lower,
            n: 2,
            lda: 2,
        };
        let lwork = solver.potrf_workspace::<f64>(p).unwrap();
        let a = CpuBuf::from_host(&[4.0, 2.0, 2.0, 3.0]);
        let work = CpuBuf::<f64>::zeros(lwork);
        let info = CpuBuf::<i32>::zeros(1);
        solver.potrf(p, &a, &work, lwork, &info).unwrap();
        solver.synchronize().unwrap();
        assert_eq!(info.to_host()[0], 0);
        assert!((a.to_host()[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn status_codes_are_reachable_from_the_facade() {
        assert_eq!(Status::Success.as_raw(), 0);
        assert_eq!(Status::Unknown.as_raw(), 11);
    }
}
