//! CUDA backend for the unisolve protocol.
//!
//! Every routine is a thin enqueue of the matching cuSOLVER dense entry
//! point on the session's bound stream, plus translation of the vendor's
//! status vocabulary into the protocol's closed set. No numerical code
//! lives here.

pub mod complex;
pub mod context;
pub mod dispatch;
pub mod solver;

pub use complex::{GpuComplex32, GpuComplex64};
pub use context::CudaContext;
pub use dispatch::CudaScalar;
pub use solver::CudaDenseSolver;
