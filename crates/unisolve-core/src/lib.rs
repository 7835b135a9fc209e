//! Core vocabulary for the unisolve dense-solver protocol.
//!
//! This crate defines everything the backends and the C surface share: the
//! scalar-type family, the mode enums with their stable integer values, the
//! closed status set, the error type, and per-routine parameter validation.
//! No numerical code lives here.

pub mod error;
pub mod modes;
pub mod params;
pub mod scalar;
pub mod status;

pub use error::{Error, Result};
pub use modes::{EigMode, EigType, FillMode, Op, Side, SvdJob};
pub use scalar::Scalar;
pub use status::Status;

/// Re-export of the fixed-layout complex types used across the API.
pub use num_complex::{Complex32, Complex64};
