//! Error type carrying the protocol's closed status vocabulary.

use crate::status::Status;
use thiserror::Error;

/// Protocol-level failure of a call.
///
/// Every variant maps onto exactly one [`Status`] code. Algorithmic
/// outcomes (singular matrix, non-positive-definite minor, convergence
/// failure) are *not* errors; they are reported through the completion
/// slot after queue synchronization.
#[derive(Debug, Error)]
pub enum Error {
    #[error("session is not initialized")]
    NotInitialized,

    #[error("resource allocation failed: {0}")]
    AllocFailed(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("device memory mapping failed: {0}")]
    MappingError(String),

    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("device architecture mismatch")]
    ArchMismatch,

    #[error("handle is null or destroyed")]
    NullHandle,

    #[error("invalid enum value: {0}")]
    InvalidEnum(String),

    #[error("backend reported unrecognized status code {code}")]
    Unknown { code: i32 },
}

impl Error {
    /// The status code this error translates to on the C surface.
    pub fn status(&self) -> Status {
        match self {
            Error::NotInitialized => Status::NotInitialized,
            Error::AllocFailed(_) => Status::AllocFailed,
            Error::InvalidValue(_) => Status::InvalidValue,
            Error::MappingError(_) => Status::MappingError,
            Error::ExecutionFailed(_) => Status::ExecutionFailed,
            Error::InternalError(_) => Status::InternalError,
            Error::NotSupported(_) => Status::NotSupported,
            Error::ArchMismatch => Status::ArchMismatch,
            Error::NullHandle => Status::NullHandle,
            Error::InvalidEnum(_) => Status::InvalidEnum,
            Error::Unknown { .. } => Status::Unknown,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_status() {
        assert_eq!(Error::NotInitialized.status(), Status::NotInitialized);
        assert_eq!(
            Error::InvalidValue("lda".into()).status(),
            Status::InvalidValue
        );
        assert_eq!(Error::NullHandle.status(), Status::NullHandle);
        assert_eq!(Error::Unknown { code: 1234 }.status(), Status::Unknown);
    }

    #[test]
    fn unknown_keeps_the_raw_code_for_diagnostics() {
        let e = Error::Unknown { code: -7 };
        assert!(e.to_string().contains("-7"));
        // The raw code never leaks into the closed status set.
        assert_eq!(e.status().as_raw(), 11);
    }
}
