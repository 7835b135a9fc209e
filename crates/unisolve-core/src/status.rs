//! The closed status-code set returned by every protocol call.

/// Synchronous result of a protocol call.
///
/// The integer values are stable and form the C surface's return codes.
/// Backend-specific codes are never passed through verbatim; anything a
/// backend reports outside the known mapping becomes [`Status::Unknown`].
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Call completed (the algorithmic verdict, if any, is in the
    /// completion slot).
    Success = 0,
    /// Library or backend session was not initialized.
    NotInitialized = 1,
    /// Resource allocation failed.
    AllocFailed = 2,
    /// Unsupported numerical value was passed to the call.
    InvalidValue = 3,
    /// Access to the device memory space failed.
    MappingError = 4,
    /// Enqueued program failed to execute.
    ExecutionFailed = 5,
    /// Internal operation failed.
    InternalError = 6,
    /// Routine or configuration not implemented by the dispatched backend.
    NotSupported = 7,
    /// Device architecture mismatch.
    ArchMismatch = 8,
    /// Handle is null, destroyed, or foreign.
    NullHandle = 9,
    /// Unsupported enum value was passed to the call.
    InvalidEnum = 10,
    /// Backend returned a status code outside the known mapping.
    Unknown = 11,
}

impl Status {
    /// Raw integer value of this status.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Decode a raw status value.
    pub fn from_raw(raw: i32) -> Option<Self> {
        Some(match raw {
            0 => Status::Success,
            1 => Status::NotInitialized,
            2 => Status::AllocFailed,
            3 => Status::InvalidValue,
            4 => Status::MappingError,
            5 => Status::ExecutionFailed,
            6 => Status::InternalError,
            7 => Status::NotSupported,
            8 => Status::ArchMismatch,
            9 => Status::NullHandle,
            10 => Status::InvalidEnum,
            11 => Status::Unknown,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_are_stable() {
        assert_eq!(Status::Success.as_raw(), 0);
        assert_eq!(Status::NotInitialized.as_raw(), 1);
        assert_eq!(Status::AllocFailed.as_raw(), 2);
        assert_eq!(Status::InvalidValue.as_raw(), 3);
        assert_eq!(Status::MappingError.as_raw(), 4);
        assert_eq!(Status::ExecutionFailed.as_raw(), 5);
        assert_eq!(Status::InternalError.as_raw(), 6);
        assert_eq!(Status::NotSupported.as_raw(), 7);
        assert_eq!(Status::ArchMismatch.as_raw(), 8);
        assert_eq!(Status::NullHandle.as_raw(), 9);
        assert_eq!(Status::InvalidEnum.as_raw(), 10);
        assert_eq!(Status::Unknown.as_raw(), 11);
    }

    #[test]
    fn round_trip() {
        for raw in 0..=11 {
            let s = Status::from_raw(raw).unwrap();
            assert_eq!(s.as_raw(), raw);
        }
        assert_eq!(Status::from_raw(12), None);
        assert_eq!(Status::from_raw(-1), None);
    }
}
