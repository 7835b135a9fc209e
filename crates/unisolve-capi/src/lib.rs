//! C-linkage function table over the reference backend.
//!
//! Handles and queues are opaque integer ids resolved through a process
//! registry, so a destroyed or foreign id fails with the null-handle
//! status instead of crashing. Every function returns a raw status code
//! from the protocol's closed set; mode arguments are raw integers checked
//! against the enum vocabulary before any dispatch.
//!
//! # Safety
//!
//! Buffer pointers must reference allocations large enough for the shapes
//! described by the call, must stay valid until the queue has been
//! synchronized, and must not be mutated by other work in that window.
//! These are the protocol's standard aliasing rules; none of them can be
//! checked here.

mod registry;
pub mod routines;
pub mod session;

pub use routines::*;
pub use session::{
    unisolve_create, unisolve_destroy, unisolve_get_queue, unisolve_queue_create,
    unisolve_queue_destroy, unisolve_set_queue, unisolve_synchronize,
};

use unisolve_core::{Error, Result, Status};

/// Pointer that may cross into the queue's worker thread.
///
/// The caller's contract (pointers stay valid and unaliased until the
/// queue is synchronized) is what makes the transfer sound.
pub(crate) struct SendMut<T>(*mut T);

unsafe impl<T> Send for SendMut<T> {}

impl<T> SendMut<T> {
    pub(crate) fn new(p: *mut T) -> Self {
        Self(p)
    }

    pub(crate) fn get(&self) -> *mut T {
        self.0
    }
}

/// Run a fallible body and fold the outcome into a raw status code.
pub(crate) fn wrap(body: impl FnOnce() -> Result<()>) -> i32 {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(body)) {
        Ok(Ok(())) => Status::Success.as_raw(),
        Ok(Err(e)) => e.status().as_raw(),
        Err(_) => Status::InternalError.as_raw(),
    }
}

/// Decode a dimension argument; negative values are protocol errors.
pub(crate) fn udim(v: i32, what: &str) -> Result<usize> {
    usize::try_from(v).map_err(|_| Error::InvalidValue(format!("{what} = {v} is negative")))
}

pub(crate) fn non_null<T>(p: *const T, what: &str) -> Result<()> {
    if p.is_null() {
        return Err(Error::InvalidValue(format!("{what} pointer is null")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_translates_errors_to_raw_codes() {
        assert_eq!(wrap(|| Ok(())), 0);
        assert_eq!(wrap(|| Err(Error::NullHandle)), 9);
        assert_eq!(wrap(|| Err(Error::InvalidEnum("uplo".into()))), 10);
    }

    #[test]
    fn wrap_contains_panics() {
        assert_eq!(wrap(|| panic!("boom")), Status::InternalError.as_raw());
    }

    #[test]
    fn negative_dimension_is_invalid_value() {
        let err = udim(-3, "n").unwrap_err();
        assert_eq!(err.status(), Status::InvalidValue);
    }
}
