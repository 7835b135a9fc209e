//! Session and queue lifecycle entry points.

use std::sync::Arc;

use unisolve_backend_cpu::{CpuDenseSolver, CpuQueue};
use unisolve_core::Error;

use crate::registry::{with_registry, with_session, Session};
use crate::{non_null, wrap};

/// Create a session bound to a fresh queue and write its id to `handle`.
///
/// # Safety
///
/// `handle` must point to writable memory for one `u64`.
#[no_mangle]
pub unsafe extern "C" fn unisolve_create(handle: *mut u64) -> i32 {
    wrap(|| {
        non_null(handle, "handle")?;
        let queue = Arc::new(CpuQueue::new()?);
        let solver = CpuDenseSolver::with_queue(Arc::clone(&queue));
        let id = with_registry(|reg| {
            let queue_id = reg.insert_queue(queue);
            Ok(reg.insert_session(Session { solver, queue_id }))
        })?;
        unsafe { handle.write(id) };
        log::info!("session {id} created");
        Ok(())
    })
}

/// Destroy a session. Subsequent calls with the same id fail with the
/// null-handle status.
#[no_mangle]
pub extern "C" fn unisolve_destroy(handle: u64) -> i32 {
    wrap(|| {
        if handle == 0 {
            return Err(Error::NullHandle);
        }
        with_registry(|reg| reg.remove_session(handle))?;
        log::info!("session {handle} destroyed");
        Ok(())
    })
}

/// Create a standalone execution queue and write its id to `queue`.
///
/// # Safety
///
/// `queue` must point to writable memory for one `u64`.
#[no_mangle]
pub unsafe extern "C" fn unisolve_queue_create(queue: *mut u64) -> i32 {
    wrap(|| {
        non_null(queue, "queue")?;
        let q = Arc::new(CpuQueue::new()?);
        let id = with_registry(|reg| Ok(reg.insert_queue(q)))?;
        unsafe { queue.write(id) };
        Ok(())
    })
}

/// Destroy a queue id. Sessions still bound to it keep it alive until
/// they are destroyed or rebound.
#[no_mangle]
pub extern "C" fn unisolve_queue_destroy(queue: u64) -> i32 {
    wrap(|| {
        if queue == 0 {
            return Err(Error::NullHandle);
        }
        with_registry(|reg| reg.remove_queue(queue))
    })
}

/// Rebind a session onto another queue. Only the enqueue target of
/// subsequent calls changes.
#[no_mangle]
pub extern "C" fn unisolve_set_queue(handle: u64, queue: u64) -> i32 {
    wrap(|| {
        if handle == 0 || queue == 0 {
            return Err(Error::NullHandle);
        }
        with_registry(|reg| {
            let q = reg.queue(queue)?;
            let session = reg.session_mut(handle)?;
            session.solver.set_queue(q);
            session.queue_id = queue;
            Ok(())
        })
    })
}

/// Write the id of the session's bound queue to `queue`.
///
/// # Safety
///
/// `queue` must point to writable memory for one `u64`.
#[no_mangle]
pub unsafe extern "C" fn unisolve_get_queue(handle: u64, queue: *mut u64) -> i32 {
    wrap(|| {
        non_null(queue, "queue")?;
        let id = with_session(handle, |s| Ok(s.queue_id))?;
        unsafe { queue.write(id) };
        Ok(())
    })
}

/// Block until all work enqueued through the session has completed.
#[no_mangle]
pub extern "C" fn unisolve_synchronize(handle: u64) -> i32 {
    wrap(|| with_session(handle, |s| s.solver.synchronize()))
}
