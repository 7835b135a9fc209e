//! Process-wide registry mapping opaque ids to live sessions and queues.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use unisolve_backend_cpu::{CpuDenseSolver, CpuQueue};
use unisolve_core::{Error, Result};

pub(crate) struct Session {
    pub solver: CpuDenseSolver,
    /// Id of the queue the session is currently bound to.
    pub queue_id: u64,
}

#[derive(Default)]
pub(crate) struct Registry {
    sessions: HashMap<u64, Session>,
    queues: HashMap<u64, Arc<CpuQueue>>,
    next_id: u64,
}

impl Registry {
    fn fresh_id(&mut self) -> u64 {
        // Ids start at 1 so that 0 always reads as a null handle.
        self.next_id += 1;
        self.next_id
    }

    pub fn insert_queue(&mut self, queue: Arc<CpuQueue>) -> u64 {
        let id = self.fresh_id();
        self.queues.insert(id, queue);
        id
    }

    pub fn queue(&self, id: u64) -> Result<Arc<CpuQueue>> {
        self.queues.get(&id).cloned().ok_or(Error::NullHandle)
    }

    pub fn remove_queue(&mut self, id: u64) -> Result<()> {
        self.queues.remove(&id).map(|_| ()).ok_or(Error::NullHandle)
    }

    pub fn insert_session(&mut self, session: Session) -> u64 {
        let id = self.fresh_id();
        self.sessions.insert(id, session);
        id
    }

    pub fn session_mut(&mut self, id: u64) -> Result<&mut Session> {
        self.sessions.get_mut(&id).ok_or(Error::NullHandle)
    }

    pub fn remove_session(&mut self, id: u64) -> Result<()> {
        self.sessions.remove(&id).map(|_| ()).ok_or(Error::NullHandle)
    }
}

fn registry() -> &'static Mutex<Registry> {
    static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(Registry::default()))
}

/// Run `f` with the registry locked.
pub(crate) fn with_registry<R>(f: impl FnOnce(&mut Registry) -> Result<R>) -> Result<R> {
    let mut guard = registry()
        .lock()
        .map_err(|_| Error::InternalError("registry lock poisoned".into()))?;
    f(&mut guard)
}

/// Resolve a session id and run `f` on it. A zero, destroyed, or foreign
/// id fails with the null-handle status.
pub(crate) fn with_session<R>(id: u64, f: impl FnOnce(&mut Session) -> Result<R>) -> Result<R> {
    if id == 0 {
        return Err(Error::NullHandle);
    }
    with_registry(|reg| f(reg.session_mut(id)?))
}
