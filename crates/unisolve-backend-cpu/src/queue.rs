//! Host execution queue.
//!
//! Models a device stream: an owned worker thread consuming enqueued jobs
//! in FIFO order. Work submitted on one queue executes in enqueue order;
//! independent queues have no ordering relative to each other.

use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread::JoinHandle;

use unisolve_core::{Error, Result};

enum Job {
    Run(Box<dyn FnOnce() + Send + 'static>),
    Fence(Sender<()>),
}

/// FIFO execution queue backed by a worker thread.
pub struct CpuQueue {
    tx: Mutex<Option<Sender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl CpuQueue {
    /// Spawn a new queue with its own worker thread.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel::<Job>();
        let worker = std::thread::Builder::new()
            .name("unisolve-queue".into())
            .spawn(move || {
                while let Ok(job) = rx.recv() {
                    match job {
                        Job::Run(f) => f(),
                        Job::Fence(ack) => {
                            // Receiver may have given up waiting.
                            let _ = ack.send(());
                        }
                    }
                }
            })
            .map_err(|e| Error::AllocFailed(format!("queue worker spawn failed: {e}")))?;

        log::debug!("host execution queue started");

        Ok(Self {
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Enqueue an arbitrary host job. Returns once the job is queued, not
    /// when it runs; jobs on one queue run in submission order.
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) -> Result<()> {
        let guard = self.tx.lock().expect("queue lock poisoned");
        let tx = guard.as_ref().ok_or(Error::NotInitialized)?;
        tx.send(Job::Run(Box::new(job)))
            .map_err(|_| Error::ExecutionFailed("queue worker terminated".into()))
    }

    /// Block until every previously enqueued job has completed.
    pub fn synchronize(&self) -> Result<()> {
        let (ack_tx, ack_rx) = mpsc::channel();
        {
            let guard = self.tx.lock().expect("queue lock poisoned");
            let tx = guard.as_ref().ok_or(Error::NotInitialized)?;
            tx.send(Job::Fence(ack_tx))
                .map_err(|_| Error::ExecutionFailed("queue worker terminated".into()))?;
        }
        ack_rx
            .recv()
            .map_err(|_| Error::ExecutionFailed("queue worker terminated".into()))
    }
}

impl Drop for CpuQueue {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit.
        self.tx.lock().expect("queue lock poisoned").take();
        if let Some(worker) = self.worker.lock().expect("queue lock poisoned").take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn jobs_run_in_enqueue_order() {
        let queue = CpuQueue::new().unwrap();
        let log = Arc::new(Mutex::new(Vec::new()));
        for i in 0..16 {
            let log = Arc::clone(&log);
            queue.submit(move || log.lock().unwrap().push(i)).unwrap();
        }
        queue.synchronize().unwrap();
        assert_eq!(*log.lock().unwrap(), (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn synchronize_waits_for_pending_work() {
        let queue = CpuQueue::new().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..8 {
            let counter = Arc::clone(&counter);
            queue
                .submit(move || {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }
        queue.synchronize().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn independent_queues_are_independent() {
        let q1 = CpuQueue::new().unwrap();
        let q2 = CpuQueue::new().unwrap();
        let hit = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hit);
        q1.submit(move || {
            h.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        // Synchronizing q2 says nothing about q1's job...
        q2.synchronize().unwrap();
        // ...only q1's own fence does.
        q1.synchronize().unwrap();
        assert_eq!(hit.load(Ordering::SeqCst), 1);
    }
}
