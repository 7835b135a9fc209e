//! Shared host buffers standing in for device memory.
//!
//! A [`CpuBuf`] is the reference backend's equivalent of a device
//! allocation: cloning it shares the same storage, so a buffer handed to an
//! enqueued call stays reachable from the worker thread while the caller
//! keeps its own handle. The protocol's aliasing rules apply unchanged: a
//! buffer passed to an enqueued call must not be mutated by other work
//! until the queue has been synchronized.

use std::sync::{Arc, Mutex};

/// Caller-owned host buffer with shared storage.
#[derive(Clone)]
pub struct CpuBuf<T> {
    inner: Arc<Mutex<Vec<T>>>,
}

impl<T: Copy + Default + Send + 'static> CpuBuf<T> {
    /// Allocate a zero-initialized buffer of `len` elements.
    pub fn zeros(len: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(vec![T::default(); len])),
        }
    }

    /// Allocate a buffer holding a copy of `data`.
    pub fn from_host(data: &[T]) -> Self {
        Self {
            inner: Arc::new(Mutex::new(data.to_vec())),
        }
    }

    /// Copy the buffer contents out to a fresh vector.
    pub fn to_host(&self) -> Vec<T> {
        self.inner.lock().expect("buffer lock poisoned").clone()
    }

    /// Overwrite the whole buffer from `data`.
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` differs from the buffer length.
    pub fn copy_from_host(&self, data: &[T]) {
        let mut guard = self.inner.lock().expect("buffer lock poisoned");
        assert_eq!(
            data.len(),
            guard.len(),
            "source length {} does not match buffer length {}",
            data.len(),
            guard.len()
        );
        guard.copy_from_slice(data);
    }

    /// Overwrite `data.len()` elements starting at `offset`.
    pub(crate) fn write_at(&self, offset: usize, data: &[T]) {
        let mut guard = self.inner.lock().expect("buffer lock poisoned");
        guard[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("buffer lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let a = CpuBuf::from_host(&[1.0f64, 2.0, 3.0]);
        let b = a.clone();
        b.write_at(1, &[9.0]);
        assert_eq!(a.to_host(), vec![1.0, 9.0, 3.0]);
    }

    #[test]
    fn zeros_is_zeroed() {
        let a: CpuBuf<i32> = CpuBuf::zeros(4);
        assert_eq!(a.to_host(), vec![0; 4]);
        assert_eq!(a.len(), 4);
    }

    #[test]
    #[should_panic(expected = "does not match buffer length")]
    fn full_copy_checks_length() {
        let a: CpuBuf<f32> = CpuBuf::zeros(3);
        a.copy_from_host(&[1.0, 2.0]);
    }
}
