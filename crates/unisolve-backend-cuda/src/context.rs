//! CUDA device context management.

use std::sync::Arc;

use cudarc::driver::{CudaContext as DriverContext, CudaStream};
use unisolve_core::{Error, Result};

/// CUDA context holding the device and its default stream.
///
/// Create one context and share it between sessions to avoid
/// reinitialization overhead.
pub struct CudaContext {
    ctx: Arc<DriverContext>,
    stream: Arc<CudaStream>,
}

impl CudaContext {
    /// Create a context on device 0.
    pub fn new() -> Result<Self> {
        Self::with_device(0)
    }

    /// Create a context on a specific device ordinal.
    pub fn with_device(device_id: usize) -> Result<Self> {
        let ctx = DriverContext::new(device_id).map_err(|e| {
            log::warn!("CUDA device {device_id} initialization failed: {e}");
            Error::NotInitialized
        })?;
        let stream = ctx.default_stream();
        log::info!("CUDA context initialized on device {device_id}");
        Ok(Self { ctx, stream })
    }

    /// Whether any CUDA device can be initialized on this system.
    pub fn is_available() -> bool {
        DriverContext::new(0).is_ok()
    }

    /// The default stream of this context.
    pub fn stream(&self) -> &Arc<CudaStream> {
        &self.stream
    }

    /// The underlying driver context.
    pub fn cuda_context(&self) -> &Arc<DriverContext> {
        &self.ctx
    }
}
