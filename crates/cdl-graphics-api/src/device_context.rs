use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::trace;

use crate::{Buffer, BufferDef};

pub(crate) struct DeviceContextInner {
    buffer_count: AtomicU64,
}

/// Entry point of the graphics layer. Cloning hands out another handle to the
/// same device.
///
/// The device keeps a count of live buffers so callers can verify their
/// resource bookkeeping.
#[derive(Clone)]
pub struct DeviceContext {
    inner: Arc<DeviceContextInner>,
}

impl DeviceContext {
    pub fn new() -> Self {
        trace!("creating device context");

        Self {
            inner: Arc::new(DeviceContextInner {
                buffer_count: AtomicU64::new(0),
            }),
        }
    }

    pub fn create_buffer(&self, buffer_def: &BufferDef) -> Buffer {
        Buffer::new(self, buffer_def)
    }

    /// Number of buffers currently alive on this device.
    pub fn buffer_count(&self) -> u64 {
        self.inner.buffer_count.load(Ordering::Relaxed)
    }

    pub(crate) fn on_buffer_created(&self) {
        self.inner.buffer_count.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn on_buffer_destroyed(&self) {
        self.inner.buffer_count.fetch_sub(1, Ordering::Relaxed);
    }
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DeviceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceContext")
            .field("buffer_count", &self.buffer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BufferDef, DeviceContext, MemoryUsage};

    #[test]
    fn buffer_lifetime_is_tracked() {
        let device_context = DeviceContext::new();
        assert_eq!(device_context.buffer_count(), 0);

        let buffer =
            device_context.create_buffer(&BufferDef::for_vertex_buffer(64, MemoryUsage::GpuOnly));
        let alias = buffer.clone();
        assert_eq!(device_context.buffer_count(), 1);

        drop(buffer);
        assert_eq!(device_context.buffer_count(), 1);

        drop(alias);
        assert_eq!(device_context.buffer_count(), 0);
    }
}
