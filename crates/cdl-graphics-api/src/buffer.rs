use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use parking_lot::{Mutex, MutexGuard};

use crate::{DeviceContext, MemoryUsage, ResourceUsage};

/// Used to create a `Buffer`
#[derive(Clone, Copy, Debug)]
pub struct BufferDef {
    pub size: u64,
    pub usage_flags: ResourceUsage,
    pub memory_usage: MemoryUsage,
}

impl Default for BufferDef {
    fn default() -> Self {
        Self {
            size: 0,
            usage_flags: ResourceUsage::empty(),
            memory_usage: MemoryUsage::Unknown,
        }
    }
}

impl BufferDef {
    pub fn verify(&self) {
        assert_ne!(self.size, 0);
        assert!(self
            .usage_flags
            .intersects(ResourceUsage::BUFFER_ONLY_USAGE_FLAGS));
    }

    pub fn for_buffer(size: usize, usage_flags: ResourceUsage, memory_usage: MemoryUsage) -> Self {
        Self {
            size: size as u64,
            usage_flags,
            memory_usage,
        }
    }

    pub fn for_buffer_data<T: Copy>(
        data: &[T],
        usage_flags: ResourceUsage,
        memory_usage: MemoryUsage,
    ) -> Self {
        Self::for_buffer(std::mem::size_of_val(data), usage_flags, memory_usage)
    }

    pub fn for_vertex_buffer(size: usize, memory_usage: MemoryUsage) -> Self {
        Self::for_buffer(size, ResourceUsage::AS_VERTEX_BUFFER, memory_usage)
    }

    pub fn for_vertex_buffer_data<T: Copy>(data: &[T], memory_usage: MemoryUsage) -> Self {
        Self::for_buffer_data(data, ResourceUsage::AS_VERTEX_BUFFER, memory_usage)
    }

    pub fn for_index_buffer(size: usize, memory_usage: MemoryUsage) -> Self {
        Self::for_buffer(size, ResourceUsage::AS_INDEX_BUFFER, memory_usage)
    }

    pub fn for_index_buffer_data<T: Copy>(data: &[T], memory_usage: MemoryUsage) -> Self {
        Self::for_buffer_data(data, ResourceUsage::AS_INDEX_BUFFER, memory_usage)
    }
}

pub(crate) struct BufferInner {
    pub(crate) buffer_def: BufferDef,
    pub(crate) device_context: DeviceContext,
    pub(crate) contents: Mutex<Vec<u8>>,
}

impl Drop for BufferInner {
    fn drop(&mut self) {
        self.device_context.on_buffer_destroyed();
    }
}

/// A chunk of device memory. In this layer every buffer is host visible, so
/// mapping always succeeds regardless of the declared `MemoryUsage`.
#[derive(Clone)]
pub struct Buffer {
    inner: Arc<BufferInner>,
}

impl Buffer {
    pub(crate) fn new(device_context: &DeviceContext, buffer_def: &BufferDef) -> Self {
        buffer_def.verify();
        device_context.on_buffer_created();

        Self {
            inner: Arc::new(BufferInner {
                buffer_def: *buffer_def,
                device_context: device_context.clone(),
                contents: Mutex::new(vec![0; buffer_def.size as usize]),
            }),
        }
    }

    pub fn definition(&self) -> &BufferDef {
        &self.inner.buffer_def
    }

    pub fn device_context(&self) -> &DeviceContext {
        &self.inner.device_context
    }

    pub fn size(&self) -> u64 {
        self.inner.buffer_def.size
    }

    /// Locks the buffer contents until the returned mapping is dropped.
    pub fn map_buffer(&self) -> BufferMappingInfo<'_> {
        BufferMappingInfo {
            data: self.inner.contents.lock(),
        }
    }

    pub fn copy_to_host_visible_buffer<T: Pod>(&self, data: &[T]) {
        self.copy_to_host_visible_buffer_with_offset(data, 0);
    }

    pub fn copy_to_host_visible_buffer_with_offset<T: Pod>(
        &self,
        data: &[T],
        buffer_byte_offset: u64,
    ) {
        let mut mapping = self.map_buffer();
        mapping.write_typed(buffer_byte_offset as usize, data);
    }
}

/// Access to the contents of a mapped `Buffer`; dropping it unmaps.
pub struct BufferMappingInfo<'a> {
    data: MutexGuard<'a, Vec<u8>>,
}

impl BufferMappingInfo<'_> {
    pub fn write_typed<T: Pod>(&mut self, byte_offset: usize, data: &[T]) {
        let src: &[u8] = bytemuck::cast_slice(data);
        assert!(byte_offset + src.len() <= self.data.len());
        self.data[byte_offset..byte_offset + src.len()].copy_from_slice(src);
    }

    pub fn read_typed<T: Pod>(&self, byte_offset: usize, count: usize) -> Vec<T> {
        let byte_count = count * std::mem::size_of::<T>();
        assert!(byte_offset + byte_count <= self.data.len());

        // copy out rather than cast in place, the backing store makes no
        // alignment promises
        let mut values = vec![T::zeroed(); count];
        bytemuck::cast_slice_mut::<T, u8>(&mut values)
            .copy_from_slice(&self.data[byte_offset..byte_offset + byte_count]);
        values
    }
}

#[cfg(test)]
mod tests {
    use crate::{BufferDef, DeviceContext, MemoryUsage, ResourceUsage};

    #[test]
    fn def_from_data_matches_slice_size() {
        let indices = [0u16, 1, 2, 3];
        let buffer_def = BufferDef::for_index_buffer_data(&indices, MemoryUsage::GpuOnly);
        assert_eq!(buffer_def.size, 8);
        assert!(buffer_def.usage_flags.contains(ResourceUsage::AS_INDEX_BUFFER));
    }

    #[test]
    fn mapped_writes_read_back() {
        let device_context = DeviceContext::new();
        let buffer =
            device_context.create_buffer(&BufferDef::for_vertex_buffer(48, MemoryUsage::CpuToGpu));

        let values = [1.0f32, 2.0, 3.0];
        {
            let mut mapping = buffer.map_buffer();
            mapping.write_typed(12, &values);
        }

        let readback = buffer.map_buffer().read_typed::<f32>(12, 3);
        assert_eq!(readback, values);
    }

    #[test]
    fn copy_fills_from_offset_zero() {
        let device_context = DeviceContext::new();
        let indices = [4u16, 5, 6];
        let buffer = device_context
            .create_buffer(&BufferDef::for_index_buffer_data(&indices, MemoryUsage::CpuToGpu));

        buffer.copy_to_host_visible_buffer(&indices);

        assert_eq!(buffer.map_buffer().read_typed::<u16>(0, 3), indices);
    }
}
