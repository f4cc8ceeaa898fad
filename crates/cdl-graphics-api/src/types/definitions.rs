bitflags::bitflags! {
    pub struct ResourceUsage: u16 {
        // buffer
        const AS_CONST_BUFFER = 0x0001;
        // buffer
        const AS_VERTEX_BUFFER = 0x0002;
        // buffer
        const AS_INDEX_BUFFER = 0x0004;
        // buffer
        const AS_TRANSFERABLE = 0x0008;
        // meta
        const BUFFER_ONLY_USAGE_FLAGS =
            Self::AS_CONST_BUFFER.bits|
            Self::AS_VERTEX_BUFFER.bits|
            Self::AS_INDEX_BUFFER.bits;
    }
}

/// Indicates how the memory will be accessed and affects where in memory it
/// needs to be allocated.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MemoryUsage {
    Unknown,

    /// The memory is only accessed by the GPU
    GpuOnly,

    /// The memory is written by the CPU and read by the GPU
    CpuToGpu,
}

impl Default for MemoryUsage {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Element formats a vertex attribute can use
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    R32_SFLOAT,
    R32G32_SFLOAT,
    R32G32B32_SFLOAT,
    R32G32B32A32_SFLOAT,
}

impl Format {
    /// Size in bytes of a single element of this format
    pub fn block_size(self) -> u32 {
        match self {
            Self::R32_SFLOAT => 4,
            Self::R32G32_SFLOAT => 8,
            Self::R32G32B32_SFLOAT => 12,
            Self::R32G32B32A32_SFLOAT => 16,
        }
    }
}

/// How to intepret vertex data into a form of geometry. Similar to
/// `vkPrimitiveTopology`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

/// The size of index buffer elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    Uint32,
    Uint16,
}

impl Default for IndexType {
    fn default() -> Self {
        Self::Uint32
    }
}

/// Affects how quickly vertex attributes are consumed from buffers, similar to
/// `vkVertexInputRate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeRate {
    Vertex,
    Instance,
}

impl Default for VertexAttributeRate {
    fn default() -> Self {
        Self::Vertex
    }
}

/// Describes an attribute within a `VertexLayout`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayoutAttribute {
    /// Format of the attribute
    pub format: Format,
    /// Which buffer the attribute is contained in
    pub buffer_index: u32,
    /// Affects what input variable within the shader the attribute is assigned
    pub location: u32,
    /// The byte offset of the attribute within the buffer
    pub byte_offset: u32,
}

/// Describes a buffer that provides vertex attribute data (See `VertexLayout`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayoutBuffer {
    pub stride: u32,
    pub rate: VertexAttributeRate,
}

/// Describes how vertex attributes are laid out within one or more buffers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VertexLayout {
    pub attributes: Vec<VertexLayoutAttribute>,
    pub buffers: Vec<VertexLayoutBuffer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_only_flags_cover_buffer_usages() {
        assert!(ResourceUsage::BUFFER_ONLY_USAGE_FLAGS.contains(ResourceUsage::AS_VERTEX_BUFFER));
        assert!(ResourceUsage::BUFFER_ONLY_USAGE_FLAGS.contains(ResourceUsage::AS_INDEX_BUFFER));
        assert!(!ResourceUsage::BUFFER_ONLY_USAGE_FLAGS.contains(ResourceUsage::AS_TRANSFERABLE));
    }

    #[test]
    fn format_block_sizes() {
        assert_eq!(Format::R32_SFLOAT.block_size(), 4);
        assert_eq!(Format::R32G32B32_SFLOAT.block_size(), 12);
    }
}
