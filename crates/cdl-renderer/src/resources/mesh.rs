use cdl_graphics_api::{
    Buffer, BufferDef, DeviceContext, Format, IndexType, MemoryUsage, PrimitiveTopology,
    VertexAttributeRate, VertexLayout, VertexLayoutAttribute, VertexLayoutBuffer,
};
use cdl_math::Vec3;

/// Position-only geometry plus the buffers backing it.
pub struct Mesh {
    vertex_buffer: Buffer,
    vertex_count: u32,
    vertex_layout: VertexLayout,
    topology: PrimitiveTopology,
    index_buffer: Option<Buffer>,
    index_count: u32,
    index_type: IndexType,
}

impl Mesh {
    fn position_layout() -> VertexLayout {
        VertexLayout {
            attributes: vec![VertexLayoutAttribute {
                format: Format::R32G32B32_SFLOAT,
                buffer_index: 0,
                location: 0,
                byte_offset: 0,
            }],
            buffers: vec![VertexLayoutBuffer {
                stride: Format::R32G32B32_SFLOAT.block_size(),
                rate: VertexAttributeRate::Vertex,
            }],
        }
    }

    /// Builds a static non-indexed mesh from raw positions.
    pub fn from_positions(
        device_context: &DeviceContext,
        positions: &[Vec3],
        topology: PrimitiveTopology,
    ) -> Self {
        let vertex_buffer = device_context
            .create_buffer(&BufferDef::for_vertex_buffer_data(positions, MemoryUsage::GpuOnly));
        vertex_buffer.copy_to_host_visible_buffer(positions);

        Self {
            vertex_buffer,
            vertex_count: positions.len() as u32,
            vertex_layout: Self::position_layout(),
            topology,
            index_buffer: None,
            index_count: 0,
            index_type: IndexType::default(),
        }
    }

    /// Builds an indexed mesh around an existing index buffer. The vertex
    /// buffer is allocated rewritable and starts zeroed.
    pub fn new_dynamic_indexed(
        device_context: &DeviceContext,
        vertex_count: u32,
        index_buffer: Buffer,
        index_count: u32,
        index_type: IndexType,
        topology: PrimitiveTopology,
    ) -> Self {
        let vertex_layout = Self::position_layout();
        let vertex_buffer_size = vertex_count as usize * vertex_layout.buffers[0].stride as usize;
        let vertex_buffer = device_context.create_buffer(&BufferDef::for_vertex_buffer(
            vertex_buffer_size,
            MemoryUsage::CpuToGpu,
        ));

        Self {
            vertex_buffer,
            vertex_count,
            vertex_layout,
            topology,
            index_buffer: Some(index_buffer),
            index_count,
            index_type,
        }
    }

    /// Builds a static sphere of triangles, `slices` stacks tall and `sails`
    /// segments around.
    pub fn new_sphere(
        device_context: &DeviceContext,
        radius: f32,
        slices: u32,
        sails: u32,
    ) -> Self {
        fn ring_point(ring_radius: f32, y: f32, langle: f32) -> Vec3 {
            Vec3::new(ring_radius * langle.cos(), y, ring_radius * langle.sin())
        }

        let mut positions = Vec::new();
        let slice_size = 2.0 * radius / slices as f32;
        let angle = 2.0 * std::f32::consts::PI / sails as f32;
        for slice in 0..slices {
            let y0 = -radius + slice as f32 * slice_size;
            let y1 = -radius + (slice + 1) as f32 * slice_size;
            for sail in 0..sails {
                if slice == 0 {
                    let pole = Vec3::new(0.0, y0, 0.0);
                    let lr = (radius * radius - y1 * y1).sqrt();
                    let p1 = ring_point(lr, y1, angle * sail as f32);
                    let p2 = ring_point(lr, y1, angle * (sail + 1) as f32);
                    positions.push(pole);
                    positions.push(p2);
                    positions.push(p1);
                } else if slice == slices - 1 {
                    let pole = Vec3::new(0.0, y1, 0.0);
                    let lr = (radius * radius - y0 * y0).sqrt();
                    let p1 = ring_point(lr, y0, angle * sail as f32);
                    let p2 = ring_point(lr, y0, angle * (sail + 1) as f32);
                    positions.push(p1);
                    positions.push(p2);
                    positions.push(pole);
                } else {
                    let lr0 = (radius * radius - y0 * y0).sqrt();
                    let lr1 = (radius * radius - y1 * y1).sqrt();
                    let a0 = ring_point(lr0, y0, angle * sail as f32);
                    let b0 = ring_point(lr0, y0, angle * (sail + 1) as f32);
                    let a1 = ring_point(lr1, y1, angle * sail as f32);
                    let b1 = ring_point(lr1, y1, angle * (sail + 1) as f32);
                    positions.push(a0);
                    positions.push(b0);
                    positions.push(a1);
                    positions.push(a1);
                    positions.push(b0);
                    positions.push(b1);
                }
            }
        }

        Self::from_positions(device_context, &positions, PrimitiveTopology::TriangleList)
    }

    pub fn vertex_buffer(&self) -> &Buffer {
        &self.vertex_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn vertex_layout(&self) -> &VertexLayout {
        &self.vertex_layout
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn index_buffer(&self) -> Option<&Buffer> {
        self.index_buffer.as_ref()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_mesh_is_non_indexed() {
        let device_context = DeviceContext::new();
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];

        let mesh = Mesh::from_positions(&device_context, &positions, PrimitiveTopology::LineList);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.topology(), PrimitiveTopology::LineList);
        assert!(mesh.index_buffer().is_none());
        assert_eq!(mesh.vertex_buffer().size(), 48);

        let readback = mesh.vertex_buffer().map_buffer().read_typed::<Vec3>(0, 4);
        assert_eq!(readback, positions);
    }

    #[test]
    fn sphere_vertex_count_and_bounds() {
        let device_context = DeviceContext::new();
        let slices = 16;
        let sails = 16;

        let mesh = Mesh::new_sphere(&device_context, 0.1, slices, sails);

        // pole slices are single triangles, middle slices are quads
        let expected = (2 * 3 + (slices - 2) * 6) * sails;
        assert_eq!(mesh.vertex_count(), expected);
        assert_eq!(mesh.topology(), PrimitiveTopology::TriangleList);

        let positions = mesh
            .vertex_buffer()
            .map_buffer()
            .read_typed::<Vec3>(0, expected as usize);
        for position in positions {
            assert!(position.length() <= 0.1 + 1e-5);
        }
    }

    #[test]
    fn dynamic_mesh_shares_the_index_buffer() {
        let device_context = DeviceContext::new();
        let indices = [0u16, 1, 1, 2, 2, 0];
        let index_buffer = device_context
            .create_buffer(&BufferDef::for_index_buffer_data(&indices, MemoryUsage::GpuOnly));
        index_buffer.copy_to_host_visible_buffer(&indices);

        let mesh = Mesh::new_dynamic_indexed(
            &device_context,
            3,
            index_buffer.clone(),
            indices.len() as u32,
            IndexType::Uint16,
            PrimitiveTopology::LineList,
        );

        assert_eq!(mesh.vertex_buffer().size(), 36);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.index_type(), IndexType::Uint16);
        let shared = mesh.index_buffer().unwrap();
        assert_eq!(shared.map_buffer().read_typed::<u16>(0, 6), indices);
    }
}
