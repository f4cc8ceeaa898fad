use std::sync::Arc;

use cdl_graphics_api::{Buffer, BufferDef, DeviceContext, IndexType, MemoryUsage, PrimitiveTopology};
use cdl_math::{Angle, Quat, Vec3};

use crate::{
    components::{LightComponentConfig, LightComponentData, LightType},
    resources::{BasicMaterial, Mesh},
    scene::{DebugModel, EntityId, RenderLight, Scene},
    Color,
};

const CONE_SEGMENTS: u32 = 40;

/// Kind-specific behavior shared by every light component of one kind.
///
/// One instance exists per kind, created on first use and kept for the
/// lifetime of the owning system. The instance owns that kind's cached debug
/// resources.
pub trait LightKindImplementation {
    /// The runtime type lights of this kind register as.
    fn kind_light_type(&self) -> LightType;

    /// Builds or returns the cached debug mesh for this kind.
    fn build_debug_mesh(&mut self, device_context: &DeviceContext) -> Arc<Mesh>;

    /// Builds or returns the cached debug material for this kind.
    fn build_debug_material(&mut self, device_context: &DeviceContext) -> Arc<BasicMaterial>;

    /// Registers one scene light bound to `entity` and, in tools mode, one
    /// debug model. The new handles are written to `data`.
    fn initialize(
        &mut self,
        device_context: &DeviceContext,
        scene: &mut Scene,
        entity: EntityId,
        data: &mut LightComponentConfig,
        tools_mode: bool,
    ) {
        let light = RenderLight::new(entity, self.kind_light_type());
        data.light = Some(scene.add_light(light));

        if tools_mode {
            let mesh = self.build_debug_mesh(device_context);
            let material = self.build_debug_material(device_context);
            data.model = Some(scene.add_model(DebugModel::new(entity, mesh, material)));
        }
    }

    /// Unregisters the component's debug model, then its light. Both handles
    /// are cleared so a later teardown cannot release them again.
    fn remove(&mut self, scene: &mut Scene, data: &mut LightComponentData) {
        if let Some(model) = data.model.take() {
            scene.remove_model(model);
        }
        if let Some(light) = data.light.take() {
            scene.remove_light(light);
        }
    }

    /// Refreshes the debug visualization from current component data. Kinds
    /// with static geometry have nothing to do here.
    fn refresh_debug_visual(&self, _scene: &Scene, _data: &LightComponentData) {}
}

#[derive(Default)]
pub struct DirectionalLightImplementation {
    debug_mesh: Option<Arc<Mesh>>,
    debug_material: Option<Arc<BasicMaterial>>,
}

impl LightKindImplementation for DirectionalLightImplementation {
    fn kind_light_type(&self) -> LightType {
        LightType::Directional
    }

    fn build_debug_mesh(&mut self, device_context: &DeviceContext) -> Arc<Mesh> {
        self.debug_mesh
            .get_or_insert_with(|| {
                Arc::new(Mesh::from_positions(
                    device_context,
                    &arrow_positions(),
                    PrimitiveTopology::LineList,
                ))
            })
            .clone()
    }

    fn build_debug_material(&mut self, _device_context: &DeviceContext) -> Arc<BasicMaterial> {
        self.debug_material
            .get_or_insert_with(|| Arc::new(BasicMaterial::new(Color::YELLOW)))
            .clone()
    }
}

#[derive(Default)]
pub struct PointLightImplementation {
    debug_mesh: Option<Arc<Mesh>>,
    debug_material: Option<Arc<BasicMaterial>>,
}

impl LightKindImplementation for PointLightImplementation {
    fn kind_light_type(&self) -> LightType {
        LightType::Omnidirectional
    }

    fn build_debug_mesh(&mut self, device_context: &DeviceContext) -> Arc<Mesh> {
        self.debug_mesh
            .get_or_insert_with(|| Arc::new(Mesh::new_sphere(device_context, 0.1, 16, 16)))
            .clone()
    }

    fn build_debug_material(&mut self, _device_context: &DeviceContext) -> Arc<BasicMaterial> {
        self.debug_material
            .get_or_insert_with(|| Arc::new(BasicMaterial::new(Color::YELLOW)))
            .clone()
    }
}

#[derive(Default)]
pub struct SpotLightImplementation {
    index_buffer: Option<Buffer>,
    debug_material: Option<Arc<BasicMaterial>>,
}

impl SpotLightImplementation {
    fn shared_index_buffer(&mut self, device_context: &DeviceContext) -> Buffer {
        self.index_buffer
            .get_or_insert_with(|| {
                let indices = cone_indices();
                let index_buffer = device_context.create_buffer(
                    &BufferDef::for_index_buffer_data(&indices, MemoryUsage::GpuOnly),
                );
                index_buffer.copy_to_host_visible_buffer(&indices);
                index_buffer
            })
            .clone()
    }
}

impl LightKindImplementation for SpotLightImplementation {
    fn kind_light_type(&self) -> LightType {
        LightType::Spotlight
    }

    /// The cone shape depends on per-component angle and range, so every
    /// component gets its own rewritable vertex buffer around the shared
    /// outline indices.
    fn build_debug_mesh(&mut self, device_context: &DeviceContext) -> Arc<Mesh> {
        let index_buffer = self.shared_index_buffer(device_context);
        let index_count = index_buffer.size() as u32 / 2;

        Arc::new(Mesh::new_dynamic_indexed(
            device_context,
            CONE_SEGMENTS + 2,
            index_buffer,
            index_count,
            IndexType::Uint16,
            PrimitiveTopology::LineList,
        ))
    }

    fn build_debug_material(&mut self, _device_context: &DeviceContext) -> Arc<BasicMaterial> {
        self.debug_material
            .get_or_insert_with(|| Arc::new(BasicMaterial::default()))
            .clone()
    }

    fn refresh_debug_visual(&self, scene: &Scene, data: &LightComponentData) {
        if let Some(model_id) = data.model {
            if let Some(model) = scene.model(model_id) {
                let positions =
                    cone_positions(Angle::from_degrees(data.outer_cone_angle), data.range);
                model.mesh.vertex_buffer().copy_to_host_visible_buffer(&positions);
            }
        }
    }
}

/// Line-list positions for the directional light glyph: a down-pointing
/// arrow stroke repeated at 120 degree rotations around the vertical axis.
fn arrow_positions() -> Vec<Vec3> {
    let stroke = [
        // stalk
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::new(0.0, -8.0, -2.0),
        // head base
        Vec3::new(-0.25, -8.0, -2.0),
        Vec3::new(0.25, -8.0, -2.0),
        // head sides
        Vec3::new(0.25, -8.0, -2.0),
        Vec3::new(0.0, -10.0, -2.0),
        Vec3::new(0.0, -10.0, -2.0),
        Vec3::new(-0.25, -8.0, -2.0),
        // head depth
        Vec3::new(0.0, -8.0, -1.75),
        Vec3::new(0.0, -10.0, -2.0),
        Vec3::new(0.0, -8.0, -2.25),
        Vec3::new(0.0, -10.0, -2.0),
    ];

    let mut positions = Vec::with_capacity(stroke.len() * 3);
    for step in 0..3 {
        let rotation = Quat::from_rotation_y(step as f32 * 2.0 * std::f32::consts::PI / 3.0);
        for position in &stroke {
            positions.push(rotation.mul_vec3(*position));
        }
    }
    positions
}

/// Index pairs for the spot cone wireframe: four spokes from the apex plus a
/// closed outline through the circle points.
fn cone_indices() -> Vec<u16> {
    let mut indices = Vec::with_capacity((CONE_SEGMENTS as usize + 4) * 2);
    indices.extend_from_slice(&[0, 1, 0, 11, 0, 21, 0, 31]);
    for i in 0..CONE_SEGMENTS as u16 {
        indices.push(i + 1);
        indices.push(i + 2);
    }
    indices
}

/// Cone outline positions for the given outer angle and range: the apex at
/// the local origin and a circle of points below it.
fn cone_positions(outer_cone_angle: Angle, range: f32) -> Vec<Vec3> {
    let y = -range * outer_cone_angle.cos();
    let circle_radius = range * outer_cone_angle.sin();

    let mut positions = Vec::with_capacity(CONE_SEGMENTS as usize + 2);
    positions.push(Vec3::ZERO);
    for i in 0..=CONE_SEGMENTS {
        let theta = 2.0 * std::f32::consts::PI * i as f32 / CONE_SEGMENTS as f32;
        positions.push(Vec3::new(
            circle_radius * theta.cos(),
            y,
            circle_radius * theta.sin(),
        ));
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_glyph_is_three_rotated_strokes() {
        let positions = arrow_positions();
        assert_eq!(positions.len(), 36);

        let rotation = Quat::from_rotation_y(2.0 * std::f32::consts::PI / 3.0);
        for i in 0..24 {
            let expected = rotation.mul_vec3(positions[i]);
            assert!(expected.abs_diff_eq(positions[i + 12], 1e-5));
        }
    }

    #[test]
    fn cone_wireframe_indices() {
        let indices = cone_indices();
        assert_eq!(indices.len(), 88);
        assert_eq!(&indices[..8], &[0, 1, 0, 11, 0, 21, 0, 31]);
        assert_eq!(*indices.iter().max().unwrap(), 41);
    }

    #[test]
    fn cone_flattens_at_a_right_angle() {
        let positions = cone_positions(Angle::from_degrees(90.0), 10.0);
        assert_eq!(positions.len(), 42);
        assert_eq!(positions[0], Vec3::ZERO);

        for position in &positions[1..] {
            assert!(position.y.abs() < 1e-3);
            let circle_radius = Vec3::new(position.x, 0.0, position.z).length();
            assert!((circle_radius - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn cone_collapses_at_a_zero_angle() {
        let positions = cone_positions(Angle::from_degrees(0.0), 10.0);

        for position in &positions[1..] {
            assert!(position.x.abs() < 1e-6);
            assert!(position.z.abs() < 1e-6);
            assert!((position.y + 10.0).abs() < 1e-4);
        }
    }
}
