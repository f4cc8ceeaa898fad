use std::sync::Arc;

use cdl_math::{Angle, Quat, Vec3};
use slotmap::SlotMap;
use tracing::warn;

use crate::{
    components::{FalloffMode, LightMask, LightType, ShadowType, ShadowUpdateMode},
    resources::{BasicMaterial, Mesh},
    Color, UP_VECTOR,
};

slotmap::new_key_type! {
    /// Stable identifier of an entity in the scene.
    pub struct EntityId;

    /// Handle of a light registered in the scene's light registry.
    pub struct LightId;

    /// Handle of a model registered in the scene's model registry.
    pub struct ModelId;
}

/// Spatial state of an entity's node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub name: String,
    pub transform: Transform,
}

/// A light as registered in the scene's light registry.
#[derive(Clone, Debug)]
pub struct RenderLight {
    pub entity: EntityId,
    pub light_type: LightType,
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
    pub inner_cone_angle: Angle,
    pub outer_cone_angle: Angle,
    pub falloff_mode: FalloffMode,
    pub cast_shadows: bool,
    pub shadow_distance: f32,
    pub shadow_resolution: u32,
    pub shadow_bias: f32,
    pub normal_offset_bias: f32,
    pub shadow_type: ShadowType,
    pub shadow_update_mode: ShadowUpdateMode,
    pub mask: LightMask,
    pub enabled: bool,
}

impl RenderLight {
    pub fn new(entity: EntityId, light_type: LightType) -> Self {
        Self {
            entity,
            light_type,
            color: Color::WHITE,
            intensity: 1.0,
            range: 10.0,
            inner_cone_angle: Angle::from_degrees(40.0),
            outer_cone_angle: Angle::from_degrees(45.0),
            falloff_mode: FalloffMode::Linear,
            cast_shadows: false,
            shadow_distance: 40.0,
            shadow_resolution: 1024,
            shadow_bias: 0.05,
            normal_offset_bias: 0.0,
            shadow_type: ShadowType::DepthMap,
            shadow_update_mode: ShadowUpdateMode::Realtime,
            mask: LightMask::DYNAMIC,
            enabled: true,
        }
    }
}

/// An editor-only render model visualizing a light's shape. Not part of the
/// lit scene.
pub struct DebugModel {
    pub entity: EntityId,
    pub mesh: Arc<Mesh>,
    pub material: Arc<BasicMaterial>,
    pub visible: bool,
}

impl DebugModel {
    pub fn new(entity: EntityId, mesh: Arc<Mesh>, material: Arc<BasicMaterial>) -> Self {
        Self {
            entity,
            mesh,
            material,
            visible: true,
        }
    }
}

/// Entities plus the light and debug model registries the renderer consumes.
#[derive(Default)]
pub struct Scene {
    entities: SlotMap<EntityId, Entity>,
    lights: SlotMap<LightId, RenderLight>,
    models: SlotMap<ModelId, DebugModel>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_entity(&mut self, name: &str) -> EntityId {
        self.entities.insert(Entity {
            name: name.to_string(),
            transform: Transform::default(),
        })
    }

    pub fn destroy_entity(&mut self, entity: EntityId) {
        self.entities.remove(entity);
    }

    pub fn entity(&self, entity: EntityId) -> Option<&Entity> {
        self.entities.get(entity)
    }

    pub fn entity_mut(&mut self, entity: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(entity)
    }

    pub fn add_light(&mut self, light: RenderLight) -> LightId {
        self.lights.insert(light)
    }

    pub fn remove_light(&mut self, light: LightId) {
        if self.lights.remove(light).is_none() {
            warn!("removing unknown light handle {:?}", light);
        }
    }

    pub fn light(&self, light: LightId) -> Option<&RenderLight> {
        self.lights.get(light)
    }

    pub fn light_mut(&mut self, light: LightId) -> Option<&mut RenderLight> {
        self.lights.get_mut(light)
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn add_model(&mut self, model: DebugModel) -> ModelId {
        self.models.insert(model)
    }

    pub fn remove_model(&mut self, model: ModelId) {
        if self.models.remove(model).is_none() {
            warn!("removing unknown model handle {:?}", model);
        }
    }

    pub fn model(&self, model: ModelId) -> Option<&DebugModel> {
        self.models.get(model)
    }

    pub fn model_mut(&mut self, model: ModelId) -> Option<&mut DebugModel> {
        self.models.get_mut(model)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Direction an entity's light shines in, world space.
    pub fn light_direction(&self, entity: EntityId) -> Vec3 {
        let rotation = self
            .entities
            .get(entity)
            .map_or(Quat::IDENTITY, |entity| entity.transform.rotation);
        rotation.mul_vec3(-UP_VECTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::LightType;

    #[test]
    fn registry_slots_are_not_aliased_after_reuse() {
        let mut scene = Scene::new();
        let entity = scene.create_entity("sun");

        let first = scene.add_light(RenderLight::new(entity, LightType::Directional));
        scene.remove_light(first);
        let second = scene.add_light(RenderLight::new(entity, LightType::Directional));

        assert_ne!(first, second);
        assert!(scene.light(first).is_none());
        assert!(scene.light(second).is_some());
        assert_eq!(scene.light_count(), 1);
    }

    #[test]
    fn removing_a_stale_handle_is_tolerated() {
        let mut scene = Scene::new();
        let entity = scene.create_entity("lamp");

        let light = scene.add_light(RenderLight::new(entity, LightType::Omnidirectional));
        scene.remove_light(light);
        scene.remove_light(light);

        assert_eq!(scene.light_count(), 0);
    }

    #[test]
    fn light_direction_follows_entity_rotation() {
        let mut scene = Scene::new();
        let entity = scene.create_entity("spot");
        assert!(scene.light_direction(entity).abs_diff_eq(-Vec3::Y, 1e-6));

        scene.entity_mut(entity).unwrap().transform.rotation =
            Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);

        assert!(scene.light_direction(entity).abs_diff_eq(-Vec3::Z, 1e-6));
    }
}
