use std::str::FromStr;

use cdl_graphics_api::DeviceContext;
use cdl_math::Angle;
use strum::EnumCount;
use tracing::warn;

use crate::{
    components::{
        ColorConfig, LightComponentConfig, LightComponentData, LightComponentStore, LightKind,
    },
    errors::LightError,
    lighting::{
        DirectionalLightImplementation, LightKindImplementation, PointLightImplementation,
        SpotLightImplementation,
    },
    scene::{EntityId, Scene},
};

/// Routes light component lifecycle calls to the implementation matching the
/// component's kind.
///
/// Implementations are created on first use and kept for the lifetime of the
/// system; each owns the cached debug resources of its kind. In tools mode
/// every component additionally carries a debug model visualizing its shape.
pub struct LightComponentSystem {
    tools_mode: bool,
    implementations: [Option<Box<dyn LightKindImplementation>>; LightKind::COUNT],
}

impl LightComponentSystem {
    pub fn new(tools_mode: bool) -> Self {
        Self {
            tools_mode,
            implementations: Default::default(),
        }
    }

    pub fn tools_mode(&self) -> bool {
        self.tools_mode
    }

    /// Attaches light behavior to `entity` and initializes it from `config`.
    ///
    /// The entity must not already have a light component. On error nothing
    /// is registered and no record is kept.
    pub fn add_component(
        &mut self,
        device_context: &DeviceContext,
        scene: &mut Scene,
        store: &mut LightComponentStore,
        entity: EntityId,
        config: &LightComponentConfig,
    ) -> Result<(), LightError> {
        assert!(
            !store.contains(entity),
            "entity already has a light component"
        );
        store.insert(entity, LightComponentData::default());

        let result = self.initialize_component_data(device_context, scene, store, entity, config);
        if result.is_err() {
            store.remove(entity);
        }
        result
    }

    /// Initializes the component's record and runtime resources from a
    /// loosely-typed configuration bag.
    ///
    /// An absent `kind` keeps the kind already on the record. A color
    /// supplied as an `[r, g, b]` triple is converted to a structured color.
    /// The deprecated `enable` flag is folded into `enabled` with a warning.
    /// An unrecognized kind fails before anything is allocated or written.
    pub fn initialize_component_data(
        &mut self,
        device_context: &DeviceContext,
        scene: &mut Scene,
        store: &mut LightComponentStore,
        entity: EntityId,
        config: &LightComponentConfig,
    ) -> Result<(), LightError> {
        let mut data = config.clone();

        let kind = match data.kind.as_deref() {
            Some(name) => {
                LightKind::from_str(name).map_err(|_| LightError::InvalidKind(name.to_string()))?
            }
            None => store.get(entity).expect("light component not found").kind,
        };

        if let Some(color) = data.color {
            data.color = Some(ColorConfig::Structured(color.into()));
        }

        if let Some(enable) = data.enable.take() {
            warn!("light property 'enable' is deprecated, use 'enabled'");
            data.enabled = Some(enable);
        }

        let tools_mode = self.tools_mode;
        let implementation = self.implementation_for(kind);
        implementation.initialize(device_context, scene, entity, &mut data, tools_mode);

        let record = store.get_mut(entity).expect("light component not found");
        record.apply_config(kind, &data);
        Self::sync_light(scene, record);

        Ok(())
    }

    /// Swaps the component to a new kind, tearing down the old kind's
    /// resources before initializing the new ones from the component's
    /// current authored values.
    ///
    /// An unrecognized kind fails before any teardown happens.
    pub fn change_kind(
        &mut self,
        device_context: &DeviceContext,
        scene: &mut Scene,
        store: &mut LightComponentStore,
        entity: EntityId,
        new_kind: &str,
    ) -> Result<(), LightError> {
        let kind = LightKind::from_str(new_kind)
            .map_err(|_| LightError::InvalidKind(new_kind.to_string()))?;

        let record = store.get_mut(entity).expect("light component not found");
        let old_kind = record.kind;

        let old_implementation = self.implementations[old_kind as usize]
            .as_deref_mut()
            .expect("implementation for recorded kind");
        old_implementation.remove(scene, record);

        let mut data = record.to_config();
        data.kind = Some(kind.to_string());

        let tools_mode = self.tools_mode;
        let implementation = self.implementation_for(kind);
        implementation.initialize(device_context, scene, entity, &mut data, tools_mode);

        let record = store.get_mut(entity).expect("light component not found");
        record.apply_config(kind, &data);
        Self::sync_light(scene, record);

        Ok(())
    }

    /// Releases the component's runtime resources and drops its record.
    ///
    /// An entity without a light component is tolerated with a warning.
    pub fn remove_component(
        &mut self,
        scene: &mut Scene,
        store: &mut LightComponentStore,
        entity: EntityId,
    ) {
        let record = match store.get_mut(entity) {
            Some(record) => record,
            None => {
                warn!("no light component to remove for entity {:?}", entity);
                return;
            }
        };

        let implementation = self.implementations[record.kind as usize]
            .as_deref_mut()
            .expect("implementation for recorded kind");
        implementation.remove(scene, record);

        store.remove(entity);
    }

    /// Re-creates the source component's authored values as a fresh component
    /// on `target`. Runtime light and model handles are never shared.
    pub fn clone_component(
        &mut self,
        device_context: &DeviceContext,
        scene: &mut Scene,
        store: &mut LightComponentStore,
        source: EntityId,
        target: EntityId,
    ) -> Result<(), LightError> {
        let data = store
            .get(source)
            .expect("light component not found")
            .to_config();

        self.add_component(device_context, scene, store, target, &data)
    }

    /// Toggles the component and mirrors the change onto its runtime light
    /// and debug model.
    pub fn set_enabled(
        &self,
        scene: &mut Scene,
        store: &mut LightComponentStore,
        entity: EntityId,
        enabled: bool,
    ) {
        if let Some(record) = store.get_mut(entity) {
            record.enabled = enabled;
            Self::sync_light(scene, record);

            if let Some(model_id) = record.model {
                if let Some(model) = scene.model_mut(model_id) {
                    model.visible = enabled;
                }
            }
        }
    }

    /// Editor-only per-frame pass refreshing every component's debug
    /// visualization. Components whose kind never had an implementation
    /// created are skipped rather than forcing one into existence.
    pub fn tools_update(&self, scene: &Scene, store: &LightComponentStore) {
        for (_entity, record) in store.iter() {
            if let Some(implementation) = self.implementations[record.kind as usize].as_deref() {
                implementation.refresh_debug_visual(scene, record);
            }
        }
    }

    fn implementation_for(&mut self, kind: LightKind) -> &mut dyn LightKindImplementation {
        self.implementations[kind as usize]
            .get_or_insert_with(|| match kind {
                LightKind::Directional => Box::new(DirectionalLightImplementation::default()),
                LightKind::Point => Box::new(PointLightImplementation::default()),
                LightKind::Spot => Box::new(SpotLightImplementation::default()),
            })
            .as_mut()
    }

    /// Mirrors the record's authored values onto its registered runtime
    /// light. The light's type is fixed at registration and never re-synced.
    fn sync_light(scene: &mut Scene, record: &LightComponentData) {
        if let Some(light_id) = record.light {
            if let Some(light) = scene.light_mut(light_id) {
                light.color = record.color;
                light.intensity = record.intensity;
                light.range = record.range;
                light.inner_cone_angle = Angle::from_degrees(record.inner_cone_angle);
                light.outer_cone_angle = Angle::from_degrees(record.outer_cone_angle);
                light.falloff_mode = record.falloff_mode;
                light.cast_shadows = record.cast_shadows;
                light.shadow_distance = record.shadow_distance;
                light.shadow_resolution = record.shadow_resolution;
                light.shadow_bias = record.shadow_bias;
                light.normal_offset_bias = record.normal_offset_bias;
                light.shadow_type = record.shadow_type;
                light.shadow_update_mode = record.shadow_update_mode;
                light.mask = record.mask;
                light.enabled = record.enabled;
            }
        }
    }
}
