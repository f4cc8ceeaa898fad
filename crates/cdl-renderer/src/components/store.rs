use slotmap::SecondaryMap;

use crate::{components::LightComponentData, scene::EntityId};

/// Authored property names recognized for light components, in declaration
/// order.
pub const LIGHT_SCHEMA: [&str; 18] = [
    "enabled",
    "type",
    "color",
    "intensity",
    "castShadows",
    "shadowDistance",
    "shadowResolution",
    "shadowBias",
    "normalOffsetBias",
    "range",
    "falloffMode",
    "shadowType",
    "shadowUpdateMode",
    "mask",
    "innerConeAngle",
    "outerConeAngle",
    "light",
    "model",
];

/// Per-entity records for light components.
///
/// The store owns every record; the light system only borrows them while
/// running lifecycle operations.
#[derive(Default)]
pub struct LightComponentStore {
    components: SecondaryMap<EntityId, LightComponentData>,
}

impl LightComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier this component type registers under.
    pub fn id() -> &'static str {
        "light"
    }

    /// Recognized authored property names, in declaration order.
    pub fn schema() -> &'static [&'static str] {
        &LIGHT_SCHEMA
    }

    pub fn insert(&mut self, entity: EntityId, data: LightComponentData) {
        self.components.insert(entity, data);
    }

    pub fn get(&self, entity: EntityId) -> Option<&LightComponentData> {
        self.components.get(entity)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut LightComponentData> {
        self.components.get_mut(entity)
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<LightComponentData> {
        self.components.remove(entity)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.components.contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &'_ LightComponentData)> {
        self.components.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_covers_authored_and_runtime_names() {
        assert_eq!(LightComponentStore::schema().len(), 18);
        assert_eq!(LightComponentStore::schema()[0], "enabled");
        assert!(LIGHT_SCHEMA.contains(&"innerConeAngle"));
        assert!(LIGHT_SCHEMA.contains(&"light"));
        assert!(LIGHT_SCHEMA.contains(&"model"));
        assert_eq!(LightComponentStore::id(), "light");
    }
}
