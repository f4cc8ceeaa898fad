use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    scene::{LightId, ModelId},
    Color,
};

/// Behavioral variant of a light component.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumCount,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

impl Default for LightKind {
    fn default() -> Self {
        Self::Directional
    }
}

/// Runtime type of a registered light.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightType {
    Directional,
    Omnidirectional,
    Spotlight,
}

/// How intensity decays over a light's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FalloffMode {
    Linear,
    InverseSquared,
}

impl Default for FalloffMode {
    fn default() -> Self {
        Self::Linear
    }
}

/// Shadow map flavor a light renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShadowType {
    DepthMap,
    VarianceMap,
}

impl Default for ShadowType {
    fn default() -> Self {
        Self::DepthMap
    }
}

/// When a light's shadow map is re-rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShadowUpdateMode {
    None,
    ThisFrame,
    Realtime,
}

impl Default for ShadowUpdateMode {
    fn default() -> Self {
        Self::Realtime
    }
}

bitflags::bitflags! {
    /// Which object sets a light illuminates.
    pub struct LightMask: u32 {
        const DYNAMIC = 0x01;
        const BAKED = 0x02;
        const LIGHTMAP = 0x04;
    }
}

impl Default for LightMask {
    fn default() -> Self {
        Self::DYNAMIC
    }
}

impl Serialize for LightMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for LightMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // unknown bits in authored data are dropped rather than rejected
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// Authored color, either structured or as an `[r, g, b]` triple.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorConfig {
    Array([f32; 3]),
    Structured(Color),
}

impl From<ColorConfig> for Color {
    fn from(config: ColorConfig) -> Self {
        match config {
            ColorConfig::Array(rgb) => rgb.into(),
            ColorConfig::Structured(color) => color,
        }
    }
}

/// Loosely-typed configuration bag accepted when initializing a light
/// component. Absent fields keep whatever the component record already holds.
///
/// `shadow_type` and `mask` are recognized but only take effect through the
/// record defaults, never through initialization.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightComponentConfig {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub enabled: Option<bool>,
    /// Deprecated spelling of `enabled`, still accepted from older data.
    pub enable: Option<bool>,
    pub color: Option<ColorConfig>,
    pub intensity: Option<f32>,
    pub cast_shadows: Option<bool>,
    pub shadow_distance: Option<f32>,
    pub shadow_resolution: Option<u32>,
    pub shadow_bias: Option<f32>,
    pub normal_offset_bias: Option<f32>,
    pub range: Option<f32>,
    pub falloff_mode: Option<FalloffMode>,
    pub shadow_type: Option<ShadowType>,
    pub shadow_update_mode: Option<ShadowUpdateMode>,
    pub mask: Option<LightMask>,
    /// Degrees.
    pub inner_cone_angle: Option<f32>,
    /// Degrees.
    pub outer_cone_angle: Option<f32>,
    #[serde(skip)]
    pub light: Option<LightId>,
    #[serde(skip)]
    pub model: Option<ModelId>,
}

/// Authored state of a light component as stored in the component store,
/// plus the runtime handles owned by the component.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightComponentData {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub cast_shadows: bool,
    pub shadow_distance: f32,
    pub shadow_resolution: u32,
    pub shadow_bias: f32,
    pub normal_offset_bias: f32,
    pub range: f32,
    pub falloff_mode: FalloffMode,
    pub shadow_type: ShadowType,
    pub shadow_update_mode: ShadowUpdateMode,
    pub mask: LightMask,
    /// Degrees.
    pub inner_cone_angle: f32,
    /// Degrees.
    pub outer_cone_angle: f32,
    #[serde(skip)]
    pub light: Option<LightId>,
    #[serde(skip)]
    pub model: Option<ModelId>,
}

impl Default for LightComponentData {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: LightKind::Directional,
            color: Color::WHITE,
            intensity: 1.0,
            cast_shadows: false,
            shadow_distance: 40.0,
            shadow_resolution: 1024,
            shadow_bias: 0.05,
            normal_offset_bias: 0.0,
            range: 10.0,
            falloff_mode: FalloffMode::Linear,
            shadow_type: ShadowType::DepthMap,
            shadow_update_mode: ShadowUpdateMode::Realtime,
            mask: LightMask::DYNAMIC,
            inner_cone_angle: 40.0,
            outer_cone_angle: 45.0,
            light: None,
            model: None,
        }
    }
}

impl LightComponentData {
    /// Copies the fixed authored property set plus the runtime handles from
    /// `config` onto this record. `shadow_type` and `mask` are not part of
    /// that set.
    pub fn apply_config(&mut self, kind: LightKind, config: &LightComponentConfig) {
        self.kind = kind;
        self.light = config.light;
        self.model = config.model;

        if let Some(enabled) = config.enabled {
            self.enabled = enabled;
        }
        if let Some(color) = config.color {
            self.color = color.into();
        }
        if let Some(intensity) = config.intensity {
            self.intensity = intensity;
        }
        if let Some(range) = config.range {
            self.range = range;
        }
        if let Some(falloff_mode) = config.falloff_mode {
            self.falloff_mode = falloff_mode;
        }
        if let Some(inner_cone_angle) = config.inner_cone_angle {
            self.inner_cone_angle = inner_cone_angle;
        }
        if let Some(outer_cone_angle) = config.outer_cone_angle {
            self.outer_cone_angle = outer_cone_angle;
        }
        if let Some(cast_shadows) = config.cast_shadows {
            self.cast_shadows = cast_shadows;
        }
        if let Some(shadow_distance) = config.shadow_distance {
            self.shadow_distance = shadow_distance;
        }
        if let Some(shadow_resolution) = config.shadow_resolution {
            self.shadow_resolution = shadow_resolution;
        }
        if let Some(shadow_update_mode) = config.shadow_update_mode {
            self.shadow_update_mode = shadow_update_mode;
        }
        if let Some(shadow_bias) = config.shadow_bias {
            self.shadow_bias = shadow_bias;
        }
        if let Some(normal_offset_bias) = config.normal_offset_bias {
            self.normal_offset_bias = normal_offset_bias;
        }
    }

    /// Snapshot of the authored values as a configuration bag, with the color
    /// flattened to a triple. Runtime handles and the creation-only fields
    /// are left out, so re-initializing from the snapshot allocates fresh
    /// resources.
    pub fn to_config(&self) -> LightComponentConfig {
        LightComponentConfig {
            kind: Some(self.kind.to_string()),
            enabled: Some(self.enabled),
            color: Some(ColorConfig::Array([self.color.r, self.color.g, self.color.b])),
            intensity: Some(self.intensity),
            range: Some(self.range),
            inner_cone_angle: Some(self.inner_cone_angle),
            outer_cone_angle: Some(self.outer_cone_angle),
            cast_shadows: Some(self.cast_shadows),
            shadow_distance: Some(self.shadow_distance),
            shadow_resolution: Some(self.shadow_resolution),
            falloff_mode: Some(self.falloff_mode),
            shadow_update_mode: Some(self.shadow_update_mode),
            shadow_bias: Some(self.shadow_bias),
            normal_offset_bias: Some(self.normal_offset_bias),
            ..LightComponentConfig::default()
        }
    }
}
