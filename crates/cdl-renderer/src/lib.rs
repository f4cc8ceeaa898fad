//! Candela renderer
//!
//! Scene-side light component lifecycle. A manager routes component
//! creation, kind changes, cloning, removal and the editor refresh pass to
//! per-kind implementations, which own the debug visualization resources
//! for their kind.

// crate-specific lint exceptions:
#![allow(clippy::cast_precision_loss)]

pub mod components;
pub mod lighting;
pub mod resources;

mod color;
pub use color::*;

mod errors;
pub use errors::*;

mod scene;
pub use scene::*;

use cdl_math::Vec3;

/// World-space up axis.
pub const UP_VECTOR: Vec3 = Vec3::Y;
