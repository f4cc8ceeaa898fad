//! Math types shared by the Candela renderer crates.

// crate-specific lint exceptions:
// (none)

mod angle;
pub use angle::*;

pub use glam::*;
