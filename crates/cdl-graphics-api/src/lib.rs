//! Graphics Api
//!
//! CPU-resident graphics device layer. Resources created here carry the
//! same definitions a hardware backend would consume, but their contents
//! live in host memory so the crate can run headless.

// crate-specific lint exceptions:
#![allow(clippy::cast_possible_truncation)]

pub mod types;

mod buffer;
pub use buffer::*;

mod device_context;
pub use device_context::*;

pub use types::*;
