mod light_component;
pub use light_component::*;

mod store;
pub use store::*;
