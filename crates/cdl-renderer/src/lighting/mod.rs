mod kinds;
pub use kinds::*;

mod light_component_system;
pub use light_component_system::*;
