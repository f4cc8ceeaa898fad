mod material;
pub use material::*;

mod mesh;
pub use mesh::*;
