mod geometry;
mod mesh_data;
pub mod primitive;
mod vertex;

pub use geometry::*;
pub use mesh_data::*;
pub use vertex::*;
