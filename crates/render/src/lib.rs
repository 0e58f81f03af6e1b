//! GPU meshes: uploads triangle geometry into vertex/index buffers and draws
//! it through a small set of backend traits.
//!
//! The traits in [`device`] and [`shader`] are all a backend has to implement;
//! [`Mesh`] only ever talks to the GPU through them.
mod camera;
mod context;
pub mod device;
mod error;
mod mesh;
pub mod shader;

pub use camera::*;
pub use context::*;
pub use error::*;
pub use mesh::*;

pub use trellis_mesh::{Colour, Matrix4, MeshData, Vector2, Vector3, Vertex};
