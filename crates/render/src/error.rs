use trellis_obj::ObjError;

use crate::device::BufferBinding;

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("a mesh cannot be created without a shader")]
    MissingShader,

    #[error("failed to load model")]
    Load(#[from] ObjError),

    #[error("mesh has {0} vertices, more than 32-bit indices can address")]
    TooManyVertices(usize),

    #[error("device failed to create the {binding:?} buffer")]
    BufferCreation {
        binding: BufferBinding,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
