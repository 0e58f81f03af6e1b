use crate::{geometry::Bounds, vertex::Vertex};

/// CPU-side geometry ready to be uploaded: a flat vertex array and the index
/// array that draws it.
///
/// Vertices are never shared between triangles, so the index array is always
/// the identity mapping `0..vertex_count` (ex: `indices[i] == i`). As with any
/// welded-vertex scheme, de-duplicating vertices would shrink the buffers at the
/// cost of a lookup during loading; nothing here relies on the identity layout
/// other than the constructor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshData {
    /// Creates mesh data from an unindexed triangle list.
    ///
    /// # Arguments
    ///
    /// * `vertices` - Three consecutive vertices per triangle, in draw order.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        let indices = (0..vertices.len() as u32).collect();
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of triangles that comprises this mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw bytes of the vertex array, as they should be copied into a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the index array (native-endian `u32`s).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().map(Vertex::position))
    }

    pub fn into_parts(self) -> (Vec<Vertex>, Vec<u32>) {
        let MeshData { vertices, indices } = self;
        (vertices, indices)
    }
}
