use crate::{Colour, MeshData, Vector2, Vector3, Vertex};

/// Distance along +z between the front and back triangle of
/// [`double_sided_triangle`].
///
/// Both triangles cover the same area, so without the offset they would
/// z-fight wherever both are rasterized.
pub const DOUBLE_SIDED_OFFSET: f32 = 0.01;

/// Builds a triangle that is visible from both sides.
///
/// The result is two copies of the same triangle: the first with normals
/// facing -z, the second pushed back by [`DOUBLE_SIDED_OFFSET`] with normals
/// facing +z. Each corner gets a distinct colour (green, red, blue) and all
/// texture coordinates are zero.
pub fn double_sided_triangle() -> MeshData {
    let corners = [
        (Vector3::new(-1.0, -1.0, 0.0), Colour::GREEN),
        (Vector3::new(0.0, 1.0, 0.0), Colour::RED),
        (Vector3::new(1.0, -1.0, 0.0), Colour::BLUE),
    ];
    let front = Vector3::new(0.0, 0.0, -1.0);
    let back = Vector3::new(0.0, 0.0, 1.0);
    let offset = Vector3::new(0.0, 0.0, DOUBLE_SIDED_OFFSET);
    let uv = Vector2::new(0.0, 0.0);

    let vertices = corners
        .iter()
        .map(|&(p, c)| Vertex::new(p, c, front, uv))
        .chain(
            corners
                .iter()
                .map(|&(p, c)| Vertex::new(p + offset, c, back, uv)),
        )
        .collect();
    MeshData::from_vertices(vertices)
}
