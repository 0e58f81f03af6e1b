use trellis_mesh::{Colour, MeshData, Vector2, Vector3, Vertex};

use crate::error::{ObjError, Stream};
use crate::record::{Face, Record};

/// The raw contents of a model file.
///
/// Positions, texture coordinates and normals are stored as separate streams in
/// file order; faces refer into them with 1-based indices. Nothing is checked
/// against the streams until [`ObjModel::resolve`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObjModel {
    pub positions: Vec<Vector3>,
    pub tex_coords: Vec<Vector2>,
    pub normals: Vec<Vector3>,
    pub faces: Vec<Face>,
}

impl ObjModel {
    /// Collects a stream of records, stopping at the first error.
    pub fn from_records<I>(records: I) -> Result<Self, ObjError>
    where
        I: IntoIterator<Item = Result<Record, ObjError>>,
    {
        let mut model = ObjModel::default();
        for record in records {
            match record? {
                Record::Position(p) => model.positions.push(p),
                Record::TexCoord(t) => model.tex_coords.push(t),
                Record::Normal(n) => model.normals.push(n),
                Record::Face(f) => model.faces.push(f),
            }
        }
        log::debug!(
            "read {} positions, {} texture coordinates, {} normals, {} faces",
            model.positions.len(),
            model.tex_coords.len(),
            model.normals.len(),
            model.faces.len()
        );
        Ok(model)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Expands every face into three independent vertices.
    ///
    /// Vertices are emitted in face order and are never shared, so a model with
    /// `n` faces always resolves to `3 * n` vertices and the indices `0..3 * n`.
    /// The format has no per-vertex colour; every vertex gets `colour`.
    pub fn resolve(&self, colour: Colour) -> Result<MeshData, ObjError> {
        let mut vertices = Vec::with_capacity(self.faces.len() * 3);
        for (face, f) in self.faces.iter().enumerate() {
            for corner in &f.vertices {
                let position = lookup(&self.positions, corner.position, Stream::Position, face)?;
                let tex_coord = lookup(&self.tex_coords, corner.tex_coord, Stream::TexCoord, face)?;
                let normal = lookup(&self.normals, corner.normal, Stream::Normal, face)?;
                vertices.push(Vertex::new(position, colour, normal, tex_coord));
            }
        }
        Ok(MeshData::from_vertices(vertices))
    }
}

fn lookup<T: Copy>(items: &[T], index: u32, stream: Stream, face: usize) -> Result<T, ObjError> {
    index
        .checked_sub(1)
        .and_then(|i| items.get(i as usize))
        .copied()
        .ok_or(ObjError::IndexOutOfRange {
            face,
            stream,
            index,
            len: items.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FaceVertex;

    fn corner(position: u32, tex_coord: u32, normal: u32) -> FaceVertex {
        FaceVertex {
            position,
            tex_coord,
            normal,
        }
    }

    fn single_face(vertices: [FaceVertex; 3]) -> ObjModel {
        ObjModel {
            positions: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            tex_coords: vec![Vector2::new(0.0, 0.0), Vector2::new(-1.0, 0.0)],
            normals: vec![Vector3::new(0.0, 0.0, 1.0)],
            faces: vec![Face { vertices }],
        }
    }

    #[test]
    fn resolve_picks_each_stream_independently() {
        let model = single_face([corner(3, 2, 1), corner(1, 1, 1), corner(2, 2, 1)]);
        let data = model.resolve(Colour::RED).unwrap();
        let v = data.vertices();
        assert_eq!([0.0, 1.0, 0.0], v[0].position);
        assert_eq!([-1.0, 0.0], v[0].tex_coord);
        assert_eq!([0.0, 0.0, 0.0], v[1].position);
        assert_eq!([0.0, 0.0], v[1].tex_coord);
        assert_eq!([1.0, 0.0, 0.0], v[2].position);
        assert!(v.iter().all(|v| v.colour() == Colour::RED));
        assert!(v.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn resolve_duplicates_shared_positions() {
        let mut model = single_face([corner(1, 1, 1), corner(2, 1, 1), corner(3, 1, 1)]);
        model.faces.push(Face {
            vertices: [corner(1, 1, 1), corner(3, 1, 1), corner(2, 1, 1)],
        });
        let data = model.resolve(Colour::WHITE).unwrap();
        assert_eq!(6, data.vertex_count());
        assert_eq!(&[0, 1, 2, 3, 4, 5], data.indices());
        assert_eq!(data.vertices()[0].position, data.vertices()[3].position);
    }

    #[test]
    fn zero_index_is_out_of_range() {
        let model = single_face([corner(0, 1, 1), corner(1, 1, 1), corner(2, 1, 1)]);
        assert!(matches!(
            model.resolve(Colour::WHITE),
            Err(ObjError::IndexOutOfRange {
                face: 0,
                stream: Stream::Position,
                index: 0,
                len: 3
            })
        ));
    }

    #[test]
    fn index_past_end_is_out_of_range() {
        let model = single_face([corner(1, 1, 1), corner(2, 3, 1), corner(3, 1, 1)]);
        assert!(matches!(
            model.resolve(Colour::WHITE),
            Err(ObjError::IndexOutOfRange {
                stream: Stream::TexCoord,
                index: 3,
                len: 2,
                ..
            })
        ));
    }

    #[test]
    fn missing_normals_are_reported() {
        let mut model = single_face([corner(1, 1, 1), corner(2, 1, 1), corner(3, 1, 1)]);
        model.normals.clear();
        assert!(matches!(
            model.resolve(Colour::WHITE),
            Err(ObjError::IndexOutOfRange {
                stream: Stream::Normal,
                len: 0,
                ..
            })
        ));
    }

    #[test]
    fn empty_model_resolves_to_empty_mesh() {
        let data = ObjModel::default().resolve(Colour::WHITE).unwrap();
        assert!(data.is_empty());
        assert_eq!(0, data.index_count());
    }
}
