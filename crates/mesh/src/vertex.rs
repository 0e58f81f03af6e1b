use crate::geometry::{Colour, Vector2, Vector3};

/// A single vertex record as it is laid out in a vertex buffer.
///
/// The order of the fields is the order of the shader attributes:
///
///    location 0: position  (float32x3)
///    location 1: colour    (float32x4)
///    location 2: normal    (float32x3)
///    location 3: tex_coord (float32x2)
#[derive(Debug, PartialEq, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub colour: [f32; 4],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

// 3 + 4 + 3 + 2 floats, no padding.
static_assertions::assert_eq_size!(Vertex, [f32; 12]);

impl Vertex {
    /// Size in bytes of one vertex record; this is also the buffer stride.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub fn new(position: Vector3, colour: Colour, normal: Vector3, tex_coord: Vector2) -> Self {
        Self {
            position: position.into(),
            colour: colour.into(),
            normal: normal.into(),
            tex_coord: tex_coord.into(),
        }
    }

    pub fn position(&self) -> Vector3 {
        self.position.into()
    }

    pub fn colour(&self) -> Colour {
        self.colour.into()
    }

    pub fn normal(&self) -> Vector3 {
        self.normal.into()
    }

    pub fn tex_coord(&self) -> Vector2 {
        self.tex_coord.into()
    }
}
