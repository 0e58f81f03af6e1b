pub type Vector2 = cgmath::Vector2<f32>;
pub type Vector3 = cgmath::Vector3<f32>;
pub type Matrix4 = cgmath::Matrix4<f32>;

// Vertex attributes are copied out of these types field by field, but the
// renderer reinterprets matrices as raw floats for shader constants.
static_assertions::assert_eq_size!(Vector2, [f32; 2]);
static_assertions::assert_eq_size!(Vector3, [f32; 3]);
static_assertions::assert_eq_size!(Matrix4, [[f32; 4]; 4]);
static_assertions::assert_eq_align!(Vector3, f32);

/// A linear RGBA colour.
#[derive(Debug, PartialEq, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const WHITE: Colour = Colour::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Colour = Colour::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Colour = Colour::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Colour = Colour::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl std::default::Default for Colour {
    fn default() -> Self {
        Colour::WHITE
    }
}

impl From<[f32; 4]> for Colour {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Colour::new(r, g, b, a)
    }
}

impl From<Colour> for [f32; 4] {
    fn from(c: Colour) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Axis-aligned bounds of a set of points.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Bounds {
    pub min: Vector3,
    pub max: Vector3,
}

impl Bounds {
    /// Computes the bounds of `points`, or `None` if there are no points.
    pub fn from_points<I: IntoIterator<Item = Vector3>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(
            Bounds {
                min: first,
                max: first,
            },
            |b, p| Bounds {
                min: Vector3::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z)),
                max: Vector3::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z)),
            },
        ))
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) / 2.0
    }

    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }
}
