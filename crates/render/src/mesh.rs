use std::path::Path;
use std::rc::Rc;

use trellis_mesh::{primitive, Colour, Matrix4, MeshData, Vertex};

use crate::camera::Camera;
use crate::context::RenderContext;
use crate::device::{
    BufferBinding, BufferDescriptor, BufferUsage, CommandList, Device, IndexFormat,
    PrimitiveTopology,
};
use crate::error::MeshError;
use crate::shader::{Shader, ShaderConstants, Texture};

/// Which texture slot a mesh is currently drawn with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HitState {
    Normal,
    Hit,
}

/// Geometry that lives on the GPU, plus the shader and textures to draw it with.
///
/// A mesh owns its vertex and index buffers; they are freed by
/// [`Mesh::release`] or when the mesh is dropped, whichever comes first.
/// Shaders and textures are shared with whoever else uses them.
///
/// The index buffer is always `0..vertex_count`, so `vertex_count` and
/// `index_count` are equal.
pub struct Mesh<D: Device, S, T> {
    vertex_buffer: Option<D::Buffer>,
    index_buffer: Option<D::Buffer>,
    vertex_count: u32,
    index_count: u32,
    shader: Rc<S>,
    texture: Option<Rc<T>>,
    original_texture: Option<Rc<T>>,
    hit_texture: Option<Rc<T>>,
    hit_state: HitState,
}

impl<D: Device, S, T> Mesh<D, S, T> {
    /// Creates the built-in double-sided triangle.
    pub fn quad(device: &D, shader: Option<Rc<S>>) -> Result<Self, MeshError> {
        let shader = shader.ok_or(MeshError::MissingShader)?;
        Self::upload(device, primitive::double_sided_triangle(), None, shader)
    }

    /// Loads a model file and uploads it.
    ///
    /// # Arguments
    ///
    /// * `colour` - Applied to every vertex; the file format carries no colours.
    /// * `texture` - Drawn on the mesh, and restored by
    ///   [`Mesh::change_to_original_texture`]. `None` draws untextured.
    pub fn from_file<P: AsRef<Path>>(
        device: &D,
        path: P,
        colour: Colour,
        texture: Option<Rc<T>>,
        shader: Option<Rc<S>>,
    ) -> Result<Self, MeshError> {
        let shader = shader.ok_or(MeshError::MissingShader)?;
        let data = trellis_obj::load_mesh(path, colour)?;
        Self::upload(device, data, texture, shader)
    }

    /// Uploads geometry that was built or loaded elsewhere.
    pub fn from_data(
        device: &D,
        data: MeshData,
        texture: Option<Rc<T>>,
        shader: Option<Rc<S>>,
    ) -> Result<Self, MeshError> {
        let shader = shader.ok_or(MeshError::MissingShader)?;
        Self::upload(device, data, texture, shader)
    }

    // The CPU-side copy of the geometry is dropped once both buffers exist.
    fn upload(
        device: &D,
        data: MeshData,
        texture: Option<Rc<T>>,
        shader: Rc<S>,
    ) -> Result<Self, MeshError> {
        let vertex_count = u32::try_from(data.vertex_count())
            .map_err(|_| MeshError::TooManyVertices(data.vertex_count()))?;
        let index_count = data.index_count() as u32;

        let vertex_buffer = create_buffer(
            device,
            "Vertex Buffer",
            BufferBinding::Vertex,
            data.vertex_bytes(),
        )?;
        let index_buffer = create_buffer(
            device,
            "Index Buffer",
            BufferBinding::Index,
            data.index_bytes(),
        )?;
        log::debug!(
            "uploaded mesh: {} vertices ({} bytes), {} indices",
            vertex_count,
            data.vertex_bytes().len(),
            index_count
        );

        Ok(Self {
            vertex_buffer: Some(vertex_buffer),
            index_buffer: Some(index_buffer),
            vertex_count,
            index_count,
            shader,
            original_texture: texture.clone(),
            texture,
            hit_texture: None,
            hit_state: HitState::Normal,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn shader(&self) -> &Rc<S> {
        &self.shader
    }

    /// The texture the next draw will use.
    pub fn texture(&self) -> Option<&Rc<T>> {
        self.texture.as_ref()
    }

    pub fn hit_state(&self) -> HitState {
        self.hit_state
    }

    /// Returns the vertex and index buffers, or `None` once released.
    pub fn buffers(&self) -> Option<(&D::Buffer, &D::Buffer)> {
        Some((self.vertex_buffer.as_ref()?, self.index_buffer.as_ref()?))
    }

    pub fn is_released(&self) -> bool {
        self.vertex_buffer.is_none() && self.index_buffer.is_none()
    }

    /// Draws the mesh with `world` as its model transform.
    ///
    /// The mesh's shader is only bound if it is not already current on `ctx`.
    /// Draw errors are the backend's concern; nothing is reported back.
    pub fn render<'a, L, C>(&'a self, ctx: &mut RenderContext<'_, L>, world: Matrix4, camera: &C)
    where
        L: CommandList<'a, Buffer = D::Buffer>,
        S: Shader<'a, L>,
        T: Texture<Resource = L::ShaderResource>,
        C: Camera + ?Sized,
    {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            log::warn!("skipping draw of a released mesh");
            return;
        };

        let list = ctx.list();
        list.set_vertex_buffer(0, vertex_buffer, Vertex::STRIDE as u64, 0);
        list.set_index_buffer(index_buffer, IndexFormat::Uint32);
        list.set_primitive_topology(PrimitiveTopology::TriangleList);

        ctx.bind_shader(&self.shader);

        let constants = ShaderConstants {
            world,
            view: camera.view(),
            projection: camera.projection(),
        };
        self.shader.set_constants(ctx.list(), &constants);
        if let Some(texture) = &self.texture {
            self.shader.set_texture(ctx.list(), texture.shader_resource());
        }

        ctx.list().draw_indexed(self.index_count, 0, 0);
    }

    /// Registers the texture shown by [`Mesh::change_to_hit_texture`].
    pub fn set_hit_texture(&mut self, texture: Rc<T>) {
        self.hit_texture = Some(texture);
    }

    /// Draws with the hit texture from now on. Without a registered hit
    /// texture the mesh draws untextured.
    pub fn change_to_hit_texture(&mut self) {
        self.texture = self.hit_texture.clone();
        self.hit_state = HitState::Hit;
    }

    /// Draws with the texture the mesh was created with.
    pub fn change_to_original_texture(&mut self) {
        self.texture = self.original_texture.clone();
        self.hit_state = HitState::Normal;
    }

    /// Frees the GPU buffers. Calling this again has no effect.
    pub fn release(&mut self) {
        if self.is_released() {
            return;
        }
        self.index_buffer = None;
        self.vertex_buffer = None;
        log::debug!("released mesh buffers");
    }
}

fn create_buffer<D: Device>(
    device: &D,
    label: &str,
    binding: BufferBinding,
    contents: &[u8],
) -> Result<D::Buffer, MeshError> {
    device
        .create_buffer(&BufferDescriptor {
            label: Some(label),
            usage: BufferUsage::Immutable,
            binding,
            contents,
        })
        .map_err(|e| MeshError::BufferCreation {
            binding,
            source: Box::new(e),
        })
}
