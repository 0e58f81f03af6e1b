use trellis_mesh::Matrix4;

use crate::device::CommandList;

/// Per-draw inputs every shader receives.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShaderConstants {
    pub world: Matrix4,
    pub view: Matrix4,
    pub projection: Matrix4,
}

impl ShaderConstants {
    pub fn world_view_projection(&self) -> Matrix4 {
        self.projection * self.view * self.world
    }
}

pub trait Shader<'a, L: CommandList<'a>> {
    /// Makes this shader the active one on `list`.
    fn begin(&'a self, list: &mut L);

    fn set_constants(&'a self, list: &mut L, constants: &ShaderConstants);

    fn set_texture(&'a self, list: &mut L, resource: &'a L::ShaderResource);
}

pub trait Texture {
    type Resource;

    fn shader_resource(&self) -> &Self::Resource;
}
