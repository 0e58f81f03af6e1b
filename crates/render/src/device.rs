/// What a buffer will be bound as when drawing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferBinding {
    Vertex,
    Index,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferUsage {
    /// Initialized at creation and never written by the CPU again.
    Immutable,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IndexFormat {
    Uint32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Every three indices form an independent triangle.
    TriangleList,
}

pub struct BufferDescriptor<'a> {
    pub label: Option<&'a str>,
    pub usage: BufferUsage,
    pub binding: BufferBinding,
    /// Initial contents; the buffer is exactly this many bytes.
    pub contents: &'a [u8],
}

impl BufferDescriptor<'_> {
    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }
}

/// The resource-creation side of a graphics device.
///
/// Buffers returned from here own their GPU allocation and are expected to
/// free it when dropped.
pub trait Device {
    type Buffer;
    type Error: std::error::Error + Send + Sync + 'static;

    fn create_buffer(&self, desc: &BufferDescriptor<'_>) -> Result<Self::Buffer, Self::Error>;
}

/// The command-submission side of a graphics device.
///
/// Anything bound through a command list must stay alive for `'a`, which is
/// usually the lifetime of one render pass.
pub trait CommandList<'a> {
    type Buffer: 'a;
    /// Handle through which shaders read a texture.
    type ShaderResource: 'a;

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &'a Self::Buffer, stride: u64, offset: u64);
    fn set_index_buffer(&mut self, buffer: &'a Self::Buffer, format: IndexFormat);
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology);
    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32);
}
