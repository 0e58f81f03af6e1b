//! wgpu implementation of the `trellis` device traits.
use trellis::device::{
    BufferBinding, BufferDescriptor, CommandList, Device, IndexFormat, PrimitiveTopology,
};
use trellis_mesh::Vertex;
use wgpu::util::DeviceExt;

#[derive(Debug, thiserror::Error)]
#[error("wgpu rejected buffer: {0}")]
pub struct BufferError(String);

pub struct GpuDevice {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuDevice {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

impl Device for GpuDevice {
    type Buffer = wgpu::Buffer;
    type Error = BufferError;

    fn create_buffer(&self, desc: &BufferDescriptor<'_>) -> Result<wgpu::Buffer, BufferError> {
        // Immutable buffers get no COPY_DST; their contents are fixed here.
        let usage = match desc.binding {
            BufferBinding::Vertex => wgpu::BufferUsages::VERTEX,
            BufferBinding::Index => wgpu::BufferUsages::INDEX,
        };

        // wgpu reports creation failures asynchronously, so catch them in an
        // error scope and wait for it.
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: desc.label,
                contents: desc.contents,
                usage,
            });
        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());
        match validation.or(out_of_memory) {
            Some(e) => Err(BufferError(e.to_string())),
            None => Ok(buffer),
        }
    }
}

/// A render pass that meshes can record into.
pub struct Pass<'a> {
    pass: wgpu::RenderPass<'a>,
}

impl<'a> Pass<'a> {
    pub fn new(pass: wgpu::RenderPass<'a>) -> Self {
        Self { pass }
    }

    pub fn raw(&mut self) -> &mut wgpu::RenderPass<'a> {
        &mut self.pass
    }
}

impl<'a> CommandList<'a> for Pass<'a> {
    type Buffer = wgpu::Buffer;
    type ShaderResource = wgpu::BindGroup;

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &'a wgpu::Buffer, stride: u64, offset: u64) {
        // The stride is fixed by the pipeline's vertex layout.
        debug_assert_eq!(Vertex::STRIDE as u64, stride);
        self.pass.set_vertex_buffer(slot, buffer.slice(offset..));
    }

    fn set_index_buffer(&mut self, buffer: &'a wgpu::Buffer, format: IndexFormat) {
        let format = match format {
            IndexFormat::Uint32 => wgpu::IndexFormat::Uint32,
        };
        self.pass.set_index_buffer(buffer.slice(..), format);
    }

    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        // Topology is baked into the pipeline, and every pipeline built by
        // `MeshShader` draws triangle lists.
        match topology {
            PrimitiveTopology::TriangleList => {}
        }
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32) {
        self.pass
            .draw_indexed(start_index..start_index + index_count, base_vertex, 0..1);
    }
}
