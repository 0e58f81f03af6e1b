//! A recording backend: every device and command-list call is appended to a
//! shared log so tests can assert on exactly what a mesh asked the GPU to do.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use trellis::device::{
    BufferBinding, BufferDescriptor, CommandList, Device, IndexFormat, PrimitiveTopology,
};
use trellis::shader::{Shader, ShaderConstants, Texture};
use trellis::{Camera, Matrix4, Mesh, Vertex};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateBuffer {
        id: u32,
        binding: BufferBinding,
        size: u64,
    },
    ReleaseBuffer(u32),
    SetVertexBuffer {
        id: u32,
        slot: u32,
        stride: u64,
        offset: u64,
    },
    SetIndexBuffer {
        id: u32,
        format: IndexFormat,
    },
    SetTopology(PrimitiveTopology),
    BeginShader(&'static str),
    SetConstants(&'static str, ShaderConstants),
    SetTexture(&'static str, u32),
    DrawIndexed {
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    },
}

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Command>>>);

impl Log {
    pub fn push(&self, command: Command) {
        self.0.borrow_mut().push(command);
    }

    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn commands(&self) -> Vec<Command> {
        self.0.borrow().clone()
    }

    pub fn count(&self, f: impl Fn(&Command) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| f(c)).count()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("out of device memory")]
pub struct OutOfMemory;

pub struct MockDevice {
    pub log: Log,
    next_id: Cell<u32>,
    /// Buffers of this kind are rejected.
    pub fail: Option<BufferBinding>,
}

impl MockDevice {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            next_id: Cell::new(1),
            fail: None,
        }
    }

    pub fn failing(log: &Log, binding: BufferBinding) -> Self {
        Self {
            fail: Some(binding),
            ..Self::new(log)
        }
    }
}

pub struct MockBuffer {
    pub id: u32,
    pub binding: BufferBinding,
    pub contents: Vec<u8>,
    log: Log,
}

impl MockBuffer {
    pub fn as_vertices(&self) -> Vec<Vertex> {
        self.contents
            .chunks_exact(Vertex::STRIDE)
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    pub fn as_indices(&self) -> Vec<u32> {
        self.contents
            .chunks_exact(4)
            .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        self.log.push(Command::ReleaseBuffer(self.id));
    }
}

impl Device for MockDevice {
    type Buffer = MockBuffer;
    type Error = OutOfMemory;

    fn create_buffer(&self, desc: &BufferDescriptor<'_>) -> Result<MockBuffer, OutOfMemory> {
        if self.fail == Some(desc.binding) {
            return Err(OutOfMemory);
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.log.push(Command::CreateBuffer {
            id,
            binding: desc.binding,
            size: desc.size(),
        });
        Ok(MockBuffer {
            id,
            binding: desc.binding,
            contents: desc.contents.to_vec(),
            log: self.log.clone(),
        })
    }
}

pub struct RecordingList {
    pub log: Log,
}

impl<'a> CommandList<'a> for RecordingList {
    type Buffer = MockBuffer;
    type ShaderResource = u32;

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &'a MockBuffer, stride: u64, offset: u64) {
        self.log.push(Command::SetVertexBuffer {
            id: buffer.id,
            slot,
            stride,
            offset,
        });
    }

    fn set_index_buffer(&mut self, buffer: &'a MockBuffer, format: IndexFormat) {
        self.log.push(Command::SetIndexBuffer {
            id: buffer.id,
            format,
        });
    }

    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        self.log.push(Command::SetTopology(topology));
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32) {
        self.log.push(Command::DrawIndexed {
            index_count,
            start_index,
            base_vertex,
        });
    }
}

pub struct MockShader {
    pub name: &'static str,
}

impl MockShader {
    pub fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self { name })
    }
}

impl<'a> Shader<'a, RecordingList> for MockShader {
    fn begin(&'a self, list: &mut RecordingList) {
        list.log.push(Command::BeginShader(self.name));
    }

    fn set_constants(&'a self, list: &mut RecordingList, constants: &ShaderConstants) {
        list.log.push(Command::SetConstants(self.name, *constants));
    }

    fn set_texture(&'a self, list: &mut RecordingList, resource: &'a u32) {
        list.log.push(Command::SetTexture(self.name, *resource));
    }
}

#[derive(Debug, PartialEq)]
pub struct MockTexture {
    pub id: u32,
}

impl MockTexture {
    pub fn new(id: u32) -> Rc<Self> {
        Rc::new(Self { id })
    }
}

impl Texture for MockTexture {
    type Resource = u32;

    fn shader_resource(&self) -> &u32 {
        &self.id
    }
}

pub struct FixedCamera {
    pub view: Matrix4,
    pub projection: Matrix4,
}

impl FixedCamera {
    pub fn new() -> Self {
        Self {
            view: Matrix4::from_translation((0.0, 0.0, -5.0).into()),
            projection: Matrix4::from_nonuniform_scale(2.0, 2.0, 1.0),
        }
    }
}

impl Camera for FixedCamera {
    fn view(&self) -> Matrix4 {
        self.view
    }

    fn projection(&self) -> Matrix4 {
        self.projection
    }
}

pub type TestMesh = Mesh<MockDevice, MockShader, MockTexture>;
