use trellis::shader::{Shader, ShaderConstants};
use trellis_mesh::Vertex;

use crate::backend::Pass;
use crate::texture::MeshTexture;

// This is needed because wgpu uses Direct-X style coordinates while cgmath uses
// OpenGL style coordinates.
//
// This matrix simply transforms the coordinates used by cgmath into the ones
// that wgpu need.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x4,
    2 => Float32x3,
    3 => Float32x2,
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: Vertex::STRIDE as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

// Per-draw matrices, sent as push constants. Must match `PushConstants` in
// mesh.wgsl.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
struct PushConstants {
    world_view_projection: [[f32; 4]; 4],
    world: [[f32; 4]; 4],
}

pub const PUSH_CONSTANT_SIZE: u32 = std::mem::size_of::<PushConstants>() as u32;

/// A lit, textured pipeline for `trellis_mesh::Vertex` geometry.
pub struct MeshShader {
    pipeline: wgpu::RenderPipeline,
    // Bound whenever a mesh has no texture of its own.
    blank: MeshTexture,
}

impl MeshShader {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
    ) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[/* bind_group = 0 */ texture_layout],
            push_constant_ranges: &[wgpu::PushConstantRange {
                stages: wgpu::ShaderStages::VERTEX,
                range: 0..PUSH_CONSTANT_SIZE,
            }],
        });

        let shader = device.create_shader_module(wgpu::include_wgsl!("mesh.wgsl"));
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Double-sided geometry relies on both windings being drawn.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let blank = MeshTexture::solid(device, queue, texture_layout, [255; 4], "blank");
        Self { pipeline, blank }
    }
}

impl<'a> Shader<'a, Pass<'a>> for MeshShader {
    fn begin(&'a self, list: &mut Pass<'a>) {
        list.raw().set_pipeline(&self.pipeline);
    }

    fn set_constants(&'a self, list: &mut Pass<'a>, constants: &ShaderConstants) {
        let constants = PushConstants {
            world_view_projection: (OPENGL_TO_WGPU_MATRIX * constants.world_view_projection())
                .into(),
            world: constants.world.into(),
        };
        let pass = list.raw();
        pass.set_push_constants(wgpu::ShaderStages::VERTEX, 0, bytemuck::bytes_of(&constants));
        // Meshes sharing this pipeline skip `begin`, so reset the texture
        // here; a textured mesh overrides it in `set_texture`.
        pass.set_bind_group(0, &self.blank.bind_group, &[]);
    }

    fn set_texture(&'a self, list: &mut Pass<'a>, resource: &'a wgpu::BindGroup) {
        list.raw().set_bind_group(0, resource, &[]);
    }
}
