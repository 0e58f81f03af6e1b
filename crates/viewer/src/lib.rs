use std::rc::Rc;

use anyhow::Context;
use cgmath::SquareMatrix;
use trellis::{HitState, LookAtCamera, Mesh, MeshData, RenderContext};
use trellis_mesh::{primitive, Bounds, Matrix4};
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

mod backend;
mod config;
mod controller;
mod shader;
mod texture;

pub use backend::*;
pub use config::*;
pub use shader::*;
pub use texture::*;

use controller::CameraController;

pub type ViewerMesh = Mesh<GpuDevice, MeshShader, MeshTexture>;

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Places the camera so that the whole model is in view.
fn frame_model(bounds: Option<Bounds>, aspect: f32) -> LookAtCamera {
    let (center, radius) = match bounds {
        Some(b) => (b.center(), cgmath::InnerSpace::magnitude(b.extent()) / 2.0),
        None => (trellis_mesh::Vector3::new(0.0, 0.0, 0.0), 1.0),
    };
    let radius = radius.max(0.01);
    let target = cgmath::Point3::new(center.x, center.y, center.z);
    // Far enough back that a sphere of `radius` fits into a 45 degree FOV.
    let eye = target + trellis_mesh::Vector3::new(0.0, 0.25, -2.6) * radius;
    let mut camera = LookAtCamera::new(eye, target, aspect);
    camera.znear = radius * 0.01;
    camera.zfar = radius * 10.0;
    camera
}

struct State {
    surface: wgpu::Surface,
    gpu: GpuDevice,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    window: Window,
    depth_view: wgpu::TextureView,
    clear_colour: wgpu::Color,
    mesh: ViewerMesh,
    camera: LookAtCamera,
    camera_controller: CameraController,
}

impl State {
    // Creating some of the wgpu types requires async code
    async fn new(window: Window, viewer: &ViewerConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // The instance is a handle to our GPU
        // Backends::all => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            dx12_shader_compiler: Default::default(),
        });

        // # Safety
        //
        // The surface needs to live as long as the window that created it.
        // State owns the window so this should be safe.
        let surface = unsafe { instance.create_surface(&window) }?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::PUSH_CONSTANTS,
                    limits: wgpu::Limits {
                        max_push_constant_size: PUSH_CONSTANT_SIZE,
                        ..wgpu::Limits::default()
                    },
                    label: None,
                },
                None, // Trace path
            )
            .await
            .context("failed to open GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shader assumes an sRGB surface texture; other formats make all
        // the colours come out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let gpu = GpuDevice::new(device, queue);
        let texture_layout = MeshTexture::bind_group_layout(&gpu.device);
        let shader = Rc::new(MeshShader::new(
            &gpu.device,
            &gpu.queue,
            &texture_layout,
            config.format,
        ));

        let data = match &viewer.model_path {
            Some(path) => trellis_obj::load_mesh(path, viewer.colour)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => primitive::double_sided_triangle(),
        };
        let camera = frame_model(data.bounds(), config.width as f32 / config.height as f32);
        let texture = viewer.textured.then(|| {
            Rc::new(MeshTexture::checkerboard(
                &gpu.device,
                &gpu.queue,
                &texture_layout,
                "checkerboard",
            ))
        });
        let mut mesh = upload(&gpu, data, texture, shader)?;
        mesh.set_hit_texture(Rc::new(MeshTexture::solid(
            &gpu.device,
            &gpu.queue,
            &texture_layout,
            [255, 40, 40, 255],
            "hit",
        )));
        log::info!("loaded {} triangles", mesh.index_count() / 3);

        Ok(Self {
            window,
            surface,
            gpu,
            config,
            size,
            depth_view,
            clear_colour: viewer.clear_colour,
            mesh,
            camera,
            camera_controller: CameraController::new(viewer.camera_speed),
        })
    }

    fn handle_window_event(&mut self, window_event: WindowEvent, control_flow: &mut ControlFlow) {
        if self.input(&window_event) {
            return;
        }
        match window_event {
            WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(keycode),
                        ..
                    },
                ..
            } => match keycode {
                VirtualKeyCode::Escape => *control_flow = ControlFlow::Exit,
                VirtualKeyCode::H => self.toggle_hit(),
                _ => {}
            },
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size);
            }
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                // new_inner_size is &&mut so we have to dereference it twice
                self.resize(*new_inner_size);
            }
            _ => {}
        }
    }

    fn handle_event<T>(&mut self, event: Event<'_, T>, control_flow: &mut ControlFlow) {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, window_id } if window_id == self.window.id() => {
                self.handle_window_event(event, control_flow)
            }
            Event::RedrawRequested(_) => {
                self.update();
                match self.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if lost
                    Err(wgpu::SurfaceError::Lost) => self.resize(self.size),
                    // The system is out of memory, we should probably quit
                    Err(wgpu::SurfaceError::OutOfMemory) => *control_flow = ControlFlow::Exit,
                    // All other errors (Outdated, Timeout) should be resolved by the next frame
                    Err(e) => log::error!("{:?}", e),
                }
            }
            Event::MainEventsCleared => {
                // RedrawRequested will only trigger once, unless we manually
                // request it.
                self.window.request_redraw();
            }
            Event::LoopDestroyed => self.mesh.release(),
            _ => (),
        }
    }

    fn toggle_hit(&mut self) {
        match self.mesh.hit_state() {
            HitState::Normal => self.mesh.change_to_hit_texture(),
            HitState::Hit => self.mesh.change_to_original_texture(),
        }
        log::debug!("mesh is now {:?}", self.mesh.hit_state());
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.gpu.device, &self.config);
            self.depth_view = create_depth_view(&self.gpu.device, &self.config);
            self.camera.aspect = new_size.width as f32 / new_size.height as f32;
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        self.camera_controller.process_events(event)
    }

    fn update(&mut self) {
        self.camera_controller.update_camera(&mut self.camera);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: true,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: true,
                    }),
                    stencil_ops: None,
                }),
            });
            let mut pass = Pass::new(render_pass);
            let mut ctx = RenderContext::new(&mut pass);
            self.mesh.render(&mut ctx, Matrix4::identity(), &self.camera);
        }

        // submit will accept anything that implements IntoIter
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn upload(
    gpu: &GpuDevice,
    data: MeshData,
    texture: Option<Rc<MeshTexture>>,
    shader: Rc<MeshShader>,
) -> anyhow::Result<ViewerMesh> {
    Mesh::from_data(gpu, data, texture, Some(shader)).context("failed to upload mesh")
}

pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new(); // Loop provided by winit for handling window events
    let window = WindowBuilder::new()
        .with_title("trellis")
        .build(&event_loop)?;

    let mut state = pollster::block_on(State::new(window, &config))?;

    event_loop.run(move |event, _, control_flow| {
        state.handle_event(event, control_flow);
    });
}
