//! Scene rendering: star field, grid, trails, aim line and bodies

use glam::Vec3;
use log::warn;
use nbody_core::Body;
use wgpu::util::DeviceExt;

use crate::camera::OrbitCamera;
use crate::graphics::GraphicsContext;
use crate::trails::Trails;

/// Camera uniform with view matrix for billboarding
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            position: camera.position.extend(1.0).to_array(),
        }
    }
}

/// Per-body instance data
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

impl BodyInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        2 => Float32x3,
        3 => Float32,
        4 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

impl From<&Body> for BodyInstance {
    fn from(body: &Body) -> Self {
        Self {
            position: body.position.to_array(),
            radius: body.radius(),
            color: body.color(),
        }
    }
}

/// Billboard corner
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

const AIM_COLOR: [f32; 4] = [0.0, 0.949, 1.0, 0.9];
const GRID_VERTICES: u32 = 84;

/// Vertex ranges uploaded for one frame
#[derive(Debug, Default)]
pub struct FrameGeometry {
    pub bodies: u32,
    pub trails: Vec<(u32, u32)>,
    pub aim: Option<(u32, u32)>,
}

/// What to draw besides the bodies themselves
#[derive(Debug, Clone, Copy)]
pub struct Overlays {
    pub grid: bool,
    pub trails: bool,
}

pub struct Renderer {
    body_pipeline: wgpu::RenderPipeline,
    trail_pipeline: wgpu::RenderPipeline,
    aim_pipeline: wgpu::RenderPipeline,
    grid_pipeline: wgpu::RenderPipeline,
    sky_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    max_instances: usize,
    max_line_vertices: usize,
}

struct PipelineSpec<'a> {
    label: &'a str,
    vs: &'a str,
    fs: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    blend: Option<wgpu::BlendState>,
    depth: Option<wgpu::DepthStencilState>,
}

impl Renderer {
    pub fn new(ctx: &GraphicsContext, max_instances: usize, trail_length: usize) -> Self {
        let device = &ctx.device;
        // every trail plus the two aim line endpoints
        let max_line_vertices = max_instances * trail_length + 2;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let depth_texture = Self::create_depth_texture(device, ctx.size.width, ctx.size.height);

        let depth_write = Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });
        // The aim line is a UI hint, it must not be hidden behind bodies
        let depth_ignore = Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let format = ctx.config.format;
        let body_pipeline = build_pipeline(device, &pipeline_layout, &shader, format, PipelineSpec {
            label: "Body Pipeline",
            vs: "vs_body",
            fs: "fs_body",
            buffers: &[QuadVertex::layout(), BodyInstance::layout()],
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth: depth_write.clone(),
        });

        let trail_pipeline = build_pipeline(device, &pipeline_layout, &shader, format, PipelineSpec {
            label: "Trail Pipeline",
            vs: "vs_line",
            fs: "fs_line",
            buffers: &[LineVertex::layout()],
            topology: wgpu::PrimitiveTopology::LineStrip,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth: depth_write.clone(),
        });

        let aim_pipeline = build_pipeline(device, &pipeline_layout, &shader, format, PipelineSpec {
            label: "Aim Pipeline",
            vs: "vs_line",
            fs: "fs_line",
            buffers: &[LineVertex::layout()],
            topology: wgpu::PrimitiveTopology::LineList,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth: depth_ignore,
        });

        let grid_pipeline = build_pipeline(device, &pipeline_layout, &shader, format, PipelineSpec {
            label: "Grid Pipeline",
            vs: "vs_grid",
            fs: "fs_line",
            buffers: &[],
            topology: wgpu::PrimitiveTopology::LineList,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth: depth_write,
        });

        let sky_pipeline = build_pipeline(device, &pipeline_layout, &shader, format, PipelineSpec {
            label: "Sky Pipeline",
            vs: "vs_sky",
            fs: "fs_sky",
            buffers: &[],
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: None,
            depth: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (std::mem::size_of::<BodyInstance>() * max_instances) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Line Buffer"),
            size: (std::mem::size_of::<LineVertex>() * max_line_vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            body_pipeline,
            trail_pipeline,
            aim_pipeline,
            grid_pipeline,
            sky_pipeline,
            quad_buffer,
            instance_buffer,
            line_buffer,
            camera_buffer,
            camera_bind_group,
            depth_texture,
            max_instances,
            max_line_vertices,
        }
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &OrbitCamera) {
        let uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload this frame's bodies, trails and aim line
    pub fn upload(
        &self,
        queue: &wgpu::Queue,
        bodies: &[Body],
        trails: &Trails,
        aim: Option<(Vec3, Vec3)>,
    ) -> FrameGeometry {
        if bodies.len() > self.max_instances {
            warn!(
                "{} bodies but only {} can be drawn",
                bodies.len(),
                self.max_instances
            );
        }

        let instances: Vec<BodyInstance> = bodies
            .iter()
            .take(self.max_instances)
            .map(BodyInstance::from)
            .collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let (mut vertices, trail_ranges) = trail_vertices(bodies, trails, self.max_line_vertices - 2);

        let aim_range = aim.map(|(from, to)| {
            let start = vertices.len() as u32;
            vertices.push(LineVertex {
                position: from.to_array(),
                color: AIM_COLOR,
            });
            vertices.push(LineVertex {
                position: to.to_array(),
                color: AIM_COLOR,
            });
            (start, 2)
        });

        if !vertices.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&vertices));
        }

        FrameGeometry {
            bodies: instances.len() as u32,
            trails: trail_ranges,
            aim: aim_range,
        }
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        geometry: &FrameGeometry,
        overlays: Overlays,
    ) {
        // Star field, no depth
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sky Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.sky_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        if overlays.grid {
            render_pass.set_pipeline(&self.grid_pipeline);
            render_pass.draw(0..GRID_VERTICES, 0..1);
        }

        if overlays.trails && !geometry.trails.is_empty() {
            render_pass.set_pipeline(&self.trail_pipeline);
            render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
            for (start, count) in &geometry.trails {
                render_pass.draw(*start..(*start + *count), 0..1);
            }
        }

        if geometry.bodies > 0 {
            render_pass.set_pipeline(&self.body_pipeline);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.draw(0..QUAD_VERTICES.len() as u32, 0..geometry.bodies);
        }

        if let Some((start, count)) = geometry.aim {
            render_pass.set_pipeline(&self.aim_pipeline);
            render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
            render_pass.draw(start..(start + count), 0..1);
        }
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: spec.vs,
            buffers: spec.buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: spec.fs,
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: spec.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            ..Default::default()
        },
        depth_stencil: spec.depth,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

/// Flatten trails into one vertex list, fading toward the tail.
/// Returns the vertices and a `(start, count)` range per trail.
fn trail_vertices(bodies: &[Body], trails: &Trails, capacity: usize) -> (Vec<LineVertex>, Vec<(u32, u32)>) {
    let mut vertices = Vec::new();
    let mut ranges = Vec::new();

    for body in bodies {
        let Some(path) = trails.path(body.id()) else {
            continue;
        };
        if path.len() < 2 || vertices.len() + path.len() > capacity {
            continue;
        }

        let start = vertices.len() as u32;
        let color = body.color();
        for (i, pos) in path.iter().enumerate() {
            let alpha = (i as f32 / path.len() as f32) * 0.6;
            vertices.push(LineVertex {
                position: pos.to_array(),
                color: [color[0], color[1], color[2], alpha],
            });
        }
        ranges.push((start, path.len() as u32));
    }

    (vertices, ranges)
}
