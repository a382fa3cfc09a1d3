//! Starfield pass: one screen-aligned quad per star, additively blended so
//! stars brighten the sky behind them and vanish when opacity reaches zero.

use seascape_scene::{StarVertex, StarfieldUniform};
use wgpu::util::DeviceExt;

use crate::pass::DepthBuffer;
use crate::renderer::{create_uniform_buffer, uniform_layout_entry};

pub const STAR_SHADER_SOURCE: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    position: vec4<f32>,
};

struct Stars {
    color: vec3<f32>,
    opacity: f32,
    point_size: f32,
    viewport_width: f32,
    viewport_height: f32,
    _padding: f32,
};

@group(0) @binding(0) var<uniform> camera: Camera;
@group(1) @binding(0) var<uniform> stars: Stars;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
};

@vertex
fn vs_star(@builtin(vertex_index) idx: u32, @location(0) star: vec3<f32>) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    var clip = camera.view_proj * vec4<f32>(star, 1.0);
    let viewport = vec2<f32>(stars.viewport_width, stars.viewport_height);
    clip = vec4<f32>(clip.xy + corners[idx] * stars.point_size / viewport * clip.w, clip.zw);

    var out: VertexOutput;
    out.position = clip;
    return out;
}

@fragment
fn fs_star() -> @location(0) vec4<f32> {
    return vec4<f32>(stars.color * stars.opacity, stars.opacity);
}
"#;

pub struct StarPass {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl StarPass {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        stars: &[StarVertex],
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("star-shader"),
            source: wgpu::ShaderSource::Wgsl(STAR_SHADER_SOURCE.into()),
        });

        let star_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("star-bgl"),
            entries: &[uniform_layout_entry::<StarfieldUniform>(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star-pipeline-layout"),
            bind_group_layouts: &[camera_layout, &star_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("star-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_star"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<StarVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_star"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent::OVER,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        // An empty starfield still needs a bindable buffer.
        let placeholder = [StarVertex {
            position: [0.0; 3],
        }];
        let contents: &[StarVertex] = if stars.is_empty() { &placeholder } else { stars };
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star-instances"),
            contents: bytemuck::cast_slice(contents),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = create_uniform_buffer::<StarfieldUniform>(device, "star-uniform");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("star-bg"),
            layout: &star_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            instance_buffer,
            instance_count: u32::try_from(stars.len()).unwrap_or(u32::MAX),
            uniform_buffer,
            bind_group,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, uniform: &StarfieldUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Whether a draw at `opacity` would contribute anything.
    pub fn is_visible(&self, opacity: f32) -> bool {
        self.instance_count > 0 && opacity > 0.0
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..self.instance_count);
    }
}
