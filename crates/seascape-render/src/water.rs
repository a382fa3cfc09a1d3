//! Water plane pass.
//!
//! The quad is generated from the vertex index and sized from the uniform, so
//! no vertex buffer is needed. Shaded water perturbs the normal with a few
//! travelling sine ripples, blends toward the sky colour by a Schlick Fresnel
//! term and adds a specular sun glint. Flat water writes its colour lit only
//! by the scene lights.

use seascape_scene::{LightsUniform, WaterUniform};

use crate::pass::DepthBuffer;
use crate::renderer::{create_uniform_buffer, uniform_layout_entry};

pub const WATER_SHADER_SOURCE: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    position: vec4<f32>,
};

struct Water {
    sun_direction: vec3<f32>,
    time: f32,
    sun_color: vec3<f32>,
    distortion_scale: f32,
    water_color: vec3<f32>,
    shaded: f32,
    size: f32,
    elevation: f32,
    _padding: vec2<f32>,
};

struct Lights {
    ambient: vec4<f32>,
    directional: vec4<f32>,
    directional_position: vec4<f32>,
};

@group(0) @binding(0) var<uniform> camera: Camera;
@group(1) @binding(0) var<uniform> water: Water;
@group(1) @binding(1) var<uniform> lights: Lights;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world: vec3<f32>,
};

@vertex
fn vs_water(@builtin(vertex_index) idx: u32) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(-0.5, 0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(0.5, -0.5),
    );
    let c = corners[idx] * water.size;
    let world = vec3<f32>(c.x, water.elevation, c.y);

    var out: VertexOutput;
    out.position = camera.view_proj * vec4<f32>(world, 1.0);
    out.world = world;
    return out;
}

// Sum of travelling waves; returns the xz slope.
fn ripple_slope(p: vec2<f32>, t: f32) -> vec2<f32> {
    var slope = vec2<f32>(0.0);
    var dirs = array<vec2<f32>, 4>(
        vec2<f32>(0.8, 0.6),
        vec2<f32>(-0.6, 0.8),
        vec2<f32>(0.3, -0.95),
        vec2<f32>(-0.9, -0.4),
    );
    let freqs = vec4<f32>(0.021, 0.034, 0.057, 0.089);
    let speeds = vec4<f32>(1.1, 0.9, 1.4, 1.7);
    for (var i = 0; i < 4; i = i + 1) {
        let phase = dot(dirs[i], p) * freqs[i] + t * speeds[i];
        slope += dirs[i] * cos(phase) * freqs[i];
    }
    return slope;
}

fn lit(base: vec3<f32>, normal: vec3<f32>) -> vec3<f32> {
    let ambient = lights.ambient.xyz * lights.ambient.w;
    let light_dir = normalize(lights.directional_position.xyz);
    let diffuse = lights.directional.xyz * lights.directional.w * max(dot(normal, light_dir), 0.0);
    return base * (ambient + diffuse);
}

@fragment
fn fs_water(in: VertexOutput) -> @location(0) vec4<f32> {
    let up = vec3<f32>(0.0, 1.0, 0.0);
    if (water.shaded < 0.5) {
        return vec4<f32>(lit(water.water_color, up), 1.0);
    }

    let slope = ripple_slope(in.world.xz, water.time) * water.distortion_scale;
    let normal = normalize(vec3<f32>(-slope.x, 1.0, -slope.y));
    let to_eye = camera.position.xyz - in.world;
    let view = normalize(to_eye);
    let sun = normalize(water.sun_direction);

    let cos_view = max(dot(normal, view), 0.0);
    let fresnel = 0.02 + 0.98 * pow(1.0 - cos_view, 5.0);

    let reflected = reflect(-sun, normal);
    let glint = pow(max(dot(reflected, view), 0.0), 100.0) * 2.0;
    let specular = water.sun_color * glint;

    let sky_tint = water.sun_color * (0.3 + 0.7 * max(sun.y, 0.0));
    let scatter = lit(water.water_color, normal);
    let color = mix(scatter, sky_tint, fresnel * 0.5) + specular;
    return vec4<f32>(color, 1.0);
}
"#;

pub struct WaterPass {
    pipeline: wgpu::RenderPipeline,
    water_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl WaterPass {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("water-shader"),
            source: wgpu::ShaderSource::Wgsl(WATER_SHADER_SOURCE.into()),
        });

        let water_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("water-bgl"),
            entries: &[
                uniform_layout_entry::<WaterUniform>(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                uniform_layout_entry::<LightsUniform>(1, wgpu::ShaderStages::FRAGMENT),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("water-pipeline-layout"),
            bind_group_layouts: &[camera_layout, &water_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("water-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_water"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Visible from below when the camera dips under the surface.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_water"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let water_buffer = create_uniform_buffer::<WaterUniform>(device, "water-uniform");
        let lights_buffer = create_uniform_buffer::<LightsUniform>(device, "lights-uniform");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("water-bg"),
            layout: &water_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: water_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            pipeline,
            water_buffer,
            lights_buffer,
            bind_group,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, water: &WaterUniform, lights: &LightsUniform) {
        queue.write_buffer(&self.water_buffer, 0, bytemuck::bytes_of(water));
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::bytes_of(lights));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.draw(0..6, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_entry_points_present() {
        assert!(WATER_SHADER_SOURCE.contains("fn vs_water"));
        assert!(WATER_SHADER_SOURCE.contains("fn fs_water"));
    }

    #[test]
    fn test_flat_branch_keyed_on_shaded_flag() {
        assert!(WATER_SHADER_SOURCE.contains("water.shaded < 0.5"));
        assert_eq!(std::mem::size_of::<WaterUniform>(), 64);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 48);
    }
}
