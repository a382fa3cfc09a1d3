//! Atmospheric sky pass.
//!
//! A fullscreen triangle reconstructs the view ray per pixel from the inverse
//! view-projection and evaluates a compact Rayleigh/Mie model driven by the
//! sky uniforms. Drawn first, with no depth writes.

use seascape_scene::SkyUniform;

use crate::pass::DepthBuffer;
use crate::renderer::{create_uniform_buffer, uniform_layout_entry};

pub const SKY_SHADER_SOURCE: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    position: vec4<f32>,
};

struct Sky {
    sun_position: vec3<f32>,
    turbidity: f32,
    up: vec3<f32>,
    rayleigh: f32,
    mie_coefficient: f32,
    mie_directional_g: f32,
    scale: f32,
    _padding: f32,
};

@group(0) @binding(0) var<uniform> camera: Camera;
@group(1) @binding(0) var<uniform> sky: Sky;

const TOTAL_RAYLEIGH: vec3<f32> = vec3<f32>(5.804542996261093e-6, 1.3562911419845635e-5, 3.0265902468824876e-5);
const MIE_CONST: vec3<f32> = vec3<f32>(1.8399918514433978e14, 2.7798023919660528e14, 4.0790479543861094e14);
const CUTOFF_ANGLE: f32 = 1.6110731556870734;
const STEEPNESS: f32 = 1.5;
const SUN_ENERGY: f32 = 1000.0;
const RAYLEIGH_ZENITH_LENGTH: f32 = 8.4e3;
const MIE_ZENITH_LENGTH: f32 = 1.25e3;
const SUN_DISK_COS: f32 = 0.9999566769;
const THREE_OVER_SIXTEEN_PI: f32 = 0.05968310365946075;
const ONE_OVER_FOUR_PI: f32 = 0.07957747154594767;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) ndc: vec2<f32>,
};

@vertex
fn vs_sky(@builtin(vertex_index) idx: u32) -> VertexOutput {
    let uv = vec2<f32>(f32((idx << 1u) & 2u), f32(idx & 2u));
    let ndc = uv * 2.0 - 1.0;
    var out: VertexOutput;
    out.position = vec4<f32>(ndc, 1.0, 1.0);
    out.ndc = ndc;
    return out;
}

fn sun_intensity(zenith_cos: f32) -> f32 {
    let c = clamp(zenith_cos, -1.0, 1.0);
    return SUN_ENERGY * max(0.0, 1.0 - exp(-((CUTOFF_ANGLE - acos(c)) / STEEPNESS)));
}

fn total_mie(turbidity: f32) -> vec3<f32> {
    let c = 0.2 * turbidity * 10e-18;
    return 0.434 * c * MIE_CONST;
}

fn hg_phase(cos_theta: f32, g: f32) -> f32 {
    let g2 = g * g;
    let denom = pow(max(1.0 - 2.0 * g * cos_theta + g2, 1e-4), 1.5);
    return ONE_OVER_FOUR_PI * ((1.0 - g2) / denom);
}

@fragment
fn fs_sky(in: VertexOutput) -> @location(0) vec4<f32> {
    let far_point = camera.inv_view_proj * vec4<f32>(in.ndc, 1.0, 1.0);
    let direction = normalize(far_point.xyz / far_point.w - camera.position.xyz);

    let up = normalize(sky.up);
    let sun_len = length(sky.sun_position);
    var sun_dir = up;
    if (sun_len > 0.0) {
        sun_dir = sky.sun_position / sun_len;
    }

    let sun_e = sun_intensity(dot(sun_dir, up));
    let sun_fade = 1.0 - clamp(1.0 - exp(sky.sun_position.y / 450000.0), 0.0, 1.0);
    let rayleigh_coefficient = max(sky.rayleigh - (1.0 - sun_fade), 0.0);
    let beta_r = TOTAL_RAYLEIGH * rayleigh_coefficient;
    let beta_m = total_mie(sky.turbidity) * sky.mie_coefficient;

    let zenith_angle = acos(max(0.0, dot(up, direction)));
    let inv_path = 1.0 / (cos(zenith_angle) + 0.15 * pow(93.885 - degrees(zenith_angle), -1.253));
    let s_r = RAYLEIGH_ZENITH_LENGTH * inv_path;
    let s_m = MIE_ZENITH_LENGTH * inv_path;

    let extinction = exp(-(beta_r * s_r + beta_m * s_m));

    let cos_theta = dot(direction, sun_dir);
    let r_phase = THREE_OVER_SIXTEEN_PI * (1.0 + cos_theta * cos_theta);
    let m_phase = hg_phase(cos_theta, sky.mie_directional_g);
    let beta_total = max(beta_r + beta_m, vec3<f32>(1e-12));
    let scatter = (beta_r * r_phase + beta_m * m_phase) / beta_total;

    var lin = pow(max(sun_e * scatter * (1.0 - extinction), vec3<f32>(0.0)), vec3<f32>(1.5));
    let horizon_mix = clamp(pow(1.0 - dot(up, sun_dir), 5.0), 0.0, 1.0);
    lin *= mix(vec3<f32>(1.0), pow(max(sun_e * scatter * extinction, vec3<f32>(0.0)), vec3<f32>(0.5)), horizon_mix);

    var l0 = vec3<f32>(0.1) * extinction;
    let sun_disk = smoothstep(SUN_DISK_COS, SUN_DISK_COS + 0.00002, cos_theta);
    l0 += sun_e * 19000.0 * extinction * sun_disk;

    let tex = (lin + l0) * 0.04 + vec3<f32>(0.0, 0.0003, 0.00075);
    let color = pow(max(tex, vec3<f32>(0.0)), vec3<f32>(1.0 / (1.2 + 1.2 * sun_fade)));
    return vec4<f32>(color, 1.0);
}
"#;

pub struct SkyPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SkyPass {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky-shader"),
            source: wgpu::ShaderSource::Wgsl(SKY_SHADER_SOURCE.into()),
        });

        let sky_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky-bgl"),
            entries: &[uniform_layout_entry::<SkyUniform>(
                0,
                wgpu::ShaderStages::FRAGMENT,
            )],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky-pipeline-layout"),
            bind_group_layouts: &[camera_layout, &sky_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_sky"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_sky"),
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

        let uniform_buffer = create_uniform_buffer::<SkyUniform>(device, "sky-uniform");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky-bg"),
            layout: &sky_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, uniform: &SkyUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Record the draw. The camera bind group must already be set at group 0.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_entry_points_present() {
        assert!(SKY_SHADER_SOURCE.contains("fn vs_sky"));
        assert!(SKY_SHADER_SOURCE.contains("fn fs_sky"));
    }

    #[test]
    fn test_wgsl_struct_matches_uniform_fields() {
        for field in [
            "sun_position: vec3<f32>",
            "turbidity: f32",
            "rayleigh: f32",
            "mie_coefficient: f32",
            "mie_directional_g: f32",
        ] {
            assert!(SKY_SHADER_SOURCE.contains(field), "missing {field}");
        }
        assert_eq!(std::mem::size_of::<SkyUniform>() % 16, 0);
    }
}
