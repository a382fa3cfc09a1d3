//! Draws a [`SceneContext`] into the window surface.

use std::num::NonZeroU64;

use seascape_scene::{CameraUniform, SceneContext};

use crate::gpu::{RenderContext, SurfaceError};
use crate::pass::{DepthBuffer, FrameEncoder, RenderPassBuilder, clear_color};
use crate::sky::SkyPass;
use crate::stars::StarPass;
use crate::water::WaterPass;

/// Layout entry for a uniform buffer holding exactly one `T`.
pub(crate) fn uniform_layout_entry<T>(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

pub(crate) fn create_uniform_buffer<T>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Owns the GPU context and one pipeline per scene entity.
///
/// Each frame is a single pass: clear to the scene background, then sky (when
/// the atmospheric sky is active), water, and stars on top.
pub struct WgpuRenderer {
    ctx: RenderContext,
    depth: DepthBuffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    sky: SkyPass,
    stars: StarPass,
    water: WaterPass,
}

impl WgpuRenderer {
    pub fn new(ctx: RenderContext, scene: &SceneContext) -> Self {
        let device = &ctx.device;
        let format = ctx.surface_format;
        let (width, height) = ctx.size();

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera-bgl"),
            entries: &[uniform_layout_entry::<CameraUniform>(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let camera_buffer = create_uniform_buffer::<CameraUniform>(device, "camera-uniform");
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bg"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let sky = SkyPass::new(device, format, &camera_layout);
        let water = WaterPass::new(device, format, &camera_layout);
        let stars = StarPass::new(device, format, &camera_layout, &scene.starfield.stars);
        let depth = DepthBuffer::new(device, width, height);

        log::info!(
            "Renderer ready: {width}x{height}, {} star instances",
            scene.starfield.len()
        );

        Self {
            ctx,
            depth,
            camera_buffer,
            camera_bind_group,
            sky,
            stars,
            water,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        let (width, height) = self.ctx.size();
        self.depth.resize(&self.ctx.device, width, height);
    }

    pub fn render_scene(&mut self, scene: &SceneContext) -> Result<(), SurfaceError> {
        let surface_texture = self.ctx.get_current_texture()?;
        let queue = &self.ctx.queue;

        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&scene.camera.to_uniform()),
        );
        let sky_uniform = scene.sky.uniform();
        if let Some(uniform) = &sky_uniform {
            self.sky.update(queue, uniform);
        }
        self.water
            .update(queue, &scene.water.uniform(), &scene.lights_uniform());
        let draw_stars = self.stars.is_visible(scene.starfield.opacity);
        if draw_stars {
            self.stars
                .update(queue, &scene.starfield.to_uniform(scene.viewport()));
        }

        let mut frame = FrameEncoder::new(&self.ctx.device, self.ctx.queue.clone(), surface_texture);
        {
            let builder = RenderPassBuilder::new()
                .label("scene-pass")
                .clear_color(clear_color(scene.background.to_array()))
                .depth(&self.depth.view);
            let mut pass = frame.begin_render_pass(&builder);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            if sky_uniform.is_some() {
                self.sky.draw(&mut pass);
            }
            self.water.draw(&mut pass);
            if draw_stars {
                self.stars.draw(&mut pass);
            }
        }
        frame.submit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_scene::{SkyUniform, WaterUniform};

    #[test]
    fn test_uniform_entry_binding_size_matches_type() {
        let entry = uniform_layout_entry::<SkyUniform>(3, wgpu::ShaderStages::FRAGMENT);
        assert_eq!(entry.binding, 3);
        match entry.ty {
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                min_binding_size,
                ..
            } => assert_eq!(min_binding_size.map(NonZeroU64::get), Some(48)),
            other => panic!("unexpected binding type {other:?}"),
        }
    }

    #[test]
    fn test_camera_and_water_uniforms_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<WaterUniform>() % 16, 0);
    }
}
