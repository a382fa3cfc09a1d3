//! wgpu rendering for the seascape: device and surface management, frame
//! encoding, and the sky, water and starfield pipelines.

pub mod gpu;
pub mod pass;
pub mod renderer;
pub mod sky;
pub mod stars;
pub mod water;

pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{DepthBuffer, FrameEncoder, RenderPassBuilder, clear_color};
pub use renderer::WgpuRenderer;
