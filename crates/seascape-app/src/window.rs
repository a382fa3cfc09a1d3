//! Window creation and event handling via winit.
//!
//! [`SeascapeApp`] implements winit's [`ApplicationHandler`]. Input events
//! update keyboard and mouse state between frames; `RedrawRequested` resolves
//! actions, feeds the sun slider and ticks the [`FrameLoop`].

use std::sync::Arc;
use std::time::Instant;

use seascape_config::Config;
use seascape_input::{ActionResolver, ActionState, InputMap, KeyboardState, MouseState};
use seascape_render::{RenderContextError, SurfaceError, WgpuRenderer, init_render_context_blocking};
use seascape_scene::SceneContext;
use tracing::{debug, error, info, instrument, trace};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::bootstrap::{BootstrapError, SceneBootstrap};
use crate::frame_loop::FrameLoop;
use crate::sun_control::SunControl;

/// Why the application stopped early.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid scene configuration: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Render(#[from] RenderContextError),

    #[error("rendering failed: {0}")]
    Surface(#[from] SurfaceError),
}

pub struct SeascapeApp {
    config: Config,
    scene: SceneContext,
    frame_loop: FrameLoop,
    sun: SunControl,
    input_map: InputMap,
    keyboard: KeyboardState,
    mouse: MouseState,
    actions: ActionState,
    window: Option<Arc<Window>>,
    renderer: Option<WgpuRenderer>,
    last_frame: Option<Instant>,
    failure: Option<AppError>,
}

impl SeascapeApp {
    /// Build the scene and controllers. The window and GPU come later, in
    /// [`ApplicationHandler::resumed`].
    pub fn new(config: Config) -> Result<Self, AppError> {
        let capabilities = SceneBootstrap::capabilities(&config);
        let mut sun = SceneBootstrap::sun_control(&config);
        let scene = SceneBootstrap::build(&config, capabilities, &mut sun)?;
        Ok(Self {
            frame_loop: SceneBootstrap::frame_loop(&config),
            sun,
            input_map: SceneBootstrap::input_map(&config),
            config,
            scene,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            actions: ActionState::new(),
            window: None,
            renderer: None,
            last_frame: None,
            failure: None,
        })
    }

    fn window_attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ))
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window = Arc::new(event_loop.create_window(self.window_attributes())?);
        let ctx = init_render_context_blocking(window.clone(), self.config.window.vsync)?;

        let (width, height) = ctx.size();
        self.scene.resize(width, height);
        self.renderer = Some(WgpuRenderer::new(ctx, &self.scene));
        self.window = Some(window);
        info!("Window ready: {width}x{height}");
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        debug!("Window resized to {width}x{height}");
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        let now = Instant::now();
        let delta = self
            .last_frame
            .replace(now)
            .map_or(0.0, |previous| now.duration_since(previous).as_secs_f32());

        ActionResolver::resolve(&self.input_map, &self.keyboard, &mut self.actions);
        let sun_steps = self.actions.sun_direction();
        if sun_steps != 0.0 {
            self.sun.nudge(sun_steps, &mut self.scene);
        }
        self.frame_loop.handle_pointer(&self.mouse, &self.scene);

        let keys = self.actions.movement();
        let result = self
            .frame_loop
            .tick(&mut self.scene, &keys, renderer, delta);

        self.keyboard.end_frame();
        self.mouse.end_frame();

        match result {
            Ok(stats) => trace!(?stats, "frame"),
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn take_failure(&mut self) -> Option<AppError> {
        self.failure.take()
    }
}

impl ApplicationHandler for SeascapeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::Focused(false) => {
                self.keyboard.release_all();
                self.mouse.release_all();
            }
            WindowEvent::KeyboardInput { event, .. } => self.keyboard.process_event(&event),
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => self.mouse.on_cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => self.mouse.on_button(button, state),
            WindowEvent::MouseWheel { delta, .. } => self.mouse.on_scroll(delta),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the viewer until the window closes. Configuration errors are reported
/// before any window is created.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), AppError> {
    let mut app = SeascapeApp::new(config)?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;
    match app.take_failure() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
