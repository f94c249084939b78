use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputFrame, InputState};
use crate::paint::Color;
use crate::raster::{Camera, LineMode};
use crate::render::shapes::ACCUM_FORMAT;
use crate::render::{RenderCtx, RenderTarget, Renderer, RendererOptions};
use crate::scene::DrawBatch;
use crate::time::{FpsCounter, FrameClock};

use super::CameraControls;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub clear_color: Color,
    /// Start lines in accumulate mode.
    pub use_line_alpha: bool,
    pub camera: CameraControls,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "weft".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            clear_color: Color::BLACK,
            use_line_alpha: false,
            camera: CameraControls::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window is closed.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Everything owned per open window.
struct Session {
    entry: WindowEntry,
    renderer: Renderer,

    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    fps: FpsCounter,

    camera: Camera,
    batch: DrawBatch,
}

impl Session {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit, camera: Camera) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let renderer = {
            let gpu = entry.borrow_gpu();
            let read_write_storage = gpu.supports_read_write_storage(ACCUM_FORMAT);
            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), viewport_of(gpu));
            Renderer::new(
                &ctx,
                RendererOptions {
                    camera,
                    line_mode: LineMode::from_bool(config.use_line_alpha),
                    clear_color: config.clear_color,
                    read_write_storage,
                },
            )
        };
        log::info!("line mode: {:?}", renderer.line_mode());

        Ok(Self {
            entry,
            renderer,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
            camera,
            batch: DrawBatch::new(),
        })
    }

    fn id(&self) -> WindowId {
        self.entry.borrow_window().id()
    }

    fn request_redraw(&self) {
        self.entry.borrow_window().request_redraw();
    }

    fn viewport(&self) -> Viewport {
        viewport_of(self.entry.borrow_gpu())
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let configured = self.entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        if !configured {
            log::debug!("surface resize deferred for {}x{}", new_size.width, new_size.height);
            return;
        }

        let gpu = self.entry.borrow_gpu();
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), viewport_of(gpu));
        self.renderer.resize(&ctx);
    }

    /// Input dispatch, camera controls, `tick` and `render` for one frame.
    fn update<A: App>(&mut self, app: &mut A, controls: &CameraControls) -> AppControl {
        let time = self.clock.tick();
        self.fps.record(time.now);

        controls.apply(&mut self.camera, &self.input_state, &self.input_frame);

        let mut control = AppControl::Continue;
        {
            let ctx = FrameCtx::new(
                &self.input_state,
                &self.input_frame,
                time,
                self.fps.fps(),
                self.camera,
                self.viewport(),
            );

            for ev in &self.input_frame.events {
                let result = match ev {
                    InputEvent::Key { key, state, repeat } => app.on_key(&ctx, *key, *state, *repeat),
                    InputEvent::PointerButton { button, state } => app.on_mouse(&ctx, *button, *state),
                    _ => AppControl::Continue,
                };
                if result == AppControl::Exit {
                    control = AppControl::Exit;
                }
            }

            if app.tick(&ctx) == AppControl::Exit {
                control = AppControl::Exit;
            }
        }

        // Clear per-frame deltas after the frame is consumed.
        self.input_frame.clear();

        self.batch.clear();
        if control == AppControl::Continue {
            app.render(&mut self.batch);
        }
        control
    }

    /// Uploads the batch and presents one frame.
    fn draw(&mut self) -> AppControl {
        if !self.viewport().is_valid() {
            return AppControl::Continue;
        }

        let acquired = self.entry.borrow_gpu().begin_frame();
        let mut frame = match acquired {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("surface error: {err}");
                let action = self.entry.with_gpu_mut(|gpu| gpu.handle_surface_error(err));
                if action == SurfaceErrorAction::Fatal {
                    log::error!("unrecoverable surface error, exiting");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let gpu = self.entry.borrow_gpu();
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), frame.viewport());
        if ctx.viewport != self.renderer.viewport() {
            self.renderer.resize(&ctx);
        }
        self.renderer.set_camera(gpu.queue(), self.camera);
        self.renderer.prepare(&ctx, &self.batch);

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::from_frame(&mut frame);
            self.renderer.render(&mut target, &self.batch);
        }

        self.entry.borrow_window().pre_present_notify();
        gpu.submit(frame);

        AppControl::Continue
    }
}

fn viewport_of(gpu: &Gpu<'_>) -> Viewport {
    let size = gpu.size();
    Viewport::from_physical(size.width, size.height)
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    session: Option<Session>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            session: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        let camera = self.app.initial_camera();
        match Session::open(event_loop, &self.config, self.gpu_init.clone(), camera) {
            Ok(session) => {
                session.request_redraw();
                self.session = Some(session);
            }
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                self.fatal = Some(e);
                self.request_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some(session) = &self.session {
            session.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.id() != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            session.input_state.apply_event(&mut session.input_frame, ev);
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.session = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                session.resize(*new_size);
                session.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = session.entry.borrow_window().inner_size();
                session.resize(new_size);
                session.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let mut control = session.update(&mut self.app, &self.config.camera);
                if control == AppControl::Continue {
                    control = session.draw();
                }
                if control == AppControl::Exit {
                    self.session = None;
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
