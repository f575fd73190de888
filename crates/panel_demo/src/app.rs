//! The [`winit`] side of the demo: owns the window, the GUI bridge and the frame loop.

use std::{sync::Arc, time::Instant};

use egui::ViewportId;
use glow::HasContext as _;
use parking_lot::Mutex;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

use crate::{
    DemoOptions, Error, Result,
    fonts,
    frame_loop::{FrameLoop, FrameSurface, Phase},
    options::PanelLayout,
    render::Renderer,
    shutdown::{ShutdownHandle, ShutdownSignal},
    state::State,
    ticker::Ticker,
    ui,
    window::GlutinWindowContext,
};

/// The custom event we send to the [`winit`] event loop.
#[derive(Debug)]
pub enum UserEvent {
    /// Someone called [`ShutdownHandle::shutdown_and_wait`].
    Shutdown,
}

/// Everything that only exists while the window is open.
struct Running {
    glutin: GlutinWindowContext,
    egui_ctx: egui::Context,
    egui_winit: egui_winit::State,
    renderer: Renderer,
    panel: PanelLayout,

    /// Window events since the last tick, in arrival order.
    pending_events: Vec<WindowEvent>,
    close_requested: bool,
    panel_open: bool,
}

impl Running {
    fn new(event_loop: &ActiveEventLoop, options: &DemoOptions) -> Result<Self> {
        let glutin = GlutinWindowContext::new(event_loop, options)?;

        let gl = Arc::new(glutin.load_gl());
        log::debug!("OpenGL version: {:?}", gl.version());

        let renderer = Renderer::new(gl, options.draw_budget)?;
        renderer.set_viewport(glutin.framebuffer_size());

        let egui_ctx = egui::Context::default();
        egui_ctx.tessellation_options_mut(|tessellation| {
            tessellation.feathering = options.anti_aliasing;
        });

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            ViewportId::ROOT,
            event_loop,
            Some(glutin.window().scale_factor() as f32),
            event_loop.system_theme(),
            Some(renderer.max_texture_side()),
        );

        fonts::install_font(&egui_ctx, &options.font_path, options.font_size);

        Ok(Self {
            glutin,
            egui_ctx,
            egui_winit,
            renderer,
            panel: options.panel,
            pending_events: Vec::new(),
            close_requested: false,
            panel_open: true,
        })
    }
}

impl FrameSurface for Running {
    fn poll_events(&mut self) {
        let window = Arc::clone(self.glutin.window());
        for event in std::mem::take(&mut self.pending_events) {
            match &event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    self.close_requested = true;
                }
                WindowEvent::Resized(physical_size) => {
                    self.glutin.resize(*physical_size);
                }
                _ => {}
            }
            // No early repaint on `EventResponse::repaint`: the next tick renders at most 1/30 s later.
            let _ = self.egui_winit.on_window_event(&window, &event);
        }
    }

    fn close_requested(&self) -> bool {
        self.close_requested
    }

    fn run_frame(&mut self, state: &mut State) {
        let window = Arc::clone(self.glutin.window());
        let raw_input = self.egui_winit.take_egui_input(&window);

        let panel = self.panel;
        let mut panel_open = self.panel_open;
        let egui::FullOutput {
            platform_output,
            textures_delta,
            shapes,
            pixels_per_point,
            ..
        } = self.egui_ctx.run_ui(raw_input, |ui| {
            panel_open = ui::build_frame(ui, state, &panel);
        });

        if panel_open != self.panel_open {
            log::debug!("Panel {}", if panel_open { "expanded" } else { "collapsed" });
            self.panel_open = panel_open;
        }

        self.egui_winit
            .handle_platform_output(&window, platform_output);

        let primitives = self.egui_ctx.tessellate(shapes, pixels_per_point);
        self.renderer.render(
            self.glutin.framebuffer_size(),
            state.background(),
            pixels_per_point,
            primitives,
            &textures_delta,
        );

        if let Err(err) = self.glutin.swap_buffers() {
            log::error!("swap_buffers failed: {err}");
        }
    }

    fn teardown(&mut self) {
        log::debug!("Destroying painter");
        self.renderer.destroy();
    }
}

/// Drives a [`FrameLoop`] from [`winit`] events.
pub struct DemoApp {
    options: DemoOptions,
    frame_loop: FrameLoop,
    running: Option<Running>,
    fatal: Option<Error>,
}

impl DemoApp {
    pub fn new(options: DemoOptions, signal: Arc<ShutdownSignal>) -> Self {
        let ticker = Ticker::new(options.tick_period(), Instant::now());
        Self {
            options,
            frame_loop: FrameLoop::new(State::default(), ticker, signal),
            running: None,
            fatal: None,
        }
    }

    /// The fatal error that stopped the demo, if any.
    ///
    /// # Errors
    /// If initialization failed.
    pub fn into_result(self) -> Result {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            self.frame_loop.on_tick(Instant::now(), &mut self.running);
        }
        self.schedule_or_exit(event_loop);
    }

    fn shut_down(&mut self) {
        // Drops the surface, the GL context and the window before acknowledging.
        self.frame_loop.shut_down(&mut self.running);
    }

    fn schedule_or_exit(&mut self, event_loop: &ActiveEventLoop) {
        if self.frame_loop.phase() == Phase::Terminated {
            event_loop.exit();
            return;
        }
        if let Some(deadline) = self.frame_loop.next_deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }
}

impl ApplicationHandler<UserEvent> for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.frame_loop.phase() != Phase::Running {
            return;
        }

        match Running::new(event_loop, &self.options) {
            Ok(running) => {
                self.running = Some(running);
                self.schedule_or_exit(event_loop);
            }
            Err(err) => {
                log::error!("Initialization failed: {err}");
                self.fatal = Some(err);
                self.frame_loop.abandon();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(running) = &mut self.running {
            running.pending_events.push(event);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Shutdown => {
                self.shut_down();
                self.schedule_or_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.tick(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shut_down();
    }
}

/// Open the window and run the demo until the window is closed or the process is interrupted.
///
/// Ctrl-C blocks in [`ShutdownHandle::shutdown_and_wait`] until teardown has finished.
///
/// # Errors
/// If the event loop, window, OpenGL context or painter can't be created.
pub fn run(options: DemoOptions) -> Result {
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;

    let signal = ShutdownSignal::new();
    let proxy = Mutex::new(event_loop.create_proxy());
    let handle = ShutdownHandle::new(Arc::clone(&signal), move || {
        // Fails only if the loop is already gone, in which case there is nothing to wake.
        let _ = proxy.lock().send_event(UserEvent::Shutdown);
    });

    if let Err(err) = ctrlc::set_handler(move || handle.shutdown_and_wait()) {
        log::warn!("Failed to install the Ctrl-C handler: {err}");
    }

    let mut app = DemoApp::new(options, signal);
    event_loop.run_app(&mut app)?;
    app.into_result()
}
