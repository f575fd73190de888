//! Window and OpenGL context creation with [`glutin`] on top of [`winit`].

use std::{num::NonZeroU32, sync::Arc};

use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version},
    display::GetGlDisplay as _,
    prelude::{GlDisplay as _, NotCurrentGlContext as _},
    surface::{GlSurface as _, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use raw_window_handle::HasWindowHandle as _;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::Window,
};

use crate::{error::Result, options::DemoOptions};

/// A window with a current OpenGL context.
///
/// Dropping it destroys the surface, the context and the window, in that order.
pub struct GlutinWindowContext {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Arc<Window>,
}

impl GlutinWindowContext {
    /// Create the window, ask for the configured OpenGL version (falling back to GLES),
    /// and make the context current on this thread.
    ///
    /// # Errors
    /// Any failure here is fatal: there is nothing to draw on without it.
    #[expect(unsafe_code)]
    pub fn new(event_loop: &ActiveEventLoop, options: &DemoOptions) -> Result<Self> {
        let window_attributes = Window::default_attributes()
            .with_title(options.title.clone())
            .with_inner_size(LogicalSize::new(
                options.window_size.x,
                options.window_size.y,
            ))
            .with_resizable(true);

        let config_template = ConfigTemplateBuilder::new()
            .prefer_hardware_accelerated(None)
            .with_depth_size(0)
            .with_stencil_size(0)
            .with_transparency(false);

        log::debug!("Trying to create a glutin display with config: {config_template:?}");

        let (window, gl_config) = glutin_winit::DisplayBuilder::new()
            .with_preference(glutin_winit::ApiPreference::FallbackEgl)
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, config_template, |mut configs| {
                // glutin reports an error instead of calling the picker with no configs.
                configs
                    .next()
                    .expect("glutin returned an empty config iterator")
            })
            .map_err(crate::Error::NoGlutinConfigs)?;
        let window = Arc::new(window.ok_or(crate::Error::NoWindow)?);

        let gl_display = gl_config.display();
        let raw_window_handle = window.window_handle()?.as_raw();

        let (major, minor) = options.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));
        let fallback_context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(None))
            .build(Some(raw_window_handle));

        // SAFETY: the window handle is valid for as long as `window` lives, which outlives the context.
        let not_current_context =
            match unsafe { gl_display.create_context(&gl_config, &context_attributes) } {
                Ok(context) => context,
                Err(err) => {
                    log::warn!(
                        "Failed to create an OpenGL {major}.{minor} context: {err}. Retrying with GLES"
                    );
                    // SAFETY: as above.
                    unsafe { gl_display.create_context(&gl_config, &fallback_context_attributes)? }
                }
            };

        let (width, height): (u32, u32) = window.inner_size().into();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );
        // SAFETY: as above.
        let gl_surface =
            unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes)? };

        let gl_context = not_current_context.make_current(&gl_surface)?;

        let swap_interval = if options.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(err) = gl_surface.set_swap_interval(&gl_context, swap_interval) {
            log::warn!("Failed to set swap interval: {err}");
        }

        log::info!("Created window {width}x{height}");

        Ok(Self {
            gl_surface,
            gl_context,
            window,
        })
    }

    /// Load the OpenGL function pointers of the current context.
    #[expect(unsafe_code)]
    pub fn load_gl(&self) -> glow::Context {
        let gl_display = self.gl_surface.display();
        // SAFETY: our context is current on this thread.
        unsafe { glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name)) }
    }

    #[inline]
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Size of the framebuffer, in physical pixels.
    pub fn framebuffer_size(&self) -> [u32; 2] {
        self.window.inner_size().into()
    }

    pub fn resize(&self, physical_size: PhysicalSize<u32>) {
        let width = NonZeroU32::new(physical_size.width).unwrap_or(NonZeroU32::MIN);
        let height = NonZeroU32::new(physical_size.height).unwrap_or(NonZeroU32::MIN);
        self.gl_surface.resize(&self.gl_context, width, height);
    }

    /// # Errors
    /// If the driver refuses to present.
    pub fn swap_buffers(&self) -> glutin::error::Result<()> {
        self.gl_surface.swap_buffers(&self.gl_context)
    }
}
