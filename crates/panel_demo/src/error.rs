use std::path::PathBuf;

/// A fatal error: without these there is no surface to draw on.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("winit error: {0}")]
    Winit(#[from] winit::error::OsError),

    /// The glutin display builder found nothing matching our config template.
    #[error("Found no glutin configs matching the template: {0}")]
    NoGlutinConfigs(Box<dyn std::error::Error>),

    #[error("The display builder did not create a window")]
    NoWindow,

    #[error("Failed to get the native window handle: {0}")]
    Handle(#[from] raw_window_handle::HandleError),

    #[error("glutin error: {0}")]
    Glutin(#[from] glutin::error::Error),

    #[error("Failed to create the OpenGL painter: {0}")]
    OpenGl(#[from] egui_glow::PainterError),
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Failure to load the custom font. Never fatal; egui falls back to its built-in fonts.
#[derive(thiserror::Error, Debug)]
pub enum FontError {
    #[error("Failed to read font {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Font file {path:?} is empty")]
    Empty { path: PathBuf },

    #[error("Font file {path:?} is not a TrueType/OpenType font: {source}")]
    Parse {
        path: PathBuf,
        source: skrifa::raw::ReadError,
    },
}
