//! A single demo panel drawn with [`egui`] on top of a [`winit`] window and an OpenGL 2.1 context.
//!
//! The panel has a button, two radio options, an integer property editor and a
//! color-picker combo box that sets the background color.
//! A fixed-rate [`ticker::Ticker`] (30 Hz by default) drives the [`frame_loop::FrameLoop`]:
//! every tick it feeds queued input into egui, checks whether the window should close,
//! declares the UI with [`ui::build_frame`] and paints it with [`render::Renderer`].
//!
//! Start it with [`run`]:
//!
//! ``` no_run
//! panel_demo::run(panel_demo::DemoOptions::default())?;
//! # Ok::<(), panel_demo::Error>(())
//! ```
//!
//! Everything that touches the window, the GUI context or OpenGL runs on the thread that calls [`run`].
//! The only way in from other threads is [`shutdown::ShutdownHandle::shutdown_and_wait`].

mod app;
mod error;
pub mod fonts;
pub mod frame_loop;
mod options;
pub mod render;
pub mod shutdown;
pub mod state;
pub mod ticker;
pub mod ui;
pub mod widgets;
mod window;

pub use app::{DemoApp, UserEvent, run};
pub use error::{Error, FontError, Result};
pub use options::{DemoOptions, PanelLayout};
pub use state::{Difficulty, State};
pub use window::GlutinWindowContext;
