use std::{path::PathBuf, time::Duration};

use egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::render::DrawBudget;

/// Where the demo panel goes and how big it starts out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelLayout {
    pub title: &'static str,
    pub pos: Pos2,
    pub size: Vec2,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            title: "Demo",
            pos: pos2(50.0, 50.0),
            size: vec2(230.0, 250.0),
        }
    }
}

impl PanelLayout {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }
}

/// Options controlling the behavior of the demo.
///
/// Everything has a sensible default; the binary never changes them,
/// but an embedding host may.
#[derive(Clone, Debug)]
pub struct DemoOptions {
    /// Window title.
    pub title: String,

    /// Inner window size, in logical points.
    pub window_size: Vec2,

    /// The OpenGL version to ask for, as `(major, minor)`.
    ///
    /// The painter only needs GLSL 1.20, so the legacy 2.1 context is enough.
    pub gl_version: (u8, u8),

    /// Wait for vertical sync when swapping buffers.
    pub vsync: bool,

    /// How often the frame loop ticks.
    pub tick_rate_hz: u32,

    /// The one font loaded at startup. A missing file means egui's built-in fonts are used.
    pub font_path: PathBuf,

    /// Pixel size of every text style when the font is loaded.
    pub font_size: f32,

    pub panel: PanelLayout,

    /// Feathered (anti-aliased) tessellation.
    pub anti_aliasing: bool,

    /// Upper bounds on the vertex and index bytes painted per frame.
    pub draw_budget: DrawBudget,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            title: "Demo Demo".to_owned(),
            window_size: vec2(400.0, 500.0),
            gl_version: (2, 1),
            vsync: true,
            tick_rate_hz: 30,
            font_path: PathBuf::from("assets/FreeSans.ttf"),
            font_size: 16.0,
            panel: PanelLayout::default(),
            anti_aliasing: true,
            draw_budget: DrawBudget::default(),
        }
    }
}

impl DemoOptions {
    /// Time between two ticks of the frame loop.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }
}
