//! Clearing the framebuffer and painting the tessellated egui output with [`egui_glow`].

use std::sync::Arc;

use egui::epaint::{ClippedPrimitive, Primitive, Vertex};
use glow::HasContext as _;

use crate::error::Result;

/// Convert an unmultiplied sRGBA background into the normalized floats `glClearColor` takes.
pub fn clear_color(background: [u8; 4]) -> [f32; 4] {
    background.map(|channel| f32::from(channel) / 255.0)
}

/// Upper bounds on the geometry painted in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawBudget {
    pub max_vertex_bytes: usize,
    pub max_index_bytes: usize,
}

impl Default for DrawBudget {
    fn default() -> Self {
        Self {
            max_vertex_bytes: 512 * 1024,
            max_index_bytes: 128 * 1024,
        }
    }
}

impl DrawBudget {
    /// Keep primitives in paint order until either budget would be exceeded, then drop the rest.
    ///
    /// Returns how many primitives were dropped.
    pub fn apply(&self, primitives: &mut Vec<ClippedPrimitive>) -> usize {
        let mut vertex_bytes = 0;
        let mut index_bytes = 0;

        let fits = primitives.iter().position(|clipped| {
            let (vertices, indices) = primitive_bytes(&clipped.primitive);
            vertex_bytes += vertices;
            index_bytes += indices;
            vertex_bytes > self.max_vertex_bytes || index_bytes > self.max_index_bytes
        });

        match fits {
            Some(first_over) => {
                let dropped = primitives.len() - first_over;
                primitives.truncate(first_over);
                dropped
            }
            None => 0,
        }
    }
}

/// Vertex and index bytes uploaded for one primitive.
fn primitive_bytes(primitive: &Primitive) -> (usize, usize) {
    match primitive {
        Primitive::Mesh(mesh) => (
            mesh.vertices.len() * std::mem::size_of::<Vertex>(),
            mesh.indices.len() * std::mem::size_of::<u32>(),
        ),
        Primitive::Callback(_) => (0, 0),
    }
}

/// Owns the [`egui_glow::Painter`] and the GL calls around it.
pub struct Renderer {
    gl: Arc<glow::Context>,
    painter: egui_glow::Painter,
    budget: DrawBudget,
}

impl Renderer {
    /// # Errors
    /// If the painter can't compile its shaders or create its buffers.
    pub fn new(gl: Arc<glow::Context>, budget: DrawBudget) -> Result<Self> {
        let painter = egui_glow::Painter::new(Arc::clone(&gl), "", None, true)?;
        Ok(Self {
            gl,
            painter,
            budget,
        })
    }

    pub fn max_texture_side(&self) -> usize {
        self.painter.max_texture_side()
    }

    #[expect(unsafe_code)]
    pub fn set_viewport(&self, [width, height]: [u32; 2]) {
        // SAFETY: the GL context of `self.gl` is current on this thread.
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    /// Clear to `background`, paint one frame of egui output.
    ///
    /// Does not swap buffers.
    #[expect(unsafe_code)]
    pub fn render(
        &mut self,
        screen_size_in_pixels: [u32; 2],
        background: [u8; 4],
        pixels_per_point: f32,
        mut primitives: Vec<ClippedPrimitive>,
        textures_delta: &egui::TexturesDelta,
    ) {
        let [r, g, b, a] = clear_color(background);

        self.set_viewport(screen_size_in_pixels);
        // SAFETY: the GL context of `self.gl` is current on this thread.
        unsafe {
            self.gl.disable(glow::SCISSOR_TEST);
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let dropped = self.budget.apply(&mut primitives);
        if dropped > 0 {
            log::warn!(
                "Draw budget {:?} exceeded: dropped {dropped} primitive(s) this frame",
                self.budget
            );
        }

        self.painter.paint_and_update_textures(
            screen_size_in_pixels,
            pixels_per_point,
            &primitives,
            textures_delta,
        );

        egui_glow::check_for_gl_error!(&self.gl, "after painting");
    }

    /// Free the GPU resources of the painter. Must be called before the GL context goes away.
    pub fn destroy(&mut self) {
        self.painter.destroy();
    }
}
