//! Loading the one custom font of the demo.

use std::path::Path;

use egui::{
    FontData, FontFamily,
    epaint::text::{FontInsert, FontPriority, InsertFontFamily},
};

use crate::error::FontError;

const FONT_NAME: &str = "demo_font";

/// Read a TrueType/OpenType file into [`FontData`].
///
/// The font tables are parsed here, so anything that gets through is safe to hand to egui.
///
/// # Errors
/// If the file can't be read, is empty, or is not a font.
pub fn load_font(path: &Path) -> Result<FontData, FontError> {
    let bytes = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_owned(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(FontError::Empty {
            path: path.to_owned(),
        });
    }
    let font = FontData::from_owned(bytes);
    if let Err(source) = skrifa::FontRef::from_index(&font.font, font.index) {
        return Err(FontError::Parse {
            path: path.to_owned(),
            source,
        });
    }
    Ok(font)
}

/// Make the font at `path` the preferred font of `ctx`, with every text style at `size` points.
///
/// Returns `false` and leaves egui's built-in fonts in place if the font could not be loaded.
pub fn install_font(ctx: &egui::Context, path: &Path, size: f32) -> bool {
    let font = match load_font(path) {
        Ok(font) => font,
        Err(err) => {
            log::warn!("{err}. Falling back to the default font.");
            return false;
        }
    };

    ctx.add_font(FontInsert::new(
        FONT_NAME,
        font,
        vec![
            InsertFontFamily {
                family: FontFamily::Proportional,
                priority: FontPriority::Highest,
            },
            InsertFontFamily {
                family: FontFamily::Monospace,
                priority: FontPriority::Lowest,
            },
        ],
    ));

    ctx.all_styles_mut(|style| {
        for font_id in style.text_styles.values_mut() {
            font_id.size = size;
        }
    });

    log::debug!("Loaded font {path:?} at {size}px");
    true
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn missing_font_is_an_io_error() {
        let err = load_font(Path::new("does/not/exist.ttf")).unwrap_err();
        assert!(matches!(err, FontError::Io { .. }), "{err}");
    }

    #[test]
    fn empty_font_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_font(file.path()).unwrap_err();
        assert!(matches!(err, FontError::Empty { .. }), "{err}");
    }

    fn garbage_font_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not really a font").unwrap();
        file
    }

    #[test]
    fn non_font_bytes_are_rejected() {
        let file = garbage_font_file();
        let err = load_font(file.path()).unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }), "{err}");
    }

    #[test]
    fn missing_font_is_not_installed() {
        let ctx = egui::Context::default();
        assert!(!install_font(&ctx, Path::new("does/not/exist.ttf"), 16.0));
    }

    #[test]
    fn non_font_file_keeps_the_builtin_fonts() {
        let file = garbage_font_file();
        let ctx = egui::Context::default();
        assert!(!install_font(&ctx, file.path(), 16.0));

        // Laying out text would panic here if the bad font had been registered.
        let mut state = crate::State::default();
        let output = ctx.run_ui(egui::RawInput::default(), |ui| {
            crate::ui::build_frame(ui, &mut state, &crate::PanelLayout::default());
        });
        assert!(!output.shapes.is_empty());
    }
}
