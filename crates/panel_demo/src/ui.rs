//! The per-frame declaration of the demo panel.

use egui::{
    Button, ComboBox, PopupCloseBehavior, RadioButton, Ui, ecolor::Hsva, vec2,
    widgets::color_picker::{self, Alpha},
};

use crate::{
    options::PanelLayout,
    state::{Difficulty, PROPERTY_RANGE, State},
    widgets::PropertyInt,
};

const BUTTON_SIZE: [f32; 2] = [80.0, 30.0];
const OPTION_ROW_HEIGHT: f32 = 30.0;
const ROW_HEIGHT: f32 = 25.0;
const COMBO_POPUP_HEIGHT: f32 = 400.0;
const PICKER_HEIGHT: f32 = 120.0;
const COMPRESSION_STEP: i32 = 10;
const CHANNEL_STEP: i32 = 1;

/// Declare the demo panel for this frame, reading and writing `state`.
///
/// `ui` is the root [`Ui`] handed out by [`egui::Context::run_ui`].
/// Returns `true` if the panel contents were shown, `false` if it is collapsed.
pub fn build_frame(ui: &mut Ui, state: &mut State, layout: &PanelLayout) -> bool {
    egui::Window::new(layout.title)
        .default_rect(layout.rect())
        .title_bar(true)
        .movable(true)
        .resizable(true)
        .collapsible(true)
        .show(ui.ctx(), |ui| panel_contents(ui, state))
        .is_some_and(|response| response.inner.is_some())
}

fn panel_contents(ui: &mut Ui, state: &mut State) {
    if ui.add_sized(BUTTON_SIZE, Button::new("button")).clicked() {
        log::info!("button pressed!");
    }

    difficulty_row(ui, state);

    let mut property = state.property();
    ui.add(
        PropertyInt::new("Compression:", &mut property, PROPERTY_RANGE)
            .step(COMPRESSION_STEP)
            .speed(1.0)
            .height(ROW_HEIGHT),
    );
    state.set_property(property);

    ui.label("background:");
    background_combo(ui, state);
}

/// Two equal-width radio options. Exactly one is checked.
fn difficulty_row(ui: &mut Ui, state: &mut State) {
    ui.columns(Difficulty::ALL.len(), |columns| {
        for (column, difficulty) in columns.iter_mut().zip(Difficulty::ALL) {
            let checked = state.difficulty == difficulty;
            let size = vec2(column.available_width(), OPTION_ROW_HEIGHT);
            if column
                .add_sized(size, RadioButton::new(checked, difficulty.label()))
                .clicked()
            {
                state.difficulty = difficulty;
            }
        }
    });
}

/// A combo box whose trigger is a swatch of the background color.
fn background_combo(ui: &mut Ui, state: &mut State) {
    let swatch_color = state.background_color32();
    let width = ui.available_width();

    let combo = ui.scope(|ui| {
        ui.spacing_mut().interact_size.y = ROW_HEIGHT;
        ComboBox::from_id_salt("background")
            .width(width)
            .height(COMBO_POPUP_HEIGHT)
            .selected_text("")
            .close_behavior(PopupCloseBehavior::CloseOnClickOutside)
            .show_ui(ui, |ui| background_editor(ui, state))
    });

    // Leave the dropdown icon on the right visible.
    let mut swatch = combo.inner.response.rect.shrink(4.0);
    swatch.max.x -= ui.spacing().icon_width;
    if swatch.is_positive() {
        color_picker::show_color_at(ui.painter(), swatch_color, swatch);
    }
}

/// Contents of the open combo: a full picker, then one editor row per channel.
fn background_editor(ui: &mut Ui, state: &mut State) {
    ui.allocate_ui(vec2(ui.available_width(), PICKER_HEIGHT), |ui| {
        let mut hsva = Hsva::from_srgba_unmultiplied(state.background());
        if color_picker::color_picker_hsva_2d(ui, &mut hsva, Alpha::OnlyBlend) {
            state.set_background(hsva.to_srgba_unmultiplied());
        }
    });

    let (r, g, b, a) = state.background_rgba();
    let mut channels = [r, g, b, a].map(i32::from);
    for (label, channel) in ["R:", "G:", "B:", "A:"].into_iter().zip(&mut channels) {
        ui.add(
            PropertyInt::new(label, channel, 0..=255)
                .step(CHANNEL_STEP)
                .speed(1.0)
                .height(ROW_HEIGHT),
        );
    }
    let [r, g, b, a] = channels.map(|c| u8::try_from(c).unwrap_or(u8::MAX));
    state.set_background_rgba(r, g, b, a);
}
