use std::ops::RangeInclusive;

use egui::{Button, DragValue, Response, Ui, Widget, vec2};

/// A bounded integer editor: a draggable value with a decrement and an increment button on either side.
///
/// Dragging changes the value by `speed` per pixel, the buttons by `step`.
/// The value written back is always inside `range`.
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct PropertyInt<'a> {
    label: &'a str,
    value: &'a mut i32,
    range: RangeInclusive<i32>,
    step: i32,
    speed: f64,
    height: f32,
}

impl<'a> PropertyInt<'a> {
    pub fn new(label: &'a str, value: &'a mut i32, range: RangeInclusive<i32>) -> Self {
        Self {
            label,
            value,
            range,
            step: 1,
            speed: 1.0,
            height: 25.0,
        }
    }

    /// How much the `-` and `+` buttons change the value.
    #[inline]
    pub fn step(mut self, step: i32) -> Self {
        self.step = step;
        self
    }

    /// Change per pixel dragged.
    #[inline]
    pub fn speed(mut self, speed: impl Into<f64>) -> Self {
        self.speed = speed.into();
        self
    }

    #[inline]
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl Widget for PropertyInt<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            label,
            value,
            range,
            step,
            speed,
            height,
        } = self;
        let (min, max) = (*range.start(), *range.end());

        ui.horizontal(|ui| {
            let button_size = vec2(height, height);
            let mut stepped = false;

            if ui.add_sized(button_size, Button::new("-")).clicked() {
                *value = value.saturating_sub(step);
                stepped = true;
            }

            let reserved = button_size.x + ui.spacing().item_spacing.x;
            let drag_width = (ui.available_width() - reserved).max(0.0);
            let mut response = ui.add_sized(
                [drag_width, height],
                DragValue::new(&mut *value)
                    .range(range.clone())
                    .speed(speed)
                    .prefix(label),
            );

            if ui.add_sized(button_size, Button::new("+")).clicked() {
                *value = value.saturating_add(step);
                stepped = true;
            }

            *value = (*value).clamp(min, max);
            if stepped {
                response.mark_changed();
            }
            response
        })
        .inner
    }
}
