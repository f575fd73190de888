use std::ops::RangeInclusive;

use egui::Color32;

/// The allowed values of [`State::property`].
pub const PROPERTY_RANGE: RangeInclusive<i32> = 0..=100;

/// The background the demo starts with.
pub const DEFAULT_BACKGROUND: [u8; 4] = [28, 48, 62, 255];

/// The two radio options of the demo panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 2] = [Self::Easy, Self::Hard];

    /// The label shown next to the radio button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
        }
    }
}

/// Everything the demo panel reads and writes.
///
/// Owned by the frame loop and handed to the UI builder by `&mut` once per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    /// Unmultiplied sRGBA.
    background: [u8; 4],

    /// Always inside [`PROPERTY_RANGE`].
    property: i32,

    pub difficulty: Difficulty,
}

impl Default for State {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            property: *PROPERTY_RANGE.start(),
            difficulty: Difficulty::default(),
        }
    }
}

impl State {
    pub fn with_background(mut self, background: [u8; 4]) -> Self {
        self.background = background;
        self
    }

    #[inline]
    pub fn property(&self) -> i32 {
        self.property
    }

    /// Stores `value`, clamped to [`PROPERTY_RANGE`].
    pub fn set_property(&mut self, value: i32) {
        self.property = value.clamp(*PROPERTY_RANGE.start(), *PROPERTY_RANGE.end());
    }

    /// Unmultiplied sRGBA.
    #[inline]
    pub fn background(&self) -> [u8; 4] {
        self.background
    }

    pub fn set_background(&mut self, background: [u8; 4]) {
        self.background = background;
    }

    pub fn background_rgba(&self) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = self.background;
        (r, g, b, a)
    }

    pub fn set_background_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.background = [r, g, b, a];
    }

    /// The background as egui wants to display it.
    pub fn background_color32(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state() {
        let state = State::default();
        assert_eq!(state.background(), [28, 48, 62, 255]);
        assert_eq!(state.property(), 0);
        assert_eq!(state.difficulty, Difficulty::Easy);
    }

    #[test]
    fn property_is_clamped() {
        let mut state = State::default();
        for (value, expected) in [(-5, 0), (0, 0), (42, 42), (100, 100), (101, 100), (i32::MAX, 100)]
        {
            state.set_property(value);
            assert_eq!(state.property(), expected, "set_property({value})");
        }
    }

    #[test]
    fn background_round_trip_is_identity() {
        for background in [[28, 48, 62, 255], [0, 0, 0, 0], [255, 1, 128, 7], [10, 200, 30, 99]] {
            let mut state = State::default().with_background(background);
            let (r, g, b, a) = state.background_rgba();
            state.set_background_rgba(r, g, b, a);
            assert_eq!(state.background(), background);
        }
    }

    #[test]
    fn difficulty_labels() {
        let labels: Vec<_> = Difficulty::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(labels, ["easy", "hard"]);
    }
}
