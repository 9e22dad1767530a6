// Pen configuration and mouse-button -> color binding.

use crate::types::Color;

/// Persistent pen attributes. Strokes always use round caps and round joins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenState {
    pub size: u32, // stroke width in px; callers keep it >= 1
    pub antialiasing: bool,
    pub primary: Color,
    pub secondary: Color,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            size: 5,
            antialiasing: true,
            primary: Color::WHITE,
            secondary: Color::BLACK,
        }
    }
}

impl PenState {
    /// Color bound to a logical button.
    pub fn color_for(&self, button: PenButton) -> Color {
        match button {
            PenButton::Primary => self.primary,
            PenButton::Secondary => self.secondary,
        }
    }
}

/// The logical button a pointer event acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PenButton {
    Primary,   // left click
    Secondary, // right click
}

/// Mouse buttons held during a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl Buttons {
    pub const NONE: Buttons = Buttons { left: false, right: false, middle: false };
    pub const LEFT: Buttons = Buttons { left: true, right: false, middle: false };
    pub const RIGHT: Buttons = Buttons { left: false, right: true, middle: false };

    pub fn is_empty(self) -> bool {
        !(self.left || self.right || self.middle)
    }

    /// Exactly-one-button match: left alone paints primary, right alone paints secondary.
    /// Chords and the middle button resolve to nothing.
    pub fn resolve(self) -> Option<PenButton> {
        match self {
            Buttons::LEFT => Some(PenButton::Primary),
            Buttons::RIGHT => Some(PenButton::Secondary),
            _ => None,
        }
    }
}
