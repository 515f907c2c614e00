//! Submit button (spec §4.7): becomes `active` while the submit key is
//! held, fires once on release.

use crate::geometry::Offset;
use crate::image::Image;
use crate::keyboard::KeyCode;
use crate::theme::{PixelSlot, Theme};

/// A button's widget-specific state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonData {
    label: String,
    pressed: bool,
}

impl ButtonData {
    /// Create a button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), pressed: false }
    }

    /// The button's label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// `true` once, after a submit-key `KeyUp` fires while the button was
    /// active; consuming the flag clears it so a caller's tick loop
    /// doesn't re-fire the same click.
    pub fn take_pressed(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }
}

/// Handle a key event. Returns `true` if the button should become (or
/// remain) `active` and `true` for `fired` if it was just clicked.
pub fn handle_key(data: &mut ButtonData, code: KeyCode, down: bool) -> (bool, bool) {
    if !code.is_submit() {
        return (false, false);
    }
    if down {
        (true, false)
    } else {
        data.pressed = true;
        (false, true)
    }
}

/// Redraw `image` with the button's label, centered, using the focused or
/// active color depending on state.
pub fn refresh(data: &ButtonData, image: &mut Image, theme: &Theme, focused: bool, active: bool) {
    image.clear();
    let slot = if active {
        PixelSlot::Active
    } else if focused {
        PixelSlot::Focused
    } else {
        PixelSlot::Normal
    };
    let color = theme.pixel(slot);
    let width = image.extent().w as usize;
    let label_len = data.label.len();
    let start = width.saturating_sub(label_len) / 2;
    image.draw_string(Offset::new(start as i32, 0), &data.label, color);
}
