//! Checkbox and radio toggle (spec §4.7): a single flavor flag selects
//! between the two bracket/glyph pairs; both toggle on the submit key.

use crate::geometry::Offset;
use crate::image::Image;
use crate::keyboard::KeyCode;
use crate::theme::{CharSlot, PixelSlot, Theme};

/// Which glyphs a toggle control renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavor {
    /// `[ ]` / `[x]`, independent toggle.
    Checkbox,
    /// `( )` / `(o)`, meant to be grouped so only one in a set is checked;
    /// the group exclusivity itself is the caller's responsibility (the
    /// widget only tracks its own boolean).
    Radio,
}

/// A checkbox or radio button's widget-specific state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckboxData {
    label: String,
    checked: bool,
    flavor: Flavor,
    reverse: bool,
}

impl CheckboxData {
    /// Create a new toggle with the given label and flavor, unchecked.
    pub fn new(label: impl Into<String>, flavor: Flavor) -> Self {
        Self { label: label.into(), checked: false, flavor, reverse: false }
    }

    /// Place the box to the right of the label instead of the left.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// `true` if the box renders to the right of the label.
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Current checked state.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state directly (e.g. to enforce radio-group
    /// exclusivity from the caller).
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// The toggle's flavor.
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// The toggle's label text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Toggle `data.checked` on a submit-key `KeyUp`. Returns `true` if the
/// checked state changed.
pub fn handle_key(data: &mut CheckboxData, code: KeyCode, down: bool) -> bool {
    if !code.is_submit() || down {
        return false;
    }
    data.checked = !data.checked;
    true
}

/// Redraw `image`: `[x] label` or `(o) label` depending on flavor/state.
pub fn refresh(data: &CheckboxData, image: &mut Image, theme: &Theme, focused: bool) {
    image.clear();
    let text_color = if focused { theme.pixel(PixelSlot::FocusedText) } else { theme.pixel(PixelSlot::NormalText) };

    let (left, right, unchecked, checked) = match data.flavor {
        Flavor::Checkbox => (
            theme.char(CharSlot::CheckboxLeft),
            theme.char(CharSlot::CheckboxRight),
            theme.char(CharSlot::CheckboxUnchecked),
            theme.char(CharSlot::CheckboxChecked),
        ),
        Flavor::Radio => (
            theme.char(CharSlot::RadioLeft),
            theme.char(CharSlot::RadioRight),
            theme.char(CharSlot::RadioUnchecked),
            theme.char(CharSlot::RadioChecked),
        ),
    };
    let mark = if data.checked { checked } else { unchecked };

    let box_x = if data.reverse { (image.extent().w as i32 - 3).max(0) } else { 0 };
    let _ = image.set(Offset::new(box_x, 0), crate::pixel::Pixel { char: left, color: text_color });
    let _ = image.set(Offset::new(box_x + 1, 0), crate::pixel::Pixel { char: mark, color: text_color });
    let _ = image.set(Offset::new(box_x + 2, 0), crate::pixel::Pixel { char: right, color: text_color });
    let label_x = if data.reverse { 0 } else { 4 };
    image.draw_string(Offset::new(label_x, 0), &data.label, text_color);
}
