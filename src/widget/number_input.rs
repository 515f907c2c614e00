//! Numeric stepper (named in the component table but not detailed
//! further upstream). Grounded on the same bounded-adjustment shape as
//! [`super::progress_bar`]'s clamped fraction and the teacher's
//! `ProgressBar::set_progress` — up/down keys nudge by a fixed step,
//! clamped to `[min, max]`.

use crate::geometry::Offset;
use crate::image::Image;
use crate::keyboard::KeyCode;
use crate::theme::{PixelSlot, Theme};

/// A number input's widget-specific state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberInputData {
    value: i64,
    min: i64,
    max: i64,
    step: i64,
}

impl NumberInputData {
    /// Create a stepper over `[min, max]`, starting at `value` (clamped),
    /// stepping by `step` per key press.
    pub fn new(value: i64, min: i64, max: i64, step: i64) -> Self {
        let step = step.max(1);
        Self { value: value.clamp(min, max), min, max, step }
    }

    /// The current value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Set the value directly, clamped to `[min, max]`.
    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Increase by one step, clamped to `max`.
    pub fn increment(&mut self) {
        self.set_value(self.value.saturating_add(self.step));
    }

    /// Decrease by one step, clamped to `min`.
    pub fn decrement(&mut self) {
        self.set_value(self.value.saturating_sub(self.step));
    }
}

/// Handle a key event. `Up`/`Right` increments, `Down`/`Left` decrements,
/// `Home`/`End` jump to the bounds. Returns `true` if handled.
pub fn handle_key(data: &mut NumberInputData, code: KeyCode) -> bool {
    match code {
        KeyCode::Up | KeyCode::Right => {
            data.increment();
            true
        }
        KeyCode::Down | KeyCode::Left => {
            data.decrement();
            true
        }
        KeyCode::Home => {
            data.set_value(data.min);
            true
        }
        KeyCode::End => {
            data.set_value(data.max);
            true
        }
        _ => false,
    }
}

/// Redraw `image`: `< value >` with arrows dimmed at either bound.
pub fn refresh(data: &NumberInputData, image: &mut Image, theme: &Theme, focused: bool) {
    use crate::theme::CharSlot;
    image.clear();
    let color = if focused { theme.pixel(PixelSlot::FocusedText) } else { theme.pixel(PixelSlot::NormalText) };
    let left = theme.char(CharSlot::ArrowLeft);
    let right = theme.char(CharSlot::ArrowRight);
    let label = data.value.to_string();

    let _ = image.set(Offset::new(0, 0), crate::pixel::Pixel { char: left, color });
    image.draw_string(Offset::new(2, 0), &label, color);
    let right_x = image.extent().w as i32 - 1;
    if right_x > 0 {
        let _ = image.set(Offset::new(right_x, 0), crate::pixel::Pixel { char: right, color });
    }
}
