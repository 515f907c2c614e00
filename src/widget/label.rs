//! Plain text display (spec §4.7): wrapped, aligned, no input handling.

use crate::geometry::Offset;
use crate::image::Image;
use crate::theme::{PixelSlot, Theme};
use crate::wrap;

/// Horizontal placement of each wrapped line within the label's width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Flush against the left edge (the default).
    #[default]
    Left,
    /// Centered within the available width.
    Center,
    /// Flush against the right edge.
    Right,
}

/// A label's widget-specific state: its text content and alignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelData {
    text: String,
    alignment: Alignment,
}

impl LabelData {
    /// Create a label with the given text, left-aligned.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), alignment: Alignment::Left }
    }

    /// The label's current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The label's current alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Replace the label's text. Callers own marking the owning control
    /// dirty afterward.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replace the label's alignment. Callers own marking the owning
    /// control dirty afterward.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }
}

/// Redraw `image`: `data`'s text word-wrapped to the image's width, each
/// line placed per `data.alignment`, using the theme's normal-text color.
pub fn refresh(data: &LabelData, image: &mut Image, theme: &Theme) {
    image.clear();
    let width = image.extent().w as usize;
    if width == 0 {
        return;
    }
    let color = theme.pixel(PixelSlot::NormalText);
    let bytes: Vec<u8> = data.text.bytes().map(wrap::safe_byte_or_newline).collect();
    let lines = wrap::wrap(&bytes, width);

    for (row, line) in lines.iter().enumerate() {
        let text = String::from_utf8_lossy(&bytes[line.start..line.end]).into_owned();
        let x = match data.alignment {
            Alignment::Left => 0,
            Alignment::Center => width.saturating_sub(text.len()) / 2,
            Alignment::Right => width.saturating_sub(text.len()),
        };
        image.draw_string(Offset::new(x as i32, row as i32), &text, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;

    #[test]
    fn refresh_draws_text() {
        let data = LabelData::new("hi");
        let mut image = Image::new(Extent::new(5, 1));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme);
        assert_eq!(image.get(Offset::new(0, 0)).char, b'h');
        assert_eq!(image.get(Offset::new(1, 0)).char, b'i');
        assert_eq!(image.get(Offset::new(2, 0)).char, b' ');
    }

    #[test]
    fn set_text_replaces_content() {
        let mut data = LabelData::new("old");
        data.set_text("new");
        assert_eq!(data.text(), "new");
    }

    #[test]
    fn wraps_across_multiple_rows() {
        let data = LabelData::new("the quick brown fox");
        let mut image = Image::new(Extent::new(10, 2));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme);
        assert_eq!(image.get(Offset::new(0, 0)).char, b't');
        assert_eq!(image.get(Offset::new(0, 1)).char, b'b');
    }

    #[test]
    fn center_alignment_pads_both_sides() {
        let mut data = LabelData::new("hi");
        data.set_alignment(Alignment::Center);
        let mut image = Image::new(Extent::new(6, 1));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme);
        assert_eq!(image.get(Offset::new(2, 0)).char, b'h');
    }

    #[test]
    fn right_alignment_flushes_to_edge() {
        let mut data = LabelData::new("hi");
        data.set_alignment(Alignment::Right);
        let mut image = Image::new(Extent::new(5, 1));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme);
        assert_eq!(image.get(Offset::new(3, 0)).char, b'h');
        assert_eq!(image.get(Offset::new(4, 0)).char, b'i');
    }
}
