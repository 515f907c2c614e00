//! `Surface` — an [`Image`] plus its cached ANSI-encoded output.

use crate::error::Result;
use crate::geometry::Extent;
use crate::image::Image;
use crate::pixel::Pixel;

const ESC: u8 = 0x1b;
const RESET_SEQ: &str = "\x1b[000m";
const CURSOR_HOME: &str = "\x1b[H";

/// An [`Image`] plus a cached ANSI-encoded string rebuilt on demand.
///
/// `rendered_text` starts empty and is only ever rewritten by
/// [`Surface::refresh`] — callers decide when a repaint is worth the cost
/// (normally: when the compositor's per-tick dirty rect is non-empty).
pub struct Surface {
    image: Image,
    rendered_text: String,
}

impl Surface {
    /// Create a new surface of the given extent, with an empty cached
    /// render.
    pub fn new(extent: Extent) -> Self {
        Self {
            image: Image::new(extent),
            rendered_text: String::new(),
        }
    }

    /// The backing image.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The backing image, mutably — compositing writes through here.
    pub fn image_mut(&mut self) -> &mut Image {
        &mut self.image
    }

    /// The most recently built ANSI-encoded string. Empty until the first
    /// [`Surface::refresh`].
    pub fn rendered_text(&self) -> &str {
        &self.rendered_text
    }

    /// Rebuild `rendered_text` from the current image contents.
    ///
    /// Per §4.3: walk once to count fg/bg color changes, allocate a buffer
    /// sized for worst case (every pixel's char + one 6-byte ANSI sequence
    /// per color change + a final reset), then walk again emitting.
    pub fn refresh(&mut self) {
        let pixels: Vec<Pixel> = self.image.iter().collect();
        if pixels.is_empty() {
            self.rendered_text = RESET_SEQ.to_string();
            return;
        }

        let mut fg_changes = 0usize;
        let mut bg_changes = 0usize;
        let mut last_fg = pixels[0].color.fg();
        let mut last_bg = pixels[0].color.bg();
        fg_changes += 1; // first pixel always emits both
        bg_changes += 1;
        for p in &pixels[1..] {
            let (fg, bg) = p.color.unpack();
            if fg != last_fg {
                fg_changes += 1;
                last_fg = fg;
            }
            if bg != last_bg {
                bg_changes += 1;
                last_bg = bg;
            }
        }

        let capacity = pixels.len() + (fg_changes + bg_changes) * 6 + RESET_SEQ.len() + 1;
        let mut out = String::with_capacity(capacity);

        let mut emitted_fg: Option<u16> = None;
        let mut emitted_bg: Option<u16> = None;
        for p in &pixels {
            let fg_code = p.color.fg_sgr();
            let bg_code = p.color.bg_sgr();
            if emitted_fg != Some(fg_code) {
                push_sgr(&mut out, fg_code);
                emitted_fg = Some(fg_code);
            }
            if emitted_bg != Some(bg_code) {
                push_sgr(&mut out, bg_code);
                emitted_bg = Some(bg_code);
            }
            out.push(p.char as char);
        }
        out.push_str(RESET_SEQ);
        self.rendered_text = out;
    }

    /// Present the surface: write the cursor-home escape, the cached
    /// rendered text, and flush. Fails with
    /// [`crate::error::TuiError::PresentationFailed`] on write/flush
    /// errors.
    pub fn present(&self, write: &mut dyn std::io::Write) -> Result<()> {
        use crate::error::TuiError;
        write
            .write_all(CURSOR_HOME.as_bytes())
            .map_err(|e| TuiError::PresentationFailed(e.to_string()))?;
        write
            .write_all(self.rendered_text.as_bytes())
            .map_err(|e| TuiError::PresentationFailed(e.to_string()))?;
        write.flush().map_err(|e| TuiError::PresentationFailed(e.to_string()))?;
        Ok(())
    }

    /// Strip `ESC [ ddd m` sequences from a rendered string, leaving the
    /// row-major text grid. Used by tests and by [`Surface::text_only`].
    pub fn strip_ansi(s: &str) -> String {
        let bytes = s.as_bytes();
        let mut out = String::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == ESC && i + 1 < bytes.len() && bytes[i + 1] == b'[' {
                let mut j = i + 2;
                while j < bytes.len() && bytes[j] != b'm' {
                    j += 1;
                }
                i = j + 1; // skip past 'm'
            } else {
                out.push(bytes[i] as char);
                i += 1;
            }
        }
        out
    }

    /// The current rendered text with all ANSI sequences stripped.
    pub fn text_only(&self) -> String {
        Self::strip_ansi(&self.rendered_text)
    }

    /// Count of `ESC [ ddd m` sequences present in the rendered text.
    pub fn ansi_sequence_count(&self) -> usize {
        self.rendered_text.matches("\x1b[").count()
    }
}

fn push_sgr(out: &mut String, code: u16) {
    out.push('\x1b');
    out.push('[');
    out.push_str(&format!("{code:03}"));
    out.push('m');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, ColorPair};
    use crate::geometry::Offset;

    #[test]
    fn refresh_on_blank_image_has_one_reset() {
        let mut surf = Surface::new(Extent::new(3, 1));
        surf.refresh();
        // 2 sgr codes for the single run (fg + bg) + 1 reset = 3
        assert_eq!(surf.ansi_sequence_count(), 3);
    }

    #[test]
    fn text_matches_grid_row_major() {
        let mut surf = Surface::new(Extent::new(5, 1));
        surf.image_mut().draw_string(Offset::new(0, 0), "hello", ColorPair::default());
        surf.refresh();
        assert_eq!(surf.text_only(), "hello");
    }

    #[test]
    fn sequence_count_equals_changes_plus_one() {
        let mut surf = Surface::new(Extent::new(4, 1));
        surf.image_mut()
            .set(Offset::new(0, 0), Pixel { char: b'a', color: ColorPair::pack(Color::Red, Color::Black) })
            .unwrap();
        surf.image_mut()
            .set(Offset::new(1, 0), Pixel { char: b'b', color: ColorPair::pack(Color::Red, Color::Black) })
            .unwrap();
        surf.image_mut()
            .set(Offset::new(2, 0), Pixel { char: b'c', color: ColorPair::pack(Color::Blue, Color::Black) })
            .unwrap();
        surf.image_mut()
            .set(Offset::new(3, 0), Pixel { char: b'd', color: ColorPair::pack(Color::Blue, Color::Green) })
            .unwrap();
        surf.refresh();
        // fg changes: red(first) -> blue = 2; bg changes: black(first) -> green = 2
        // total = 4 + 1 reset = 5
        assert_eq!(surf.ansi_sequence_count(), 5);
        assert_eq!(surf.text_only(), "abcd");
    }

    #[test]
    fn strip_ansi_removes_sequences() {
        let s = "\x1b[031m\x1b[040mhi\x1b[0m";
        assert_eq!(Surface::strip_ansi(s), "hi");
    }

    #[test]
    fn label_then_resize_scenario() {
        // Spec §8 scenario 1: 10x1 label "hello" composed into a 20x1 window.
        let mut surf = Surface::new(Extent::new(20, 1));
        surf.image_mut().draw_string(Offset::new(0, 0), "hello", ColorPair::default());
        surf.refresh();
        let text = surf.text_only();
        assert!(text.starts_with("hello"));
        assert_eq!(text.len(), 20);
        assert!(text[5..].chars().all(|c| c == ' '));
        assert!(surf.rendered_text().ends_with(RESET_SEQ));
    }

    #[test]
    fn snapshot_uniform_color_row_ansi_bytes() {
        // "hello" drawn in the default color pair over a same-colored
        // background never changes fg/bg, so only the first pixel emits
        // SGR codes (bright white 97, black 40) before the trailing reset.
        let mut surf = Surface::new(Extent::new(5, 1));
        surf.image_mut().draw_string(Offset::new(0, 0), "hello", ColorPair::default());
        surf.refresh();
        insta::assert_snapshot!(surf.rendered_text(), @"\x1b[097m\x1b[040mhello\x1b[000m");
    }

    #[test]
    fn present_writes_home_then_text_then_flushes() {
        let mut surf = Surface::new(Extent::new(2, 1));
        surf.refresh();
        let mut buf = Vec::new();
        surf.present(&mut buf).unwrap();
        let written = String::from_utf8(buf).unwrap();
        assert!(written.starts_with(CURSOR_HOME));
        assert!(written.ends_with(RESET_SEQ));
    }
}
