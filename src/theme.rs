//! `Theme`: indexed glyph and color palettes shared by every widget.
//!
//! Supplemented from the original (not present in the distilled spec):
//! widgets need *some* way to pick characters and colors for scrollbars,
//! checkboxes, and state-dependent fills, and the source keeps those in
//! two small indexed tables rather than per-widget fields. Built the same
//! way the teacher's `Style` is: a `Default` plus chained `#[must_use]`
//! builder setters (see `saorsa-tui`'s `Style::reverse`/`ProgressBar::with_*`).

use crate::color::{Color, ColorPair};

/// Indexes into [`Theme`]'s character palette (17 slots).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum CharSlot {
    /// Fill character for an empty/background cell.
    Empty = 0,
    /// Vertical scrollbar track.
    ScrollVArea,
    /// Horizontal scrollbar track.
    ScrollHArea,
    /// Vertical scrollbar thumb.
    ScrollVBar,
    /// Horizontal scrollbar thumb.
    ScrollHBar,
    /// Up arrow glyph.
    ArrowUp,
    /// Down arrow glyph.
    ArrowDown,
    /// Left arrow glyph.
    ArrowLeft,
    /// Right arrow glyph.
    ArrowRight,
    /// Unchecked checkbox box.
    CheckboxUnchecked,
    /// Checked checkbox box.
    CheckboxChecked,
    /// Checkbox box's left bracket.
    CheckboxLeft,
    /// Checkbox box's right bracket.
    CheckboxRight,
    /// Unchecked radio dot.
    RadioUnchecked,
    /// Checked radio dot.
    RadioChecked,
    /// Radio box's left paren.
    RadioLeft,
    /// Radio box's right paren.
    RadioRight,
}

const CHAR_SLOT_COUNT: usize = 17;

/// Indexes into [`Theme`]'s color palette (19 slots).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PixelSlot {
    /// Default, unfocused appearance.
    Normal = 0,
    /// Focused but not active.
    Focused,
    /// Focused and active (mid-interaction).
    Active,
    /// Hovered (reserved; no mouse input exists yet but widgets may use
    /// this for a keyboard-driven "current item" highlight).
    Hovered,
    /// Selected row/item, normal.
    SelectedNormal,
    /// Selected row/item, focused.
    SelectedFocused,
    /// Selected row/item, active.
    SelectedActive,
    /// Selected row/item, hovered.
    SelectedHovered,
    /// Text color over the normal background.
    NormalText,
    /// Text color over the focused background.
    FocusedText,
    /// Scroll track, normal.
    ScrollAreaNormal,
    /// Scroll track, focused.
    ScrollAreaFocused,
    /// Scroll track, active.
    ScrollAreaActive,
    /// Scroll thumb, normal.
    ScrollBarNormal,
    /// Scroll thumb, focused.
    ScrollBarFocused,
    /// Scroll thumb, active.
    ScrollBarActive,
    /// Text-input cursor cell.
    Cursor,
    /// Progress bar fill.
    ProgressBar,
    /// Window background.
    Background,
}

const PIXEL_SLOT_COUNT: usize = 19;

/// A theme: a fixed-size character palette and a fixed-size color
/// palette, indexed by [`CharSlot`]/[`PixelSlot`]. Widgets never hard-code
/// glyphs or colors; they look them up here so swapping a `Theme` restyles
/// every control at once.
#[derive(Clone, Debug)]
pub struct Theme {
    chars: [u8; CHAR_SLOT_COUNT],
    pixels: [ColorPair; PIXEL_SLOT_COUNT],
}

impl Theme {
    /// The character for `slot`.
    pub fn char(&self, slot: CharSlot) -> u8 {
        self.chars[slot as usize]
    }

    /// The color pair for `slot`.
    pub fn pixel(&self, slot: PixelSlot) -> ColorPair {
        self.pixels[slot as usize]
    }

    /// Set a single character slot, returning `self` for chaining.
    #[must_use]
    pub fn with_char(mut self, slot: CharSlot, ch: u8) -> Self {
        self.chars[slot as usize] = ch;
        self
    }

    /// Set a single color slot, returning `self` for chaining.
    #[must_use]
    pub fn with_pixel(mut self, slot: PixelSlot, pair: ColorPair) -> Self {
        self.pixels[slot as usize] = pair;
        self
    }
}

impl Default for Theme {
    /// An ASCII-only default theme (no box-drawing/Unicode glyphs, per the
    /// toolkit's ASCII-byte Non-goal).
    fn default() -> Self {
        let mut chars = [b' '; CHAR_SLOT_COUNT];
        chars[CharSlot::Empty as usize] = b' ';
        chars[CharSlot::ScrollVArea as usize] = b'|';
        chars[CharSlot::ScrollHArea as usize] = b'-';
        chars[CharSlot::ScrollVBar as usize] = b'#';
        chars[CharSlot::ScrollHBar as usize] = b'#';
        chars[CharSlot::ArrowUp as usize] = b'^';
        chars[CharSlot::ArrowDown as usize] = b'v';
        chars[CharSlot::ArrowLeft as usize] = b'<';
        chars[CharSlot::ArrowRight as usize] = b'>';
        chars[CharSlot::CheckboxUnchecked as usize] = b' ';
        chars[CharSlot::CheckboxChecked as usize] = b'x';
        chars[CharSlot::CheckboxLeft as usize] = b'[';
        chars[CharSlot::CheckboxRight as usize] = b']';
        chars[CharSlot::RadioUnchecked as usize] = b' ';
        chars[CharSlot::RadioChecked as usize] = b'o';
        chars[CharSlot::RadioLeft as usize] = b'(';
        chars[CharSlot::RadioRight as usize] = b')';

        let default_pair = ColorPair::pack(Color::BrightWhite, Color::Black);
        let mut pixels = [default_pair; PIXEL_SLOT_COUNT];
        pixels[PixelSlot::Normal as usize] = ColorPair::pack(Color::White, Color::Black);
        pixels[PixelSlot::Focused as usize] = ColorPair::pack(Color::BrightWhite, Color::Blue);
        pixels[PixelSlot::Active as usize] = ColorPair::pack(Color::Black, Color::BrightWhite);
        pixels[PixelSlot::Hovered as usize] = ColorPair::pack(Color::BrightWhite, Color::Cyan);
        pixels[PixelSlot::SelectedNormal as usize] = ColorPair::pack(Color::Black, Color::White);
        pixels[PixelSlot::SelectedFocused as usize] = ColorPair::pack(Color::BrightWhite, Color::Blue);
        pixels[PixelSlot::SelectedActive as usize] = ColorPair::pack(Color::Black, Color::BrightWhite);
        pixels[PixelSlot::SelectedHovered as usize] = ColorPair::pack(Color::Black, Color::Cyan);
        pixels[PixelSlot::NormalText as usize] = ColorPair::pack(Color::White, Color::Black);
        pixels[PixelSlot::FocusedText as usize] = ColorPair::pack(Color::BrightWhite, Color::Blue);
        pixels[PixelSlot::ScrollAreaNormal as usize] = ColorPair::pack(Color::BrightBlack, Color::Black);
        pixels[PixelSlot::ScrollAreaFocused as usize] = ColorPair::pack(Color::BrightBlack, Color::Blue);
        pixels[PixelSlot::ScrollAreaActive as usize] = ColorPair::pack(Color::BrightBlack, Color::BrightWhite);
        pixels[PixelSlot::ScrollBarNormal as usize] = ColorPair::pack(Color::White, Color::Black);
        pixels[PixelSlot::ScrollBarFocused as usize] = ColorPair::pack(Color::BrightWhite, Color::Blue);
        pixels[PixelSlot::ScrollBarActive as usize] = ColorPair::pack(Color::Black, Color::BrightWhite);
        pixels[PixelSlot::Cursor as usize] = ColorPair::pack(Color::Black, Color::BrightWhite);
        pixels[PixelSlot::ProgressBar as usize] = ColorPair::pack(Color::BrightGreen, Color::Black);
        pixels[PixelSlot::Background as usize] = ColorPair::pack(Color::White, Color::Black);

        Self { chars, pixels }
    }
}
