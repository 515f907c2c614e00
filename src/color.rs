//! 16-color palette and packed `ColorPair` byte.

use crate::error::{Result, TuiError};

/// One of the 16 standard terminal colors (8 standard + 8 bright).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    /// Black (0).
    Black = 0,
    /// Red (1).
    Red = 1,
    /// Green (2).
    Green = 2,
    /// Yellow (3).
    Yellow = 3,
    /// Blue (4).
    Blue = 4,
    /// Magenta (5).
    Magenta = 5,
    /// Cyan (6).
    Cyan = 6,
    /// White (7).
    White = 7,
    /// Bright black / dark gray (8).
    BrightBlack = 8,
    /// Bright red (9).
    BrightRed = 9,
    /// Bright green (10).
    BrightGreen = 10,
    /// Bright yellow (11).
    BrightYellow = 11,
    /// Bright blue (12).
    BrightBlue = 12,
    /// Bright magenta (13).
    BrightMagenta = 13,
    /// Bright cyan (14).
    BrightCyan = 14,
    /// Bright white (15).
    BrightWhite = 15,
}

impl Color {
    /// All sixteen palette values, in index order.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::BrightBlack,
        Color::BrightRed,
        Color::BrightGreen,
        Color::BrightYellow,
        Color::BrightBlue,
        Color::BrightMagenta,
        Color::BrightCyan,
        Color::BrightWhite,
    ];

    /// The palette index, `0..16`.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Reconstruct a `Color` from its palette index. Values `>= 16` are
    /// out of range.
    pub fn from_index(idx: u8) -> Result<Self> {
        Self::ALL
            .get(idx as usize)
            .copied()
            .ok_or_else(|| TuiError::OutOfRange(format!("color index {idx} out of range")))
    }

    /// The SGR foreground parameter for this color (30-37, 90-97).
    const fn sgr_fg(self) -> u16 {
        let i = self.index();
        if i < 8 { 30 + i as u16 } else { 90 + (i - 8) as u16 }
    }

    /// The SGR background parameter for this color (40-47, 100-107).
    const fn sgr_bg(self) -> u16 {
        let i = self.index();
        if i < 8 { 40 + i as u16 } else { 100 + (i - 8) as u16 }
    }
}

/// A byte packing a foreground and background [`Color`]: high nibble is
/// foreground, low nibble is background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorPair(u8);

impl ColorPair {
    /// The default pair: bright white on black.
    pub const DEFAULT: ColorPair = ColorPair::pack_const(Color::BrightWhite, Color::Black);

    const fn pack_const(fg: Color, bg: Color) -> Self {
        Self(((fg.index()) << 4) | (bg.index() & 0x0F))
    }

    /// Pack a foreground/background pair into one byte.
    pub const fn pack(fg: Color, bg: Color) -> Self {
        Self::pack_const(fg, bg)
    }

    /// Unpack into `(fg, bg)`. Never fails: both nibbles are always
    /// in `0..16`.
    pub fn unpack(self) -> (Color, Color) {
        let fg = Color::ALL[(self.0 >> 4) as usize];
        let bg = Color::ALL[(self.0 & 0x0F) as usize];
        (fg, bg)
    }

    /// The raw packed byte.
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Foreground color.
    pub fn fg(self) -> Color {
        self.unpack().0
    }

    /// Background color.
    pub fn bg(self) -> Color {
        self.unpack().1
    }

    /// The three-digit SGR code (`ESC[{code}m`) that sets this pair's
    /// foreground.
    pub(crate) fn fg_sgr(self) -> u16 {
        self.fg().sgr_fg()
    }

    /// The three-digit SGR code that sets this pair's background.
    pub(crate) fn bg_sgr(self) -> u16 {
        self.bg().sgr_bg()
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_roundtrip_all_pairs() {
        for &fg in &Color::ALL {
            for &bg in &Color::ALL {
                let packed = ColorPair::pack(fg, bg);
                assert_eq!(packed.unpack(), (fg, bg));
            }
        }
    }

    #[test]
    fn default_is_bright_white_on_black() {
        assert_eq!(ColorPair::default().unpack(), (Color::BrightWhite, Color::Black));
    }

    #[test]
    fn from_index_out_of_range() {
        assert!(Color::from_index(16).is_err());
        assert!(Color::from_index(255).is_err());
    }

    #[test]
    fn from_index_roundtrips() {
        for &c in &Color::ALL {
            assert_eq!(Color::from_index(c.index()).unwrap(), c);
        }
    }

    #[test]
    fn sgr_codes_standard_and_bright() {
        assert_eq!(Color::Red.sgr_fg(), 31);
        assert_eq!(Color::Red.sgr_bg(), 41);
        assert_eq!(Color::BrightRed.sgr_fg(), 91);
        assert_eq!(Color::BrightRed.sgr_bg(), 101);
    }

    proptest::proptest! {
        #[test]
        fn pack_unpack_roundtrips_for_any_index_pair(fg_idx in 0u8..16, bg_idx in 0u8..16) {
            let fg = Color::ALL[fg_idx as usize];
            let bg = Color::ALL[bg_idx as usize];
            let packed = ColorPair::pack(fg, bg);
            proptest::prop_assert_eq!(packed.unpack(), (fg, bg));
        }

        #[test]
        fn sgr_codes_stay_in_valid_ansi_ranges(idx in 0u8..16) {
            let c = Color::ALL[idx as usize];
            proptest::prop_assert!((30..=37).contains(&c.sgr_fg()) || (90..=97).contains(&c.sgr_fg()));
            proptest::prop_assert!((40..=47).contains(&c.sgr_bg()) || (100..=107).contains(&c.sgr_bg()));
        }
    }
}
