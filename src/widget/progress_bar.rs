//! Read-only progress indicator. Grounded in the teacher's
//! `ProgressBar` (determinate-only here: the source's indeterminate wave
//! mode has no counterpart in this toolkit's component table and is
//! dropped, not carried as dead weight).

use crate::geometry::Offset;
use crate::image::Image;
use crate::theme::{PixelSlot, Theme};

/// Which edge of the control rect a progress bar fills from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Fills left to right (the default).
    #[default]
    LeftToRight,
    /// Fills right to left.
    RightToLeft,
    /// Fills top to bottom.
    TopToBottom,
    /// Fills bottom to top.
    BottomToTop,
}

/// A progress bar's widget-specific state: a single `0.0..=1.0` fraction
/// and the fill direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBarData {
    progress: f32,
    direction: Direction,
}

impl ProgressBarData {
    /// Create a progress bar at `progress`, clamped to `0.0..=1.0`, filling
    /// left to right.
    pub fn new(progress: f32) -> Self {
        Self { progress: progress.clamp(0.0, 1.0), direction: Direction::LeftToRight }
    }

    /// Set the fill direction, returning `self` for chaining.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// The current progress fraction.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The fill direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Set the progress fraction, clamped to `0.0..=1.0`.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }
}

impl Default for ProgressBarData {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Redraw `image`: a filled/empty bar along `data.direction`, with a
/// centered percentage label drawn over the top when the bar is
/// horizontal (a vertical bar has no room for a readable label and omits
/// it).
pub fn refresh(data: &ProgressBarData, image: &mut Image, theme: &Theme) {
    image.clear();
    let extent = image.extent();
    let w = extent.w as usize;
    let h = extent.h as usize;
    if w == 0 || h == 0 {
        return;
    }
    let fill_color = theme.pixel(PixelSlot::ProgressBar);
    let empty_color = theme.pixel(PixelSlot::Background);

    match data.direction {
        Direction::LeftToRight | Direction::RightToLeft => {
            let filled = ((data.progress * w as f32).round() as usize).min(w);
            for row in 0..h {
                for x in 0..w {
                    let is_filled = match data.direction {
                        Direction::LeftToRight => x < filled,
                        _ => x >= w - filled,
                    };
                    let (ch, color) = if is_filled { (b'#', fill_color) } else { (b'.', empty_color) };
                    let _ = image.set(Offset::new(x as i32, row as i32), crate::pixel::Pixel { char: ch, color });
                }
            }
            let pct = (data.progress * 100.0).round() as u32;
            let label = format!("{pct}%");
            let start = w.saturating_sub(label.len()) / 2;
            image.draw_string(Offset::new(start as i32, h as i32 / 2), &label, theme.pixel(PixelSlot::NormalText));
        }
        Direction::TopToBottom | Direction::BottomToTop => {
            let filled = ((data.progress * h as f32).round() as usize).min(h);
            for row in 0..h {
                let is_filled = match data.direction {
                    Direction::TopToBottom => row < filled,
                    _ => row >= h - filled,
                };
                let (ch, color) = if is_filled { (b'#', fill_color) } else { (b'.', empty_color) };
                for x in 0..w {
                    let _ = image.set(Offset::new(x as i32, row as i32), crate::pixel::Pixel { char: ch, color });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;

    #[test]
    fn progress_clamped_on_construction() {
        assert_eq!(ProgressBarData::new(2.0).progress(), 1.0);
        assert_eq!(ProgressBarData::new(-1.0).progress(), 0.0);
    }

    #[test]
    fn set_progress_clamps() {
        let mut data = ProgressBarData::new(0.0);
        data.set_progress(5.0);
        assert_eq!(data.progress(), 1.0);
    }

    #[test]
    fn refresh_fills_proportionally() {
        let data = ProgressBarData::new(0.5);
        let mut image = Image::new(Extent::new(10, 1));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme);
        // Columns 0..2 sit left of the centered "50%" label and stay filled.
        assert_eq!(image.get(Offset::new(0, 0)).char, b'#');
        assert_eq!(image.get(Offset::new(2, 0)).char, b'#');
    }

    #[test]
    fn vertical_direction_fills_from_bottom() {
        let data = ProgressBarData::new(0.5).with_direction(Direction::BottomToTop);
        let mut image = Image::new(Extent::new(4, 10));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme);
        assert_eq!(image.get(Offset::new(0, 9)).char, b'#');
        assert_eq!(image.get(Offset::new(0, 0)).char, b'.');
    }

    #[test]
    fn refresh_zero_width_does_not_panic() {
        let data = ProgressBarData::new(0.5);
        let mut image = Image::new(Extent::new(0, 1));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme);
    }
}
