//! Scrollable line list (spec §4.8): hover-driven active-mode navigation,
//! single/multi-select commit, paging, and a track/thumb scrollbar whose
//! thumb size reflects the visible fraction.

use crate::geometry::Offset;
use crate::image::Image;
use crate::keyboard::KeyCode;
use crate::theme::{CharSlot, PixelSlot, Theme};

/// How a list's scrollbar is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollbarKind {
    /// No scrollbar column at all; list still scrolls via keys.
    None,
    /// A track with no thumb — just a visual indicator that more content
    /// exists off-screen, not a position indicator.
    Static,
    /// A track with a thumb sized and positioned to reflect scroll
    /// position, like a conventional scrollbar.
    Dynamic,
}

/// What happened as a result of a key reaching an active list, for the
/// caller to translate into `onChange`/control-state transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOutcome {
    /// Became active; `hover` was synced to the current selection.
    Activated,
    /// Hover moved, or (in multiselect) a row's selected bit flipped.
    /// The widget stays active.
    Changed,
    /// Single-select commit (`selected_index = hover`); leaves active.
    Committed,
    /// Escape: leaves active, hover reverted to the last committed
    /// selection.
    Cancelled,
}

/// A list's widget-specific state.
#[derive(Clone, Debug, PartialEq)]
pub struct ListData {
    items: Vec<String>,
    selected: usize,
    hover: usize,
    multiselect: bool,
    selected_indices: Vec<bool>,
    scroll_offset: usize,
    scrollbar: ScrollbarKind,
}

impl ListData {
    /// Create a single-select list over `items` with the given scrollbar
    /// style. Selection starts at `0` (or is unset if `items` is empty).
    pub fn new(items: Vec<String>, scrollbar: ScrollbarKind) -> Self {
        let n = items.len();
        Self { items, selected: 0, hover: 0, multiselect: false, selected_indices: vec![false; n], scroll_offset: 0, scrollbar }
    }

    /// Create a multiselect list: Enter/Space while active toggles the
    /// hovered row's bit in `selected_indices` instead of committing a
    /// single selection.
    pub fn new_multiselect(items: Vec<String>, scrollbar: ScrollbarKind) -> Self {
        let mut data = Self::new(items, scrollbar);
        data.multiselect = true;
        data
    }

    /// The list's items.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The currently-committed single-select index, or `None` if the list
    /// is empty.
    pub fn selected(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected)
    }

    /// The row the cursor is currently hovering while active.
    pub fn hover(&self) -> usize {
        self.hover
    }

    /// `true` if this list toggles independent row bits instead of a
    /// single selection.
    pub fn is_multiselect(&self) -> bool {
        self.multiselect
    }

    /// The multiselect bitmap (empty/unused in single-select mode).
    pub fn selected_indices(&self) -> &[bool] {
        &self.selected_indices
    }

    /// The first visible item's index.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Reset `hover` to the current committed selection. Called on
    /// activation so navigation starts from the last known position.
    pub fn sync_hover_to_selection(&mut self) {
        self.hover = self.selected;
    }

    fn move_hover(&mut self, delta: i32, visible_height: usize) {
        if self.items.is_empty() {
            return;
        }
        let max = self.items.len() - 1;
        let new = (self.hover as i64 + delta as i64).clamp(0, max as i64) as usize;
        self.hover = new;
        self.clamp_scroll(visible_height);
    }

    fn page(&mut self, down: bool, visible_height: usize) {
        let delta = if down { visible_height as i32 } else { -(visible_height as i32) };
        self.move_hover(delta, visible_height);
    }

    fn clamp_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.hover < self.scroll_offset {
            self.scroll_offset = self.hover;
        } else if self.hover >= self.scroll_offset + visible_height {
            self.scroll_offset = self.hover + 1 - visible_height;
        }
        let max_offset = self.items.len().saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

/// Handle a key event. While not `active`, only a submit-key-down
/// activates (syncing `hover` to the current selection). While active,
/// navigation moves `hover`; Enter/Space commits (single-select) or
/// toggles the hovered bit (multiselect, staying active); Escape reverts
/// `hover` and leaves active.
pub fn handle_key(data: &mut ListData, code: KeyCode, down: bool, active: bool, visible_height: usize) -> (bool, Option<ListOutcome>) {
    if !active {
        if code.is_submit() && down {
            data.sync_hover_to_selection();
            return (true, Some(ListOutcome::Activated));
        }
        return (false, None);
    }
    if !down {
        return (false, None);
    }
    match code {
        KeyCode::Up | KeyCode::Char(b'w' | b'W') => {
            data.move_hover(-1, visible_height);
            (true, Some(ListOutcome::Changed))
        }
        KeyCode::Down | KeyCode::Char(b's' | b'S') => {
            data.move_hover(1, visible_height);
            (true, Some(ListOutcome::Changed))
        }
        KeyCode::PageUp => {
            data.page(false, visible_height);
            (true, Some(ListOutcome::Changed))
        }
        KeyCode::PageDown => {
            data.page(true, visible_height);
            (true, Some(ListOutcome::Changed))
        }
        KeyCode::Home => {
            data.move_hover(i32::MIN, visible_height);
            (true, Some(ListOutcome::Changed))
        }
        KeyCode::End => {
            data.move_hover(i32::MAX, visible_height);
            (true, Some(ListOutcome::Changed))
        }
        c if c.is_submit() => {
            if data.items.is_empty() {
                return (true, Some(ListOutcome::Committed));
            }
            if data.multiselect {
                let bit = &mut data.selected_indices[data.hover];
                *bit = !*bit;
                (true, Some(ListOutcome::Changed))
            } else {
                data.selected = data.hover;
                (true, Some(ListOutcome::Committed))
            }
        }
        KeyCode::Escape => {
            data.sync_hover_to_selection();
            (true, Some(ListOutcome::Cancelled))
        }
        _ => (false, None),
    }
}

/// The thumb's `(start_row, len_rows)` within a `track_height`-row
/// scrollbar, given `total_items` and `visible_height`. Used by both
/// [`refresh`] and the dropdown widget, which reuses this list's drawing
/// code for its open panel.
///
/// Mirrors the spec's literal formula: when the unseen tail
/// (`max_scroll = total_items - visible_height`) is itself shorter than
/// the visible window, the thumb grows to cover exactly the scrolled
/// distance (`visible_height - max_scroll` rows) and tracks `scroll`
/// directly; otherwise the thumb is a single row whose position is
/// `scroll` linearly mapped across `0..visible_height - 1`.
pub fn thumb_geometry(total_items: usize, visible_height: usize, scroll_offset: usize, track_height: usize) -> (usize, usize) {
    if total_items == 0 || visible_height == 0 || track_height == 0 || total_items <= visible_height {
        return (0, track_height);
    }
    let max_scroll = total_items - visible_height;
    let (len, start) = if max_scroll < visible_height {
        let len = visible_height - max_scroll;
        (len, scroll_offset)
    } else {
        let start = if visible_height <= 1 { 0 } else { (scroll_offset * (visible_height - 1)) / max_scroll };
        (1, start)
    };
    let len = len.min(track_height).max(1);
    let start = start.min(track_height - len);
    (start, len)
}

/// Redraw `image`: the visible window of items, the hovered/selected rows
/// highlighted, plus a scrollbar column if `data`'s kind isn't `None`.
pub fn refresh(data: &ListData, image: &mut Image, theme: &Theme, focused: bool, active: bool) {
    image.clear();
    let extent = image.extent();
    let width = extent.w as usize;
    let height = extent.h as usize;
    if width == 0 || height == 0 {
        return;
    }

    let show_scrollbar = match data.scrollbar {
        ScrollbarKind::None => false,
        ScrollbarKind::Static => true,
        ScrollbarKind::Dynamic => data.items.len() > height,
    };
    let text_width = if show_scrollbar { width.saturating_sub(1) } else { width };

    let normal = theme.pixel(PixelSlot::Normal);
    let selected_color = if active {
        theme.pixel(PixelSlot::SelectedActive)
    } else if focused {
        theme.pixel(PixelSlot::SelectedFocused)
    } else {
        theme.pixel(PixelSlot::SelectedNormal)
    };
    let hover_color = theme.pixel(PixelSlot::Hovered);

    for row in 0..height {
        let idx = data.scroll_offset + row;
        let Some(item) = data.items.get(idx) else { break };
        let is_selected = if data.multiselect {
            data.selected_indices.get(idx).copied().unwrap_or(false)
        } else {
            Some(idx) == data.selected()
        };
        let is_hovered = active && idx == data.hover;
        let color = if is_hovered && is_selected {
            selected_color
        } else if is_hovered {
            hover_color
        } else if is_selected {
            selected_color
        } else {
            normal
        };
        let truncated: String = item.chars().take(text_width).collect();
        image.draw_string(Offset::new(0, row as i32), &truncated, color);
        for x in truncated.len()..text_width {
            let _ = image.set(Offset::new(x as i32, row as i32), crate::pixel::Pixel { char: b' ', color });
        }
    }

    if show_scrollbar {
        let track_char = theme.char(CharSlot::ScrollVArea);
        let track_color = theme.pixel(PixelSlot::ScrollAreaNormal);
        let col = width as i32 - 1;
        for row in 0..height {
            let _ = image.set(Offset::new(col, row as i32), crate::pixel::Pixel { char: track_char, color: track_color });
        }
        if height >= 1 {
            let _ = image.set(Offset::new(col, 0), crate::pixel::Pixel { char: theme.char(CharSlot::ArrowUp), color: track_color });
        }
        if height >= 2 {
            let _ = image.set(Offset::new(col, height as i32 - 1), crate::pixel::Pixel { char: theme.char(CharSlot::ArrowDown), color: track_color });
        }
        if matches!(data.scrollbar, ScrollbarKind::Dynamic) {
            let (start, len) = thumb_geometry(data.items.len(), height, data.scroll_offset, height);
            let bar_char = theme.char(CharSlot::ScrollVBar);
            let bar_color = theme.pixel(PixelSlot::ScrollBarNormal);
            for row in start..(start + len).min(height) {
                let _ = image.set(Offset::new(col, row as i32), crate::pixel::Pixel { char: bar_char, color: bar_color });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item{i}")).collect()
    }

    #[test]
    fn inactive_only_activates_on_submit_down() {
        let mut data = ListData::new(items(5), ScrollbarKind::None);
        let (handled, outcome) = handle_key(&mut data, KeyCode::Down, true, false, 3);
        assert!(!handled);
        assert_eq!(outcome, None);
        let (handled, outcome) = handle_key(&mut data, KeyCode::Enter, true, false, 3);
        assert!(handled);
        assert_eq!(outcome, Some(ListOutcome::Activated));
    }

    #[test]
    fn hover_moves_independently_of_selection_until_commit() {
        let mut data = ListData::new(items(5), ScrollbarKind::None);
        handle_key(&mut data, KeyCode::Enter, true, false, 3);
        handle_key(&mut data, KeyCode::Down, true, true, 3);
        handle_key(&mut data, KeyCode::Down, true, true, 3);
        assert_eq!(data.hover(), 2);
        assert_eq!(data.selected(), Some(0));
        let (_, outcome) = handle_key(&mut data, KeyCode::Enter, true, true, 3);
        assert_eq!(outcome, Some(ListOutcome::Committed));
        assert_eq!(data.selected(), Some(2));
    }

    #[test]
    fn escape_reverts_hover_and_leaves_active() {
        let mut data = ListData::new(items(5), ScrollbarKind::None);
        handle_key(&mut data, KeyCode::Enter, true, false, 3);
        handle_key(&mut data, KeyCode::Down, true, true, 3);
        let (handled, outcome) = handle_key(&mut data, KeyCode::Escape, true, true, 3);
        assert!(handled);
        assert_eq!(outcome, Some(ListOutcome::Cancelled));
        assert_eq!(data.hover(), 0);
    }

    #[test]
    fn multiselect_toggles_bit_and_stays_active() {
        let mut data = ListData::new_multiselect(items(3), ScrollbarKind::None);
        handle_key(&mut data, KeyCode::Enter, true, false, 3);
        handle_key(&mut data, KeyCode::Down, true, true, 3);
        let (_, outcome) = handle_key(&mut data, KeyCode::Enter, true, true, 3);
        assert_eq!(outcome, Some(ListOutcome::Changed));
        assert_eq!(data.selected_indices(), &[false, true, false]);
    }

    #[test]
    fn hover_clamps_to_range() {
        let mut data = ListData::new(items(3), ScrollbarKind::None);
        data.hover = 0;
        data.move_hover(-5, 2);
        assert_eq!(data.hover(), 0);
        data.move_hover(10, 2);
        assert_eq!(data.hover(), 2);
    }

    #[test]
    fn scroll_follows_hover_downward() {
        let mut data = ListData::new(items(10), ScrollbarKind::None);
        data.move_hover(5, 3);
        assert_eq!(data.hover(), 5);
        assert_eq!(data.scroll_offset(), 3);
    }

    #[test]
    fn scroll_follows_hover_upward() {
        let mut data = ListData::new(items(10), ScrollbarKind::None);
        data.move_hover(7, 3);
        data.move_hover(-7, 3);
        assert_eq!(data.scroll_offset(), 0);
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut data = ListData::new(Vec::new(), ScrollbarKind::None);
        assert_eq!(data.selected(), None);
        data.move_hover(1, 5); // must not panic
    }

    #[test]
    fn thumb_is_single_row_when_max_scroll_exceeds_visible_height() {
        // max_scroll (90) >= visible_height (10): spec's single-row branch.
        let (start, len) = thumb_geometry(100, 10, 0, 20);
        assert_eq!(start, 0);
        assert_eq!(len, 1);

        let (start, _) = thumb_geometry(100, 10, 90, 20);
        assert_eq!(start, 9); // scroll * (visible_height - 1) / max_scroll = 90*9/90
    }

    #[test]
    fn thumb_grows_when_max_scroll_is_shorter_than_visible_height() {
        // total_items=12, visible_height=10 -> max_scroll=2 < visible_height,
        // so thumb size = 10 - 2 = 8 and thumb offset tracks scroll directly.
        let (start, len) = thumb_geometry(12, 10, 1, 10);
        assert_eq!(len, 8);
        assert_eq!(start, 1);
    }

    #[test]
    fn thumb_fills_track_when_content_fits() {
        let (start, len) = thumb_geometry(5, 10, 0, 10);
        assert_eq!(start, 0);
        assert_eq!(len, 10);
    }

    #[test]
    fn visible_height_one_boundary() {
        // Decided open question: with a single visible row, the thumb is
        // still at least one row tall and clamps to the track.
        let (_, len) = thumb_geometry(50, 1, 0, 1);
        assert_eq!(len, 1);
    }

    #[test]
    fn dynamic_scrollbar_hidden_when_items_fit() {
        let data = ListData::new(items(3), ScrollbarKind::Dynamic);
        let mut image = Image::new(Extent::new(10, 5));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme, true, false);
        // With only 3 items in a 5-row window, the rightmost column must be
        // ordinary list text, not a scrollbar track.
        assert_eq!(image.get(Offset::new(9, 0)).char, b' ');
    }

    #[test]
    fn dynamic_scrollbar_shown_when_items_overflow() {
        let data = ListData::new(items(20), ScrollbarKind::Dynamic);
        let mut image = Image::new(Extent::new(10, 5));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme, true, false);
        assert_eq!(image.get(Offset::new(9, 0)).char, theme.char(CharSlot::ArrowUp));
    }

    #[test]
    fn static_scrollbar_always_shown() {
        let data = ListData::new(items(3), ScrollbarKind::Static);
        let mut image = Image::new(Extent::new(10, 5));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme, true, false);
        assert_eq!(image.get(Offset::new(9, 0)).char, theme.char(CharSlot::ArrowUp));
    }

    #[test]
    fn refresh_highlights_selection() {
        let data = ListData::new(items(3), ScrollbarKind::None);
        let mut image = Image::new(Extent::new(10, 3));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme, true, false);
        assert_eq!(image.get(Offset::new(0, 0)).char, b'i');
    }

    #[test]
    fn handle_key_page_down() {
        let mut data = ListData::new(items(20), ScrollbarKind::None);
        handle_key(&mut data, KeyCode::Enter, true, false, 5);
        let (handled, _) = handle_key(&mut data, KeyCode::PageDown, true, true, 5);
        assert!(handled);
        assert_eq!(data.hover(), 5);
    }
}
