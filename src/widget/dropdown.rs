//! Collapsed list with a drop-down/drop-up panel (spec §4.9). The open
//! panel reuses [`super::list`]'s hover/selection and drawing logic
//! directly — a dropdown is a list that only shows one row until
//! activated. `active` is read from the owning [`crate::control::Control`]
//! rather than duplicated here; there is no separate `open` flag to drift
//! out of sync with it.

use crate::geometry::Offset;
use crate::image::Image;
use crate::keyboard::KeyCode;
use crate::theme::{CharSlot, PixelSlot, Theme};
use crate::widget::list::{self, ListData, ListOutcome, ScrollbarKind};

/// What happened as a result of a key reaching a dropdown, for the caller
/// to translate into control-state transitions and (on commit/cancel)
/// restoring the panel's transform geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownOutcome {
    /// Became active; the panel should expand.
    Activated,
    /// Hover moved within the open panel; stays active.
    Changed,
    /// Enter: `selected = hover`; the panel should collapse.
    Committed,
    /// Escape: hover reverted; the panel should collapse.
    Cancelled,
}

/// A dropdown's widget-specific state: an inner single-select list plus
/// the resolved drop direction and the panel's row count when expanded.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownData {
    list: ListData,
    drop_up: bool,
    panel_rows: u32,
}

impl DropdownData {
    /// Create a closed dropdown over `items`, expanding to at most
    /// `panel_rows` rows (clamped to `items.len()` when drawn).
    pub fn new(items: Vec<String>, panel_rows: u32) -> Self {
        Self { list: ListData::new(items, ScrollbarKind::Dynamic), drop_up: false, panel_rows }
    }

    /// The currently-selected item index.
    pub fn selected(&self) -> Option<usize> {
        self.list.selected()
    }

    /// The selected item's text, if any.
    pub fn selected_text(&self) -> Option<&str> {
        self.selected().and_then(|i| self.list.items().get(i)).map(String::as_str)
    }

    /// The panel's row count when expanded (excludes the collapsed row).
    pub fn panel_height(&self) -> u32 {
        self.panel_rows.min(self.list.items().len().max(1) as u32)
    }

    /// Decide and set the drop direction: down if there's enough room
    /// below the control within `window_height` given the control's
    /// `row` position and `panel_height`, otherwise up (spec §8 end-to-end
    /// scenario 6).
    pub fn resolve_drop_direction(&mut self, row: i32, window_height: u32, panel_height: u32) {
        let space_below = (window_height as i32 - row - 1).max(0) as u32;
        self.drop_up = space_below < panel_height && row as u32 >= panel_height;
    }

    /// `true` if the panel should render above the collapsed row.
    pub fn drop_up(&self) -> bool {
        self.drop_up
    }
}

/// Handle a key event. While not `active`, only a submit-key-down
/// activates. While active, navigation and submit/escape are forwarded to
/// the inner single-select list.
pub fn handle_key(data: &mut DropdownData, code: KeyCode, down: bool, active: bool) -> (bool, Option<DropdownOutcome>) {
    if !active {
        if code.is_submit() && down {
            data.list.sync_hover_to_selection();
            return (true, Some(DropdownOutcome::Activated));
        }
        return (false, None);
    }
    let panel_height = data.panel_height().max(1) as usize;
    let (handled, outcome) = list::handle_key(&mut data.list, code, down, true, panel_height);
    let outcome = match outcome {
        Some(ListOutcome::Committed) => Some(DropdownOutcome::Committed),
        Some(ListOutcome::Cancelled) => Some(DropdownOutcome::Cancelled),
        Some(ListOutcome::Changed) | Some(ListOutcome::Activated) => Some(DropdownOutcome::Changed),
        None => None,
    };
    (handled, outcome)
}

/// Redraw `image`. When collapsed, `image` is a single-row extent showing
/// the current selection plus an arrow glyph. When `active`, `image` is
/// expected to already be sized for the collapsed row plus the panel
/// (panel above if `drop_up`, below otherwise) and the full list is drawn
/// via [`list::refresh`] into the panel rows.
pub fn refresh(data: &DropdownData, image: &mut Image, theme: &Theme, focused: bool, active: bool) {
    image.clear();
    let width = image.extent().w as usize;
    if width == 0 {
        return;
    }
    let arrow = if active {
        if data.drop_up { theme.char(CharSlot::ArrowUp) } else { theme.char(CharSlot::ArrowDown) }
    } else {
        theme.char(CharSlot::ArrowDown)
    };
    let color = if active {
        theme.pixel(PixelSlot::FocusedText)
    } else if focused {
        theme.pixel(PixelSlot::FocusedText)
    } else {
        theme.pixel(PixelSlot::NormalText)
    };

    let collapsed_row: i32 = if active && data.drop_up { (image.extent().h as i32) - 1 } else { 0 };
    let label = data.selected_text().unwrap_or("");
    let label_width = width.saturating_sub(1);
    let truncated: String = label.chars().take(label_width).collect();
    image.draw_string(Offset::new(0, collapsed_row), &truncated, color);
    let _ = image.set(Offset::new(width as i32 - 1, collapsed_row), crate::pixel::Pixel { char: arrow, color });

    if active {
        let panel_height = (image.extent().h as i32 - 1).max(0) as u32;
        if panel_height == 0 {
            return;
        }
        let panel_top = if data.drop_up { 0 } else { 1 };
        let mut panel = Image::new(crate::geometry::Extent::new(image.extent().w, panel_height));
        list::refresh(&data.list, &mut panel, theme, focused, true);
        image.blit(Offset::new(0, panel_top), &panel, Offset::new(0, 0), panel.extent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;

    fn sample() -> DropdownData {
        DropdownData::new(vec!["a".into(), "b".into(), "c".into()], 3)
    }

    #[test]
    fn submit_activates_then_forwards_to_list() {
        let mut data = sample();
        let (handled, outcome) = handle_key(&mut data, KeyCode::Enter, true, false);
        assert!(handled);
        assert_eq!(outcome, Some(DropdownOutcome::Activated));
    }

    #[test]
    fn arrows_forward_to_list_only_when_active() {
        let mut data = sample();
        let (handled, _) = handle_key(&mut data, KeyCode::Down, true, false);
        assert!(!handled);
        assert_eq!(data.selected(), Some(0));
        let (handled, outcome) = handle_key(&mut data, KeyCode::Down, true, true);
        assert!(handled);
        assert_eq!(outcome, Some(DropdownOutcome::Changed));
    }

    #[test]
    fn enter_while_active_commits_hover() {
        let mut data = sample();
        handle_key(&mut data, KeyCode::Down, true, true);
        let (_, outcome) = handle_key(&mut data, KeyCode::Enter, true, true);
        assert_eq!(outcome, Some(DropdownOutcome::Committed));
        assert_eq!(data.selected(), Some(1));
    }

    #[test]
    fn escape_while_active_cancels_without_changing_selection() {
        let mut data = sample();
        handle_key(&mut data, KeyCode::Down, true, true);
        let (_, outcome) = handle_key(&mut data, KeyCode::Escape, true, true);
        assert_eq!(outcome, Some(DropdownOutcome::Cancelled));
        assert_eq!(data.selected(), Some(0));
    }

    #[test]
    fn drop_direction_picks_up_when_insufficient_space_below() {
        let mut data = sample();
        data.resolve_drop_direction(18, 20, 4);
        assert!(data.drop_up());
    }

    #[test]
    fn drop_direction_picks_down_when_room_exists() {
        let mut data = sample();
        data.resolve_drop_direction(0, 20, 4);
        assert!(!data.drop_up());
    }

    #[test]
    fn refresh_collapsed_shows_single_row() {
        let data = sample();
        let mut image = Image::new(Extent::new(10, 1));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme, false, false);
        assert_eq!(image.get(Offset::new(9, 0)).char, theme.char(CharSlot::ArrowDown));
    }

    #[test]
    fn refresh_active_draws_panel() {
        let mut data = sample();
        data.list.sync_hover_to_selection();
        let mut image = Image::new(Extent::new(10, 4));
        let theme = Theme::default();
        refresh(&data, &mut image, &theme, false, true);
        // Row 1 should now show the first list item's text.
        assert_eq!(image.get(Offset::new(0, 1)).char, b'a');
    }
}
