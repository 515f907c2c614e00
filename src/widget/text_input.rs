//! Single- or multi-line editable text (spec §4.10): cursor/selection
//! geometry, word-boundary navigation, and clipboard-backed cut/copy/paste.
//!
//! Decided open question: a single-line input silently drops embedded
//! `\n` bytes on insert rather than erroring or switching to multi-line —
//! matches how the collapsed single-row rendering has nowhere to put a
//! second line anyway.
//!
//! Invariant carried from the normalized-selection design: whenever
//! `selection_anchor` is `Some`, `selection_start() <= selection_end()`
//! always holds (`selection_start` is the smaller of anchor/cursor, never
//! the anchor itself) — callers must not assume `selection_start ==
//! selection_anchor`.

use crate::geometry::Offset;
use crate::image::Image;
use crate::keyboard::{KeyCode, Modifiers};
use crate::theme::{PixelSlot, Theme};
use crate::wrap::{self, WrappedLine};

/// A text input's widget-specific state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextInputData {
    buffer: Vec<u8>,
    cursor: usize,
    selection_anchor: Option<usize>,
    multiline: bool,
    password: bool,
    placeholder: String,
    clipboard: String,
    /// Maximum buffer length in bytes. Insertions beyond this are
    /// truncated; a key that would insert into a full buffer beeps instead.
    capacity: usize,
    /// First visible row (multiline) or first visible byte column
    /// (single-line), kept in view of the cursor by [`TextInputData::clamp_scroll`].
    scroll: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Word,
    Symbol,
}

fn class_of(b: u8) -> CharClass {
    if b == b' ' || b == b'\t' || b == b'\n' {
        CharClass::Space
    } else if b.is_ascii_alphanumeric() || b == b'_' {
        CharClass::Word
    } else {
        CharClass::Symbol
    }
}

impl TextInputData {
    /// Create an empty text input that holds at most `capacity` bytes.
    pub fn new(capacity: usize, multiline: bool) -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            selection_anchor: None,
            multiline,
            password: false,
            placeholder: String::new(),
            clipboard: String::new(),
            capacity,
            scroll: 0,
        }
    }

    /// Create a text input pre-populated with `text`, itself truncated to
    /// `capacity` bytes if it's longer.
    pub fn with_text(text: &str, capacity: usize, multiline: bool) -> Self {
        let mut data = Self::new(capacity, multiline);
        let mut bytes = sanitize(text.as_bytes(), multiline);
        bytes.truncate(capacity);
        data.buffer = bytes;
        data.cursor = data.buffer.len();
        data
    }

    /// The maximum number of bytes this buffer may hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many more bytes can be inserted before the buffer is full.
    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.buffer.len())
    }

    /// The scroll offset used by [`refresh`] to keep the cursor in view:
    /// a row index in multiline mode, a byte-column index in single-line.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Mask every displayed character as `*`, without altering the stored
    /// bytes (spec's password input type).
    #[must_use]
    pub fn with_password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }

    /// Text shown in place of an empty, inactive buffer.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// The current text content.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    /// Byte-offset cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether this input accepts embedded newlines.
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// The normalized selection range `[start, end)`, or `None` if nothing
    /// is selected.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection_anchor.map(|anchor| {
            if anchor <= self.cursor { (anchor, self.cursor) } else { (self.cursor, anchor) }
        })
    }

    fn clear_selection(&mut self) {
        self.selection_anchor = None;
    }

    fn delete_selection(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            self.buffer.drain(start..end);
            self.cursor = start;
            self.clear_selection();
            true
        } else {
            false
        }
    }

    /// Insert `text` at the cursor, replacing any active selection first.
    /// In single-line mode, embedded newlines are dropped. Truncated to
    /// whatever remains of [`TextInputData::capacity`]; returns `false` if
    /// any byte of `text` had to be dropped to fit.
    pub fn insert(&mut self, text: &str) -> bool {
        self.delete_selection();
        let bytes = sanitize(text.as_bytes(), self.multiline);
        let remaining = self.remaining_capacity();
        let fits = bytes.len() <= remaining;
        let take = bytes.len().min(remaining);
        self.buffer.splice(self.cursor..self.cursor, bytes[..take].iter().copied());
        self.cursor += take;
        fits
    }

    /// Delete the character before the cursor, or the selection if one is
    /// active.
    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor > 0 {
            self.buffer.remove(self.cursor - 1);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor, or the selection if one is
    /// active.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// Move the cursor by `delta` bytes (negative = left), clamped to the
    /// buffer. If `extend` is false, clears any active selection; if
    /// `true`, starts (or continues) a selection anchored at the old
    /// cursor position.
    pub fn move_cursor(&mut self, delta: i32, extend: bool) {
        let anchor_before = self.cursor;
        let new = (self.cursor as i64 + delta as i64).clamp(0, self.buffer.len() as i64) as usize;
        if extend {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(anchor_before);
            }
        } else {
            self.clear_selection();
        }
        self.cursor = new;
    }

    /// Jump to the start (`false`) or one past the end (`true`) of the
    /// next word boundary in the given direction.
    pub fn move_word(&mut self, forward: bool, extend: bool) {
        let new = if forward { word_boundary_forward(&self.buffer, self.cursor) } else { word_boundary_backward(&self.buffer, self.cursor) };
        let delta = new as i64 - self.cursor as i64;
        self.move_cursor(delta as i32, extend);
    }

    /// Select the entire buffer.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.buffer.len();
    }

    /// Copy the selection (if any) into the internal clipboard, returning
    /// the copied text.
    pub fn copy(&mut self) -> String {
        if let Some((start, end)) = self.selection() {
            let text = String::from_utf8_lossy(&self.buffer[start..end]).into_owned();
            self.clipboard = text.clone();
            text
        } else {
            String::new()
        }
    }

    /// Copy the selection then delete it.
    pub fn cut(&mut self) -> String {
        let text = self.copy();
        self.delete_selection();
        text
    }

    /// Insert the internal clipboard's contents at the cursor.
    pub fn paste(&mut self) {
        let text = self.clipboard.clone();
        self.insert(&text);
    }

    /// The text last copied or cut into the internal clipboard.
    pub fn clipboard_text(&self) -> &str {
        &self.clipboard
    }

    /// Overwrite the internal clipboard, e.g. with text read back from the
    /// system clipboard before a paste.
    pub fn set_clipboard_text(&mut self, text: String) {
        self.clipboard = text;
    }

    fn lines(&self, width: usize) -> Vec<WrappedLine> {
        if self.multiline {
            wrap::wrap(&self.buffer, width.max(1))
        } else {
            vec![WrappedLine { start: 0, end: self.buffer.len() }]
        }
    }

    /// The cursor's `(column, row)` position given a render width.
    pub fn cursor_position(&self, width: usize) -> (usize, usize) {
        wrap::byte_to_cursor(&self.lines(width), self.cursor)
    }

    /// Keep the cursor within the visible window by adjusting `scroll`.
    /// The scroll coordinate is the cursor's row in multiline mode (visible
    /// span = `height`), or the cursor's byte offset in single-line mode
    /// (visible span = `width`).
    fn clamp_scroll(&mut self, width: usize, height: usize) {
        let (coord, visible) = if self.multiline {
            let (_, row) = self.cursor_position(width.max(1));
            (row, height.max(1))
        } else {
            (self.cursor, width.max(1))
        };
        if self.scroll + visible <= coord {
            self.scroll = coord + 1 - visible;
        } else if self.scroll > coord {
            self.scroll = coord;
        }
    }
}

fn sanitize(bytes: &[u8], multiline: bool) -> Vec<u8> {
    bytes
        .iter()
        .copied()
        .map(wrap::safe_byte_or_newline)
        .filter(|&b| multiline || b != b'\n')
        .collect()
}

fn word_boundary_forward(buf: &[u8], from: usize) -> usize {
    let len = buf.len();
    let mut i = from;
    if i >= len {
        return len;
    }
    let start_class = class_of(buf[i]);
    while i < len && class_of(buf[i]) == start_class && start_class != CharClass::Space {
        i += 1;
    }
    while i < len && class_of(buf[i]) == CharClass::Space {
        i += 1;
    }
    i
}

fn word_boundary_backward(buf: &[u8], from: usize) -> usize {
    let mut i = from;
    while i > 0 && class_of(buf[i - 1]) == CharClass::Space {
        i -= 1;
    }
    if i == 0 {
        return 0;
    }
    let class = class_of(buf[i - 1]);
    while i > 0 && class_of(buf[i - 1]) == class {
        i -= 1;
    }
    i
}

/// What happened as a result of a key reaching a text input, for the
/// caller to translate into control-state transitions (`on_submit` fires
/// on `Committed`; `on_change` on `Changed`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextInputOutcome {
    /// Became active; edits now reach the buffer.
    Activated,
    /// The buffer or cursor/selection changed; stays active.
    Changed,
    /// Escape, or Enter in single-line mode: leaves active.
    Committed,
    /// A key that would have inserted text reached a full buffer; nothing
    /// changed and the system beep should sound.
    Beeped,
}

/// Handle a key event, only while it's down (repeats while held, same as
/// the keyboard FSM's `Held` cadence — callers should not forward `Up`
/// transitions here). While not `active`, only a submit key activates;
/// while active, every editing action below applies. `width`/`height` are
/// the widget's render extent, used to keep the cursor within the visible
/// scroll window.
pub fn handle_key(
    data: &mut TextInputData,
    code: KeyCode,
    modifiers: Modifiers,
    width: usize,
    height: usize,
    active: bool,
) -> (bool, Option<TextInputOutcome>) {
    if !active {
        if code.is_submit() {
            data.clamp_scroll(width, height);
            return (true, Some(TextInputOutcome::Activated));
        }
        return (false, None);
    }
    if matches!(code, KeyCode::Escape) {
        return (true, Some(TextInputOutcome::Committed));
    }
    if matches!(code, KeyCode::Enter) {
        if data.multiline {
            if data.remaining_capacity() == 0 {
                return (true, Some(TextInputOutcome::Beeped));
            }
            data.insert("\n");
            data.clamp_scroll(width, height);
            return (true, Some(TextInputOutcome::Changed));
        }
        return (true, Some(TextInputOutcome::Committed));
    }
    let extend = modifiers.shift();
    let (handled, beep) = handle_editing_key(data, code, modifiers, width, extend);
    if beep {
        return (true, Some(TextInputOutcome::Beeped));
    }
    if handled {
        data.clamp_scroll(width, height);
    }
    (handled, handled.then_some(TextInputOutcome::Changed))
}

/// Returns `(handled, beep)`: `beep` is set only when the key was a
/// printable character that couldn't be inserted because the buffer is
/// already at capacity.
fn handle_editing_key(data: &mut TextInputData, code: KeyCode, modifiers: Modifiers, width: usize, extend: bool) -> (bool, bool) {
    match code {
        KeyCode::Char(b'a' | b'A') if modifiers.control() => {
            data.select_all();
            (true, false)
        }
        KeyCode::Char(b'c' | b'C') if modifiers.control() => {
            data.copy();
            (true, false)
        }
        KeyCode::Char(b'x' | b'X') if modifiers.control() => {
            data.cut();
            (true, false)
        }
        KeyCode::Char(b'v' | b'V') if modifiers.control() => {
            if data.remaining_capacity() == 0 && data.selection().is_none() {
                return (true, true);
            }
            data.paste();
            (true, false)
        }
        KeyCode::Char(c) => {
            if data.remaining_capacity() == 0 && data.selection().is_none() {
                return (true, true);
            }
            data.insert(std::str::from_utf8(&[c]).unwrap_or(""));
            (true, false)
        }
        KeyCode::Backspace => {
            if modifiers.control() && data.selection().is_none() {
                data.move_cursor(0, false);
                let target = word_boundary_backward(&data.buffer, data.cursor);
                let delta = target as i64 - data.cursor as i64;
                data.move_cursor(delta as i32, true);
            }
            data.backspace();
            (true, false)
        }
        KeyCode::Delete => {
            if modifiers.control() && data.selection().is_none() {
                let target = word_boundary_forward(&data.buffer, data.cursor);
                let delta = target as i64 - data.cursor as i64;
                data.move_cursor(delta as i32, true);
            }
            data.delete_forward();
            (true, false)
        }
        KeyCode::Left => {
            if modifiers.control() {
                data.move_word(false, extend);
            } else {
                data.move_cursor(-1, extend);
            }
            (true, false)
        }
        KeyCode::Right => {
            if modifiers.control() {
                data.move_word(true, extend);
            } else {
                data.move_cursor(1, extend);
            }
            (true, false)
        }
        KeyCode::Home => {
            let (_, row) = data.cursor_position(width.max(1));
            let lines = data.lines(width.max(1));
            let line_start = lines.get(row).map(|l| l.start).unwrap_or(0);
            let delta = line_start as i64 - data.cursor as i64;
            data.move_cursor(delta as i32, extend);
            (true, false)
        }
        KeyCode::End => {
            let (_, row) = data.cursor_position(width.max(1));
            let lines = data.lines(width.max(1));
            let line_end = lines.get(row).map(|l| l.end).unwrap_or(data.buffer.len());
            let delta = line_end as i64 - data.cursor as i64;
            data.move_cursor(delta as i32, extend);
            (true, false)
        }
        KeyCode::Up if data.multiline => {
            let (col, row) = data.cursor_position(width.max(1));
            if row > 0 {
                let lines = data.lines(width.max(1));
                let target = wrap::cursor_to_byte(&lines, col, row - 1);
                let delta = target as i64 - data.cursor as i64;
                data.move_cursor(delta as i32, extend);
            }
            (true, false)
        }
        KeyCode::Down if data.multiline => {
            let (col, row) = data.cursor_position(width.max(1));
            let lines = data.lines(width.max(1));
            if row + 1 < lines.len() {
                let target = wrap::cursor_to_byte(&lines, col, row + 1);
                let delta = target as i64 - data.cursor as i64;
                data.move_cursor(delta as i32, extend);
            }
            (true, false)
        }
        // Single-line: Up/Down behave as Home/End (spec's single-line
        // fallback for a widget that otherwise has no rows to move
        // between).
        KeyCode::Up => {
            let delta = 0i64 - data.cursor as i64;
            data.move_cursor(delta as i32, extend);
            (true, false)
        }
        KeyCode::Down => {
            let delta = data.buffer.len() as i64 - data.cursor as i64;
            data.move_cursor(delta as i32, extend);
            (true, false)
        }
        _ => (false, false),
    }
}

/// Redraw `image`: wrapped text plus a cursor cell highlighted via the
/// theme's `Cursor` color, and selected bytes highlighted via
/// `SelectedNormal`/`SelectedFocused`.
pub fn refresh(data: &TextInputData, image: &mut Image, theme: &Theme, focused: bool) {
    image.clear();
    let extent = image.extent();
    let width = extent.w as usize;
    let height = extent.h as usize;
    if width == 0 || height == 0 {
        return;
    }
    let lines = data.lines(width);
    let text_color = theme.pixel(PixelSlot::NormalText);
    let selected_color = if focused { theme.pixel(PixelSlot::SelectedFocused) } else { theme.pixel(PixelSlot::SelectedNormal) };
    let selection = data.selection();

    // `screen_row`/`screen_col` translate buffer-space row/column into
    // visible cells, applying `data.scroll` as a row offset in multiline
    // mode or a byte-column offset in single-line mode. Positions that
    // scroll off the top/left are skipped rather than wrapping negative.
    for (row, line) in lines.iter().enumerate() {
        let screen_row = if data.multiline {
            match row.checked_sub(data.scroll) {
                Some(r) => r,
                None => continue,
            }
        } else {
            0
        };
        if screen_row >= height {
            continue;
        }
        for (col, byte_idx) in (line.start..line.end).enumerate() {
            let screen_col = if data.multiline { col } else { match col.checked_sub(data.scroll) { Some(c) => c, None => continue } };
            if screen_col >= width {
                continue;
            }
            let in_selection = selection.is_some_and(|(s, e)| byte_idx >= s && byte_idx < e);
            let color = if in_selection { selected_color } else { text_color };
            let ch = data.buffer[byte_idx];
            let _ = image.set(Offset::new(screen_col as i32, screen_row as i32), crate::pixel::Pixel { char: ch, color });
        }
    }

    if focused {
        let (col, row) = data.cursor_position(width);
        let screen_row = if data.multiline { row.checked_sub(data.scroll) } else { Some(0) };
        let screen_col = if data.multiline { Some(col) } else { col.checked_sub(data.scroll) };
        if let (Some(screen_row), Some(screen_col)) = (screen_row, screen_col) {
            if screen_row < height && screen_col < width {
                let existing = image.get(Offset::new(screen_col as i32, screen_row as i32));
                let ch = if existing.is_empty() { b' ' } else { existing.char };
                let _ = image.set(
                    Offset::new(screen_col as i32, screen_row as i32),
                    crate::pixel::Pixel { char: ch, color: theme.pixel(PixelSlot::Cursor) },
                );
            }
        }
    }
}
