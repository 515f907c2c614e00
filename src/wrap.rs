//! Two-pass greedy word-wrap (spec §4.6): count lines before allocating,
//! then fill a byte-offset table; cursor (col, row) <-> byte-index mapping
//! for `TextInput`/`text_buffer`-style callers.

/// One wrapped line: the byte range `[start, end)` into the source text,
/// and whether the line break was a forced wrap (as opposed to an
/// explicit `\n` or end-of-text).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrappedLine {
    /// Start byte offset, inclusive.
    pub start: usize,
    /// End byte offset, exclusive. Never includes the line's own trailing
    /// newline or the whitespace that was consumed to make the break.
    pub end: usize,
}

impl WrappedLine {
    /// The line's byte length.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the line is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A safe byte for display: printable ASCII (`0x20..=0x7e`) passes through,
/// everything else (control chars, non-ASCII bytes) becomes a space so a
/// single-byte-per-cell renderer never mis-measures a line.
pub fn safe_byte(b: u8) -> u8 {
    if (0x20..=0x7e).contains(&b) {
        b
    } else {
        b' '
    }
}

/// Like [`safe_byte`] but passes `\n` through unchanged, for callers (text
/// input) that need to preserve line breaks while still scrubbing other
/// control bytes to spaces.
pub fn safe_byte_or_newline(b: u8) -> u8 {
    if b == b'\n' { b } else { safe_byte(b) }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Word,
}

fn class_of(b: u8) -> CharClass {
    if b == b' ' || b == b'\t' {
        CharClass::Space
    } else {
        CharClass::Word
    }
}

/// Wrap `text` (already-safe ASCII bytes) to `width` columns, greedily
/// breaking at the last word boundary at or before `width` and falling
/// back to a hard break mid-word if a single word exceeds `width`.
/// Explicit `\n` bytes always end a line.
///
/// Two-pass per spec: `count_lines` first computes how many lines the
/// text will produce, then `wrap` allocates a `Vec` of that exact capacity
/// before filling it, avoiding reallocation growth on large buffers.
pub fn wrap(text: &[u8], width: usize) -> Vec<WrappedLine> {
    let count = count_lines(text, width);
    let mut lines = Vec::with_capacity(count);
    let mut pos = 0usize;
    let len = text.len();

    if width == 0 {
        // Degenerate: every byte is its own forced break.
        while pos < len {
            if text[pos] == b'\n' {
                lines.push(WrappedLine { start: pos, end: pos });
                pos += 1;
            } else {
                lines.push(WrappedLine { start: pos, end: pos + 1 });
                pos += 1;
            }
        }
        if lines.is_empty() {
            lines.push(WrappedLine { start: 0, end: 0 });
        }
        return lines;
    }

    loop {
        if pos >= len {
            break;
        }
        if let Some(nl) = find_byte(text, pos, b'\n') {
            if nl - pos <= width {
                lines.push(WrappedLine { start: pos, end: nl });
                pos = nl + 1;
                continue;
            }
        }
        let remaining = len - pos;
        if remaining <= width {
            lines.push(WrappedLine { start: pos, end: len });
            break;
        }

        let limit = pos + width;
        let break_at = find_break(text, pos, limit);
        match break_at {
            Some(b) => {
                lines.push(WrappedLine { start: pos, end: b });
                pos = skip_spaces(text, b);
            }
            None => {
                // No word boundary in range: hard break mid-word.
                lines.push(WrappedLine { start: pos, end: limit });
                pos = limit;
            }
        }
    }
    if lines.is_empty() {
        lines.push(WrappedLine { start: 0, end: 0 });
    } else if text.last() == Some(&b'\n') {
        // A trailing newline ends its own (empty) line rather than just
        // terminating the line before it.
        lines.push(WrappedLine { start: len, end: len });
    }
    lines
}

/// First pass: compute how many lines [`wrap`] will produce, without
/// allocating the line table.
pub fn count_lines(text: &[u8], width: usize) -> usize {
    if text.is_empty() {
        return 1;
    }
    let mut count = 0usize;
    let mut pos = 0usize;
    let len = text.len();

    if width == 0 {
        return len.max(1);
    }

    loop {
        if pos >= len {
            break;
        }
        count += 1;
        if let Some(nl) = find_byte(text, pos, b'\n') {
            if nl - pos <= width {
                pos = nl + 1;
                continue;
            }
        }
        let remaining = len - pos;
        if remaining <= width {
            break;
        }
        let limit = pos + width;
        match find_break(text, pos, limit) {
            Some(b) => pos = skip_spaces(text, b),
            None => pos = limit,
        }
    }
    if !text.is_empty() && text.last() == Some(&b'\n') {
        count += 1;
    }
    count.max(1)
}

fn find_byte(text: &[u8], from: usize, needle: u8) -> Option<usize> {
    text[from..].iter().position(|&b| b == needle).map(|i| i + from)
}

/// Seek backward from `limit` to the last space/word class boundary at or
/// before `limit`, returning the index to break *before* (i.e. the
/// trailing whitespace run's start). Returns `None` if no boundary exists
/// in `(from, limit]`, meaning the word itself is too long to fit.
fn find_break(text: &[u8], from: usize, limit: usize) -> Option<usize> {
    if text.is_empty() {
        return None;
    }
    let mut i = limit.min(text.len() - 1);
    loop {
        if class_of(text[i]) == CharClass::Space {
            // Walk back to the start of this space run so trailing
            // whitespace isn't counted as part of the wrapped line.
            let mut j = i;
            while j > from && class_of(text[j - 1]) == CharClass::Space {
                j -= 1;
            }
            return Some(j);
        }
        if i == from {
            break;
        }
        i -= 1;
    }
    None
}

fn skip_spaces(text: &[u8], mut pos: usize) -> usize {
    while pos < text.len() && class_of(text[pos]) == CharClass::Space {
        pos += 1;
    }
    pos
}

/// Map a byte offset into `text` to the `(column, row)` position it falls
/// at after wrapping to `width`, using the already-computed `lines` table.
pub fn byte_to_cursor(lines: &[WrappedLine], byte_offset: usize) -> (usize, usize) {
    if lines.is_empty() {
        return (0, 0);
    }
    // The row is the last line whose start is at or before the offset, so
    // an offset sitting exactly on a hard-wrap seam (no whitespace
    // consumed between lines) lands at the start of the next line rather
    // than the out-of-bounds tail column of the line before it.
    let mut row = 0;
    for (i, line) in lines.iter().enumerate() {
        if line.start <= byte_offset {
            row = i;
        } else {
            break;
        }
    }
    let line = lines[row];
    let col = byte_offset.saturating_sub(line.start).min(line.len());
    (col, row)
}

/// Inverse of [`byte_to_cursor`]: map a `(column, row)` back to a byte
/// offset, clamping `column` to the line's length and `row` to the last
/// line.
pub fn cursor_to_byte(lines: &[WrappedLine], column: usize, row: usize) -> usize {
    let row = row.min(lines.len().saturating_sub(1));
    let Some(line) = lines.get(row) else {
        return 0;
    };
    line.start + column.min(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::Strategy as _;

    fn to_str(text: &[u8], line: &WrappedLine) -> String {
        String::from_utf8_lossy(&text[line.start..line.end]).into_owned()
    }

    #[test]
    fn wraps_on_word_boundary() {
        let text = b"the quick brown fox";
        let lines = wrap(text, 10);
        let rendered: Vec<String> = lines.iter().map(|l| to_str(text, l)).collect();
        assert_eq!(rendered, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn count_matches_wrap_len() {
        let text = b"the quick brown fox jumps over the lazy dog";
        for width in [1, 3, 5, 8, 12, 100] {
            assert_eq!(count_lines(text, width), wrap(text, width).len());
        }
    }

    #[test]
    fn explicit_newline_forces_break() {
        let text = b"hi\nthere";
        let lines = wrap(text, 20);
        assert_eq!(lines.len(), 2);
        assert_eq!(to_str(text, &lines[0]), "hi");
        assert_eq!(to_str(text, &lines[1]), "there");
    }

    #[test]
    fn long_word_hard_breaks() {
        let text = b"supercalifragilisticexpialidocious";
        let lines = wrap(text, 10);
        assert!(lines.iter().all(|l| l.len() <= 10));
        let joined: String = lines.iter().map(|l| to_str(text, l)).collect();
        assert_eq!(joined, "supercalifragilisticexpialidocious");
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        let lines = wrap(b"", 10);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn zero_width_hard_breaks_every_byte() {
        let lines = wrap(b"ab", 0);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn safe_byte_maps_control_to_space() {
        assert_eq!(safe_byte(b'a'), b'a');
        assert_eq!(safe_byte(0x07), b' ');
        assert_eq!(safe_byte(0x1b), b' ');
    }

    #[test]
    fn cursor_roundtrip() {
        let text = b"the quick brown fox";
        let lines = wrap(text, 10);
        for offset in 0..text.len() {
            let (col, row) = byte_to_cursor(&lines, offset);
            let back = cursor_to_byte(&lines, col, row);
            // Not always exactly equal at consumed-whitespace boundaries,
            // but must land within the same line's span.
            assert!(back >= lines[row].start && back <= lines[row].end);
        }
    }

    #[test]
    fn trailing_space_not_counted_in_wrapped_line() {
        let text = b"aaaaa bbbbb";
        let lines = wrap(text, 5);
        let rendered: Vec<String> = lines.iter().map(|l| to_str(text, l)).collect();
        assert_eq!(rendered, vec!["aaaaa", "bbbbb"]);
    }

    #[test]
    fn trailing_newline_yields_extra_empty_line() {
        let text = b"hi\n";
        let lines = wrap(text, 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(to_str(text, &lines[0]), "hi");
        assert!(lines[1].is_empty());
        assert_eq!(count_lines(text, 10), 2);
    }

    #[test]
    fn multiple_trailing_newlines_each_add_a_line() {
        let text = b"a\nb\n";
        let lines = wrap(text, 10);
        let rendered: Vec<String> = lines.iter().map(|l| to_str(text, l)).collect();
        assert_eq!(rendered, vec!["a", "b", ""]);
        assert_eq!(count_lines(text, 10), 3);

        let text = b"a\n\n";
        let lines = wrap(text, 10);
        let rendered: Vec<String> = lines.iter().map(|l| to_str(text, l)).collect();
        assert_eq!(rendered, vec!["a", "", ""]);
        assert_eq!(count_lines(text, 10), 3);
    }

    #[test]
    fn byte_to_cursor_at_hard_wrap_seam_lands_on_next_line() {
        let text = b"aaaaaaaaaa";
        let lines = wrap(text, 5);
        assert_eq!(lines, vec![WrappedLine { start: 0, end: 5 }, WrappedLine { start: 5, end: 10 }]);
        assert_eq!(byte_to_cursor(&lines, 5), (0, 1));
        assert_eq!(byte_to_cursor(&lines, 4), (4, 0));
        assert_eq!(byte_to_cursor(&lines, 10), (5, 1));
    }

    proptest::proptest! {
        #[test]
        fn count_lines_matches_wrap_len_prop(
            text in proptest::collection::vec(proptest::prelude::any::<u8>().prop_map(safe_byte_or_newline), 0..80),
            width in 1usize..20,
        ) {
            proptest::prop_assert_eq!(count_lines(&text, width), wrap(&text, width).len());
        }

        #[test]
        fn wrapped_lines_never_exceed_width_unless_single_word(
            text in proptest::collection::vec(proptest::prelude::any::<u8>().prop_map(safe_byte_or_newline), 0..80),
            width in 1usize..20,
        ) {
            let lines = wrap(&text, width);
            for line in &lines {
                proptest::prop_assert!(line.len() <= width || !text[line.start..line.end].contains(&b' '));
            }
        }

        #[test]
        fn cursor_roundtrip_stays_in_line_span(
            text in proptest::collection::vec(proptest::prelude::any::<u8>().prop_map(safe_byte), 0..60),
            width in 1usize..20,
        ) {
            let lines = wrap(&text, width);
            for offset in 0..=text.len() {
                let (col, row) = byte_to_cursor(&lines, offset);
                let back = cursor_to_byte(&lines, col, row);
                proptest::prop_assert!(back >= lines[row].start && back <= lines[row].end);
            }
        }
    }
}
