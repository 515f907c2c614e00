//! Crossterm-based [`Platform`] implementation.
//!
//! Grounded directly on the teacher's `terminal::crossterm_backend`: raw
//! mode and the alternate screen are entered/exited together, and `Drop`
//! unwinds both unconditionally so a panicking or error-returning tick
//! loop never strands the terminal in raw mode.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use base64::Engine;
use crossterm::event::{self, Event, KeyCode as CtKeyCode, KeyEventKind, KeyModifiers as CtKeyModifiers};
use crossterm::{execute, terminal};

use super::Platform;
use crate::error::{Result, TuiError};
use crate::geometry::Extent;
use crate::keyboard::{KeyCode, Modifiers};

/// A [`Platform`] backed by crossterm, reading the real terminal.
pub struct CrosstermBackend {
    raw_mode: bool,
    started_at: Instant,
}

impl CrosstermBackend {
    /// Create a new backend. Does not yet touch the terminal — call
    /// [`Platform::enter`] before driving a tick loop.
    pub fn new() -> Self {
        Self { raw_mode: false, started_at: Instant::now() }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.raw_mode {
            terminal::enable_raw_mode().map_err(|e| TuiError::ConsoleInit(e.to_string()))?;
            execute!(io::stdout(), terminal::EnterAlternateScreen).map_err(|e| TuiError::ConsoleInit(e.to_string()))?;
            self.raw_mode = true;
            tracing::debug!("entered raw mode + alternate screen");
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        if self.raw_mode {
            execute!(io::stdout(), terminal::LeaveAlternateScreen).map_err(|e| TuiError::ConsoleInit(e.to_string()))?;
            terminal::disable_raw_mode().map_err(|e| TuiError::ConsoleInit(e.to_string()))?;
            self.raw_mode = false;
            tracing::debug!("left raw mode + alternate screen");
        }
        Ok(())
    }

    fn window_extent(&self) -> Result<Extent> {
        let (w, h) = terminal::size().map_err(|e| TuiError::KeyboardIo(e.to_string()))?;
        Ok(Extent::new(w as u32, h as u32))
    }

    /// Drains every input event pending at the start of this tick. A
    /// terminal in raw mode without the Kitty keyboard protocol reports
    /// key presses, not a continuous "still down" signal, so a key is
    /// treated as physically down for exactly the tick(s) in which a
    /// press event for it arrives — `crate::keyboard::Keyboard`'s FSM
    /// still produces a `Down`/`Held`/`Up` sequence from that, just with
    /// `Held` driven by the terminal's own key-repeat rate rather than
    /// this toolkit's cooldown counter.
    fn poll_keys(&mut self) -> Result<(Vec<KeyCode>, Modifiers)> {
        let mut keys = Vec::new();
        let mut modifiers = Modifiers::NONE;
        while event::poll(Duration::from_millis(0)).map_err(|e| TuiError::KeyboardIo(e.to_string()))? {
            match event::read().map_err(|e| {
                tracing::debug!(error = %e, "terminal event read failed");
                TuiError::KeyboardIo(e.to_string())
            })? {
                Event::Key(key_event) => {
                    if key_event.kind == KeyEventKind::Release {
                        continue;
                    }
                    modifiers = modifiers.union(convert_modifiers(key_event.modifiers));
                    if let Some(code) = convert_key(key_event.code) {
                        keys.push(code);
                    }
                }
                Event::Resize(_, _) => {
                    // Surfaced to the application via `window_extent` on
                    // the next tick; nothing to record here.
                }
                _ => {}
            }
        }
        Ok((keys, modifiers))
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        io::stdout().write_all(bytes).map_err(TuiError::Io)
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush().map_err(TuiError::Io)
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(io::stdout(), terminal::SetTitle(title)).map_err(|e| TuiError::SetTitleFailed(e.to_string()))
    }

    fn now_millis(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    /// Most terminals (and every multiplexer in between) have no reply
    /// channel for an OSC 52 query without racing real key input, so
    /// clipboard reads stay unsupported here.
    fn clipboard_get(&mut self) -> Result<String> {
        Err(TuiError::NotImplemented("clipboard read"))
    }

    /// Writes the system clipboard via an OSC 52 escape sequence
    /// (`ESC ] 52 ; c ; <base64> BEL`), the de-facto standard most modern
    /// terminal emulators and multiplexers honor without a native
    /// clipboard API.
    fn clipboard_set(&mut self, text: &str) -> Result<()> {
        let sequence = osc52_sequence(text);
        io::stdout().write_all(sequence.as_bytes()).map_err(TuiError::Io)?;
        io::stdout().flush().map_err(TuiError::Io)
    }
}

/// Builds the OSC 52 "set clipboard" escape sequence for `text`.
fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
}

fn convert_modifiers(m: CtKeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(CtKeyModifiers::SHIFT) {
        out = out.union(Modifiers::SHIFT);
    }
    if m.contains(CtKeyModifiers::CONTROL) {
        out = out.union(Modifiers::CONTROL);
    }
    if m.contains(CtKeyModifiers::ALT) {
        out = out.union(Modifiers::ALT);
    }
    if m.contains(CtKeyModifiers::SUPER) {
        out = out.union(Modifiers::COMMAND);
    }
    out
}

fn convert_key(code: CtKeyCode) -> Option<KeyCode> {
    match code {
        CtKeyCode::Char(' ') => Some(KeyCode::Space),
        CtKeyCode::Char(c) if c.is_ascii() => Some(KeyCode::Char(c as u8)),
        CtKeyCode::Enter => Some(KeyCode::Enter),
        CtKeyCode::Esc => Some(KeyCode::Escape),
        CtKeyCode::Tab => Some(KeyCode::Tab),
        CtKeyCode::Backspace => Some(KeyCode::Backspace),
        CtKeyCode::Delete => Some(KeyCode::Delete),
        CtKeyCode::Insert => Some(KeyCode::Insert),
        CtKeyCode::Up => Some(KeyCode::Up),
        CtKeyCode::Down => Some(KeyCode::Down),
        CtKeyCode::Left => Some(KeyCode::Left),
        CtKeyCode::Right => Some(KeyCode::Right),
        CtKeyCode::Home => Some(KeyCode::Home),
        CtKeyCode::End => Some(KeyCode::End),
        CtKeyCode::PageUp => Some(KeyCode::PageUp),
        CtKeyCode::PageDown => Some(KeyCode::PageDown),
        CtKeyCode::F(n) => Some(KeyCode::F(n)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_shift_control() {
        let m = convert_modifiers(CtKeyModifiers::SHIFT | CtKeyModifiers::CONTROL);
        assert!(m.shift());
        assert!(m.control());
    }

    #[test]
    fn converts_printable_char() {
        assert_eq!(convert_key(CtKeyCode::Char('a')), Some(KeyCode::Char(b'a')));
    }

    #[test]
    fn converts_space_to_named_variant() {
        assert_eq!(convert_key(CtKeyCode::Char(' ')), Some(KeyCode::Space));
    }

    #[test]
    fn converts_function_keys() {
        assert_eq!(convert_key(CtKeyCode::F(5)), Some(KeyCode::F(5)));
    }

    #[test]
    fn unmapped_key_is_none() {
        assert_eq!(convert_key(CtKeyCode::Menu), None);
    }

    #[test]
    fn new_backend_starts_outside_raw_mode() {
        let backend = CrosstermBackend::new();
        assert!(!backend.raw_mode);
    }

    #[test]
    fn osc52_sequence_wraps_base64_with_escape_and_bel() {
        let seq = osc52_sequence("hi");
        assert!(seq.starts_with("\x1b]52;c;"));
        assert!(seq.ends_with('\x07'));
        assert!(seq.contains("aGk="));
    }
}
