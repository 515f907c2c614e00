//! `Platform`: the OS/terminal-facing capabilities the
//! [`crate::app::Application`] tick loop depends on, abstracted behind a
//! trait so the core engine never talks to crossterm directly (spec §1
//! scope names these as external collaborators, not core modules).

pub mod crossterm_backend;
pub mod test_backend;

use crate::error::Result;
use crate::geometry::Extent;
use crate::keyboard::{KeyCode, Modifiers};

pub use test_backend::TestBackend;

/// OS/terminal capabilities the tick loop needs each iteration.
pub trait Platform {
    /// Enter raw input mode and the alternate screen buffer. Idempotent.
    fn enter(&mut self) -> Result<()>;

    /// Leave raw input mode and the alternate screen buffer. Idempotent.
    /// Implementations should also run this from `Drop` so an error path
    /// never leaves the terminal in raw mode (grounded in the teacher's
    /// `Drop for CrosstermBackend`).
    fn exit(&mut self) -> Result<()>;

    /// The current window extent, in character cells.
    fn window_extent(&self) -> Result<Extent>;

    /// Poll for keys physically down right now, without blocking longer
    /// than one tick interval. Returns the keys down and the current
    /// modifier state.
    fn poll_keys(&mut self) -> Result<(Vec<KeyCode>, Modifiers)>;

    /// Write raw bytes to the terminal (the compositor's rendered text).
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<()>;

    /// Set the terminal window title, if supported.
    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Monotonic wall-clock milliseconds, for tick-interval pacing.
    fn now_millis(&self) -> u64;

    /// Read the system clipboard's text contents, if the backend can.
    /// Most terminal backends have no read channel for OSC 52 (the
    /// terminal would have to reply over stdin, which would race with key
    /// input), so the default is `NotImplemented`; `TextInput`'s paste
    /// handling falls back to its own internal clipboard buffer when this
    /// errors.
    fn clipboard_get(&mut self) -> Result<String> {
        Err(crate::error::TuiError::NotImplemented("clipboard read"))
    }

    /// Write `text` to the system clipboard, if the backend can.
    fn clipboard_set(&mut self, text: &str) -> Result<()> {
        let _ = text;
        Err(crate::error::TuiError::NotImplemented("clipboard write"))
    }
}
