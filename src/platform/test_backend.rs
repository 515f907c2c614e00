//! In-memory [`Platform`] for exercising an [`crate::app::Application`]
//! without a real terminal.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::Platform;
use crate::error::Result;
use crate::geometry::Extent;
use crate::keyboard::{KeyCode, Modifiers};

/// Records every byte written and replays a scripted sequence of key
/// states, one entry per [`crate::app::Application::tick`].
pub struct TestBackend {
    extent: Extent,
    scripted_keys: RefCell<VecDeque<(Vec<KeyCode>, Modifiers)>>,
    written: Vec<u8>,
    title: Option<String>,
    clipboard: Option<String>,
}

impl TestBackend {
    /// Create a backend reporting `extent` as the window size, with no
    /// keys queued.
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            scripted_keys: RefCell::new(VecDeque::new()),
            written: Vec::new(),
            title: None,
            clipboard: None,
        }
    }

    /// Queue the keys physically down (and the modifiers held) for the
    /// next `poll_keys` call. Ticks with no queued entry report no keys
    /// down, matching a real terminal between presses.
    pub fn push_keys(&self, keys: Vec<KeyCode>, modifiers: Modifiers) {
        self.scripted_keys.borrow_mut().push_back((keys, modifiers));
    }

    /// Every byte handed to [`Platform::write_all`] so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Simulate a resize the application will pick up on its next
    /// `window_extent` poll.
    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = extent;
    }

    /// The title most recently set via [`Platform::set_title`].
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Platform for TestBackend {
    fn enter(&mut self) -> Result<()> {
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        Ok(())
    }

    fn window_extent(&self) -> Result<Extent> {
        Ok(self.extent)
    }

    fn poll_keys(&mut self) -> Result<(Vec<KeyCode>, Modifiers)> {
        Ok(self.scripted_keys.borrow_mut().pop_front().unwrap_or((Vec::new(), Modifiers::NONE)))
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }

    fn now_millis(&self) -> u64 {
        0
    }

    fn clipboard_get(&mut self) -> Result<String> {
        self.clipboard.clone().ok_or(crate::error::TuiError::NotImplemented("clipboard read"))
    }

    fn clipboard_set(&mut self, text: &str) -> Result<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}
