//! Error types for cellstage.
//!
//! A single enum covers every failure family named by the toolkit's error
//! handling design: generic/control results, argument errors, image and
//! word-wrap failures, application invariants, and the platform-shim
//! families (clipboard, window, keyboard, console). Handlers propagate by
//! early return (`?`); the [`crate::app::Application`] tick loop stops on
//! the first error and restores the terminal before returning it.

/// Result type alias for cellstage operations.
pub type Result<T> = std::result::Result<T, TuiError>;

/// Error type for cellstage operations.
#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    /// Operation was cancelled (not itself a failure).
    #[error("cancelled")]
    Cancel,

    /// The current platform/backend does not support this operation.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// Generic catch-all error.
    #[error("error: {0}")]
    Generic(String),

    /// A counter or buffer overflowed.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// A fixed-capacity collection is full.
    #[error("collection full: {0}")]
    CollectionFull(&'static str),

    /// An operation was attempted in an invalid state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A required argument was null/absent.
    #[error("null argument: {0}")]
    NullArgument(&'static str),

    /// An argument (offset, index, extent) was out of range.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// An argument had an invalid value (e.g. a zero pixel character).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Memory/resource allocation failed.
    #[error("allocation failed: {0}")]
    AllocationFailed(&'static str),

    /// Presenting the surface to the terminal failed (write/flush).
    #[error("presentation failed: {0}")]
    PresentationFailed(String),

    /// Word-wrap computation failed.
    #[error("wrap failed: {0}")]
    WrapFailed(&'static str),

    /// Cursor/line offset table computation failed.
    #[error("offsets failed: {0}")]
    OffsetsFailed(&'static str),

    /// More than one control was marked `active` during a refresh.
    #[error("multiple active controls")]
    MultipleActiveControls,

    /// A control's data did not match its declared `ControlKind` tag.
    #[error("invalid argument: control kind mismatch, expected {expected}, found {found}")]
    WrongControlKind {
        /// The control kind the handler expected.
        expected: &'static str,
        /// The control kind actually stored.
        found: &'static str,
    },

    /// Setting the window title failed.
    #[error("set title failed: {0}")]
    SetTitleFailed(String),

    /// The clipboard is unavailable or the operation failed.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// A filesystem open/create/delete/enumerate operation failed.
    #[error("file error: {0}")]
    File(String),

    /// Underlying terminal/platform I/O failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Console/keyboard initialization failed.
    #[error("console init failed: {0}")]
    ConsoleInit(String),

    /// Polling or reading the keyboard failed.
    #[error("keyboard I/O failed: {0}")]
    KeyboardIo(String),
}

impl TuiError {
    /// A stable, human-readable string for this error kind.
    ///
    /// Distinct from [`std::fmt::Display`] only in that it names the kind
    /// rather than interpolating the detail message — useful for tests that
    /// assert on *which* failure family fired without pinning exact text.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TuiError::Cancel => "cancel",
            TuiError::NotImplemented(_) => "not_implemented",
            TuiError::Generic(_) => "generic",
            TuiError::Overflow(_) => "overflow",
            TuiError::CollectionFull(_) => "collection_full",
            TuiError::InvalidState(_) => "invalid_state",
            TuiError::NullArgument(_) => "null_argument",
            TuiError::OutOfRange(_) => "out_of_range",
            TuiError::InvalidArgument(_) => "invalid_argument",
            TuiError::AllocationFailed(_) => "allocation_failed",
            TuiError::PresentationFailed(_) => "presentation_failed",
            TuiError::WrapFailed(_) => "wrap_failed",
            TuiError::OffsetsFailed(_) => "offsets_failed",
            TuiError::MultipleActiveControls => "multiple_active_controls",
            TuiError::WrongControlKind { .. } => "wrong_control_kind",
            TuiError::SetTitleFailed(_) => "set_title_failed",
            TuiError::Clipboard(_) => "clipboard",
            TuiError::File(_) => "file",
            TuiError::Io(_) => "io",
            TuiError::ConsoleInit(_) => "console_init",
            TuiError::KeyboardIo(_) => "keyboard_io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = TuiError::InvalidState("no active control".into());
        assert_eq!(err.to_string(), "invalid state: no active control");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TuiError = io_err.into();
        assert!(matches!(err, TuiError::Io(_)));
        assert_eq!(err.kind_name(), "io");
    }

    #[test]
    fn kind_name_is_stable() {
        assert_eq!(TuiError::MultipleActiveControls.kind_name(), "multiple_active_controls");
        assert_eq!(TuiError::Cancel.kind_name(), "cancel");
    }
}
