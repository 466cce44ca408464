#![forbid(unsafe_code)]

//! Input events consumed by the hotkey capture state machine.
//!
//! The host translates its native keyboard/focus/pointer notifications into
//! these values. Key names are carried verbatim (`"ShiftLeft"`, `"KeyA"`,
//! `"left shift"`, …); extraction and canonicalization happen inside the
//! capture machine so every host shares one normalization path.

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (auto-repeat).
    Repeat,

    /// Key was released.
    Release,
}

/// A keyboard event carrying the host's raw key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Raw per-platform key name or hardware code.
    pub key: String,

    /// Press, repeat, or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a press event.
    #[must_use]
    pub fn press(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Press,
        }
    }

    /// Create a release event.
    #[must_use]
    pub fn release(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Release,
        }
    }

    /// Create an auto-repeat event.
    #[must_use]
    pub fn repeat(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Repeat,
        }
    }
}

/// Event fed to a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A keyboard transition.
    Key(KeyEvent),

    /// The window or capture widget lost focus.
    FocusLost,

    /// A pointer went down outside the capture widget.
    PointerDownOutside,
}

impl CaptureEvent {
    /// Shorthand for a key press.
    #[must_use]
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::Key(KeyEvent::press(key))
    }

    /// Shorthand for a key release.
    #[must_use]
    pub fn key_up(key: impl Into<String>) -> Self {
        Self::Key(KeyEvent::release(key))
    }
}

impl From<KeyEvent> for CaptureEvent {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}
