use std::fmt;

/// Whether a key went down or came back up.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    Pressed,
    Released,
}

/// Platform-agnostic keyboard event emitted by the runtime.
///
/// `key` is the DOM `KeyboardEvent.key` value ("ArrowUp", "a", "Escape", ...).
/// Native platforms are mapped onto the same names so one matcher serves both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub action: KeyAction,
    /// True when the event is an auto-repeat of a held key.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn pressed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: KeyAction::Pressed,
            repeat: false,
        }
    }

    pub fn released(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: KeyAction::Released,
            repeat: false,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            KeyAction::Pressed => "down",
            KeyAction::Released => "up",
        };
        write!(f, "{} {}", self.key, verb)
    }
}
