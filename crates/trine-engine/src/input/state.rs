use super::types::{KeyAction, KeyEvent};

/// Held state of the four arrow keys.
///
/// Each flag reflects the most recent press/release seen for its key. There is
/// no queue and no debouncing: repeated presses leave a held flag set, and a
/// release for a key that was never pressed leaves it clear.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Key-down handler. Unrecognized key names are ignored.
    pub fn key_down(&mut self, key: &str) {
        if let Some(flag) = self.flag_mut(key) {
            *flag = true;
        }
    }

    /// Key-up handler. Unrecognized key names are ignored.
    pub fn key_up(&mut self, key: &str) {
        if let Some(flag) = self.flag_mut(key) {
            *flag = false;
        }
    }

    /// Applies a translated keyboard event.
    pub fn apply_event(&mut self, ev: &KeyEvent) {
        match ev.action {
            KeyAction::Pressed => self.key_down(&ev.key),
            KeyAction::Released => self.key_up(&ev.key),
        }
    }

    /// True when at least one arrow is held.
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    fn flag_mut(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "ArrowUp" => Some(&mut self.up),
            "ArrowDown" => Some(&mut self.down),
            "ArrowLeft" => Some(&mut self.left),
            "ArrowRight" => Some(&mut self.right),
            _ => None,
        }
    }
}
