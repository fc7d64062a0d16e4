//! DOM `keydown` / `keyup` events as received by page-level listeners.

use crate::input::{KeyAction, KeyEvent};

/// Event types the runtime listens for on the page.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) const KEY_EVENT_TYPES: [&str; 2] = ["keydown", "keyup"];

/// Builds a `KeyEvent` from a DOM keyboard event's `type`, `key` and `repeat`.
///
/// Returns `None` for event types other than `keydown` / `keyup`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn key_event_from_dom(event_type: &str, key: String, repeat: bool) -> Option<KeyEvent> {
    let action = match event_type {
        "keydown" => KeyAction::Pressed,
        "keyup" => KeyAction::Released,
        _ => return None,
    };
    Some(KeyEvent { key, action, repeat })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyState;

    #[test]
    fn keydown_and_keyup_map_to_actions() {
        assert_eq!(
            key_event_from_dom("keydown", "ArrowUp".into(), false),
            Some(KeyEvent::pressed("ArrowUp"))
        );
        assert_eq!(
            key_event_from_dom("keyup", "ArrowUp".into(), false),
            Some(KeyEvent::released("ArrowUp"))
        );
    }

    #[test]
    fn repeat_flag_is_carried() {
        let ev = key_event_from_dom("keydown", "ArrowLeft".into(), true).unwrap();
        assert!(ev.repeat);
        assert_eq!(ev.action, KeyAction::Pressed);
    }

    #[test]
    fn other_event_types_are_ignored() {
        assert_eq!(key_event_from_dom("keypress", "a".into(), false), None);
        assert_eq!(key_event_from_dom("focus", String::new(), false), None);
    }

    #[test]
    fn page_events_drive_key_state() {
        // A release arriving from the page clears the flag even when the
        // canvas never saw the matching press.
        let mut keys = KeyState::default();
        for (ty, key) in [
            ("keydown", "ArrowUp"),
            ("keydown", "ArrowRight"),
            ("keyup", "ArrowUp"),
            ("keyup", "ArrowDown"),
        ] {
            if let Some(ev) = key_event_from_dom(ty, key.to_string(), false) {
                keys.apply_event(&ev);
            }
        }
        assert!(!keys.up);
        assert!(keys.right);
        assert!(!keys.down);
        assert!(!keys.left);
    }
}
