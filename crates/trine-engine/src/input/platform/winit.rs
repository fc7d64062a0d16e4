use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

use crate::input::{KeyAction, KeyEvent};

/// Translates a winit `WindowEvent` into an engine `KeyEvent`.
///
/// Returns `None` for non-keyboard events and for keys without a DOM name.
pub(crate) fn translate_window_event(event: &WindowEvent) -> Option<KeyEvent> {
    let WindowEvent::KeyboardInput { event, .. } = event else {
        return None;
    };

    let key = key_name(&event.logical_key)?;
    let action = match event.state {
        ElementState::Pressed => KeyAction::Pressed,
        ElementState::Released => KeyAction::Released,
    };

    Some(KeyEvent {
        key,
        action,
        repeat: event.repeat,
    })
}

/// Returns the DOM `KeyboardEvent.key` value for a winit logical key.
///
/// On the web winit parses these names from the browser event, so the mapping
/// reproduces the browser payload. Native keys are mapped onto the same names.
fn key_name(key: &WinitKey) -> Option<String> {
    match key {
        WinitKey::Named(named) => named_key_name(*named).map(str::to_owned),
        WinitKey::Character(text) => Some(text.to_string()),
        WinitKey::Unidentified(_) => Some("Unidentified".to_owned()),
        WinitKey::Dead(_) => Some("Dead".to_owned()),
    }
}

fn named_key_name(key: NamedKey) -> Option<&'static str> {
    let name = match key {
        NamedKey::ArrowUp => "ArrowUp",
        NamedKey::ArrowDown => "ArrowDown",
        NamedKey::ArrowLeft => "ArrowLeft",
        NamedKey::ArrowRight => "ArrowRight",

        NamedKey::Escape => "Escape",
        NamedKey::Enter => "Enter",
        NamedKey::Tab => "Tab",
        NamedKey::Backspace => "Backspace",
        NamedKey::Space => " ",

        NamedKey::Insert => "Insert",
        NamedKey::Delete => "Delete",
        NamedKey::Home => "Home",
        NamedKey::End => "End",
        NamedKey::PageUp => "PageUp",
        NamedKey::PageDown => "PageDown",

        NamedKey::Shift => "Shift",
        NamedKey::Control => "Control",
        NamedKey::Alt => "Alt",
        // winit reports the DOM "Meta" key as Super.
        NamedKey::Super | NamedKey::Meta => "Meta",

        NamedKey::F1 => "F1",
        NamedKey::F2 => "F2",
        NamedKey::F3 => "F3",
        NamedKey::F4 => "F4",
        NamedKey::F5 => "F5",
        NamedKey::F6 => "F6",
        NamedKey::F7 => "F7",
        NamedKey::F8 => "F8",
        NamedKey::F9 => "F9",
        NamedKey::F10 => "F10",
        NamedKey::F11 => "F11",
        NamedKey::F12 => "F12",

        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use winit::keyboard::SmolStr;

    use super::*;

    #[test]
    fn arrows_map_to_dom_names() {
        assert_eq!(key_name(&WinitKey::Named(NamedKey::ArrowUp)).as_deref(), Some("ArrowUp"));
        assert_eq!(key_name(&WinitKey::Named(NamedKey::ArrowDown)).as_deref(), Some("ArrowDown"));
        assert_eq!(key_name(&WinitKey::Named(NamedKey::ArrowLeft)).as_deref(), Some("ArrowLeft"));
        assert_eq!(key_name(&WinitKey::Named(NamedKey::ArrowRight)).as_deref(), Some("ArrowRight"));
    }

    #[test]
    fn characters_pass_through() {
        let key = WinitKey::Character(SmolStr::new("w"));
        assert_eq!(key_name(&key).as_deref(), Some("w"));
    }

    #[test]
    fn space_uses_dom_spelling() {
        assert_eq!(key_name(&WinitKey::Named(NamedKey::Space)).as_deref(), Some(" "));
    }

    #[test]
    fn super_and_meta_share_a_name() {
        assert_eq!(named_key_name(NamedKey::Super), Some("Meta"));
        assert_eq!(named_key_name(NamedKey::Meta), Some("Meta"));
    }

    #[test]
    fn unmapped_named_keys_are_dropped() {
        assert_eq!(named_key_name(NamedKey::MediaPlayPause), None);
    }
}
