//! Page-level keyboard listeners for the browser build.

use anyhow::{anyhow, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::dom;
use crate::input::KeyEvent;

type KeyListener = Closure<dyn FnMut(web_sys::KeyboardEvent)>;

/// `keydown` / `keyup` listeners registered on the page's `window`.
///
/// Keys reach the app whichever element has focus. Listeners are removed
/// when this value is dropped.
pub(crate) struct PageKeyListeners {
    target: web_sys::Window,
    listeners: Vec<(&'static str, KeyListener)>,
}

impl PageKeyListeners {
    /// Registers the listeners and forwards every key event to `sink`.
    ///
    /// With `prevent_default` set, each event is reported as handled so the
    /// browser does not scroll the page on arrow keys.
    pub(crate) fn attach<F>(prevent_default: bool, sink: F) -> Result<Self>
    where
        F: Fn(KeyEvent) + Clone + 'static,
    {
        let target = web_sys::window().ok_or_else(|| anyhow!("no window to listen for keys on"))?;
        let mut this = Self {
            target,
            listeners: Vec::with_capacity(dom::KEY_EVENT_TYPES.len()),
        };

        for event_type in dom::KEY_EVENT_TYPES {
            let sink = sink.clone();
            let listener: KeyListener = Closure::new(move |e: web_sys::KeyboardEvent| {
                if prevent_default {
                    e.prevent_default();
                }
                if let Some(ev) = dom::key_event_from_dom(event_type, e.key(), e.repeat()) {
                    sink(ev);
                }
            });

            this.target
                .add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("failed to listen for `{event_type}`: {e:?}"))?;
            this.listeners.push((event_type, listener));
        }

        Ok(this)
    }
}

impl Drop for PageKeyListeners {
    fn drop(&mut self) {
        for (event_type, listener) in &self.listeners {
            let _ = self
                .target
                .remove_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref());
        }
    }
}
