//! Platform event translation.
//!
//! Native builds read keys from winit window events. The browser build listens
//! on the whole page instead, so keys arrive even when the canvas lacks focus.

mod dom;
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
mod winit;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub(crate) use self::winit::translate_window_event;
#[cfg(target_arch = "wasm32")]
pub(crate) use self::web::PageKeyListeners;
