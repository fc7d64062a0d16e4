//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `KeyEvent`s carrying DOM key
//! names, which `KeyState` matches by exact string equality.

mod state;
mod types;

pub(crate) mod platform;

pub use state::KeyState;
pub use types::{KeyAction, KeyEvent};
