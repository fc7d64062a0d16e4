//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window (a canvas on the web), and wires them
//! to the GPU layer and the keyboard tracker.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
