//! Trine engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo: a winit
//! event loop that also runs in the browser, a wgpu context that targets WebGL 2
//! on the web, and the keyboard tracking fed by the host.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod render;
