//! GPU rendering subsystem.
//!
//! Renderers receive a [`RenderCtx`] for resource creation and uploads and a
//! [`RenderTarget`] to record passes into. Each renderer owns its own GPU
//! resources (pipelines, buffers).

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
