use anyhow::Result;
use winit::event::WindowEvent;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once when the GPU context becomes available, before the first frame.
    ///
    /// Returning an error aborts the runtime; this is where shader programs and
    /// other long-lived GPU resources are built.
    fn on_gpu_ready(&mut self, gpu: &Gpu) -> Result<()> {
        let _ = gpu;
        Ok(())
    }

    /// Called for window events, after the runtime has updated input state.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per tick of the host's frame scheduler.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
