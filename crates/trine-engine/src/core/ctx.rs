use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::KeyState;
use crate::render::{RenderCtx, RenderTarget};

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window:      &'a Window,
    pub gpu:         &'a mut Gpu,
    pub keys:        &'a KeyState,
    /// Monotonic tick counter, starting at 0 for the first frame.
    pub frame_index: u64,
}

impl<'a> FrameCtx<'a> {
    /// Clears the surface with `clear`, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then submits and presents the frame.
    ///
    /// If the surface cannot provide a texture the frame is skipped without
    /// calling `draw`; only an out-of-memory surface error stops the runtime.
    pub fn render<F>(&mut self, clear: wgpu::Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                log::debug!("frame {} skipped: {action:?}", self.frame_index);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("surface error is not recoverable; stopping");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        // Clear pass, dropped before the encoder is handed to the renderer.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trine clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view:           &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes:         None,
                occlusion_query_set:      None,
                multiview_mask:           None,
            });
        }

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue());

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.gpu.submit(frame);

        AppControl::Continue
    }
}
