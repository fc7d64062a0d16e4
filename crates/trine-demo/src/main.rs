//! Rotating triangle moved with the arrow keys.
//!
//! Runs natively in a window, or in the browser on the page's `#canvas`
//! through WebGL 2 (build for `wasm32-unknown-unknown`, e.g. with trunk).

mod config;
mod renderer;
mod scene;
mod shader;
#[cfg(test)]
mod test_support;

use anyhow::Result;

use trine_engine::core::{App, AppControl, FrameCtx};
use trine_engine::device::Gpu;
use trine_engine::logging::init_logging;
use trine_engine::window::Runtime;

use config::DemoConfig;
use renderer::TriangleRenderer;
use scene::TransformState;

/// Application state handed to the runtime callbacks.
struct TriangleApp {
    config: DemoConfig,
    transform: TransformState,
    renderer: Option<TriangleRenderer>,
}

impl TriangleApp {
    fn new(config: DemoConfig) -> Self {
        Self {
            config,
            transform: TransformState::default(),
            renderer: None,
        }
    }
}

impl App for TriangleApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu) -> Result<()> {
        let renderer = TriangleRenderer::new(gpu.device(), gpu.surface_format())?;
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.transform.advance_rotation(self.config.rotation_step);
        let matrix = self.transform.matrix();

        let control = match self.renderer.as_ref() {
            Some(renderer) => ctx.render(self.config.clear_color, |rctx, target| {
                renderer.render(rctx, target, &matrix);
            }),
            None => AppControl::Continue,
        };

        self.transform.apply_movement(ctx.keys, self.config.move_step);

        if ctx.frame_index % 600 == 0 {
            log::debug!("frame {}: {:?}", ctx.frame_index, self.transform);
        }

        control
    }
}

fn run(config: DemoConfig) -> Result<()> {
    let runtime_config = config.runtime_config();
    let gpu_init = config.gpu_init();
    Runtime::run(runtime_config, gpu_init, TriangleApp::new(config))
}

fn main() {
    let config = DemoConfig::default();
    init_logging(config.logging.clone());

    if let Err(e) = run(config) {
        log::error!("trine runtime error: {e:#}");
        #[cfg(not(target_arch = "wasm32"))]
        std::process::exit(1);
    }
}
