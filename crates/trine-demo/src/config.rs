use trine_engine::device::GpuInit;
use trine_engine::logging::LoggingConfig;
use trine_engine::window::RuntimeConfig;

/// Rotation added every frame, in radians.
pub const ROTATION_STEP: f32 = 0.01;

/// Offset added per held arrow key every frame, in clip-space units.
pub const MOVE_STEP: f32 = 0.04;

/// Demo configuration.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    /// Id of the host page's `<canvas>`.
    pub canvas_id: String,
    pub rotation_step: f32,
    pub move_step: f32,
    pub clear_color: wgpu::Color,
    pub logging: LoggingConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "trine".to_string(),
            canvas_id: "canvas".to_string(),
            rotation_step: ROTATION_STEP,
            move_step: MOVE_STEP,
            clear_color: wgpu::Color::BLACK,
            logging: LoggingConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            canvas_id: self.canvas_id.clone(),
            ..RuntimeConfig::default()
        }
    }

    /// GPU settings: a linear surface format, like a default WebGL canvas.
    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        }
    }
}
