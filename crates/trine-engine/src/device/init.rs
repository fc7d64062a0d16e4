/// Initialization parameters for the GPU layer.
///
/// Defaults depend on the target: browser builds restrict wgpu to the GL
/// backend, which binds a WebGL 2 context to the canvas, and request the
/// WebGL 2 downlevel limits.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may select from.
    pub backends: wgpu::Backends,

    /// Prefer an sRGB surface format when available.
    ///
    /// A plain WebGL canvas is not sRGB; disable this to match its output.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: default_limits(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn default_backends() -> wgpu::Backends {
    wgpu::Backends::GL
}

#[cfg(not(target_arch = "wasm32"))]
fn default_backends() -> wgpu::Backends {
    wgpu::Backends::all()
}

#[cfg(target_arch = "wasm32")]
fn default_limits() -> wgpu::Limits {
    wgpu::Limits::downlevel_webgl2_defaults()
}

#[cfg(not(target_arch = "wasm32"))]
fn default_limits() -> wgpu::Limits {
    wgpu::Limits::default()
}
