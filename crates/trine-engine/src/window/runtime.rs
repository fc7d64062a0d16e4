use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{platform, KeyEvent, KeyState};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Requested size on native targets. On the web the canvas keeps the size
    /// given by the host page.
    pub initial_size: LogicalSize<f64>,
    /// Id of the `<canvas>` element to render into (web only).
    pub canvas_id: String,
    /// Report key events as handled so the browser skips its default action,
    /// e.g. arrow keys scrolling the page (web only).
    pub prevent_default: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trine".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            canvas_id: "canvas".to_string(),
            prevent_default: true,
        }
    }
}

/// Events delivered to the loop from outside a callback.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
enum RuntimeEvent {
    /// GPU initialization finished (web builds initialize asynchronously).
    GpuReady(Result<Gpu>),
    /// Key event caught by the page-level listeners (web only).
    Key(KeyEvent),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until the window closes or the app requests exit.
    ///
    /// On the web this returns immediately after handing the loop to the
    /// browser's animation-frame scheduler; the page lifetime bounds the loop.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        let proxy = event_loop.create_proxy();
        let state = AppState::new(config, gpu_init, app, proxy);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut state = state;
            event_loop
                .run_app(&mut state)
                .context("winit event loop terminated with error")?;
        }

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(state);
        }

        Ok(())
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: EventLoopProxy<RuntimeEvent>,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    keys: KeyState,
    #[cfg(target_arch = "wasm32")]
    /// Held so the page listeners stay registered.
    _page_keys: Option<platform::PageKeyListeners>,
    frame_index: u64,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        app: A,
        proxy: EventLoopProxy<RuntimeEvent>,
    ) -> Self {
        Self {
            config,
            gpu_init,
            app,
            proxy,
            window: None,
            gpu: None,
            keys: KeyState::default(),
            #[cfg(target_arch = "wasm32")]
            _page_keys: None,
            frame_index: 0,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let attrs = Window::default_attributes().with_title(self.config.title.clone());
        let attrs = platform_attributes(attrs, &self.config)?;

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        #[cfg(target_arch = "wasm32")]
        self.listen_page_keys()?;

        let window = Arc::new(window);
        self.window = Some(Arc::clone(&window));
        Ok(window)
    }

    /// Routes page-wide `keydown` / `keyup` into the loop as `RuntimeEvent::Key`.
    #[cfg(target_arch = "wasm32")]
    fn listen_page_keys(&mut self) -> Result<()> {
        let proxy = self.proxy.clone();
        let listeners = platform::PageKeyListeners::attach(self.config.prevent_default, move |ev| {
            if proxy.send_event(RuntimeEvent::Key(ev)).is_err() {
                log::debug!("event loop closed; dropping key event");
            }
        })
        .context("failed to register keyboard listeners")?;

        self._page_keys = Some(listeners);
        Ok(())
    }

    fn apply_key(&mut self, ev: &KeyEvent) {
        log::trace!("key {ev}");
        self.keys.apply_event(ev);
    }

    /// Starts GPU initialization for `window`.
    ///
    /// Native builds block until the device is ready. The browser cannot block,
    /// so the web build spawns the work and receives the context back as a
    /// `RuntimeEvent::GpuReady`.
    fn start_gpu(&mut self, event_loop: &ActiveEventLoop, window: Arc<Window>) {
        let gpu_init = self.gpu_init.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = pollster::block_on(Gpu::new(window, gpu_init));
            self.install_gpu(event_loop, result);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let _ = event_loop;
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = Gpu::new(window, gpu_init).await;
                if proxy.send_event(RuntimeEvent::GpuReady(result)).is_err() {
                    log::warn!("event loop closed before GPU initialization finished");
                }
            });
        }
    }

    fn install_gpu(&mut self, event_loop: &ActiveEventLoop, result: Result<Gpu>) {
        let gpu = match result {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("GPU initialization failed: {e:#}");
                self.request_exit(event_loop);
                return;
            }
        };

        if let Err(e) = self.app.on_gpu_ready(&gpu) {
            log::error!("application setup failed: {e:#}");
            self.request_exit(event_loop);
            return;
        }

        log::info!("gpu ready: {:?} ({:?})", gpu.adapter_info().backend, gpu.surface_format());
        gpu.window().request_redraw();
        self.gpu = Some(gpu);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else { return };
        let Some(gpu) = self.gpu.as_mut() else { return };

        let mut ctx = FrameCtx {
            window,
            gpu,
            keys: &self.keys,
            frame_index: self.frame_index,
        };

        let control = self.app.on_frame(&mut ctx);
        self.frame_index = self.frame_index.wrapping_add(1);

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }
}

impl<A> ApplicationHandler<RuntimeEvent> for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok(window) => self.start_gpu(event_loop, window),
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                self.request_exit(event_loop);
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        match event {
            RuntimeEvent::GpuReady(result) => self.install_gpu(event_loop, result),
            RuntimeEvent::Key(ev) => self.apply_key(&ev),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; on the web each request maps to an animation frame.
        if self.gpu.is_some() {
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(ev) = platform::translate_window_event(&event) {
            self.apply_key(&ev);
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed after {} frames", self.frame_index);
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(*new_size);
                    let size = gpu.size();
                    log::debug!("surface resized to {}x{}", size.width, size.height);
                    gpu.window().request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(gpu) = self.gpu.as_mut() {
                    let new_size = gpu.window().inner_size();
                    gpu.resize(new_size);
                    gpu.window().request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_attributes(attrs: WindowAttributes, config: &RuntimeConfig) -> Result<WindowAttributes> {
    Ok(attrs.with_inner_size(config.initial_size))
}

#[cfg(target_arch = "wasm32")]
fn platform_attributes(attrs: WindowAttributes, config: &RuntimeConfig) -> Result<WindowAttributes> {
    use wasm_bindgen::JsCast;
    use winit::platform::web::WindowAttributesExtWebSys;

    let id = config.canvas_id.as_str();
    let document = web_sys::window()
        .and_then(|w| w.document())
        .context("no document to host the canvas")?;

    let canvas = document
        .get_element_by_id(id)
        .with_context(|| format!("no element with id `{id}`"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("element `{id}` is not a <canvas>"))?;

    Ok(attrs
        .with_canvas(Some(canvas))
        .with_prevent_default(config.prevent_default))
}
