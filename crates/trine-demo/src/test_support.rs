//! Headless GPU harness for tests.
//!
//! Tests that need a device call [`headless`] and return early when the
//! machine has no adapter (CI without a GPU or a software GL driver).

use trine_engine::render::{RenderCtx, RenderTarget};

pub(crate) const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Side of the square offscreen target. `SIZE * 4` is a multiple of
/// `COPY_BYTES_PER_ROW_ALIGNMENT`, so rows need no padding.
pub(crate) const SIZE: u32 = 64;

pub(crate) struct Headless {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

/// Opens a device without a surface, or `None` if no adapter is available.
pub(crate) fn headless() -> Option<Headless> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                eprintln!("no GPU adapter, skipping: {e}");
                return None;
            }
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trine test device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .ok()?;

        Some(Headless { device, queue })
    })
}

impl Headless {
    /// Clears an offscreen target to opaque black, runs `draw` on it and
    /// returns the RGBA8 pixels, top row first.
    pub(crate) fn render_frame<F>(&self, draw: F) -> Vec<u8>
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let extent = wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("trine test target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trine test readback"),
            size: u64::from(SIZE * SIZE * 4),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trine test encoder"),
            });

        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trine test clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(&self.device, &self.queue);
        {
            let mut target = RenderTarget::new(&mut encoder, &view);
            draw(&rctx, &mut target);
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(SIZE * 4),
                    rows_per_image: Some(SIZE),
                },
            },
            extent,
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        slice.map_async(wgpu::MapMode::Read, |result| {
            result.expect("map readback buffer");
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .expect("wait for readback");

        let pixels = slice.get_mapped_range().to_vec();
        readback.unmap();
        pixels
    }
}

/// RGBA of the pixel covering clip-space point `(x, y)`.
pub(crate) fn pixel_at(pixels: &[u8], x: f32, y: f32) -> [u8; 4] {
    let to_index = |t: f32| ((t * SIZE as f32) as u32).min(SIZE - 1) as usize;
    let col = to_index((x + 1.0) / 2.0);
    let row = to_index((1.0 - y) / 2.0);
    let i = (row * SIZE as usize + col) * 4;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

/// Red channel at clip-space point `(x, y)`.
pub(crate) fn red_at(pixels: &[u8], x: f32, y: f32) -> u8 {
    pixel_at(pixels, x, y)[0]
}
