//! Frame renderer: uploads the transform, then draws the triangle from a
//! vertex buffer that lives for a single frame.

use glam::Mat4;
use wgpu::util::DeviceExt;

use trine_engine::render::{RenderCtx, RenderTarget};

use crate::shader::{Position, ShaderError, ShaderProgram};

/// The triangle, in clip space before the transform.
const TRIANGLE: [Position; 3] = [
    Position { xyz: [0.0, 0.5, 0.0] },
    Position { xyz: [-0.5, -0.5, 0.0] },
    Position { xyz: [0.5, -0.5, 0.0] },
];

/// Draws the transformed triangle.
pub struct TriangleRenderer {
    program: ShaderProgram,
}

impl TriangleRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, ShaderError> {
        Ok(Self {
            program: ShaderProgram::build(device, format)?,
        })
    }

    /// Records one triangle draw with `matrix` into `target`.
    ///
    /// The target has already been cleared by the frame driver.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, matrix: &Mat4) {
        self.program.set_transform(ctx.queue, matrix);

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trine triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE),
            usage: wgpu::BufferUsages::VERTEX,
        });

        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trine triangle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(self.program.pipeline());
            rpass.set_bind_group(0, self.program.bind_group(), &[]);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..TRIANGLE.len() as u32, 0..1);
        }

        // Releasing the handle deletes the buffer once the recorded pass no
        // longer needs it.
        drop(vbo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    use crate::scene::TransformState;
    use crate::test_support::{self, red_at, TARGET_FORMAT};

    #[test]
    fn triangle_vertices_match_the_fixed_geometry() {
        let flat: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(
            flat,
            &[0.0, 0.5, 0.0, -0.5, -0.5, 0.0, 0.5, -0.5, 0.0]
        );
    }

    #[test]
    fn triangle_upload_is_tightly_packed() {
        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(bytes.len(), 3 * 3 * std::mem::size_of::<f32>());
    }

    // ── GPU ──────────────────────────────────────────────────────────────

    #[test]
    fn quarter_turn_points_the_apex_right() {
        let Some(gpu) = test_support::headless() else { return };
        let renderer = TriangleRenderer::new(&gpu.device, TARGET_FORMAT).unwrap();

        let matrix = TransformState { offset_x: 0.0, offset_y: 0.0, rotation: FRAC_PI_2 }.matrix();
        let pixels = gpu.render_frame(|ctx, target| renderer.render(ctx, target, &matrix));

        // The apex (0, 0.5) lands on (0.5, 0): the base now sits on the left.
        assert_eq!(red_at(&pixels, -0.3, 0.2), 255);
        assert_eq!(red_at(&pixels, 0.3, 0.2), 0);
    }

    #[test]
    fn each_frame_draws_with_its_own_transform() {
        let Some(gpu) = test_support::headless() else { return };
        let renderer = TriangleRenderer::new(&gpu.device, TARGET_FORMAT).unwrap();

        let moved = TransformState { offset_x: 0.5, offset_y: 0.5, rotation: 0.0 }.matrix();
        let still = TransformState::default().matrix();

        for _ in 0..3 {
            let pixels = gpu.render_frame(|ctx, target| renderer.render(ctx, target, &moved));
            assert_eq!(red_at(&pixels, 0.5, 0.4), 255);
            assert_eq!(red_at(&pixels, 0.0, -0.1), 0);

            let pixels = gpu.render_frame(|ctx, target| renderer.render(ctx, target, &still));
            assert_eq!(red_at(&pixels, 0.0, -0.1), 255);
            assert_eq!(red_at(&pixels, 0.5, 0.4), 0);
        }
    }

    #[test]
    fn background_keeps_the_clear_color() {
        let Some(gpu) = test_support::headless() else { return };
        let renderer = TriangleRenderer::new(&gpu.device, TARGET_FORMAT).unwrap();

        let matrix = TransformState::default().matrix();
        let pixels = gpu.render_frame(|ctx, target| renderer.render(ctx, target, &matrix));

        let px = test_support::pixel_at(&pixels, 0.9, 0.9);
        assert_eq!(px, [0, 0, 0, 255]);
        let px = test_support::pixel_at(&pixels, 0.0, 0.0);
        assert_eq!(px[0], 255);
        assert_eq!(px[3], 255);
    }
}
