//! Shader program: the compiled triangle shader, its pipeline and the
//! `transformMatrix` uniform binding.

use bytemuck::{Pod, Zeroable};
use futures::FutureExt;
use glam::Mat4;
use thiserror::Error;

const SHADER_SOURCE: &str = include_str!("shaders/triangle.wgsl");

/// Failure while turning the shader source into a usable program.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader `{label}` failed to compile: {message}")]
    Compile { label: &'static str, message: String },

    #[error("shader program `{label}` failed to link: {message}")]
    Link { label: &'static str, message: String },
}

/// Value of the `transformMatrix` uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    matrix: [[f32; 4]; 4],
}

/// Vertex layout of the `position` attribute: three tightly packed `f32`s.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct Position {
    pub xyz: [f32; 3],
}

impl Position {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Position>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Compiled and linked triangle program.
///
/// Built once after the GPU is ready and kept for the lifetime of the app.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    transform_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShaderProgram {
    /// Compiles the shader module and links it into a render pipeline for `format`.
    pub fn build(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, ShaderError> {
        let module = checked(device, "triangle shader", ShaderError::compile, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("trine triangle shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
            })
        })?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("trine transform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<TransformUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trine triangle pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = checked(device, "triangle program", ShaderError::link, || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("trine triangle pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Position::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        })?;

        let transform_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trine transform ubo"),
            size: std::mem::size_of::<TransformUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trine transform bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_ubo.as_entire_binding(),
            }],
        });

        log::debug!("triangle program linked for {format:?}");

        Ok(Self {
            pipeline,
            transform_ubo,
            bind_group,
        })
    }

    /// Uploads `matrix` to the `transformMatrix` uniform.
    pub fn set_transform(&self, queue: &wgpu::Queue, matrix: &Mat4) {
        let u = TransformUniform {
            matrix: matrix.to_cols_array_2d(),
        };
        queue.write_buffer(&self.transform_ubo, 0, bytemuck::bytes_of(&u));
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

impl ShaderError {
    fn compile(label: &'static str, message: String) -> Self {
        Self::Compile { label, message }
    }

    fn link(label: &'static str, message: String) -> Self {
        Self::Link { label, message }
    }
}

/// Runs `create` inside a validation error scope and converts a captured
/// error into a `ShaderError` built by `to_error`.
///
/// The GL and native backends resolve the scope synchronously. If a backend
/// ever answers asynchronously the check is skipped with a warning.
fn checked<T>(
    device: &wgpu::Device,
    label: &'static str,
    to_error: fn(&'static str, String) -> ShaderError,
    create: impl FnOnce() -> T,
) -> Result<T, ShaderError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();

    match scope.pop().now_or_never() {
        Some(Some(err)) => Err(to_error(label, err.to_string())),
        Some(None) => Ok(value),
        None => {
            log::warn!("validation result for {label} not available synchronously");
            Ok(value)
        }
    }
}
