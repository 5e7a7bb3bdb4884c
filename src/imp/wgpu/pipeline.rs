use crate::bindings::sampler::SamplerType;
use crate::imp::Error;
use crate::imp::wgpu::sampler::Sampler;
use crate::render::command_list::{Command, CommandList};
use crate::render::device::BoundDevice;
use crate::render::shader::{quad_fragment_shader, quad_vertex_shader};
use std::num::NonZero;
use std::sync::Arc;
use wgpu::{
    BindGroupLayoutEntry, BindingType, BlendState, BufferBindingType, Color, ColorTargetState,
    LoadOp, MultisampleState, Operations, PipelineLayoutDescriptor, PolygonMode, PrimitiveState,
    PrimitiveTopology, RenderPipelineDescriptor, SamplerBindingType, StoreOp, TextureFormat,
    TextureSampleType, TextureViewDimension, VertexAttribute, VertexBufferLayout, VertexState,
    VertexStepMode,
};

/// The only color format the built-in pipeline renders into.
const TARGET_FORMAT: TextureFormat = TextureFormat::Bgra8UnormSrgb;

/// Bindings fixed by [`QUAD_SHADER_WGSL`](crate::render::shader).
const UNIFORM_BINDING: u32 = 0;
const TEXTURE_BINDING: u32 = 1;
const SAMPLER_BINDING: u32 = 2;

/// A color attachment [`QuadPipeline::submit`] renders into.
#[derive(Debug)]
pub struct RenderTarget {
    pub(super) view: wgpu::TextureView,
    pub(super) format: TextureFormat,
}

impl RenderTarget {
    /// A headless color target, for tests and readback.
    pub fn offscreen(
        device: &Arc<BoundDevice>,
        width: u32,
        height: u32,
        debug_name: &str,
    ) -> Result<Self, Error> {
        let texture = device.0.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(debug_name),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self {
            view,
            format: TARGET_FORMAT,
        })
    }

    /// Wraps a view supplied by the windowing layer.
    pub fn from_wgpu(view: wgpu::TextureView, format: TextureFormat) -> Self {
        Self { view, format }
    }
}

/**
The compiled pipeline state for textured quads, plus the per-frame
resources it rebinds: the transform uniform and the two samplers.
*/
#[derive(Debug)]
pub struct QuadPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    bilinear: Sampler,
    nearest: Sampler,
}

impl QuadPipeline {
    pub fn new(device: &Arc<BoundDevice>) -> Result<Self, Error> {
        let wgpu_device = &device.0.device;

        let layouts = [
            BindGroupLayoutEntry {
                binding: UNIFORM_BINDING,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(NonZero::new(64).unwrap()),
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: TEXTURE_BINDING,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Float { filterable: true },
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: SAMPLER_BINDING,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Filtering),
                count: None,
            },
        ];
        let bind_group_layout =
            wgpu_device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("textured_quad"),
                entries: &layouts,
            });

        let pipeline_layout = wgpu_device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("textured_quad"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_shader = quad_vertex_shader();
        let vertex_module = wgpu_device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(vertex_shader.label),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Owned(vertex_shader.wgsl_code)),
        });
        let fragment_shader = quad_fragment_shader();
        let fragment_module = wgpu_device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(fragment_shader.label),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Owned(fragment_shader.wgsl_code)),
        });

        //one buffer of 2d positions, one of texcoords; buffer index is the
        //slot the command stream binds at
        let position_attributes = [VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 0,
        }];
        let texcoord_attributes = [VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 1,
        }];
        let vertex_buffers = [
            VertexBufferLayout {
                array_stride: 8,
                step_mode: VertexStepMode::Vertex,
                attributes: &position_attributes,
            },
            VertexBufferLayout {
                array_stride: 8,
                step_mode: VertexStepMode::Vertex,
                attributes: &texcoord_attributes,
            },
        ];

        let vertex_state = VertexState {
            module: &vertex_module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &vertex_buffers,
        };

        let primitive_state = PrimitiveState {
            topology: PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: PolygonMode::Fill,
            conservative: false,
        };

        let color_target_state = ColorTargetState {
            format: TARGET_FORMAT,
            blend: Some(BlendState::ALPHA_BLENDING),
            write_mask: Default::default(),
        };
        let fragment_state = wgpu::FragmentState {
            module: &fragment_module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(color_target_state)],
        };

        let render_descriptor = RenderPipelineDescriptor {
            label: Some("textured_quad"),
            layout: Some(&pipeline_layout),
            vertex: vertex_state,
            primitive: primitive_state,
            depth_stencil: None,
            multisample: MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(fragment_state),
            multiview: None,
            cache: None,
        };
        let pipeline = wgpu_device.create_render_pipeline(&render_descriptor);
        logwise::trace_sync!("Created render pipeline");

        let uniform_buffer = wgpu_device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("textured_quad_transform"),
            size: 64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bilinear = Sampler::new(wgpu_device, SamplerType::Bilinear)?;
        let nearest = Sampler::new(wgpu_device, SamplerType::Nearest)?;

        Ok(Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
            bilinear,
            nearest,
        })
    }

    /// Replays a recorded command list into `target` and submits.
    ///
    /// The target is always cleared; an empty list therefore presents an
    /// empty frame.
    pub fn submit(
        &self,
        device: &Arc<BoundDevice>,
        list: &CommandList,
        target: &RenderTarget,
    ) -> Result<(), Error> {
        if target.format != TARGET_FORMAT {
            return Err(Error::UnsupportedTargetFormat {
                expected: "Bgra8UnormSrgb",
                actual: "other",
            });
        }

        //walk the list once, resolving what the single quad pass needs
        let mut matrix = None;
        let mut texture = None;
        let mut sampler = SamplerType::Bilinear;
        let mut vertex_buffers = Vec::new();
        let mut draws = Vec::new();
        for command in list.commands() {
            match command {
                Command::Transform { matrix: m } => matrix = Some(*m),
                Command::Texture { texture: t } => texture = Some(t.view.clone()),
                Command::Sampler { sampler: s, .. } => sampler = *s,
                Command::VertexBuffer { slot, buffer } => {
                    vertex_buffers.push((*slot, buffer.buffer.clone()));
                }
                Command::DrawStrip { vertex_count } => draws.push(*vertex_count),
            }
        }

        if let Some(matrix) = matrix {
            device
                .0
                .queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&matrix));
        }

        let mut encoder =
            device
                .0
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("textured_quad_present"),
                });
        {
            let color_attachment = wgpu::RenderPassColorAttachment {
                view: &target.view,
                depth_slice: None,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color::BLACK),
                    store: StoreOp::Store,
                },
            };
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("textured_quad_present"),
                color_attachments: &[Some(color_attachment)],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(view) = &texture
                && !draws.is_empty()
            {
                let sampler = match sampler {
                    SamplerType::Bilinear => &self.bilinear,
                    SamplerType::Nearest => &self.nearest,
                };
                let bind_group = device.0.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("textured_quad"),
                    layout: &self.bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: UNIFORM_BINDING,
                            resource: self.uniform_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: TEXTURE_BINDING,
                            resource: wgpu::BindingResource::TextureView(view),
                        },
                        wgpu::BindGroupEntry {
                            binding: SAMPLER_BINDING,
                            resource: wgpu::BindingResource::Sampler(&sampler.sampler),
                        },
                    ],
                });

                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &bind_group, &[]);
                for (slot, buffer) in &vertex_buffers {
                    render_pass.set_vertex_buffer(*slot, buffer.slice(..));
                }
                for vertex_count in &draws {
                    render_pass.draw(0..*vertex_count, 0..1);
                }
            }
        }
        device.0.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}
