// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The concrete, wgpu-based implementation of the `RenderSystem` trait.

use super::context::WgpuContext;
use strata_core::math::LinearRgba;
use strata_core::platform::window::StrataWindow;
use strata_core::renderer::{
    OverlayPaint, RenderError, RenderObject, RenderStats, RenderSystem, SceneView, Vertex,
};

/// Shader for the engine's single unlit pipeline: position + vertex color,
/// transformed by the per-frame view-projection uniform.
const UNLIT_WGSL: &str = r#"
struct ViewUniform {
    view_projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> u_view: ViewUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = u_view.view_projection * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// The surface texture held between `begin_scene` and `present`.
struct FrameInFlight {
    surface_texture: wgpu::SurfaceTexture,
    target_view: wgpu::TextureView,
}

/// The concrete, wgpu-based implementation of the
/// [`RenderSystem`](strata_core::renderer::RenderSystem) trait.
///
/// Owns the graphics context, one unlit render pipeline, growable upload
/// buffers for the frame's submissions, and the egui paint renderer for the
/// overlay pass. Submitted geometry is re-uploaded each frame; at this
/// engine's scale the upload is trivially small and keeps the submission
/// model immediate.
pub struct WgpuRenderSystem {
    context: Option<WgpuContext>,
    pipeline: Option<wgpu::RenderPipeline>,
    view_uniform_buffer: Option<wgpu::Buffer>,
    view_bind_group: Option<wgpu::BindGroup>,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: u64,
    index_buffer: Option<wgpu::Buffer>,
    index_capacity: u64,
    egui_renderer: Option<egui_wgpu::Renderer>,
    frame: Option<FrameInFlight>,
    pending: Vec<RenderObject>,
    clear_color: LinearRgba,
    error_receiver: Option<flume::Receiver<String>>,
    frame_count: u64,
    last_frame_stats: RenderStats,
}

impl Default for WgpuRenderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl WgpuRenderSystem {
    /// Creates a new, uninitialized `WgpuRenderSystem`.
    ///
    /// The system is not usable until [`RenderSystem::init`] is called.
    pub fn new() -> Self {
        log::info!("WgpuRenderSystem created (uninitialized).");
        Self {
            context: None,
            pipeline: None,
            view_uniform_buffer: None,
            view_bind_group: None,
            vertex_buffer: None,
            vertex_capacity: 0,
            index_buffer: None,
            index_capacity: 0,
            egui_renderer: None,
            frame: None,
            pending: Vec::new(),
            clear_color: LinearRgba::BLACK,
            error_receiver: None,
            frame_count: 0,
            last_frame_stats: RenderStats::default(),
        }
    }

    fn context(&self) -> Result<&WgpuContext, RenderError> {
        self.context.as_ref().ok_or(RenderError::NotInitialized)
    }

    /// (Internal) Ensures the vertex/index upload buffers can hold the given
    /// byte sizes, recreating them with headroom when they cannot.
    fn ensure_upload_capacity(&mut self, vertex_bytes: u64, index_bytes: u64) {
        let context = self.context.as_ref().expect("context present");
        if vertex_bytes > self.vertex_capacity {
            let capacity = vertex_bytes.next_power_of_two();
            self.vertex_buffer = Some(context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Strata Scene Vertex Buffer"),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = capacity;
        }
        if index_bytes > self.index_capacity {
            let capacity = index_bytes.next_power_of_two();
            self.index_buffer = Some(context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Strata Scene Index Buffer"),
                size: capacity,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = capacity;
        }
    }

    /// (Internal) Creates the unlit pipeline and the view uniform resources.
    fn create_pipeline(&mut self) {
        let context = self.context.as_ref().expect("context present");
        let device = &context.device;

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Strata Unlit Shader"),
            source: wgpu::ShaderSource::Wgsl(UNLIT_WGSL.into()),
        });

        let view_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Strata View Uniform Buffer"),
            size: std::mem::size_of::<[[f32; 4]; 4]>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Strata View Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let view_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Strata View Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Strata Unlit Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // @location(0) in shader: position
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // @location(1) in shader: color
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: std::mem::size_of::<[f32; 3]>() as u64,
                    shader_location: 1,
                },
            ],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Strata Unlit Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.surface_format(),
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        self.pipeline = Some(pipeline);
        self.view_uniform_buffer = Some(view_uniform_buffer);
        self.view_bind_group = Some(view_bind_group);
        log::info!("Unlit render pipeline created.");
    }
}

impl RenderSystem for WgpuRenderSystem {
    fn init(&mut self, window: &dyn StrataWindow) -> Result<(), RenderError> {
        let (error_sender, error_receiver) = flume::unbounded();
        let context = pollster::block_on(WgpuContext::new(
            window.clone_handle_arc(),
            window.inner_size(),
            error_sender,
        ))?;

        let egui_renderer = egui_wgpu::Renderer::new(
            &context.device,
            context.surface_format(),
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        self.context = Some(context);
        self.egui_renderer = Some(egui_renderer);
        self.error_receiver = Some(error_receiver);
        self.create_pipeline();

        log::info!("WgpuRenderSystem initialized.");
        Ok(())
    }

    fn resize(&mut self, new_width: u32, new_height: u32) {
        if let Some(context) = self.context.as_mut() {
            context.resize(new_width, new_height);
        }
    }

    fn begin_scene(&mut self, view: &SceneView) -> Result<(), RenderError> {
        let context = self.context()?;

        let surface_texture = match context.get_current_texture() {
            Ok(texture) => texture,
            Err(e @ wgpu::SurfaceError::Lost) | Err(e @ wgpu::SurfaceError::Outdated) => {
                // Reconfigure and let the next frame retry the acquire.
                context.reconfigure();
                return Err(RenderError::SurfaceAcquire {
                    details: format!("{e:?}"),
                });
            }
            Err(e) => {
                return Err(RenderError::SurfaceAcquire {
                    details: format!("{e:?}"),
                });
            }
        };
        let target_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        context.queue.write_buffer(
            self.view_uniform_buffer
                .as_ref()
                .ok_or(RenderError::NotInitialized)?,
            0,
            bytemuck::bytes_of(&view.view_projection),
        );

        self.clear_color = view.clear_color;
        self.pending.clear();
        self.frame = Some(FrameInFlight {
            surface_texture,
            target_view,
        });
        Ok(())
    }

    fn submit(&mut self, object: RenderObject) {
        self.pending.push(object);
    }

    fn end_scene(&mut self) -> Result<(), RenderError> {
        if self.frame.is_none() {
            return Err(RenderError::FrameOutOfOrder {
                operation: "end_scene",
            });
        }

        // Flatten the frame's submissions into one vertex/index slab, with
        // per-object index offsets rebased onto the shared vertex buffer.
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        for object in &self.pending {
            let base = vertices.len() as u32;
            vertices.extend_from_slice(&object.vertices);
            indices.extend(object.indices.iter().map(|i| i + base));
        }

        let index_count = indices.len() as u32;
        if index_count > 0 {
            self.ensure_upload_capacity(
                (vertices.len() * std::mem::size_of::<Vertex>()) as u64,
                (indices.len() * std::mem::size_of::<u32>()) as u64,
            );
        }

        let context = self.context.as_ref().expect("context present");
        let frame = self.frame.as_ref().expect("frame in flight");

        if index_count > 0 {
            context.queue.write_buffer(
                self.vertex_buffer.as_ref().expect("vertex buffer"),
                0,
                bytemuck::cast_slice(&vertices),
            );
            context.queue.write_buffer(
                self.index_buffer.as_ref().expect("index buffer"),
                0,
                bytemuck::cast_slice(&indices),
            );
        }

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Strata Scene Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Strata Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.clear_color.r as f64,
                            g: self.clear_color.g as f64,
                            b: self.clear_color.b as f64,
                            a: self.clear_color.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if index_count > 0 {
                render_pass.set_pipeline(self.pipeline.as_ref().expect("pipeline"));
                render_pass.set_bind_group(0, self.view_bind_group.as_ref(), &[]);
                render_pass
                    .set_vertex_buffer(0, self.vertex_buffer.as_ref().unwrap().slice(..));
                render_pass.set_index_buffer(
                    self.index_buffer.as_ref().unwrap().slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                render_pass.draw_indexed(0..index_count, 0, 0..1);
            }
        }
        context.queue.submit(std::iter::once(encoder.finish()));

        self.last_frame_stats.draw_calls = self.pending.len() as u32;
        self.last_frame_stats.vertices = vertices.len() as u32;
        self.pending.clear();
        Ok(())
    }

    fn render_overlay(&mut self, paint: OverlayPaint) -> Result<(), RenderError> {
        let frame = self.frame.as_ref().ok_or(RenderError::FrameOutOfOrder {
            operation: "render_overlay",
        })?;
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        let egui_renderer = self.egui_renderer.as_mut().expect("egui renderer");

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Strata Overlay Encoder"),
            });

        let (width, height) = context.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: paint.pixels_per_point,
        };

        for (id, image_delta) in &paint.textures_delta.set {
            egui_renderer.update_texture(&context.device, &context.queue, *id, image_delta);
        }

        egui_renderer.update_buffers(
            &context.device,
            &context.queue,
            &mut encoder,
            &paint.paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Strata Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Paint on top of the scene, never clear it.
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui's renderer wants a pass with an unbounded lifetime.
            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint.paint_jobs, &screen_descriptor);
        }

        context.queue.submit(std::iter::once(encoder.finish()));

        for id in &paint.textures_delta.free {
            egui_renderer.free_texture(id);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<RenderStats, RenderError> {
        let frame = self.frame.take().ok_or(RenderError::FrameOutOfOrder {
            operation: "present",
        })?;
        frame.surface_texture.present();

        self.frame_count += 1;
        self.last_frame_stats.frame_number = self.frame_count;
        Ok(self.last_frame_stats)
    }

    fn poll_errors(&mut self) -> usize {
        let Some(receiver) = self.error_receiver.as_ref() else {
            return 0;
        };
        let mut drained = 0;
        while let Ok(report) = receiver.try_recv() {
            log::error!("wgpu reported: {report}");
            drained += 1;
        }
        drained
    }

    fn frame_stats(&self) -> &RenderStats {
        &self.last_frame_stats
    }

    fn shutdown(&mut self) {
        if self.context.is_none() {
            return;
        }
        log::info!("WgpuRenderSystem shutting down...");
        self.frame = None;
        self.pending.clear();
        self.egui_renderer = None;
        self.pipeline = None;
        self.view_bind_group = None;
        self.view_uniform_buffer = None;
        self.vertex_buffer = None;
        self.index_buffer = None;
        self.error_receiver = None;
        self.context = None;
        log::info!("WgpuRenderSystem shutdown complete.");
    }
}
