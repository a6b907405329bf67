//! WebGPU surface, pipeline and per-frame vertex upload

use super::vertex::{Vertex, colors};
use crate::config::Playfield;

/// Smallest vertex buffer ever allocated (vertices)
const MIN_VERTEX_CAPACITY: usize = 4096;

/// Main render state
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    /// Reused across frames, reallocated only when a scene outgrows it
    vertex_buffer: Option<(wgpu::Buffer, usize)>,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Logical playfield mapped onto the whole viewport
    playfield: Playfield,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        playfield: Playfield,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("jelly-hole-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_pipeline(&device, format);

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer: None,
            size: (width, height),
            playfield,
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Write the scene into the shared buffer, growing it if needed
    fn upload(&mut self, vertices: &[Vertex]) {
        let needed = vertices.len();
        let fits = matches!(self.vertex_buffer, Some((_, cap)) if cap >= needed);
        if !fits {
            let capacity = vertex_capacity_for(needed);
            log::debug!("Growing vertex buffer to {} vertices", capacity);
            let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("scene_vertices"),
                size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.vertex_buffer = Some((buffer, capacity));
        }
        if let Some((buffer, _)) = &self.vertex_buffer {
            self.queue
                .write_buffer(buffer, 0, bytemuck::cast_slice(vertices));
        }
    }

    /// Upload the playfield-space scene and draw it
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let ndc = to_ndc_vertices(&self.playfield, vertices);
        let vertex_count = ndc.len() as u32;
        if !ndc.is_empty() {
            self.upload(&ndc);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if vertex_count > 0 {
                if let Some((buffer, _)) = &self.vertex_buffer {
                    pass.set_pipeline(&self.pipeline);
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..vertex_count, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Single alpha-blended triangle-list pipeline
fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Lawn colour behind everything
fn clear_color() -> wgpu::Color {
    let [r, g, b, _] = colors::GRASS;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// Next power of two, never below `MIN_VERTEX_CAPACITY`
fn vertex_capacity_for(count: usize) -> usize {
    count.next_power_of_two().max(MIN_VERTEX_CAPACITY)
}

fn to_ndc_vertices(playfield: &Playfield, vertices: &[Vertex]) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            let (x, y) = to_ndc(playfield, v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        })
        .collect()
}

/// Playfield spans the full clip space; the canvas keeps its aspect via CSS
pub fn to_ndc(playfield: &Playfield, x: f32, y: f32) -> (f32, f32) {
    (
        x / playfield.width * 2.0 - 1.0,
        1.0 - y / playfield.height * 2.0,
    )
}
