pub mod atlas;
pub mod pipeline;
pub mod sprite_atlas;
pub mod text;
pub mod utils;

use std::path::Path;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use atlas::PackedAtlas;
use pipeline::{MODE_TEXTURED, TilePipeline, TileVertex, create_tile_pipeline, overlay_projection, push_quad, push_solid};
use sprite_atlas::SpriteAtlas;
use text::{Font, text_quads};
use utils::{Viewport, letterbox_viewport};

use crate::compose::{Color, Frame};
use crate::error::{Result, ViewError};

/// Flatten a composed frame into triangles, back to front.
///
/// Tiles whose sheet or rectangle is not in the atlas are skipped.
pub fn frame_vertices(frame: &Frame, atlas: &PackedAtlas, font: &Font) -> Vec<TileVertex> {
    let mut out = Vec::with_capacity((frame.tiles.len() + frame.rects.len()) * 6);
    for draw in &frame.tiles {
        if let Some(uv) = atlas.uv_for(&draw.tile) {
            push_quad(&mut out, draw.dest, uv, Color::WHITE, MODE_TEXTURED);
        }
    }
    for draw in &frame.rects {
        push_solid(&mut out, draw.rect, draw.color);
    }
    for draw in &frame.texts {
        text_quads(draw, font, atlas, &mut out);
    }
    out
}

/// Everything that only exists once loading has finished.
struct Assets {
    atlas: SpriteAtlas,
    font: Font,
    bind_group: wgpu::BindGroup,
}

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    tile_pipeline: TilePipeline,
    projection_bind_group: wgpu::BindGroup,
    /// `None` until [`load_assets`](Self::load_assets) succeeds; frames are
    /// cleared but nothing is drawn in the meantime.
    assets: Option<Assets>,
    /// Persistent vertex buffer; reallocated only when it has to grow.
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: u32,
    /// FNV-1a hash of the last uploaded vertex bytes.
    vertex_hash: u64,
    /// Overlay units along one side of the view.
    cells: f32,
}

/// FNV-1a 64-bit hash, used to skip uploading an unchanged frame.
fn fnv1a_64(data: &[u8]) -> u64 {
    data.iter().fold(14695981039346656037u64, |h, &b| {
        h.wrapping_mul(1099511628211) ^ b as u64
    })
}

impl Renderer {
    pub async fn new(window: Arc<Window>, cells: u32) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|e| ViewError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(|_| ViewError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .map_err(|e| ViewError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| ViewError::Surface("surface reports no formats".into()))?;
        let alpha_mode = caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let tile_pipeline = create_tile_pipeline(&device, format);

        let cells = cells.max(1) as f32;
        let proj = overlay_projection(cells);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &tile_pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        tracing::info!(?format, w = config.width, h = config.height, "renderer ready");
        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            tile_pipeline,
            projection_bind_group,
            assets: None,
            vertex_buffer: None,
            vertex_capacity: 0,
            vertex_hash: 0,
            cells,
        })
    }

    /// Load every sheet and the font from `dir`. Called once; drawing starts
    /// only after it succeeds.
    pub fn load_assets(&mut self, dir: &Path) -> Result<()> {
        let atlas = SpriteAtlas::load_folder(&self.device, &self.queue, dir)?;
        let font = Font::load(dir)?;

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite_atlas_bg"),
            layout: &self.tile_pipeline.atlas_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas.texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });

        self.assets = Some(Assets { atlas, font, bind_group });
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.assets.is_some()
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Letterboxed square the view occupies in the window.
    pub fn viewport(&self) -> Viewport {
        letterbox_viewport(self.config.width, self.config.height)
    }

    pub fn cells(&self) -> f32 {
        self.cells
    }

    /// Draw one composed frame. Before assets are loaded this only clears.
    pub fn render(&mut self, frame: &Frame) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let vertices = match &self.assets {
            Some(assets) => frame_vertices(frame, &assets.atlas.packed, &assets.font),
            None => Vec::new(),
        };
        self.upload(&vertices);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let vp = self.viewport();
            if let (Some(assets), Some(vbuf)) = (&self.assets, &self.vertex_buffer)
                && !vertices.is_empty()
                && vp.width > 0.0
            {
                let count = vertices.len() as u32;
                let byte_len = (count as usize * std::mem::size_of::<TileVertex>()) as u64;
                pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);
                pass.set_pipeline(&self.tile_pipeline.render_pipeline);
                pass.set_bind_group(0, &self.projection_bind_group, &[]);
                pass.set_bind_group(1, &assets.bind_group, &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..byte_len));
                pass.draw(0..count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn upload(&mut self, vertices: &[TileVertex]) {
        if vertices.is_empty() {
            return;
        }
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let hash = fnv1a_64(bytes);
        let count = vertices.len() as u32;

        if count > self.vertex_capacity || self.vertex_buffer.is_none() {
            let capacity = count.next_power_of_two().max(1024);
            self.vertex_buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("frame_vertex_buffer"),
                size: capacity as u64 * std::mem::size_of::<TileVertex>() as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = capacity;
            self.vertex_hash = !hash;
        }

        if hash != self.vertex_hash
            && let Some(buf) = &self.vertex_buffer
        {
            self.queue.write_buffer(buf, 0, bytes);
            self.vertex_hash = hash;
        }
    }
}
