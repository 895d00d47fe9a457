use crate::compose::Color;
use crate::geometry::Rect;

/// Sample the atlas and tint it.
pub const MODE_TEXTURED: f32 = 0.0;
/// Ignore the atlas; fill with the vertex color.
pub const MODE_SOLID: f32 = 1.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileVertex {
    /// Overlay units: one unit per view cell, origin top-left.
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
    /// [`MODE_TEXTURED`] or [`MODE_SOLID`].
    pub mode: f32,
}

impl TileVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2,  // position
        1 => Float32x2,  // uv
        2 => Float32x4,  // color
        3 => Float32,    // mode
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TileVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Append the six vertices (two triangles) covering `dest`.
pub fn push_quad(
    out: &mut Vec<TileVertex>,
    dest: Rect,
    (uv_min, uv_max): ([f32; 2], [f32; 2]),
    color: Color,
    mode: f32,
) {
    let v = |x: f32, y: f32, u: f32, w: f32| TileVertex { position: [x, y], uv: [u, w], color: color.0, mode };
    let tl = v(dest.x0, dest.y0, uv_min[0], uv_min[1]);
    let tr = v(dest.x1, dest.y0, uv_max[0], uv_min[1]);
    let bl = v(dest.x0, dest.y1, uv_min[0], uv_max[1]);
    let br = v(dest.x1, dest.y1, uv_max[0], uv_max[1]);
    out.extend_from_slice(&[tl, tr, bl, tr, br, bl]);
}

pub fn push_solid(out: &mut Vec<TileVertex>, dest: Rect, color: Color) {
    push_quad(out, dest, ([0.0, 0.0], [0.0, 0.0]), color, MODE_SOLID);
}

pub struct TilePipeline {
    pub render_pipeline: wgpu::RenderPipeline,
    pub projection_bind_group_layout: wgpu::BindGroupLayout,
    pub atlas_bind_group_layout: wgpu::BindGroupLayout,
}

pub fn create_tile_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
) -> TilePipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("tile_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shader.wgsl").into()),
    });

    let projection_bind_group_layout =
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("projection_bgl"),
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

    let atlas_bind_group_layout =
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("atlas_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("tile_pipeline_layout"),
        bind_group_layouts: &[&projection_bind_group_layout, &atlas_bind_group_layout],
        ..Default::default()
    });

    let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("tile_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[TileVertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    TilePipeline { render_pipeline, projection_bind_group_layout, atlas_bind_group_layout }
}

/// Column-major projection mapping overlay units `[0, cells]²` (y down) to clip space.
pub fn overlay_projection(cells: f32) -> [[f32; 4]; 4] {
    glam::Mat4::orthographic_rh(0.0, cells, cells, 0.0, -1.0, 1.0).to_cols_array_2d()
}
