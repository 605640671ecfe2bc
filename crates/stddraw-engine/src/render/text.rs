use std::ops::Range;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::text::FontSystem;

use super::atlas::{AtlasSlot, GlyphAtlas};
use super::common::{
    premul_alpha_blend, triangle_list_primitive, viewport_bgl_entry, GlyphVertex, ViewportUniform,
};
use super::frame::TextDraw;

/// Glyph renderer.
///
/// Each text run is laid out with fontdue and expanded into two textured
/// triangles per glyph, sampling coverage from the shared [`GlyphAtlas`].
/// Like the mesh renderer, all of a frame's glyph vertices are uploaded once
/// and drawn range by range.
pub(crate) struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    atlas: Option<GlyphAtlas>,
    sampler: Option<wgpu::Sampler>,
    viewport_ubo: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            atlas: None,
            sampler: None,
            viewport_ubo: None,
            bind_group: None,
            vertex_vbo: None,
            vertex_capacity: 0,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out every run and uploads the glyph vertices. Returns the vertex
    /// range of each run, indexed like `texts`; empty when nothing is drawable.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, texts: &[TextDraw], fonts: &FontSystem) -> Vec<Range<u32>> {
        if texts.is_empty() {
            return Vec::new();
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        let Some(atlas) = self.atlas.as_mut() else {
            return Vec::new();
        };

        let mut vertices: Vec<GlyphVertex> = Vec::new();
        let mut ranges = Vec::with_capacity(texts.len());

        for run in texts {
            let start = vertices.len() as u32;

            let Some(font) = fonts.get(run.font) else {
                log::warn!("no font loaded for {:?}; text skipped", run.font);
                ranges.push(start..start);
                continue;
            };

            let color = run.color.to_array();
            self.layout.reset(&LayoutSettings {
                x: run.origin.x,
                y: run.origin.y,
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&run.text, run.size, 0));

            for glyph in self.layout.glyphs() {
                if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
                    continue;
                }
                let Some(slot) = atlas.slot(ctx.queue, glyph.key, font) else {
                    continue;
                };
                let min = [glyph.x, glyph.y];
                let max = [glyph.x + glyph.width as f32, glyph.y + glyph.height as f32];
                vertices.extend_from_slice(&glyph_quad(min, max, slot, color));
            }

            ranges.push(start..vertices.len() as u32);
        }

        if vertices.is_empty() {
            return Vec::new();
        }

        self.ensure_vertex_capacity(ctx, vertices.len());
        let (Some(ubo), Some(vbo)) = (self.viewport_ubo.as_ref(), self.vertex_vbo.as_ref()) else {
            return Vec::new();
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));

        ranges
    }

    /// Draws `range` of the glyph vertices uploaded by the last `prepare`.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() {
            return;
        }
        let Some(pipeline)   = self.pipeline.as_ref()   else { return; };
        let Some(bind_group) = self.bind_group.as_ref() else { return; };
        let Some(vbo)        = self.vertex_vbo.as_ref() else { return; };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(range, 0..1);
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stddraw text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stddraw text bgl"),
            entries: &[
                viewport_bgl_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stddraw text pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stddraw text pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GlyphVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: triangle_list_primitive(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        // Bound against the old layout.
        self.bind_group = None;
    }

    /// Atlas, sampler and uniform are created once; the bind group follows
    /// the pipeline's layout.
    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        let atlas = self.atlas.get_or_insert_with(|| GlyphAtlas::new(ctx.device));
        let sampler = self.sampler.get_or_insert_with(|| {
            ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("stddraw text sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            })
        });
        let ubo = self.viewport_ubo.get_or_insert_with(|| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("stddraw text viewport ubo"),
                size: std::mem::size_of::<ViewportUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        if self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return; };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stddraw text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(384);
        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("stddraw text vertex vbo"),
            size: (new_cap * std::mem::size_of::<GlyphVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }
}

/// Two triangles covering `min..max`, mapped onto `slot`.
fn glyph_quad(min: [f32; 2], max: [f32; 2], slot: AtlasSlot, color: [f32; 4]) -> [GlyphVertex; 6] {
    let (u0, v0) = (slot.uv_min[0], slot.uv_min[1]);
    let (u1, v1) = (slot.uv_max[0], slot.uv_max[1]);
    let v = |x: f32, y: f32, u: f32, w: f32| GlyphVertex { pos: [x, y], uv: [u, w], color };

    let tl = v(min[0], min[1], u0, v0);
    let tr = v(max[0], min[1], u1, v0);
    let br = v(max[0], max[1], u1, v1);
    let bl = v(min[0], max[1], u0, v1);
    [tl, tr, br, tl, br, bl]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_quad_spans_the_box_and_the_slot() {
        let slot = AtlasSlot { uv_min: [0.0, 0.5], uv_max: [0.25, 1.0] };
        let quad = glyph_quad([10.0, 20.0], [18.0, 32.0], slot, [1.0, 0.0, 0.0, 1.0]);

        let corners: Vec<([f32; 2], [f32; 2])> = quad.iter().map(|v| (v.pos, v.uv)).collect();
        assert_eq!(corners[0], ([10.0, 20.0], [0.0, 0.5]));
        assert_eq!(corners[2], ([18.0, 32.0], [0.25, 1.0]));
        assert_eq!(corners[5], ([10.0, 32.0], [0.0, 1.0]));
        assert!(quad.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }
}
