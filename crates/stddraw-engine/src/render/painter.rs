use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::text::FontSystem;

use super::frame::{Frame, Segment};
use super::mesh::MeshRenderer;
use super::text::TextRenderer;

/// Replays a recorded [`Frame`] in a single render pass.
#[derive(Default)]
pub(crate) struct Painter {
    mesh: MeshRenderer,
    text: TextRenderer,
}

impl Painter {
    pub fn new() -> Self {
        Self { mesh: MeshRenderer::new(), text: TextRenderer::new() }
    }

    pub fn paint(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &Frame,
        fonts: &FontSystem,
        clear: Color,
    ) {
        // All uploads happen before the pass records any draw.
        let has_mesh = self.mesh.prepare(ctx, &frame.vertices);
        let text_ranges = self.text.prepare(ctx, &frame.texts, fonts);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("stddraw frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: clear.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for segment in &frame.segments {
            match segment {
                Segment::Mesh(range) if has_mesh => self.mesh.draw(&mut rpass, range.clone()),
                Segment::Mesh(_) => {}
                Segment::Text(runs) => {
                    let Some(first) = text_ranges.get(runs.start) else { continue; };
                    let Some(last) = text_ranges.get(runs.end - 1) else { continue; };
                    self.text.draw(&mut rpass, first.start..last.end);
                }
            }
        }
    }
}
