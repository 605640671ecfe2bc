//! Glyph atlas: one R8 coverage texture filled shelf by shelf.

use std::collections::HashMap;

use fontdue::layout::GlyphRasterConfig;

pub(super) const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1;

/// Row-by-row rectangle allocator. Rows ("shelves") are as tall as the
/// tallest glyph placed in them; nothing is ever freed.
#[derive(Debug)]
pub(super) struct ShelfPacker {
    size: u32,
    padding: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    pub fn new(size: u32, padding: u32) -> Self {
        Self {
            size,
            padding,
            cursor_x: padding,
            cursor_y: padding,
            row_height: 0,
            full: false,
        }
    }

    /// Top-left corner for a `w`×`h` rectangle, or `None` once the texture is
    /// exhausted. A failed allocation leaves the packer full.
    pub fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }
        if self.cursor_x + w + self.padding > self.size {
            self.cursor_y += self.row_height + self.padding;
            self.cursor_x = self.padding;
            self.row_height = 0;
        }
        if self.cursor_x + w + self.padding > self.size || self.cursor_y + h + self.padding > self.size {
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + self.padding;
        self.row_height = self.row_height.max(h);
        Some(at)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }
}

/// Normalized texture rectangle of a cached glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct AtlasSlot {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

impl AtlasSlot {
    fn new(x: u32, y: u32, w: u32, h: u32, atlas_size: u32) -> Self {
        let s = atlas_size as f32;
        Self {
            uv_min: [x as f32 / s, y as f32 / s],
            uv_max: [(x + w) as f32 / s, (y + h) as f32 / s],
        }
    }
}

/// GPU texture plus the glyph → slot cache.
///
/// Glyphs are rasterized with fontdue the first time they are requested.
/// A glyph that did not fit is remembered as `None` so it is not rasterized
/// again every frame.
pub(super) struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    slots: HashMap<GlyphRasterConfig, Option<AtlasSlot>>,
}

impl GlyphAtlas {
    pub fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("stddraw glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            packer: ShelfPacker::new(ATLAS_SIZE, GLYPH_PADDING),
            slots: HashMap::new(),
        }
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Slot for `key`, rasterizing and uploading it on first use.
    pub fn slot(&mut self, queue: &wgpu::Queue, key: GlyphRasterConfig, font: &fontdue::Font) -> Option<AtlasSlot> {
        if let Some(slot) = self.slots.get(&key) {
            return *slot;
        }

        let slot = self.rasterize(queue, key, font);
        self.slots.insert(key, slot);
        slot
    }

    fn rasterize(&mut self, queue: &wgpu::Queue, key: GlyphRasterConfig, font: &fontdue::Font) -> Option<AtlasSlot> {
        let (metrics, bitmap) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        if w == 0 || h == 0 {
            return None;
        }

        let was_full = self.packer.is_full();
        let Some((x, y)) = self.packer.allocate(w, h) else {
            if !was_full {
                log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); further glyphs are dropped");
            }
            return None;
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        Some(AtlasSlot::new(x, y, w, h, ATLAS_SIZE))
    }
}
