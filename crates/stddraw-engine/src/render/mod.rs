//! GPU rendering subsystem.
//!
//! A repaint records `Surface` calls into a [`Frame`]: primitives are
//! tessellated on the CPU into colored triangles, text is kept as runs. The
//! [`Painter`] then replays the frame in one render pass, switching between the
//! mesh and glyph pipelines so paint order is preserved.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod atlas;
mod common;
mod ctx;
mod frame;
mod mesh;
mod painter;
mod polygons;
mod tessellate;
mod text;

pub(crate) use ctx::{RenderCtx, RenderTarget};
pub(crate) use frame::{Frame, FrameBuilder};
pub(crate) use painter::Painter;
pub(crate) use polygons::PolygonCache;
