//! GPU device + surface management.
//!
//! `Gpu` owns the wgpu device/queue and the window's configured surface, and
//! drives one frame at a time through [`Gpu::draw_frame`].

mod gpu;
mod init;
mod surface;

pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
