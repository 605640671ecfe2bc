//! Window contract + the winit runtime that implements it.
//!
//! The contract (`Backend`, `NativeWindow`) is what the drawing facade
//! consumes; `WinitBackend` owns a winit event loop and a wgpu surface.

mod backend;
mod runtime;

pub use backend::{Backend, NativeWindow, PumpStatus, WindowConfig, Waker};
pub use runtime::{WinitBackend, WinitWindow};
