//! stddraw engine crate.
//!
//! This crate owns the platform + GPU pieces the drawing facade sits on:
//! the narrow `Surface` / `Backend` contracts, the winit + wgpu backend that
//! implements them, and a headless backend for tests and CI.

pub mod device;
pub mod window;
pub mod headless;
pub mod surface;
pub mod text;

pub mod logging;
pub mod coords;
pub mod paint;

mod error;
mod render;

pub use error::EngineError;
