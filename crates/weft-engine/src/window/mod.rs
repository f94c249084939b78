//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and drives an
//! [`App`](crate::core::App) once per frame.

mod controls;
mod runtime;

pub use controls::CameraControls;
pub use runtime::{Runtime, RuntimeConfig};
