//! Weft engine crate.
//!
//! Instanced rect/circle/line rasterization on wgpu, with order-dependent alpha
//! accumulation for lines, plus the window runtime that drives it.
//!
//! `raster` holds the CPU reference stages; `render` holds their GPU counterparts.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod render;
pub mod scene;
