//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! applications built on it, and the per-frame context they read.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{pointer_to_world, FrameCtx};
