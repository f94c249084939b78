//! GPU rendering subsystem.
//!
//! Renderers upload instance records from a [`DrawBatch`](crate::scene::DrawBatch) and
//! run the WGSL counterparts of the `raster` stages.
//!
//! Bind group convention shared by every pipeline:
//! - group 0: instance storage
//! - group 1: camera + aspect uniforms (camera pipelines only)
//! - group 2: line accumulation texture + `use_alpha`

mod camera;
mod ctx;
mod renderer;
mod shaders;
mod storage;

pub mod shapes;

pub use camera::CameraUniforms;
pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::{Renderer, RendererOptions};
pub use shaders::ShaderKind;
pub use storage::DynamicStorageBuffer;
