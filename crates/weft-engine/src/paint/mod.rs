//! Color model shared by instance records, the software target and the clear pass.

mod color;

pub use color::{srgb_to_linear, Color};
