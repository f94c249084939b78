use crate::input::{Key, KeyState, MouseButton};
use crate::raster::Camera;
use crate::scene::DrawBatch;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Per frame the runtime calls, in order: [`on_key`](App::on_key) and
/// [`on_mouse`](App::on_mouse) for each input event that arrived since the last frame,
/// then [`tick`](App::tick), then [`render`](App::render) into a cleared batch.
pub trait App {
    /// Camera the window opens with.
    fn initial_camera(&self) -> Camera {
        Camera::default()
    }

    /// Called once per frame after camera controls have been applied.
    fn tick(&mut self, ctx: &FrameCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Fills this frame's draw data. `batch` is empty on entry.
    fn render(&mut self, batch: &mut DrawBatch);

    fn on_key(&mut self, ctx: &FrameCtx<'_>, key: Key, state: KeyState, repeat: bool) -> AppControl {
        let _ = (ctx, key, state, repeat);
        AppControl::Continue
    }

    fn on_mouse(&mut self, ctx: &FrameCtx<'_>, button: MouseButton, state: KeyState) -> AppControl {
        let _ = (ctx, button, state);
        AppControl::Continue
    }
}
