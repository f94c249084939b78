use crate::coords::{Vec2, Viewport};
use crate::input::{InputFrame, InputState, Key, Modifiers, MouseButton};
use crate::raster::{Camera, CameraTransform};
use crate::time::FrameTime;

/// Per-frame read-only view passed to [`App`](super::App) callbacks.
///
/// Lifetime `'a` is the duration of the frame's callbacks.
pub struct FrameCtx<'a> {
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    /// Frames presented in the trailing second.
    pub fps: usize,

    camera: Camera,
    viewport: Viewport,
    pointer_world: Option<Vec2>,
}

impl<'a> FrameCtx<'a> {
    pub fn new(
        input: &'a InputState,
        input_frame: &'a InputFrame,
        time: FrameTime,
        fps: usize,
        camera: Camera,
        viewport: Viewport,
    ) -> Self {
        let pointer_world = pointer_to_world(input.pointer_pos, camera, viewport);
        Self {
            input,
            input_frame,
            time,
            fps,
            camera,
            viewport,
            pointer_world,
        }
    }

    // ── keyboard ──

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    /// Went down since the previous frame.
    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.input_frame.keys_pressed.contains(&key)
    }

    #[inline]
    pub fn key_released(&self, key: Key) -> bool {
        self.input_frame.keys_released.contains(&key)
    }

    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.input.modifiers
    }

    // ── mouse ──

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.input.button_down(button)
    }

    #[inline]
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.input_frame.buttons_pressed.contains(&button)
    }

    #[inline]
    pub fn button_released(&self, button: MouseButton) -> bool {
        self.input_frame.buttons_released.contains(&button)
    }

    /// Pointer position in physical pixels, top-left origin. `None` outside the window.
    #[inline]
    pub fn pointer_screen(&self) -> Option<Vec2> {
        self.input.pointer_pos
    }

    /// World position under the pointer for this frame's camera and size.
    #[inline]
    pub fn pointer_world(&self) -> Option<Vec2> {
        self.pointer_world
    }

    // ── camera ──

    #[inline]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[inline]
    pub fn camera_aim(&self) -> Vec2 {
        self.camera.aim
    }

    #[inline]
    pub fn camera_zoom(&self) -> f32 {
        self.camera.zoom
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn transform(&self) -> CameraTransform {
        CameraTransform::for_viewport(self.camera, self.viewport)
    }

    /// Seconds since the previous frame.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt
    }
}

/// World position under `pointer`, or `None` without a pointer or a usable transform.
pub fn pointer_to_world(pointer: Option<Vec2>, camera: Camera, viewport: Viewport) -> Option<Vec2> {
    if !viewport.is_valid() {
        return None;
    }
    let pointer = pointer?;
    CameraTransform::for_viewport(camera, viewport).screen_to_world(pointer, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, KeyState};
    use crate::time::FrameClock;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn pointer_at_center_is_camera_aim() {
        let viewport = Viewport::new(800.0, 400.0);
        let camera = Camera::new(Vec2::new(3.0, -1.0), 2.0);
        let world = pointer_to_world(Some(Vec2::new(400.0, 200.0)), camera, viewport).unwrap();
        assert!(approx(world, camera.aim));
    }

    #[test]
    fn pointer_world_follows_zoom_and_aspect() {
        // 800x400: x is squeezed by 0.5, so the right edge is 2 world units away at zoom 1.
        let viewport = Viewport::new(800.0, 400.0);
        let right_edge = Some(Vec2::new(800.0, 200.0));

        let world = pointer_to_world(right_edge, Camera::default(), viewport).unwrap();
        assert!(approx(world, Vec2::new(2.0, 0.0)));

        let zoomed = pointer_to_world(right_edge, Camera::new(Vec2::ZERO, 4.0), viewport).unwrap();
        assert!(approx(zoomed, Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn no_pointer_or_empty_viewport_has_no_world_position() {
        let camera = Camera::default();
        assert!(pointer_to_world(None, camera, Viewport::new(10.0, 10.0)).is_none());
        assert!(pointer_to_world(Some(Vec2::ZERO), camera, Viewport::new(0.0, 10.0)).is_none());
        assert!(pointer_to_world(Some(Vec2::ZERO), Camera::new(Vec2::ZERO, 0.0), Viewport::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn queries_read_state_and_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Key { key: Key::Shift, state: KeyState::Pressed, repeat: false });
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 5.0, y: 5.0 });

        let time = FrameClock::new().tick();
        let ctx = FrameCtx::new(&state, &frame, time, 60, Camera::default(), Viewport::new(10.0, 10.0));

        assert!(ctx.key_down(Key::Shift));
        assert!(ctx.key_pressed(Key::Shift));
        assert!(!ctx.key_released(Key::Shift));
        assert!(!ctx.button_down(MouseButton::Left));
        assert_eq!(ctx.pointer_screen(), Some(Vec2::new(5.0, 5.0)));
        assert!(approx(ctx.pointer_world().unwrap(), Vec2::ZERO));
        assert_eq!(ctx.fps, 60);
        assert_eq!(ctx.camera_zoom(), 1.0);
    }
}
