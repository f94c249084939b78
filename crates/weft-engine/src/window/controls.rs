use crate::coords::Vec2;
use crate::input::{InputFrame, InputState, Key};
use crate::raster::Camera;

const MOVE_KEYS: [(Key, Vec2); 4] = [
    (Key::W, Vec2::UP),
    (Key::A, Vec2::LEFT),
    (Key::S, Vec2::DOWN),
    (Key::D, Vec2::RIGHT),
];

/// Built-in camera navigation: WASD pans, the wheel zooms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraControls {
    /// World units per frame at zoom 1, per held direction key.
    pub move_speed: f32,
    /// Zoom multiplier per wheel line.
    pub zoom_rate: f32,
    /// Pan speed multiplier while Shift is held.
    pub fast_multiplier: f32,
    /// Pixel wheel deltas are divided by this to get lines.
    pub pixels_per_line: f32,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self {
            move_speed: 0.01,
            zoom_rate: 1.1,
            fast_multiplier: 5.0,
            pixels_per_line: 14.0,
        }
    }
}

impl CameraControls {
    /// Sum of the directions of the held WASD keys. Opposite keys cancel out.
    pub fn move_direction(input: &InputState) -> Vec2 {
        MOVE_KEYS
            .iter()
            .filter(|(key, _)| input.key_down(*key))
            .fold(Vec2::ZERO, |acc, &(_, dir)| acc + dir)
    }

    /// Pans `camera` by the held keys; the step shrinks as zoom grows so the on-screen
    /// speed stays constant. Returns whether the camera moved.
    pub fn apply_movement(&self, camera: &mut Camera, input: &InputState) -> bool {
        let dir = Self::move_direction(input);
        if dir == Vec2::ZERO || camera.zoom == 0.0 {
            return false;
        }

        let mult = if input.key_down(Key::Shift) {
            self.fast_multiplier
        } else {
            1.0
        };
        camera.aim += dir * (self.move_speed / camera.zoom * mult);
        true
    }

    /// `zoom_rate ^ lines`.
    #[inline]
    pub fn zoom_factor(&self, lines: f32) -> f32 {
        self.zoom_rate.powf(lines)
    }

    /// Applies this frame's wheel input. Returns whether the zoom changed.
    pub fn apply_zoom(&self, camera: &mut Camera, frame: &InputFrame) -> bool {
        let lines = frame.wheel_lines(self.pixels_per_line);
        if lines == 0.0 {
            return false;
        }
        camera.zoom *= self.zoom_factor(lines);
        true
    }

    /// Movement then zoom. Returns whether the camera changed.
    pub fn apply(&self, camera: &mut Camera, input: &InputState, frame: &InputFrame) -> bool {
        let moved = self.apply_movement(camera, input);
        let zoomed = self.apply_zoom(camera, frame);
        moved || zoomed
    }
}
