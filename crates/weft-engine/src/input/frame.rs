use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton, MouseWheelDelta};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys/buttons, pointer position).
/// `InputFrame` provides events and transition sets for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,

    /// Wheel deltas in arrival order.
    pub wheel: Vec<MouseWheelDelta>,

    /// Whether the pointer moved, entered or left this frame.
    pub pointer_changed: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.wheel.clear();
        self.pointer_changed = false;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Total vertical scroll this frame, in wheel lines.
    pub fn wheel_lines(&self, pixels_per_line: f32) -> f32 {
        self.wheel.iter().map(|d| d.lines_y(pixels_per_line)).sum()
    }
}
