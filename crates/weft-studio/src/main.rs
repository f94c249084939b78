use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use weft_engine::coords::Vec2;
use weft_engine::core::{App, AppControl, FrameCtx};
use weft_engine::device::GpuInit;
use weft_engine::input::{Key, KeyState, MouseButton};
use weft_engine::logging::{init_logging, LoggingConfig};
use weft_engine::paint::Color;
use weft_engine::raster::{Camera, LineInstance, ShapeInstance};
use weft_engine::scene::DrawBatch;
use weft_engine::window::{Runtime, RuntimeConfig};

const GRADIENT_BARS: u32 = 50;

/// Stress scene: keys regenerate large instance sets, WASD/wheel move the camera.
struct Studio {
    rng: SmallRng,
    shapes: Vec<ShapeInstance>,
    lines: Vec<LineInstance>,
    crosshair: bool,
}

impl Studio {
    fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
            shapes: Vec::new(),
            lines: Vec::new(),
            crosshair: true,
        }
    }

    fn rand(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Point in `[-1, 1]²`.
    fn rand_point(&mut self) -> Vec2 {
        Vec2::new(self.rand() * 2.0 - 1.0, self.rand() * 2.0 - 1.0)
    }

    fn rand_color(&mut self) -> Color {
        Color::rgb(self.rand(), self.rand(), self.rand())
    }

    /// Circles get larger toward the center of the square.
    fn random_circles(&mut self, amount: u32, random_color: bool) -> Vec<ShapeInstance> {
        (0..amount)
            .map(|_| {
                let center = self.rand_point();
                let distance = center.length() * std::f32::consts::FRAC_1_SQRT_2;
                let color = if random_color { self.rand_color() } else { Color::ORANGE };
                let radius = self.rand() * 0.01 * lerp(3.0, 0.6, distance);
                ShapeInstance::circle(center, radius, color)
            })
            .collect()
    }

    fn random_lines(&mut self, amount: u32) -> Vec<LineInstance> {
        (0..amount)
            .map(|_| {
                let start = self.rand_point();
                let end = self.rand_point();
                let color = self.rand_color();
                LineInstance::new(start, end, color)
            })
            .collect()
    }

    /// Faint red chords of the unit circle; overlap builds up where chords cross.
    fn the_sun(&mut self, amount: u32) -> Vec<LineInstance> {
        (0..amount)
            .map(|_| {
                let [start, end] = [(); 2].map(|_| {
                    let theta = self.rand() * std::f32::consts::TAU;
                    Vec2::new(theta.cos(), theta.sin())
                });
                LineInstance::new(start, end, Color::RED.with_alpha(0.01))
            })
            .collect()
    }

    /// Red to yellow bars filling `[0, 1] × [-1, 1]`.
    fn gradient_bars() -> Vec<ShapeInstance> {
        let half_width = 0.5 / GRADIENT_BARS as f32;
        (0..GRADIENT_BARS)
            .filter_map(|i| {
                let value = i as f32 / GRADIENT_BARS as f32;
                let color = Color::rgb(1.0, value, 0.0);
                ShapeInstance::rect(Vec2::new(value, 0.0), Vec2::new(half_width, 1.0), color).ok()
            })
            .collect()
    }
}

impl App for Studio {
    fn initial_camera(&self) -> Camera {
        Camera::new(Vec2::ZERO, 0.9)
    }

    fn render(&mut self, batch: &mut DrawBatch) {
        batch.extend_shapes(self.shapes.iter().copied());
        batch.extend_lines(self.lines.iter().copied());

        if self.crosshair {
            let white = Color::WHITE;
            batch.push_overlay(ShapeInstance::circle(Vec2::ZERO, 0.006, white));
            for half in [Vec2::new(0.03, 0.002), Vec2::new(0.002, 0.03)] {
                if let Ok(bar) = ShapeInstance::rect(Vec2::ZERO, half, white) {
                    batch.push_overlay(bar);
                }
            }
        }
    }

    fn on_key(&mut self, ctx: &FrameCtx<'_>, key: Key, state: KeyState, repeat: bool) -> AppControl {
        if state != KeyState::Pressed || repeat {
            return AppControl::Continue;
        }

        let shift = ctx.key_down(Key::Shift);
        let ctrl = ctx.key_down(Key::Control);

        match key {
            Key::Escape => return AppControl::Exit,
            Key::Enter => log::info!("fps: {}", ctx.fps),
            Key::Digit1 => {
                let amount = if shift { 1_000_000 } else { 1_000 };
                self.shapes = self.random_circles(amount, ctrl);
                log::info!("{amount} circles");
            }
            Key::Digit2 => {
                let amount = if shift { 100_000 } else { 1_000 };
                self.lines = if ctrl { self.the_sun(amount) } else { self.random_lines(amount) };
                log::info!("{amount} lines");
            }
            Key::T => self.shapes = Self::gradient_bars(),
            Key::C => self.crosshair = !self.crosshair,
            _ => {}
        }
        AppControl::Continue
    }

    fn on_mouse(&mut self, ctx: &FrameCtx<'_>, button: MouseButton, state: KeyState) -> AppControl {
        if button == MouseButton::Left && state == KeyState::Pressed {
            if let Some(world) = ctx.pointer_world() {
                let radius = 0.02 / ctx.camera_zoom();
                self.shapes.push(ShapeInstance::circle(world, radius, Color::CYAN));
                log::debug!("circle at ({:.3}, {:.3})", world.x, world.y);
            }
        }
        AppControl::Continue
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (1.0 - t) * from + t * to
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "weft studio".to_string(),
        clear_color: Color::BLACK,
        use_line_alpha: true,
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), Studio::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_bars_tile_the_unit_width() {
        let bars = Studio::gradient_bars();
        assert_eq!(bars.len(), GRADIENT_BARS as usize);
        assert!(bars.iter().all(|b| !b.is_circle()));
        assert_eq!(bars[0].color, [1.0, 0.0, 0.0]);
        // Neighbours touch: spacing equals the full bar width.
        let spacing = bars[1].offset.x - bars[0].offset.x;
        assert!((spacing - 2.0 * bars[0].size.x).abs() < 1e-6);
    }

    #[test]
    fn sun_chords_lie_on_the_unit_circle() {
        let mut studio = Studio::new();
        for line in studio.the_sun(32) {
            assert!((line.start.length() - 1.0).abs() < 1e-4);
            assert!((line.end.length() - 1.0).abs() < 1e-4);
            assert!((line.color[3] - 0.01).abs() < 1e-6);
        }
    }

    #[test]
    fn circles_stay_in_the_square_with_bounded_radius() {
        let mut studio = Studio::new();
        for c in studio.random_circles(200, false) {
            assert!(c.is_circle());
            assert!(c.offset.x.abs() <= 1.0 && c.offset.y.abs() <= 1.0);
            assert!(c.size.x >= 0.0 && c.size.x <= 0.03);
        }
    }
}
