use crate::coords::{Vec2, Viewport};
use crate::paint::Color;

use super::accum::AccumulationBuffer;
use super::camera::CameraTransform;
use super::line::{self, LineInstance, LineMode};
use super::shape::{self, ShapeInstance};

/// CPU framebuffer that runs the reference stages end to end.
///
/// Pixel `(x, y)` has its center at `(x + 0.5, y + 0.5)`, top-left origin. A shape covers
/// a pixel when the center's world position lies in the instance quad (half-open). The
/// quad's right and top edges follow that rasterizer rule, so a center exactly on a
/// circle's rightmost point is not shaded even though the circle test itself is inclusive.
/// Lines are clipped to the target, then stepped along their major axis, one pixel per
/// step, endpoints included. Pixels no primitive writes keep the clear color.
#[derive(Debug, Clone)]
pub struct SoftwareTarget {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
    accum: AccumulationBuffer,
}

impl SoftwareTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
            accum: AccumulationBuffer::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport::from_physical(self.width, self.height)
    }

    #[inline]
    pub fn accumulation(&self) -> &AccumulationBuffer {
        &self.accum
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_array());
    }

    pub fn clear_accumulation(&mut self) {
        self.accum.clear();
    }

    /// Color at `(x, y)`, `None` outside the target.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[inline]
    fn write(&mut self, x: u32, y: u32, color: [f32; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Draws every instance in order, later instances over earlier ones.
    pub fn draw_shapes(&mut self, instances: &[ShapeInstance], camera: &CameraTransform) {
        let viewport = self.viewport();
        if !viewport.is_valid() || !camera.is_invertible() {
            return;
        }

        for instance_index in 0..instances.len() as u32 {
            let corners: [Vec2; 4] = core::array::from_fn(|v| {
                let clip = shape::vertex(instances, v as u32, instance_index, camera).clip_xy();
                viewport.ndc_to_pixel(clip)
            });
            let Some((x0, y0, x1, y1)) = self.pixel_span(&corners) else {
                continue;
            };
            let quad = instances[instance_index as usize].bounds();

            for y in y0..y1 {
                for x in x0..x1 {
                    let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let Some(world) = camera.screen_to_world(center, viewport) else {
                        continue;
                    };
                    if !quad.contains(world) {
                        continue;
                    }
                    if let Some(color) = shape::fragment(instances, world, instance_index).color() {
                        self.write(x, y, color);
                    }
                }
            }
        }
    }

    /// Pixel rectangle `[x0, x1) × [y0, y1)` enclosing `points`, clamped to the target.
    fn pixel_span(&self, points: &[Vec2]) -> Option<(u32, u32, u32, u32)> {
        let (mut min, mut max) = (points[0], points[0]);
        for p in &points[1..] {
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }
        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    // ── lines ─────────────────────────────────────────────────────────────

    /// Draws every line in order. Fragments are processed serially, so accumulation
    /// follows primitive submission order exactly.
    pub fn draw_lines(&mut self, instances: &[LineInstance], camera: &CameraTransform, mode: LineMode) {
        let viewport = self.viewport();
        if !viewport.is_valid() {
            return;
        }

        for instance_index in 0..instances.len() as u32 {
            let a = viewport.ndc_to_pixel(line::vertex(instances, 0, instance_index, camera).clip_xy());
            let b = viewport.ndc_to_pixel(line::vertex(instances, 1, instance_index, camera).clip_xy());
            if !a.is_finite() || !b.is_finite() {
                continue;
            }

            let a = [f64::from(a.x), f64::from(a.y)];
            let b = [f64::from(b.x), f64::from(b.y)];
            let Some((a, b)) = clip_segment(a, b, f64::from(self.width), f64::from(self.height)) else {
                continue;
            };

            let delta = [b[0] - a[0], b[1] - a[1]];
            let steps = delta[0].abs().max(delta[1].abs()).ceil() as u32;
            let mut last = None;

            for k in 0..=steps {
                let t = if steps == 0 { 0.0 } else { f64::from(k) / f64::from(steps) };
                let x = (a[0] + delta[0] * t).max(0.0);
                let y = (a[1] + delta[1] * t).max(0.0);
                let px = (x.floor() as u32, y.floor() as u32);
                if last == Some(px) || self.index(px.0, px.1).is_none() {
                    continue;
                }
                last = Some(px);

                let color = line::fragment(instances, instance_index, px, mode, &mut self.accum);
                self.write(px.0, px.1, color);
            }
        }
    }

    /// Resizes both images. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }
}

/// Liang-Barsky clip of the pixel-space segment `a -> b` to `[0, width] × [0, height]`.
fn clip_segment(a: [f64; 2], b: [f64; 2], width: f64, height: f64) -> Option<([f64; 2], [f64; 2])> {
    let d = [b[0] - a[0], b[1] - a[1]];
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [(-d[0], a[0]), (d[0], width - a[0]), (-d[1], a[1]), (d[1], height - a[1])] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }

    (t0 <= t1).then(|| {
        (
            [a[0] + d[0] * t0, a[1] + d[1] * t0],
            [a[0] + d[0] * t1, a[1] + d[1] * t1],
        )
    })
}
