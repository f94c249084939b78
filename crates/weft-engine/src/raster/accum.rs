//! Line accumulation: the blend formula and a CPU accumulation image.
//!
//! Accumulated values are premultiplied-style sums: each new contribution is laid over
//! the stored value with `stored * (1 - new.a) + new` on all four channels. What reaches
//! the color attachment is `(rgb * a, 1)`.

/// `accum * (1 - new.a) + new`, component-wise on RGBA.
#[inline]
pub fn accumulate(accum: [f32; 4], new: [f32; 4]) -> [f32; 4] {
    let keep = 1.0 - new[3];
    [
        accum[0] * keep + new[0],
        accum[1] * keep + new[1],
        accum[2] * keep + new[2],
        accum[3] * keep + new[3],
    ]
}

/// Color written to the attachment for an accumulated value.
#[inline]
pub fn display(accum: [f32; 4]) -> [f32; 4] {
    let a = accum[3];
    [accum[0] * a, accum[1] * a, accum[2] * a, 1.0]
}

/// One RGBA32F texel per target pixel, addressed by integer pixel coordinate.
///
/// Behaves like the storage texture it models: loads outside the image return zero and
/// stores outside the image are dropped. Contents persist until [`clear`](Self::clear).
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    texels: Vec<[f32; 4]>,
}

impl AccumulationBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texels: vec![[0.0; 4]; width as usize * height as usize],
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

    /// Reallocates for a new target size. Contents are reset to zero, as a recreated
    /// texture would be.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.texels.fill([0.0; 4]);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Texel at `(x, y)`; zero outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [f32; 4] {
        self.index(x, y).map_or([0.0; 4], |i| self.texels[i])
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: [f32; 4]) {
        if let Some(i) = self.index(x, y) {
            self.texels[i] = value;
        }
    }

    /// Read-modify-write of one texel. Returns the display color for the attachment.
    pub fn composite(&mut self, x: u32, y: u32, new: [f32; 4]) -> [f32; 4] {
        let accum = accumulate(self.get(x, y), new);
        self.set(x, y, accum);
        display(accum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── formula ───────────────────────────────────────────────────────────

    #[test]
    fn accumulate_is_exact_per_channel() {
        let old = [0.2, 0.4, 0.6, 0.8];
        let new = [0.1, 0.0, 0.5, 0.25];
        let out = accumulate(old, new);
        assert_eq!(out, [0.2 * 0.75 + 0.1, 0.4 * 0.75, 0.6 * 0.75 + 0.5, 0.8 * 0.75 + 0.25]);
    }

    #[test]
    fn opaque_contribution_replaces_accumulation() {
        assert_eq!(accumulate([0.3, 0.3, 0.3, 0.9], [0.0, 1.0, 0.0, 1.0]), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn transparent_contribution_adds() {
        assert_eq!(accumulate([0.25, 0.5, 0.0, 0.5], [0.25, 0.0, 0.0, 0.0]), [0.5, 0.5, 0.0, 0.5]);
    }

    #[test]
    fn display_multiplies_by_alpha_and_is_opaque() {
        assert_eq!(display([0.5, 1.0, 0.0, 0.75]), [0.375, 0.75, 0.0, 1.0]);
        assert_eq!(display([0.0; 4]), [0.0, 0.0, 0.0, 1.0]);
    }

    // ── buffer ────────────────────────────────────────────────────────────

    #[test]
    fn two_translucent_contributions_on_cleared_texel() {
        let mut buf = AccumulationBuffer::new(4, 4);
        buf.composite(1, 2, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(buf.get(1, 2), [1.0, 0.0, 0.0, 0.5]);

        let shown = buf.composite(1, 2, [0.0, 1.0, 0.0, 0.5]);
        assert_eq!(buf.get(1, 2), [0.5, 1.0, 0.0, 0.75]);
        assert_eq!(shown, [0.375, 0.75, 0.0, 1.0]);
    }

    #[test]
    fn texels_persist_until_cleared() {
        let mut buf = AccumulationBuffer::new(2, 2);
        buf.composite(0, 0, [0.5, 0.5, 0.5, 0.5]);
        buf.composite(1, 1, [0.5, 0.5, 0.5, 0.5]);
        assert_eq!(buf.get(0, 0), [0.5, 0.5, 0.5, 0.5]);

        buf.clear();
        assert_eq!(buf.get(0, 0), [0.0; 4]);
        assert_eq!(buf.get(1, 1), [0.0; 4]);
    }

    #[test]
    fn out_of_bounds_loads_zero_and_drops_stores() {
        let mut buf = AccumulationBuffer::new(2, 2);
        let shown = buf.composite(5, 0, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(shown, [0.5, 0.0, 0.0, 1.0]);
        assert_eq!(buf.get(5, 0), [0.0; 4]);
    }

    #[test]
    fn resize_resets_contents() {
        let mut buf = AccumulationBuffer::new(2, 2);
        buf.set(1, 1, [1.0; 4]);
        buf.resize(3, 1);
        assert_eq!((buf.width(), buf.height()), (3, 1));
        assert_eq!(buf.get(1, 0), [0.0; 4]);
        assert_eq!(buf.get(1, 1), [0.0; 4]);
    }
}
