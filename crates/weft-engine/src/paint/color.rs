/// Linear straight-alpha RGBA color.
///
/// Shape instances drop alpha entirely (shapes are always opaque). Line instances
/// built through [`LineInstance::new`](crate::raster::LineInstance::new) store the
/// premultiplied form, which is what the accumulation formula expects.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

macro_rules! color_constants {
    ($($name:ident ($r:expr, $g:expr, $b:expr))*) => {
        impl Color {
            $(
            pub const $name: Self = Self::rgb($r, $g, $b);
            )*
        }
    };
}

// sRGB 0.5 in linear space.
const HALF: f32 = 0.214_041_14;

color_constants! {
    BLACK      (0.0, 0.0, 0.0)
    WHITE      (1.0, 1.0, 1.0)
    DARK_GRAY  (0.25, 0.25, 0.25)
    GRAY       (0.5, 0.5, 0.5)
    LIGHT_GRAY (0.75, 0.75, 0.75)

    RED       (1.0, 0.0, 0.0)
    YELLOW    (1.0, 1.0, 0.0)
    GREEN     (0.0, 1.0, 0.0)
    CYAN      (0.0, 1.0, 1.0)
    PURE_BLUE (0.0, 0.0, 1.0)
    MAGENTA   (1.0, 0.0, 1.0)

    ORANGE (1.0, HALF, 0.0)
    BLUE   (0.0, HALF, 1.0)
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Opaque color from sRGB-encoded bytes.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8) -> Self {
        let lin = |c: u8| srgb_to_linear(c as f32 / 255.0);
        Self::rgb(lin(r), lin(g), lin(b))
    }

    #[inline]
    pub const fn to_rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `rgb * a, a`.
    #[inline]
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// sRGB transfer function, decoded to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplied_scales_rgb_only() {
        let c = Color::new(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c.premultiplied(), [0.5, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn srgb_half_matches_orange_green_channel() {
        assert!((srgb_to_linear(0.5) - Color::ORANGE.g).abs() < 1e-5);
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn from_srgb_u8_is_opaque() {
        let c = Color::from_srgb_u8(255, 0, 128);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
    }
}
