//! Hue/saturation/lightness colors and their RGB conversions.

use glam::Vec3;

/// A color in hue/saturation/lightness form, each component nominally in `[0, 1]`.
///
/// Conversion wraps the hue (so `1.05` and `0.05` are the same hue) and clamps
/// saturation and lightness. The RGB result is in sRGB space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue as a fraction of a full turn.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Lightness.
    pub l: f32,
}

impl Hsl {
    /// Create a new HSL triple.
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Convert to sRGB, each channel in `[0, 1]`.
    pub fn to_srgb(self) -> Vec3 {
        let h = self.h.rem_euclid(1.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Vec3::splat(l);
        }

        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Vec3::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Convert to linear-light RGB for shading.
    pub fn to_linear(self) -> Vec3 {
        srgb_to_linear(self.to_srgb())
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

/// Decode a `0xRRGGBB` literal into sRGB channels in `[0, 1]`.
pub fn srgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Apply the sRGB electro-optical transfer function per channel.
pub fn srgb_to_linear(c: Vec3) -> Vec3 {
    fn channel(v: f32) -> f32 {
        if v < 0.04045 {
            v * 0.077_399_38
        } else {
            (v * 0.947_867_3 + 0.052_132_7).powf(2.4)
        }
    }
    Vec3::new(channel(c.x), channel(c.y), channel(c.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_primary_hues() {
        assert!(approx(Hsl::new(0.0, 1.0, 0.5).to_srgb(), Vec3::new(1.0, 0.0, 0.0)));
        assert!(approx(
            Hsl::new(1.0 / 3.0, 1.0, 0.5).to_srgb(),
            Vec3::new(0.0, 1.0, 0.0)
        ));
        assert!(approx(
            Hsl::new(2.0 / 3.0, 1.0, 0.5).to_srgb(),
            Vec3::new(0.0, 0.0, 1.0)
        ));
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        let c = Hsl::new(0.37, 0.0, 0.25).to_srgb();
        assert!(approx(c, Vec3::splat(0.25)));
    }

    #[test]
    fn test_hue_wraps() {
        let a = Hsl::new(0.05, 0.8, 0.5).to_srgb();
        let b = Hsl::new(1.05, 0.8, 0.5).to_srgb();
        let c = Hsl::new(-0.95, 0.8, 0.5).to_srgb();
        assert!(approx(a, b));
        assert!(approx(a, c));
    }

    #[test]
    fn test_saturation_and_lightness_clamp() {
        let over = Hsl::new(0.6, 2.0, 1.5).to_srgb();
        assert!(approx(over, Vec3::ONE), "lightness 1 is white, got {over:?}");
        let under = Hsl::new(0.6, -1.0, -0.5).to_srgb();
        assert!(approx(under, Vec3::ZERO));
    }

    #[test]
    fn test_warm_hue_is_red_dominant() {
        let c = Hsl::new(0.05, 0.8, 0.5).to_srgb();
        assert!(c.x > c.y && c.y > c.z, "expected orange, got {c:?}");
    }

    #[test]
    fn test_hex_decoding() {
        let sky = srgb_from_hex(0x87ceeb);
        assert!((sky.x - 135.0 / 255.0).abs() < 1e-6);
        assert!((sky.y - 206.0 / 255.0).abs() < 1e-6);
        assert!((sky.z - 235.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_conversion_endpoints_and_darkening() {
        assert!(approx(srgb_to_linear(Vec3::ZERO), Vec3::ZERO));
        assert!(approx(srgb_to_linear(Vec3::ONE), Vec3::ONE));
        let mid = srgb_to_linear(Vec3::splat(0.5));
        assert!((mid.x - 0.214).abs() < 1e-3, "got {}", mid.x);
    }
}
