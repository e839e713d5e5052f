//! Color primitives.
//!
//! All components are in `[0, 1]`. `Hsl::h` is measured in turns, so `0.0` and
//! `1.0` are both red.

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f64 / 255.0,
            ((hex >> 8) & 0xff) as f64 / 255.0,
            (hex & 0xff) as f64 / 255.0,
        )
    }

    pub fn to_hex(self) -> u32 {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (q(self.r) << 16) | (q(self.g) << 8) | q(self.b)
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn modulate(self, other: Rgb) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    /// sRGB-encoded components to linear light, for sRGB render targets.
    pub fn to_linear(self) -> Self {
        Self::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Hue wraps by euclidean modulo; saturation and lightness clamp.
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(1.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Rgb::new(l, l, l);
        }

        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
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

pub fn srgb_to_linear(c: f64) -> f64 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::{Hsl, Rgb, srgb_to_linear};

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9 && (a.b - b.b).abs() < 1e-9
    }

    #[test]
    fn primaries() {
        assert!(close(Hsl::new(0.0, 1.0, 0.5).to_rgb(), Rgb::new(1.0, 0.0, 0.0)));
        assert!(close(Hsl::new(1.0 / 3.0, 1.0, 0.5).to_rgb(), Rgb::new(0.0, 1.0, 0.0)));
        assert!(close(Hsl::new(2.0 / 3.0, 1.0, 0.5).to_rgb(), Rgb::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn blue_violet_at_point_seven() {
        assert!(close(Hsl::new(0.7, 1.0, 0.5).to_rgb(), Rgb::new(0.2, 0.0, 1.0)));
    }

    #[test]
    fn hue_wraps_in_both_directions() {
        let base = Hsl::new(0.25, 1.0, 0.5).to_rgb();
        assert!(close(Hsl::new(1.25, 1.0, 0.5).to_rgb(), base));
        assert!(close(Hsl::new(-0.75, 1.0, 0.5).to_rgb(), base));
        assert!(close(Hsl::new(-3.75, 1.0, 0.5).to_rgb(), base));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(Hsl::new(0.4, 0.0, 0.3).to_rgb(), Rgb::new(0.3, 0.3, 0.3));
    }

    #[test]
    fn hex_round_trip_for_marker_colors() {
        assert_eq!(Rgb::from_hex(0x00ffff), Rgb::new(0.0, 1.0, 1.0));
        assert_eq!(Rgb::from_hex(0xff8800).to_hex(), 0xff8800);
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-9);
        assert!(srgb_to_linear(0.5) < 0.5);
    }
}
