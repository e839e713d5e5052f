use foundation::color::Rgb;

/// Uniform, direction-less light. Lambert surfaces under it take
/// `base * color * intensity`; there are no shadows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f64,
}

impl AmbientLight {
    pub fn new(color: Rgb, intensity: f64) -> Self {
        Self { color, intensity }
    }

    pub fn radiance(&self) -> Rgb {
        self.color.scale(self.intensity)
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(Rgb::WHITE, 1.0)
    }
}
