use foundation::color::Rgb;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Shading {
    /// Base color as-is, lights ignored.
    Unlit,
    /// Diffuse response to scene lights.
    Lambert,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Front,
    Double,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    /// sRGB base color.
    pub color: Rgb,
    pub shading: Shading,
    pub side: Side,
}

impl Material {
    pub fn unlit(color: Rgb) -> Self {
        Self {
            color,
            shading: Shading::Unlit,
            side: Side::Front,
        }
    }

    pub fn lambert(color: Rgb) -> Self {
        Self {
            color,
            shading: Shading::Lambert,
            side: Side::Front,
        }
    }

    pub fn double_sided(self) -> Self {
        Self {
            side: Side::Double,
            ..self
        }
    }
}
