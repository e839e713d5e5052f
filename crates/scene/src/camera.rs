use foundation::math::Vec3;

/// Output surface size in CSS pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `width / height`. A viewport with no height reports 1.0 instead of
    /// dividing by zero; a zero width yields 0.
    pub fn aspect(&self) -> f64 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveCamera {
    pub fn look_at(
        position: Vec3,
        target: Vec3,
        fov_y_deg: f64,
        aspect: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self {
            position,
            target,
            up: Vec3::UP,
            fov_y_deg,
            aspect,
            near,
            far,
        }
    }

    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }
}
