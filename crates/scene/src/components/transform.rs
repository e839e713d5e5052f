use foundation::math::Vec3;

/// Translation plus XYZ-order Euler rotation (radians), i.e. `Rx * Ry * Rz`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn with_rotation(self, rotation: Vec3) -> Self {
        Self { rotation, ..self }
    }

    /// Local point to world space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.apply_direction(local) + self.position
    }

    /// Direction to world space (rotation only).
    pub fn apply_direction(&self, local: Vec3) -> Vec3 {
        local
            .rotate_z(self.rotation.z)
            .rotate_y(self.rotation.y)
            .rotate_x(self.rotation.x)
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use foundation::math::Vec3;

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(transform.apply(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn translate_then_rotate_about_own_origin() {
        let t = Transform::translate(Vec3::new(5.0, 0.0, 2.0))
            .with_rotation(Vec3::new(-std::f64::consts::FRAC_PI_2, 0.0, 0.0));
        let p = t.apply(Vec3::new(0.5, 0.5, 0.0));
        assert!((p - Vec3::new(5.5, 0.0, 1.5)).length() < 1e-12);
    }
}
