/// Local-space geometry of a drawable.
///
/// `Plane` lies in the local XY plane facing +Z; rotate it to lay it on the
/// ground. `Cube` is centered on the local origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Plane { width: f64, height: f64 },
    Cube { size: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
}

impl Drawable3D {
    pub fn plane(width: f64, height: f64) -> Self {
        Self {
            shape: Shape3D::Plane { width, height },
        }
    }

    pub fn cube(size: f64) -> Self {
        Self {
            shape: Shape3D::Cube { size },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Drawable3D, Shape3D};

    #[test]
    fn create_plane_drawable() {
        let drawable = Drawable3D::plane(1.0, 2.0);
        assert_eq!(
            drawable.shape,
            Shape3D::Plane {
                width: 1.0,
                height: 2.0
            }
        );
    }
}
