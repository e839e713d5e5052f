use foundation::color::Rgb;
use foundation::math::Vec3;

use crate::World;
use crate::components::{Drawable3D, Material, Transform};
use crate::entity::EntityId;

pub fn spawn_marker_cube(world: &mut World, position: Vec3, size: f64, color: Rgb) -> EntityId {
    let entity = world.spawn();
    world.set_transform(entity, Transform::translate(position));
    world.set_drawable_3d(entity, Drawable3D::cube(size));
    world.set_material(entity, Material::lambert(color));
    entity
}

#[cfg(test)]
mod tests {
    use super::spawn_marker_cube;
    use crate::World;
    use crate::components::{Shading, Shape3D, Side};
    use foundation::color::Rgb;
    use foundation::math::Vec3;

    #[test]
    fn spawns_lit_cube() {
        let mut world = World::new();
        let entity = spawn_marker_cube(&mut world, Vec3::new(1.0, 0.5, 1.0), 1.0, Rgb::WHITE);

        assert_eq!(
            world.transform(entity).map(|t| t.position),
            Some(Vec3::new(1.0, 0.5, 1.0))
        );
        let material = world.material(entity).expect("material");
        assert_eq!(material.shading, Shading::Lambert);
        assert_eq!(material.side, Side::Front);
        assert_eq!(
            world.drawable_3d(entity).map(|d| d.shape),
            Some(Shape3D::Cube { size: 1.0 })
        );
    }
}
