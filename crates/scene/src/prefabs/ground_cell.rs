use std::f64::consts::FRAC_PI_2;

use foundation::color::Rgb;
use foundation::math::Vec3;

use crate::World;
use crate::components::{Drawable3D, Material, Transform};
use crate::entity::EntityId;

/// Square tile lying flat on the ground plane, centered on `position`.
///
/// The plane is rotated a quarter turn about X so its face points up, and is
/// drawn double-sided and unlit.
pub fn spawn_ground_cell(world: &mut World, position: Vec3, size: f64, color: Rgb) -> EntityId {
    let entity = world.spawn();
    world.set_transform(
        entity,
        Transform::translate(position).with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
    );
    world.set_drawable_3d(entity, Drawable3D::plane(size, size));
    world.set_material(entity, Material::unlit(color).double_sided());
    entity
}
