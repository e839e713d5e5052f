use std::collections::BTreeMap;

use foundation::color::Rgb;
use foundation::math::Vec3;
use formats::EntityPosition;
use scene::Composer;
use scene::entity::EntityId;
use scene::prefabs::spawn_marker_cube;

use crate::layer::{Layer, LayerId};

pub const KAYAK_PREFIX: &str = "kayak";
pub const KAYAK_COLOR: u32 = 0x00ffff;
pub const OBSTACLE_COLOR: u32 = 0xff8800;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MarkerClass {
    Kayak,
    Other,
}

impl MarkerClass {
    /// Case-sensitive prefix match on the entity name.
    pub fn classify(name: &str) -> Self {
        if name.starts_with(KAYAK_PREFIX) {
            MarkerClass::Kayak
        } else {
            MarkerClass::Other
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            MarkerClass::Kayak => Rgb::from_hex(KAYAK_COLOR),
            MarkerClass::Other => Rgb::from_hex(OBSTACLE_COLOR),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub class: MarkerClass,
    /// Cube center.
    pub position: Vec3,
}

/// Maps named entity positions to cube markers resting on the ground plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntityLayer {
    id: LayerId,
    pub marker_size: f64,
}

impl EntityLayer {
    pub fn new(id: u64) -> Self {
        Self {
            id: LayerId(id),
            marker_size: 1.0,
        }
    }

    pub fn markers(&self, entities: &BTreeMap<String, EntityPosition>) -> Vec<Marker> {
        let lift = self.marker_size / 2.0;
        entities
            .iter()
            .map(|(name, pos)| Marker {
                name: name.clone(),
                class: MarkerClass::classify(name),
                position: Vec3::new(pos.x, lift, pos.z),
            })
            .collect()
    }
}

impl Layer for EntityLayer {
    type Source = BTreeMap<String, EntityPosition>;

    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "entities"
    }

    /// Spawn one cube per entity and record each under its name in the
    /// composer's marker registry.
    fn populate(
        &self,
        composer: &mut Composer,
        entities: &BTreeMap<String, EntityPosition>,
    ) -> Vec<EntityId> {
        self.markers(entities)
            .into_iter()
            .map(|marker| {
                let entity = spawn_marker_cube(
                    composer.world_mut(),
                    marker.position,
                    self.marker_size,
                    marker.class.color(),
                );
                composer.register_marker(marker.name, entity);
                entity
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityLayer, MarkerClass};
    use crate::layer::Layer;
    use formats::EntityPosition;
    use foundation::color::Rgb;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;
    use scene::camera::Viewport;
    use scene::components::Shading;
    use scene::{Composer, ComposerConfig};
    use std::collections::BTreeMap;

    fn entities(pairs: &[(&str, f64, f64)]) -> BTreeMap<String, EntityPosition> {
        pairs
            .iter()
            .map(|(n, x, z)| (n.to_string(), EntityPosition::new(*x, *z)))
            .collect()
    }

    #[test]
    fn classification_is_case_sensitive_prefix() {
        assert_eq!(MarkerClass::classify("kayak_1"), MarkerClass::Kayak);
        assert_eq!(MarkerClass::classify("kayak"), MarkerClass::Kayak);
        assert_eq!(MarkerClass::classify("Kayak_1"), MarkerClass::Other);
        assert_eq!(MarkerClass::classify("boat_3"), MarkerClass::Other);
        assert_eq!(MarkerClass::classify("my_kayak"), MarkerClass::Other);
        assert_eq!(MarkerClass::classify(""), MarkerClass::Other);
    }

    #[test]
    fn class_colors() {
        assert_eq!(MarkerClass::Kayak.color(), Rgb::new(0.0, 1.0, 1.0));
        assert_eq!(MarkerClass::Other.color().to_hex(), 0xff8800);
    }

    #[test]
    fn markers_rest_on_ground() {
        let layer = EntityLayer::new(2);
        let markers = layer.markers(&entities(&[("kayak_1", 3.5, -2.0), ("rock", 0.0, 7.0)]));
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].position, Vec3::new(3.5, 0.5, -2.0));
        assert_eq!(markers[1].position, Vec3::new(0.0, 0.5, 7.0));
    }

    #[test]
    fn populate_registers_every_marker() {
        let mut composer = Composer::new(Viewport::new(100.0, 100.0), &ComposerConfig::default());
        let layer = EntityLayer::new(2);
        let input = entities(&[("kayak_1", 1.0, 1.0), ("boat_3", 2.0, 2.0), ("Kayak_9", 4.0, 0.0)]);
        let ids = layer.populate(&mut composer, &input);

        assert_eq!(ids.len(), 3);
        assert_eq!(composer.marker_count(), 3);
        for name in input.keys() {
            let entity = composer.marker(name).expect("registered");
            let material = composer.world().material(entity).expect("material");
            assert_eq!(material.shading, Shading::Lambert);
            assert_eq!(material.color, MarkerClass::classify(name).color());
        }
    }

    #[test]
    fn empty_map_yields_no_markers() {
        let layer = EntityLayer::new(2);
        assert!(layer.markers(&BTreeMap::new()).is_empty());
    }
}
