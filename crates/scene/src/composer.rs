use std::collections::BTreeMap;

use foundation::color::Rgb;
use foundation::math::Vec3;

use crate::camera::{PerspectiveCamera, Viewport};
use crate::entity::EntityId;
use crate::light::AmbientLight;
use crate::world::World;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComposerConfig {
    /// Lattice extent the camera is aimed at; the target is its center.
    pub grid_size: f64,
    pub camera_position: Vec3,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub background: Rgb,
    pub ambient: AmbientLight,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            grid_size: 30.0,
            camera_position: Vec3::new(15.0, 30.0, 40.0),
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            background: Rgb::BLACK,
            ambient: AmbientLight::default(),
        }
    }
}

/// Renderable world state: entities, camera, viewport and lighting, plus the
/// name-keyed marker registry.
///
/// Built once, filled during startup, then only read by the render loop.
/// [`Composer::resize`] is the one mutation allowed afterwards and it only
/// touches the camera and viewport.
#[derive(Debug)]
pub struct Composer {
    world: World,
    camera: PerspectiveCamera,
    viewport: Viewport,
    ambient: AmbientLight,
    background: Rgb,
    markers: BTreeMap<String, EntityId>,
}

impl Composer {
    pub fn new(viewport: Viewport, config: &ComposerConfig) -> Self {
        let half = config.grid_size / 2.0;
        let camera = PerspectiveCamera::look_at(
            config.camera_position,
            Vec3::new(half, 0.0, half),
            config.fov_y_deg,
            viewport.aspect(),
            config.near,
            config.far,
        );

        Self {
            world: World::new(),
            camera,
            viewport,
            ambient: config.ambient,
            background: config.background,
            markers: BTreeMap::new(),
        }
    }

    /// Camera aspect becomes `width / height`. A zero height leaves it at 1.0.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect(self.viewport.aspect());
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Record a marker under `name`. Returns the entity previously registered
    /// under that name, if any.
    pub fn register_marker(&mut self, name: impl Into<String>, entity: EntityId) -> Option<EntityId> {
        self.markers.insert(name.into(), entity)
    }

    pub fn marker(&self, name: &str) -> Option<EntityId> {
        self.markers.get(name).copied()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker_names(&self) -> impl Iterator<Item = &str> {
        self.markers.keys().map(String::as_str)
    }
}
