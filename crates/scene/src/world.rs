use crate::components::{Drawable3D, Material, Transform};
use crate::entity::EntityId;
use foundation::handles::Handle;

/// Drawable entity as seen by the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawItem {
    pub entity: EntityId,
    pub transform: Transform,
    pub drawable: Drawable3D,
    pub material: Material,
}

/// Entity store. Components live in parallel per-entity slots; an entity is
/// drawn only once it has a transform, a drawable and a material.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    materials: Vec<Option<Material>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index, 0));
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        id
    }

    pub fn entity_count(&self) -> usize {
        self.next_index as usize
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn set_material(&mut self, entity: EntityId, material: Material) {
        self.ensure_capacity(entity.index() as usize);
        self.materials[entity.index() as usize] = Some(material);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.index() as usize).and_then(|t| *t)
    }

    pub fn material(&self, entity: EntityId) -> Option<Material> {
        self.materials.get(entity.index() as usize).and_then(|m| *m)
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<Drawable3D> {
        self.drawables_3d.get(entity.index() as usize).and_then(|d| *d)
    }

    /// Complete drawables in spawn order.
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            let Some(material) = self.materials.get(idx).and_then(|m| *m) else {
                continue;
            };

            out.push(DrawItem {
                entity: EntityId(Handle::new(idx as u32, 0)),
                transform,
                drawable: *drawable,
                material,
            });
        }
        out
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.materials.resize(new_len, None);
        }
    }
}
