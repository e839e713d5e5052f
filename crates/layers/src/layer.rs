use scene::Composer;
use scene::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// Turns one part of a snapshot into scene entities.
///
/// Layers run once while the scene is built. They spawn into the composer's
/// world and never touch the camera.
pub trait Layer {
    type Source: ?Sized;

    fn id(&self) -> LayerId;

    fn name(&self) -> &'static str;

    /// Spawn entities for `source` and return them in spawn order.
    fn populate(&self, composer: &mut Composer, source: &Self::Source) -> Vec<EntityId>;
}
