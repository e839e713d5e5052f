use scene::Composer;
use scene::entity::EntityId;

use crate::camera::{Mat4, camera_view_proj};
use crate::mesh::{ColorSpace, MeshData, needs_double_sided, tessellate};

/// One independent primitive: its own geometry, drawn with its own call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub entity: EntityId,
    pub mesh: MeshData,
    pub double_sided: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderFrame {
    pub commands: Vec<RenderCommand>,
}

pub struct Renderer;

impl Renderer {
    /// Tessellate every complete drawable of the composed scene. Run once
    /// after the scene is populated; the result is uploaded and reused.
    pub fn collect_3d(composer: &Composer, space: ColorSpace) -> RenderFrame {
        let ambient = composer.ambient();
        let commands = composer
            .world()
            .draw_items()
            .iter()
            .map(|item| RenderCommand {
                entity: item.entity,
                mesh: tessellate(item, &ambient, space),
                double_sided: needs_double_sided(item),
            })
            .collect();
        RenderFrame { commands }
    }

    pub fn view_proj(composer: &Composer) -> Mat4 {
        camera_view_proj(composer.camera())
    }

    /// Clear color for the target, alpha 1.
    pub fn clear_color(composer: &Composer, space: ColorSpace) -> [f64; 4] {
        let bg = match space {
            ColorSpace::Srgb => composer.background(),
            ColorSpace::Linear => composer.background().to_linear(),
        };
        [bg.r, bg.g, bg.b, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::Renderer;
    use crate::mesh::ColorSpace;
    use foundation::color::Rgb;
    use foundation::math::Vec3;
    use scene::camera::Viewport;
    use scene::prefabs::{spawn_ground_cell, spawn_marker_cube};
    use scene::{Composer, ComposerConfig};

    #[test]
    fn one_command_per_drawable() {
        let mut composer = Composer::new(Viewport::new(640.0, 480.0), &ComposerConfig::default());
        for x in 0..3 {
            spawn_ground_cell(composer.world_mut(), Vec3::new(x as f64, 0.0, 0.0), 1.0, Rgb::WHITE);
        }
        spawn_marker_cube(composer.world_mut(), Vec3::new(0.0, 0.5, 0.0), 1.0, Rgb::BLACK);

        let frame = Renderer::collect_3d(&composer, ColorSpace::Srgb);
        assert_eq!(frame.commands.len(), 4);
        assert_eq!(
            frame.commands.iter().filter(|c| c.double_sided).count(),
            3
        );
    }

    #[test]
    fn empty_scene_has_no_commands() {
        let composer = Composer::new(Viewport::new(640.0, 480.0), &ComposerConfig::default());
        assert!(Renderer::collect_3d(&composer, ColorSpace::Linear).commands.is_empty());
        assert_eq!(
            Renderer::clear_color(&composer, ColorSpace::Linear),
            [0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn view_proj_tracks_resize() {
        let mut composer = Composer::new(Viewport::new(640.0, 480.0), &ComposerConfig::default());
        let before = Renderer::view_proj(&composer);
        composer.resize(1280.0, 480.0);
        let after = Renderer::view_proj(&composer);
        assert!((after[0][0] - before[0][0] / 2.0).abs() < 1e-5);
        assert_eq!(after[1][1], before[1][1]);
    }
}
