use foundation::color::Rgb;
use foundation::math::Vec3;
use scene::ComposerConfig;
use serde::Deserialize;

use formats::DEFAULT_SNAPSHOT_URL;

/// Options accepted by `new FluidViewer(config)`. Every field is optional on
/// the JS side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub snapshot_url: String,
    pub grid_size: f64,
    pub camera_position: [f64; 3],
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    /// sRGB, `[0, 1]` per channel.
    pub background: [f64; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let composer = ComposerConfig::default();
        Self {
            snapshot_url: DEFAULT_SNAPSHOT_URL.to_string(),
            grid_size: composer.grid_size,
            camera_position: composer.camera_position.to_array(),
            fov_y_deg: composer.fov_y_deg,
            near: composer.near,
            far: composer.far,
            background: [
                composer.background.r,
                composer.background.g,
                composer.background.b,
            ],
        }
    }
}

impl ViewerConfig {
    pub fn composer_config(&self) -> ComposerConfig {
        let [r, g, b] = self.background;
        ComposerConfig {
            grid_size: self.grid_size,
            camera_position: Vec3::from_array(self.camera_position),
            fov_y_deg: self.fov_y_deg,
            near: self.near,
            far: self.far,
            background: Rgb::new(r, g, b),
            ..ComposerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: ViewerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.snapshot_url, "simulation.json");
        assert_eq!(cfg.grid_size, 30.0);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg: ViewerConfig =
            serde_json::from_str(r#"{ "grid_size": 64, "snapshot_url": "runs/a.json" }"#).unwrap();
        assert_eq!(cfg.snapshot_url, "runs/a.json");
        assert_eq!(cfg.fov_y_deg, 75.0);

        let composer = cfg.composer_config();
        assert_eq!(composer.grid_size, 64.0);
        assert_eq!(composer.camera_position, Vec3::new(15.0, 30.0, 40.0));
    }
}
