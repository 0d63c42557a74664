use crate::geo::{Coordinates, REFERENCE_POINT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_PRESET_NAME: &str = "desktop";
pub const DEFAULT_CANVAS_ID: &str = "simulation-canvas";
pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.2;
pub const DEFAULT_HEATMAP_SIZE: usize = 100;

/// Environment variable that overrides the configured preset
pub const PRESET_ENV_VAR: &str = "ENVSIM_PRESET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Controller configuration. Every field is optional in the file and falls
/// back to its default independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Performance preset name. Unknown names resolve to "web".
    pub preset: String,
    /// DOM element id the renderer attaches to on web targets
    pub canvas_id: String,
    pub initial_coordinates: Coordinates,
    pub overlay_opacity: f32,
    /// Edge length of the startup heatmap in pixels
    pub heatmap_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            preset: DEFAULT_PRESET_NAME.to_string(),
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            initial_coordinates: REFERENCE_POINT,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            heatmap_size: DEFAULT_HEATMAP_SIZE,
        }
    }
}

impl SimulationConfig {
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = preset.into();
        self
    }

    pub fn with_canvas_id(mut self, canvas_id: impl Into<String>) -> Self {
        self.canvas_id = canvas_id.into();
        self
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.initial_coordinates = coordinates;
        self
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace the preset with `value` when present and non-empty
    pub fn override_preset(&mut self, value: Option<String>) {
        if let Some(preset) = value.filter(|p| !p.trim().is_empty()) {
            self.preset = preset.trim().to_string();
        }
    }

    /// Apply [`PRESET_ENV_VAR`] from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.override_preset(std::env::var(PRESET_ENV_VAR).ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.preset, "desktop");
        assert_eq!(config.canvas_id, "simulation-canvas");
        assert_eq!(config.initial_coordinates, Coordinates::new(40.7128, -74.0060));
        assert_eq!(config.overlay_opacity, 0.2);
        assert_eq!(config.heatmap_size, 100);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = SimulationConfig::from_toml("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_fields_override_independently() {
        let config = SimulationConfig::from_toml(
            r#"
            preset = "mobile"

            [initial_coordinates]
            lat = 51.5072
            lng = -0.1276
            "#,
        )
        .unwrap();

        assert_eq!(config.preset, "mobile");
        assert_eq!(config.canvas_id, DEFAULT_CANVAS_ID);
        assert_eq!(config.initial_coordinates, Coordinates::new(51.5072, -0.1276));
        assert_eq!(config.heatmap_size, DEFAULT_HEATMAP_SIZE);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = SimulationConfig::from_toml("preset = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_wrong_type_is_error() {
        assert!(SimulationConfig::from_toml("heatmap_size = \"big\"").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SimulationConfig::default()
            .with_preset("web")
            .with_canvas_id("map");
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(SimulationConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimulationConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_save_then_load_file() {
        let path = std::env::temp_dir().join(format!("envsim-config-{}.toml", std::process::id()));
        let config = SimulationConfig::default()
            .with_preset("mobile")
            .with_canvas_id("map")
            .with_coordinates(Coordinates::new(-33.86, 151.21));

        config.save_to_file(&path).unwrap();
        let loaded = SimulationConfig::load_from_file(&path);
        let written = std::fs::read_to_string(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), config);
        assert!(written.unwrap().contains("preset = \"mobile\""));
    }

    #[test]
    fn test_save_to_missing_directory_is_io_error() {
        let path = std::env::temp_dir()
            .join(format!("envsim-missing-{}", std::process::id()))
            .join("simulation.toml");
        let err = SimulationConfig::default().save_to_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_override_preset() {
        let mut config = SimulationConfig::default();

        config.override_preset(None);
        assert_eq!(config.preset, "desktop");

        config.override_preset(Some("   ".to_string()));
        assert_eq!(config.preset, "desktop");

        config.override_preset(Some(" mobile ".to_string()));
        assert_eq!(config.preset, "mobile");
    }
}
