mod core;
mod helpers;
pub mod simulation;
mod ui;

use crate::core::state::SimulationState;
use crate::simulation::SimulationPlugin;
use crate::simulation::resources::ConfigSource;
use crate::ui::UIPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;
use envsim_core::SimulationConfig;

/// Default location of the simulation config, relative to the working directory
pub const CONFIG_PATH: &str = "simulation.toml";

pub struct EnvSimPlugin {
    pub config: SimulationConfig,
    pub source: ConfigSource,
}

impl Plugin for EnvSimPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SimulationState>().add_plugins((
            SimulationPlugin {
                config: self.config.clone(),
                source: self.source.clone(),
            },
            UIPlugin,
        ));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}

/// Read [`CONFIG_PATH`] if it exists, then apply environment overrides
pub fn load_config(path: &str) -> (SimulationConfig, ConfigSource) {
    let (mut config, source) = match SimulationConfig::load_from_file(path) {
        Ok(config) => (config, ConfigSource::File(path.to_string())),
        Err(err) => (
            SimulationConfig::default(),
            ConfigSource::Defaults {
                reason: err.to_string(),
            },
        ),
    };
    config.apply_env_overrides();
    (config, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let (config, source) = load_config("no/such/simulation.toml");

        assert_eq!(config.canvas_id, SimulationConfig::default().canvas_id);
        assert!(matches!(source, ConfigSource::Defaults { .. }));
    }
}
