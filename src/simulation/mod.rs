pub mod components;
pub mod events;
pub mod resources;
pub mod scene;
pub mod systems;

use crate::core::state::SimulationState;
use crate::simulation::events::ClimateDataUpdated;
use crate::simulation::resources::*;
use crate::simulation::systems::*;
use bevy::prelude::*;
use envsim_core::SimulationConfig;

pub struct SimulationPlugin {
    pub config: SimulationConfig,
    pub source: ConfigSource,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ClimateDataUpdated>()
            .insert_resource(Simulation::new(self.config.clone()))
            .insert_resource(self.source.clone())
            .init_resource::<ClimateDrift>()
            .init_resource::<ClimateUpdateStats>()
            .add_systems(
                Startup,
                (
                    report_config_source,
                    spawn_viewpoint,
                    initialize_simulation,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    sync_render_settings,
                    sync_physics_time_step,
                    spawn_terrain,
                    sync_climate_overlays,
                ),
            )
            .add_systems(
                Update,
                (drift_climate, apply_climate_updates)
                    .chain()
                    .before(sync_climate_overlays)
                    .run_if(in_state(SimulationState::Running)),
            );
    }
}
