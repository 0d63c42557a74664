use crate::simulation::scene::BevyScene;
use bevy::prelude::*;
use envsim_core::{SimulationConfig, SimulationController};

/// Seconds between synthetic climate updates
pub const CLIMATE_DRIFT_INTERVAL: f32 = 2.0;
/// Phase advance per climate update, radians
pub const CLIMATE_DRIFT_STEP: f32 = 0.15;

#[derive(Resource)]
pub struct Simulation(pub SimulationController<BevyScene>);

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self(SimulationController::new(config, |canvas_id| {
            Ok(BevyScene::new(canvas_id))
        }))
    }

    pub fn scene(&self) -> Option<&BevyScene> {
        self.0.scene()
    }
}

/// Where the configuration came from, reported once the log subscriber is up
#[derive(Resource, Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(String),
    Defaults { reason: String },
}

#[derive(Resource)]
pub struct ClimateDrift {
    pub timer: Timer,
    pub phase: f32,
}

impl Default for ClimateDrift {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(CLIMATE_DRIFT_INTERVAL, TimerMode::Repeating),
            phase: 0.0,
        }
    }
}

/// Outcome counts for climate updates forwarded to the controller
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClimateUpdateStats {
    pub applied: u64,
    pub rejected: u64,
}
