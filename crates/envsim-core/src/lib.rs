//! Engine-agnostic core of the environmental simulation: performance presets,
//! the applier that pushes them onto renderer and physics collaborators, and the
//! controller that drives scene startup.

pub mod applier;
pub mod config;
pub mod controller;
pub mod geo;
pub mod heatmap;
pub mod preset;
pub mod scene;
pub mod terrain;

pub use applier::apply;
pub use config::SimulationConfig;
pub use controller::{ControllerState, InitError, SimulationController, UpdateError};
pub use geo::Coordinates;
pub use heatmap::{HeatmapBuffer, HeatmapError};
pub use preset::{PerformanceConfig, Preset, PresetCatalog};
pub use scene::{
    Collaborators, PhysicsStepper, RendererHandle, SceneError, SceneHandle, ShadowMapType,
};
pub use terrain::Terrain;
