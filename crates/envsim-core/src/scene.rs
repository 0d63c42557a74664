// Collaborator contracts consumed by the preset applier and the controller

use crate::geo::Coordinates;
use crate::heatmap::{HeatmapBuffer, HeatmapError};
use crate::preset::PerformanceConfig;
use crate::terrain::Terrain;
use thiserror::Error;

/// Shadow filtering technique requested from the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShadowMapType {
    /// Single hardware comparison, hard edges
    Basic,
    #[default]
    Pcf,
    /// Percentage-closer filtering with a wide soft kernel
    PcfSoft,
    /// Temporally jittered filtering
    Temporal,
}

/// Renderer-side knobs a preset writes to
pub trait RendererHandle {
    fn set_shadow_map_enabled(&mut self, enabled: bool);

    fn set_shadow_map_type(&mut self, shadow_type: ShadowMapType);

    /// Shadow map edge length in texels
    fn set_shadow_map_size(&mut self, _size: u32) {}

    fn set_antialias(&mut self, enabled: bool);

    /// Hook fired when a preset asks for post-processing. Building the effect
    /// chain is up to the implementor.
    fn request_post_processing(&mut self, _preset: &str) {}
}

/// Fixed-step simulation driver
pub trait PhysicsStepper {
    fn set_time_step(&mut self, seconds: f64);
}

/// Optional renderer and physics handles lent out by a scene
#[derive(Default)]
pub struct Collaborators<'a> {
    pub renderer: Option<&'a mut dyn RendererHandle>,
    pub physics: Option<&'a mut dyn PhysicsStepper>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("coordinates out of range: lat {lat}, lng {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
    #[error("overlay opacity {0} outside [0, 1]")]
    InvalidOpacity(f32),
    #[error("overlay buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("no overlay with id {0}")]
    UnknownOverlay(u64),
    #[error("scene unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Heatmap(#[from] HeatmapError),
}

/// The 3D scene the controller drives: terrain, climate overlay and render loop
#[allow(async_fn_in_trait)]
pub trait SceneHandle {
    type Overlay: Clone + std::fmt::Debug;

    fn collaborators(&mut self) -> Collaborators<'_>;

    /// Called once the preset is resolved, before any content is loaded
    fn adopt_performance(&mut self, _config: &PerformanceConfig) {}

    async fn load_environment(&mut self, coordinates: Coordinates) -> Result<Terrain, SceneError>;

    fn add_climate_overlay(
        &mut self,
        pixels: &HeatmapBuffer,
        opacity: f32,
    ) -> Result<Self::Overlay, SceneError>;

    fn update_climate_overlay(
        &mut self,
        overlay: &Self::Overlay,
        pixels: HeatmapBuffer,
    ) -> Result<(), SceneError>;

    /// Start the render loop. Must not block.
    fn animate(&mut self) -> Result<(), SceneError>;
}
