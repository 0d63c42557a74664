use crate::applier;
use crate::config::SimulationConfig;
use crate::heatmap::{HeatmapBuffer, HeatmapError};
use crate::preset::PerformanceConfig;
use crate::scene::{SceneError, SceneHandle};
use crate::terrain::Terrain;
use log::{error, info};
use std::fmt;
use thiserror::Error;

/// Lifecycle of a [`SimulationController`]. `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ControllerState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ControllerState::Uninitialized => "uninitialized",
            ControllerState::Initializing => "initializing",
            ControllerState::Ready => "ready",
            ControllerState::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitError {
    #[error("cannot initialize from state {0}")]
    InvalidState(ControllerState),
    #[error("failed to construct scene: {0}")]
    SceneConstruction(SceneError),
    #[error("failed to load environment: {0}")]
    Environment(SceneError),
    #[error("failed to create climate overlay: {0}")]
    Overlay(SceneError),
    #[error("failed to start animation: {0}")]
    Animation(SceneError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    #[error("simulation not initialized (state {0})")]
    NotReady(ControllerState),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

type SceneFactory<S> = Box<dyn FnOnce(&str) -> Result<S, SceneError> + Send + Sync>;

/// Orchestrates scene construction, preset application, terrain loading and
/// the climate overlay.
pub struct SimulationController<S: SceneHandle> {
    config: SimulationConfig,
    state: ControllerState,
    build_scene: Option<SceneFactory<S>>,
    scene: Option<S>,
    performance: Option<PerformanceConfig>,
    terrain: Option<Terrain>,
    overlay: Option<S::Overlay>,
    last_error: Option<InitError>,
}

impl<S: SceneHandle> fmt::Debug for SimulationController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("performance", &self.performance)
            .field("overlay", &self.overlay)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl<S: SceneHandle> SimulationController<S> {
    /// `build_scene` receives the configured canvas id and runs once, as the
    /// first step of initialization.
    pub fn new<F>(config: SimulationConfig, build_scene: F) -> Self
    where
        F: FnOnce(&str) -> Result<S, SceneError> + Send + Sync + 'static,
    {
        Self {
            config,
            state: ControllerState::Uninitialized,
            build_scene: Some(Box::new(build_scene)),
            scene: None,
            performance: None,
            terrain: None,
            overlay: None,
            last_error: None,
        }
    }

    /// Run the full startup sequence. Failures are logged, kept in
    /// [`last_error`](Self::last_error) and reported as `false`.
    pub async fn initialize(&mut self) -> bool {
        match self.try_initialize().await {
            Ok(()) => true,
            Err(err) => {
                error!("Failed to initialize environmental simulation: {err}");
                self.last_error = Some(err);
                false
            }
        }
    }

    pub async fn try_initialize(&mut self) -> Result<(), InitError> {
        if self.state != ControllerState::Uninitialized {
            return Err(InitError::InvalidState(self.state));
        }
        self.state = ControllerState::Initializing;

        let result = self.run_startup().await;
        self.state = match result {
            Ok(()) => ControllerState::Ready,
            Err(_) => ControllerState::Failed,
        };
        result
    }

    async fn run_startup(&mut self) -> Result<(), InitError> {
        info!("Initializing environmental simulation...");
        info!("Using performance preset: {}", self.config.preset);

        let build_scene = self
            .build_scene
            .take()
            .ok_or(InitError::InvalidState(self.state))?;
        let scene = self
            .scene
            .insert(build_scene(&self.config.canvas_id).map_err(InitError::SceneConstruction)?);

        let collaborators = scene.collaborators();
        let performance = applier::apply(
            collaborators.renderer,
            collaborators.physics,
            &self.config.preset,
        );
        self.performance = Some(performance);
        scene.adopt_performance(&performance);

        let terrain = scene
            .load_environment(self.config.initial_coordinates)
            .await
            .map_err(InitError::Environment)?;
        info!("Terrain loaded successfully");
        self.terrain = Some(terrain);

        let heatmap = overlay_heatmap(self.config.heatmap_size, &performance)
            .map_err(|err| InitError::Overlay(err.into()))?;
        let overlay = scene
            .add_climate_overlay(&heatmap, self.config.overlay_opacity)
            .map_err(InitError::Overlay)?;
        self.overlay = Some(overlay);

        scene.animate().map_err(InitError::Animation)?;

        info!("Environmental simulation initialized successfully");
        Ok(())
    }

    /// Push fresh climate data into the active overlay. Returns `false` before
    /// the controller is ready, leaving every overlay untouched.
    pub fn update_climate_data(&mut self, data: HeatmapBuffer) -> bool {
        match self.try_update_climate_data(data) {
            Ok(()) => true,
            Err(UpdateError::NotReady(_)) => {
                error!("Cannot update climate data - simulation not initialized");
                false
            }
            Err(err) => {
                error!("Failed to update climate data: {err}");
                false
            }
        }
    }

    pub fn try_update_climate_data(&mut self, data: HeatmapBuffer) -> Result<(), UpdateError> {
        if self.state != ControllerState::Ready {
            return Err(UpdateError::NotReady(self.state));
        }
        let (Some(scene), Some(overlay)) = (self.scene.as_mut(), self.overlay.as_ref()) else {
            return Err(UpdateError::NotReady(self.state));
        };

        info!("Updating climate data...");
        scene.update_climate_overlay(overlay, data)?;
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ControllerState::Ready
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Config resolved by the last preset application
    pub fn performance(&self) -> Option<&PerformanceConfig> {
        self.performance.as_ref()
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    pub fn overlay(&self) -> Option<&S::Overlay> {
        self.overlay.as_ref()
    }

    pub fn last_error(&self) -> Option<&InitError> {
        self.last_error.as_ref()
    }

    pub fn scene(&self) -> Option<&S> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut S> {
        self.scene.as_mut()
    }
}

/// Startup wave pattern, bounded by the preset's texture resolution
fn overlay_heatmap(
    size: usize,
    performance: &PerformanceConfig,
) -> Result<HeatmapBuffer, HeatmapError> {
    let limit = performance.texture_resolution as usize;
    if size > limit {
        return Err(HeatmapError::ExceedsTexture { size, limit });
    }
    HeatmapBuffer::wave_pattern(size, 0.0)
}
