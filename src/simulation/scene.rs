// Scene collaborator backed by plain data that the ECS systems mirror into the world

use bevy::log::{debug, info};
use envsim_core::scene::{
    Collaborators, PhysicsStepper, RendererHandle, SceneError, SceneHandle, ShadowMapType,
};
use envsim_core::{Coordinates, HeatmapBuffer, PerformanceConfig, Terrain};

/// Terrain grid used until a preset has been adopted
const FALLBACK_TERRAIN_GRID: usize = 64;

/// Renderer settings written by the preset applier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub shadow_map_enabled: bool,
    pub shadow_map_type: ShadowMapType,
    pub shadow_map_size: u32,
    pub antialias: bool,
    pub post_processing_requested: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadow_map_enabled: true,
            shadow_map_type: ShadowMapType::default(),
            shadow_map_size: 2048,
            antialias: true,
            post_processing_requested: false,
        }
    }
}

impl RendererHandle for RenderSettings {
    fn set_shadow_map_enabled(&mut self, enabled: bool) {
        self.shadow_map_enabled = enabled;
    }

    fn set_shadow_map_type(&mut self, shadow_type: ShadowMapType) {
        self.shadow_map_type = shadow_type;
    }

    fn set_shadow_map_size(&mut self, size: u32) {
        // 0 only disables shadows, the last usable size is kept
        if size > 0 {
            self.shadow_map_size = size;
        }
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.antialias = enabled;
        // The request hook only fires for presets that want post-processing
        self.post_processing_requested = false;
    }

    fn request_post_processing(&mut self, preset: &str) {
        debug!("Post-processing requested by preset {preset}");
        self.post_processing_requested = true;
    }
}

/// Fixed-step time for `FixedUpdate`, mirrored into `Time<Fixed>`
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FixedStepPhysics {
    pub time_step: Option<f64>,
}

impl PhysicsStepper for FixedStepPhysics {
    fn set_time_step(&mut self, seconds: f64) {
        self.time_step = Some(seconds);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// One climate overlay layer. `revision` increases on every pixel update.
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    pub id: OverlayId,
    pub heatmap: HeatmapBuffer,
    pub opacity: f32,
    pub revision: u64,
}

#[derive(Debug)]
pub struct BevyScene {
    canvas_id: String,
    pub renderer: RenderSettings,
    pub physics: FixedStepPhysics,
    terrain_grid: usize,
    terrain: Option<Terrain>,
    overlays: Vec<OverlayLayer>,
    next_overlay_id: u64,
    animating: bool,
}

impl BevyScene {
    pub fn new(canvas_id: &str) -> Self {
        Self {
            canvas_id: canvas_id.to_string(),
            renderer: RenderSettings::default(),
            physics: FixedStepPhysics::default(),
            terrain_grid: FALLBACK_TERRAIN_GRID,
            terrain: None,
            overlays: Vec::new(),
            next_overlay_id: 0,
            animating: false,
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn terrain_grid(&self) -> usize {
        self.terrain_grid
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    pub fn overlays(&self) -> &[OverlayLayer] {
        &self.overlays
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }
}

impl SceneHandle for BevyScene {
    type Overlay = OverlayId;

    fn collaborators(&mut self) -> Collaborators<'_> {
        Collaborators {
            renderer: Some(&mut self.renderer),
            physics: Some(&mut self.physics),
        }
    }

    fn adopt_performance(&mut self, config: &PerformanceConfig) {
        self.terrain_grid = config.terrain_grid_size();
        debug!("Terrain grid set to {} samples per edge", self.terrain_grid);
    }

    async fn load_environment(&mut self, coordinates: Coordinates) -> Result<Terrain, SceneError> {
        if !coordinates.is_valid() {
            return Err(SceneError::InvalidCoordinates {
                lat: coordinates.lat,
                lng: coordinates.lng,
            });
        }
        let terrain = Terrain::generate(coordinates, self.terrain_grid);
        info!(
            "Generated {}x{} terrain at ({}, {})",
            terrain.grid_size(),
            terrain.grid_size(),
            coordinates.lat,
            coordinates.lng
        );
        self.terrain = Some(terrain.clone());
        Ok(terrain)
    }

    fn add_climate_overlay(
        &mut self,
        pixels: &HeatmapBuffer,
        opacity: f32,
    ) -> Result<OverlayId, SceneError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(SceneError::InvalidOpacity(opacity));
        }
        let id = OverlayId(self.next_overlay_id);
        self.next_overlay_id += 1;
        self.overlays.push(OverlayLayer {
            id,
            heatmap: pixels.clone(),
            opacity,
            revision: 0,
        });
        Ok(id)
    }

    fn update_climate_overlay(
        &mut self,
        overlay: &OverlayId,
        pixels: HeatmapBuffer,
    ) -> Result<(), SceneError> {
        let layer = self
            .overlays
            .iter_mut()
            .find(|layer| layer.id == *overlay)
            .ok_or(SceneError::UnknownOverlay(overlay.0))?;
        layer.heatmap = pixels;
        layer.revision += 1;
        Ok(())
    }

    fn animate(&mut self) -> Result<(), SceneError> {
        self.animating = true;
        Ok(())
    }
}
