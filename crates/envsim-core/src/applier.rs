use crate::preset::{PerformanceConfig, PresetCatalog};
use crate::scene::{PhysicsStepper, RendererHandle, ShadowMapType};
use log::{debug, info, warn};

/// Shadow technique written on every apply, independent of the preset
pub const SOFT_SHADOWS: ShadowMapType = ShadowMapType::PcfSoft;

/// Resolve `preset_name` and push it onto whichever collaborators are present.
///
/// Never fails: unknown names resolve to the "web" entry and a missing renderer
/// or physics handle only skips the matching effects. Every write is a full
/// overwrite, so applying twice leaves only the second preset visible.
pub fn apply(
    renderer: Option<&mut dyn RendererHandle>,
    physics: Option<&mut dyn PhysicsStepper>,
    preset_name: &str,
) -> PerformanceConfig {
    let resolved = PresetCatalog::resolve(preset_name);
    let config = resolved.config;
    if resolved.fallback {
        warn!(
            "Unknown performance preset {preset_name:?}, using {}",
            resolved.preset
        );
    }

    match renderer {
        Some(renderer) => {
            renderer.set_shadow_map_enabled(config.shadows_enabled());
            renderer.set_shadow_map_type(SOFT_SHADOWS);
            renderer.set_shadow_map_size(config.shadow_resolution);
            renderer.set_antialias(config.antialiasing);

            if config.post_processing {
                info!("Post-processing enabled with preset: {preset_name}");
                renderer.request_post_processing(preset_name);
            }
        }
        None => debug!("No renderer attached, skipping renderer settings"),
    }

    if let Some(physics) = physics {
        physics.set_time_step(config.time_step());
    }

    info!("Applied performance preset: {preset_name}");
    info!("- Texture resolution: {}", config.texture_resolution);
    info!("- Physics steps: {}", config.physics_steps);
    info!("- Max polygon count: {}", config.max_poly_count);

    config
}
