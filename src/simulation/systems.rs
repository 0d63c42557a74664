use crate::core::state::SimulationState;
use crate::helpers::mesh::{heatmap_image, terrain_mesh};
use crate::simulation::components::*;
use crate::simulation::events::ClimateDataUpdated;
use crate::simulation::resources::*;
use crate::simulation::scene::{FixedStepPhysics, RenderSettings};
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::light::{DirectionalLightShadowMap, ShadowFilteringMethod};
use bevy::prelude::*;
use envsim_core::terrain::TILE_SIZE;
use envsim_core::{HeatmapBuffer, ShadowMapType};

/// Gap between the highest terrain point and the overlay plane
const OVERLAY_CLEARANCE: f32 = 2.0;

pub fn report_config_source(source: Res<ConfigSource>) {
    match source.as_ref() {
        ConfigSource::File(path) => info!("Loaded simulation config from {path}"),
        ConfigSource::Defaults { reason } => {
            warn!("Using default simulation config: {reason}")
        }
    }
}

pub fn spawn_viewpoint(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, TILE_SIZE * 0.6, TILE_SIZE * 0.9).looking_at(Vec3::ZERO, Vec3::Y),
        ViewCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(TILE_SIZE, TILE_SIZE, TILE_SIZE * 0.5).looking_at(Vec3::ZERO, Vec3::Y),
        SunLight,
    ));
}

/// Drive the controller's startup sequence to completion
pub fn initialize_simulation(
    mut simulation: ResMut<Simulation>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if pollster::block_on(simulation.0.initialize()) {
        next_state.set(SimulationState::Running);
    } else {
        error!("Environmental simulation failed to start");
        next_state.set(SimulationState::Failed);
    }
}

pub fn shadow_filtering(shadow_type: ShadowMapType) -> ShadowFilteringMethod {
    match shadow_type {
        ShadowMapType::Basic | ShadowMapType::Pcf => ShadowFilteringMethod::Hardware2x2,
        ShadowMapType::PcfSoft => ShadowFilteringMethod::Gaussian,
        ShadowMapType::Temporal => ShadowFilteringMethod::Temporal,
    }
}

pub fn msaa_for(antialias: bool) -> Msaa {
    if antialias { Msaa::Sample4 } else { Msaa::Off }
}

/// Mirror the renderer settings written by the preset onto cameras and lights
pub fn sync_render_settings(
    simulation: Res<Simulation>,
    mut applied: Local<Option<RenderSettings>>,
    mut commands: Commands,
    cameras: Query<Entity, With<ViewCamera>>,
    mut lights: Query<&mut DirectionalLight, With<SunLight>>,
    mut shadow_map: ResMut<DirectionalLightShadowMap>,
) {
    let Some(scene) = simulation.scene() else {
        return;
    };
    let settings = scene.renderer;
    if applied.as_ref() == Some(&settings) || cameras.is_empty() {
        return;
    }

    for camera in cameras.iter() {
        commands.entity(camera).insert((
            msaa_for(settings.antialias),
            shadow_filtering(settings.shadow_map_type),
        ));
    }
    for mut light in lights.iter_mut() {
        light.shadows_enabled = settings.shadow_map_enabled;
    }
    shadow_map.size = settings.shadow_map_size as usize;

    info!(
        "Render settings: shadows {} ({}px), antialias {}",
        settings.shadow_map_enabled, settings.shadow_map_size, settings.antialias
    );
    *applied = Some(settings);
}

pub fn sync_physics_time_step(
    simulation: Res<Simulation>,
    mut applied: Local<FixedStepPhysics>,
    mut time: ResMut<Time<Fixed>>,
) {
    let Some(scene) = simulation.scene() else {
        return;
    };
    if scene.physics == *applied {
        return;
    }
    if let Some(step) = scene.physics.time_step {
        time.set_timestep_seconds(step);
        info!("Fixed time step set to {:.4}s", step);
    }
    *applied = scene.physics;
}

pub fn spawn_terrain(
    mut commands: Commands,
    simulation: Res<Simulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<(), With<TerrainEntity>>,
) {
    if !existing.is_empty() {
        return;
    }
    let Some(terrain) = simulation.scene().and_then(|scene| scene.terrain()) else {
        return;
    };

    info!("Spawning terrain mesh with {} triangles", terrain.triangle_count());
    commands.spawn((
        Mesh3d(meshes.add(terrain_mesh(terrain))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
        TerrainEntity,
    ));
}

/// Spawn a plane per overlay layer and re-upload pixels when a layer's
/// revision moves ahead of its entity
pub fn sync_climate_overlays(
    mut commands: Commands,
    simulation: Res<Simulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut overlays: Query<&mut ClimateOverlay>,
) {
    let Some(scene) = simulation.scene() else {
        return;
    };
    if !scene.is_animating() {
        return;
    }
    let height = scene
        .terrain()
        .map(|terrain| terrain.height_range().1)
        .unwrap_or(0.0)
        + OVERLAY_CLEARANCE;

    for layer in scene.overlays() {
        if let Some(mut overlay) = overlays.iter_mut().find(|o| o.id == layer.id) {
            if overlay.revision == layer.revision {
                continue;
            }
            if let Some(image) = images.get_mut(&overlay.image) {
                *image = heatmap_image(&layer.heatmap);
            }
            overlay.revision = layer.revision;
            continue;
        }

        let image = images.add(heatmap_image(&layer.heatmap));
        commands.spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(TILE_SIZE, TILE_SIZE))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(1.0, 1.0, 1.0, layer.opacity),
                base_color_texture: Some(image.clone()),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
            Transform::from_xyz(0.0, height, 0.0),
            ClimateOverlay {
                id: layer.id,
                revision: layer.revision,
                image,
            },
        ));
    }
}

/// Advance the synthetic climate pattern on a timer
pub fn drift_climate(
    time: Res<Time>,
    simulation: Res<Simulation>,
    mut drift: ResMut<ClimateDrift>,
    mut updates: MessageWriter<ClimateDataUpdated>,
) {
    if !drift.timer.tick(time.delta()).just_finished() {
        return;
    }
    drift.phase += CLIMATE_DRIFT_STEP;
    let size = simulation.0.config().heatmap_size;
    match HeatmapBuffer::wave_pattern(size, drift.phase) {
        Ok(heatmap) => {
            updates.write(ClimateDataUpdated { heatmap });
        }
        Err(err) => warn!("Skipping climate drift: {err}"),
    }
}

/// Forward climate messages to the controller, counting the ones it rejects
pub fn apply_climate_updates(
    mut simulation: ResMut<Simulation>,
    mut updates: MessageReader<ClimateDataUpdated>,
    mut stats: ResMut<ClimateUpdateStats>,
) {
    for update in updates.read() {
        match simulation.0.try_update_climate_data(update.heatmap.clone()) {
            Ok(()) => stats.applied += 1,
            Err(err) => {
                warn!("Dropped climate update: {err}");
                stats.rejected += 1;
            }
        }
    }
}
