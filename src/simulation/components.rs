use crate::simulation::scene::OverlayId;
use bevy::prelude::*;

#[derive(Component)]
pub struct ViewCamera;

#[derive(Component)]
pub struct SunLight;

#[derive(Component)]
pub struct TerrainEntity;

/// Plane showing one climate overlay layer
#[derive(Component)]
pub struct ClimateOverlay {
    pub id: OverlayId,
    pub revision: u64,
    pub image: Handle<Image>,
}
