use bevy::prelude::*;
use envsim_core::HeatmapBuffer;

/// New climate data for the active overlay
#[derive(Message)]
pub struct ClimateDataUpdated {
    pub heatmap: HeatmapBuffer,
}
