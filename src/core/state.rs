use bevy::prelude::States;

/// App-level mirror of the controller lifecycle
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum SimulationState {
    #[default]
    Loading,
    Running,
    // Startup failed; the scene stays up without terrain or overlay
    Failed,
}
