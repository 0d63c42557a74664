use crate::core::state::SimulationState;
use crate::simulation::resources::{ClimateUpdateStats, Simulation};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_systems(EguiPrimaryContextPass, render_performance_panel);
    }
}

/// Read-only view of the active preset and controller state
fn render_performance_panel(
    mut contexts: EguiContexts,
    simulation: Res<Simulation>,
    state: Res<State<SimulationState>>,
    updates: Res<ClimateUpdateStats>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let controller = &simulation.0;

    egui::Window::new("Performance")
        .default_width(260.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("State: {:?} ({})", state.get(), controller.state()));
            ui.label(format!("Preset: {}", controller.config().preset));
            if let Some(err) = controller.last_error() {
                ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
            }
            ui.separator();

            let Some(perf) = controller.performance() else {
                ui.label("No preset applied yet");
                return;
            };
            egui::Grid::new("performance_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    row(ui, "Texture resolution", perf.texture_resolution);
                    row(ui, "Physics steps", perf.physics_steps);
                    row(ui, "Workers", perf.quantum_workers);
                    row(ui, "Max polygons", perf.max_poly_count);
                    row(ui, "Shadow resolution", perf.shadow_resolution);
                    row(ui, "Antialiasing", perf.antialiasing);
                    row(ui, "Post-processing", perf.post_processing);
                    if let Some(terrain) = controller.terrain() {
                        row(ui, "Terrain triangles", terrain.triangle_count());
                    }
                    row(
                        ui,
                        "Climate updates",
                        format!("{} applied, {} rejected", updates.applied, updates.rejected),
                    );
                });
        });
}

fn row(ui: &mut egui::Ui, label: &str, value: impl std::fmt::Display) {
    ui.label(label);
    ui.label(value.to_string());
    ui.end_row();
}
