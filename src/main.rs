// disable console on windows for release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::DefaultPlugins;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use envsim::{CONFIG_PATH, EnvSimPlugin, load_config};

fn main() {
    let (config, source) = load_config(CONFIG_PATH);

    App::new()
        .insert_resource(ClearColor(Color::linear_rgb(0.05, 0.07, 0.1)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Environmental Simulation".into(),
                resolution: WindowResolution::new(1500, 900),
                present_mode: PresentMode::AutoVsync,
                canvas: Some(format!("#{}", config.canvas_id)),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EnvSimPlugin { config, source })
        .run();
}
