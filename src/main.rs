use bevy::prelude::*;

mod camera;
mod config;
mod field;
mod input;
mod progress;
mod quiz;
mod visual;

use bevy::window::WindowResolution;
use camera::{LOGICAL_HEIGHT, LOGICAL_WIDTH, SurfacePlugin};
use config::FieldConfig;
use input::InputPlugin;
use progress::ProgressPlugin;
use visual::plugin::CanvasPlugin;

fn main() {
    let config = FieldConfig::from_env();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Aula Viz".into(),
            resolution: WindowResolution::new(LOGICAL_WIDTH as u32, LOGICAL_HEIGHT as u32),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(SurfacePlugin)
    .add_plugins(InputPlugin)
    .add_plugins(ProgressPlugin)
    .add_plugins(CanvasPlugin { config });

    app.run();
}
