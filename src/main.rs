use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::WindowResolution,
};
use color_match::{camera::CamPlugin, play::PlayPlugin, prelude::WINDOW_SIZE, state::GameState};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Color Game".into(),
                resizable: true,
                focused: true,
                mode: bevy::window::WindowMode::Windowed,
                resolution: WindowResolution::new(WINDOW_SIZE.x, WINDOW_SIZE.y),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin::default()))
        .init_state::<GameState>()
        .add_plugins((CamPlugin, PlayPlugin))
        .run();
}
