use bevy::prelude::*;

use crate::{prelude::BG_COLOR, state::GameState};

pub struct CamPlugin;

impl Plugin for CamPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BG_COLOR))
            .add_systems(OnEnter(GameState::Load), spawn_cam);
    }
}

// Init
fn spawn_cam(mut commands: Commands) {
    commands.spawn((Camera2d, Msaa::Off));
}
