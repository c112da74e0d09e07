//! Player plugin - movement and camera.

use bevy::prelude::*;

use super::components::*;
use super::movement;

/// Player plugin - handles player movement. Spawning happens with the level.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);

        app.init_resource::<PlayerConfig>();
    }
}
