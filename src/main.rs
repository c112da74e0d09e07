//! Statue Gallery - Entry Point
//!
//! Controls:
//! - W/S: Walk forward/back
//! - A/D: Turn
//! - E: Touch a statue or the door
//! - R: Read a pedestal inscription
//! - Escape: Pause/Unpause
//! - Enter: Continue after a level is complete

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Statue Gallery".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Our game plugin
        .add_plugins(statue_gallery::StatueGalleryPlugin)

        .run();
}
