//! Statue Gallery - a first-person statue puzzle in Bevy.
//!
//! The player walks a gallery with tank controls, swaps statues between
//! pedestals until each stands where its inscription says, then leaves
//! through the door that unlocks.
//!
//! # Architecture
//!
//! The game logic is plain Rust; plugins wire it into Bevy:
//!
//! - **Collision**: 2D footprints, sliding movement, interaction rays, trigger zones
//! - **Puzzle**: Statues, pedestals, the door and the swap/solve state machine
//! - **Core**: Game states, global events, system ordering
//! - **Player**: Tank-style movement and the first-person camera
//! - **World**: Level files, static geometry, fixed cameras
//! - **UI**: Prompt, notices, pause and level complete screens

pub mod collision;
pub mod core;
pub mod player;
pub mod puzzle;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct StatueGalleryPlugin;

impl Plugin for StatueGalleryPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Puzzle systems
            .add_plugins(puzzle::PuzzlePlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
