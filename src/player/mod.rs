//! Player module - player entity, movement, and camera.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::{spawn_player, step, MovementIntent};
pub use plugin::PlayerPlugin;
