//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Player movement and
//! puzzle interaction only run in the InGame state.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while level and config data are read
/// - `InGame` while the player explores and works the puzzle
/// - `Paused` freezes gameplay but keeps the world visible
/// - `LevelComplete` once the unlocked door is used
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    Loading,
    InGame,
    Paused,
    LevelComplete,
}
