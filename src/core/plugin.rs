//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused, LevelComplete)
/// - Global events (PuzzleEvent, CameraZoneChanged)
/// - Pause handling
/// - The ordering of per-frame gameplay systems
pub struct CorePlugin;

/// Per-frame gameplay ordering. Only runs while in game.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Read keyboard and move the player.
    Movement,
    /// Touch and read interactions against the puzzle.
    Interaction,
    /// Timers, events and trigger zones.
    Update,
    /// Mirror simulation state onto transforms and highlights.
    Presentation,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_event::<PuzzleEvent>()
            .add_event::<CameraZoneChanged>()
            .configure_sets(
                Update,
                (
                    GameplaySet::Movement,
                    GameplaySet::Interaction,
                    GameplaySet::Update,
                    GameplaySet::Presentation,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            // Level data is read in Startup, so the first frame can go straight in.
            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)))
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            );
    }
}

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}
