//! UI plugin - HUD, pause menu, and the level complete screen.

use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::ui::IsDefaultUiCamera;

use super::hud;
use crate::core::GameState;
use crate::world::{advance_to_next_level, next_level_name, CurrentLevel, LevelRegistry};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app.add_systems(Startup, spawn_ui_camera)
            // Pause menu
            .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
            .add_systems(Update, pause_menu_input.run_if(in_state(GameState::Paused)))
            .add_systems(OnExit(GameState::Paused), cleanup_menu::<PauseMenuUi>)
            // Level complete
            .add_systems(OnEnter(GameState::LevelComplete), setup_level_complete)
            .add_systems(
                Update,
                level_complete_input.run_if(in_state(GameState::LevelComplete)),
            )
            .add_systems(OnExit(GameState::LevelComplete), cleanup_menu::<LevelCompleteUi>);
    }
}

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Marker for level complete UI entities.
#[derive(Component)]
struct LevelCompleteUi;

/// Marker for menu buttons.
#[derive(Component)]
enum MenuButton {
    Resume,
    Continue,
    Quit,
}

/// UI draws on its own camera so it survives switching between scene cameras.
fn spawn_ui_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("UI Camera"),
        Camera2d,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        IsDefaultUiCamera,
    ));
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.15, 0.15, 0.2)),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Full-screen overlay with a title; `contents` adds the rest.
fn spawn_overlay<M: Component>(
    commands: &mut Commands,
    marker: M,
    background: Color,
    title: &str,
    contents: impl FnOnce(&mut ChildBuilder),
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(background),
            marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.82, 0.75)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));
            contents(parent);
        });
}

/// Set up the pause menu.
fn setup_pause_menu(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        PauseMenuUi,
        Color::srgba(0.0, 0.0, 0.0, 0.7),
        "PAUSED",
        |parent| {
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        },
    );
}

/// Set up the level complete screen.
fn setup_level_complete(
    mut commands: Commands,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
) {
    let has_next = next_level_name(&level_registry, &current_level).is_some();

    spawn_overlay(
        &mut commands,
        LevelCompleteUi,
        Color::srgba(0.02, 0.02, 0.04, 0.9),
        "The door swings open",
        |parent| {
            if has_next {
                spawn_menu_button(parent, "Continue", MenuButton::Continue);
            } else {
                parent.spawn((
                    Text::new("The gallery is behind you."),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.6, 0.6, 0.62)),
                    Node {
                        margin: UiRect::bottom(Val::Px(30.0)),
                        ..default()
                    },
                ));
            }
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        },
    );
}

fn button_feedback(interaction: &Interaction, bg_color: &mut BackgroundColor) {
    *bg_color = match interaction {
        Interaction::Pressed => Color::srgb(0.3, 0.3, 0.35),
        Interaction::Hovered => Color::srgb(0.25, 0.25, 0.3),
        Interaction::None => Color::srgb(0.15, 0.15, 0.2),
    }
    .into();
}

/// Handle pause menu button interactions.
fn pause_menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        button_feedback(interaction, &mut bg_color);
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            MenuButton::Resume => next_state.set(GameState::InGame),
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
            MenuButton::Continue => {}
        }
    }
}

/// Handle level complete button interactions.
fn level_complete_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    level_registry: Res<LevelRegistry>,
    mut current_level: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        button_feedback(interaction, &mut bg_color);
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            MenuButton::Continue => {
                advance_to_next_level(&level_registry, &mut current_level, &mut next_state);
            }
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
            MenuButton::Resume => {}
        }
    }
}

/// Despawn every entity of one menu.
fn cleanup_menu<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
