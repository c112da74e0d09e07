//! In-game HUD - interaction prompt and puzzle notices.

use bevy::prelude::*;

use crate::core::{GameState, GameplaySet};
use crate::puzzle::{ActivePuzzle, InteractionPrompt};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the prompt line above the bottom edge.
#[derive(Component)]
pub struct PromptText;

/// Marker for the notice line in the lower third.
#[derive(Component)]
pub struct MessageText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_prompt_text, update_message_text).in_set(GameplaySet::Presentation),
        );
}

/// Key hints for what the player is facing.
pub fn prompt_text(prompt: InteractionPrompt) -> String {
    let mut hints = Vec::new();
    if prompt.can_touch {
        hints.push("[E] Touch");
    }
    if prompt.can_read {
        hints.push("[R] Read");
    }
    hints.join("   ")
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(30.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.92, 0.9, 0.85)),
                Node {
                    margin: UiRect::bottom(Val::Px(16.0)),
                    ..default()
                },
                MessageText,
            ));

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.62)),
                PromptText,
            ));
        });

    // Crosshair (center of screen)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));
        });
}

fn update_prompt_text(
    prompt: Res<InteractionPrompt>,
    mut text_query: Query<&mut Text, With<PromptText>>,
) {
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };
    let hints = prompt_text(*prompt);
    if text.0 != hints {
        text.0 = hints;
    }
}

fn update_message_text(
    puzzle: Option<Res<ActivePuzzle>>,
    mut text_query: Query<&mut Text, With<MessageText>>,
) {
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };
    let message = puzzle
        .as_ref()
        .and_then(|puzzle| puzzle.0.current_message())
        .unwrap_or_default();
    if text.0 != message {
        text.0 = message.to_string();
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_available_actions() {
        let both = InteractionPrompt {
            can_touch: true,
            can_read: true,
        };
        assert_eq!(prompt_text(both), "[E] Touch   [R] Read");

        let read_only = InteractionPrompt {
            can_touch: false,
            can_read: true,
        };
        assert_eq!(prompt_text(read_only), "[R] Read");

        assert_eq!(prompt_text(InteractionPrompt::default()), "");
    }
}
