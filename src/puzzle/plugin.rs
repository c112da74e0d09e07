//! Puzzle plugin - drives the controller from input and mirrors it into the scene.

use bevy::prelude::*;

use super::config::load_interaction_config;
use super::controller::PuzzleController;
use super::entities::EntityRef;
use crate::core::{GameState, GameplaySet, PuzzleEvent};
use crate::player::Player;
use crate::world::{LevelEntity, TextureRegistry};

/// The puzzle of the level being played.
#[derive(Resource)]
pub struct ActivePuzzle(pub PuzzleController);

/// Links a spawned entity to the puzzle piece it shows.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PuzzlePiece(pub EntityRef);

/// Tint requested by the puzzle for this piece.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Highlight(pub Option<Color>);

/// The visible body of a piece. Its material carries the highlight.
#[derive(Component)]
pub struct PieceBody;

/// What the player could do right now, for the HUD.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionPrompt {
    pub can_touch: bool,
    pub can_read: bool,
}

/// Puzzle plugin - input, timers, events and presentation of the statue puzzle.
pub struct PuzzlePlugin;

impl Plugin for PuzzlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionPrompt>()
            .add_systems(Startup, load_interaction_config)
            .add_systems(Update, puzzle_input.in_set(GameplaySet::Interaction))
            .add_systems(
                Update,
                (tick_puzzle, forward_puzzle_events)
                    .chain()
                    .in_set(GameplaySet::Update),
            )
            .add_systems(
                Update,
                (update_interaction_prompt, sync_puzzle_pieces, apply_highlights)
                    .chain()
                    .in_set(GameplaySet::Presentation),
            );
    }
}

/// E touches what the player faces, R reads an inscription.
fn puzzle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    puzzle: Option<ResMut<ActivePuzzle>>,
    player_query: Query<&Player>,
) {
    let Some(mut puzzle) = puzzle else {
        return;
    };
    let Ok(player) = player_query.get_single() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::KeyE) {
        let target = puzzle.0.interact(player.position, player.facing);
        debug!("Touch interaction resolved to {:?}", target);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        let target = puzzle.0.read_interact(player.position, player.facing);
        debug!("Read interaction resolved to {:?}", target);
    }
}

fn tick_puzzle(time: Res<Time>, puzzle: Option<ResMut<ActivePuzzle>>) {
    if let Some(mut puzzle) = puzzle {
        puzzle.0.update(time.delta_secs());
    }
}

/// Publish queued puzzle outcomes as Bevy events.
fn forward_puzzle_events(
    puzzle: Option<ResMut<ActivePuzzle>>,
    mut events: EventWriter<PuzzleEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(mut puzzle) = puzzle else {
        return;
    };

    for event in puzzle.0.drain_events() {
        if event == PuzzleEvent::LevelComplete {
            next_state.set(GameState::LevelComplete);
        }
        events.send(event);
    }
}

fn update_interaction_prompt(
    puzzle: Option<Res<ActivePuzzle>>,
    player_query: Query<&Player>,
    mut prompt: ResMut<InteractionPrompt>,
) {
    let next = match (puzzle, player_query.get_single()) {
        (Some(puzzle), Ok(player)) => InteractionPrompt {
            can_touch: puzzle.0.can_touch_interact(player.position, player.facing),
            can_read: puzzle.0.can_read_interact(player.position, player.facing),
        },
        _ => InteractionPrompt::default(),
    };
    prompt.set_if_neq(next);
}

/// Copy piece positions and highlights from the controller.
fn sync_puzzle_pieces(
    puzzle: Option<Res<ActivePuzzle>>,
    mut pieces: Query<(&PuzzlePiece, &mut Transform, &mut Highlight)>,
) {
    let Some(puzzle) = puzzle else {
        return;
    };
    if !puzzle.is_changed() {
        return;
    }

    for (piece, mut transform, mut highlight) in pieces.iter_mut() {
        let (next_transform, next_highlight) = match &piece.0 {
            EntityRef::Statue(id) => match puzzle.0.statue(id) {
                Some(statue) => (statue.transform(), statue.highlight),
                None => continue,
            },
            EntityRef::Pedestal(index) => match puzzle.0.pedestals().get(*index) {
                Some(pedestal) => (pedestal.transform(), pedestal.highlight),
                None => continue,
            },
            EntityRef::Door => {
                let door = puzzle.0.door();
                (door.transform(), door.highlight)
            }
        };
        transform.set_if_neq(next_transform);
        highlight.set_if_neq(Highlight(next_highlight));
    }
}

/// Show highlights as emissive glow on each piece's material.
fn apply_highlights(
    pieces: Query<(&Highlight, &Children), Changed<Highlight>>,
    bodies: Query<&MeshMaterial3d<StandardMaterial>, With<PieceBody>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (highlight, children) in pieces.iter() {
        for &child in children.iter() {
            let Ok(material) = bodies.get(child) else {
                continue;
            };
            if let Some(material) = materials.get_mut(&material.0) {
                material.emissive = highlight
                    .0
                    .map_or(LinearRgba::BLACK, |color| color.to_linear() * 0.6);
            }
        }
    }
}

/// Spawn one scene entity per puzzle piece.
pub fn spawn_puzzle_pieces(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &TextureRegistry,
    puzzle: &PuzzleController,
) {
    for pedestal in puzzle.pedestals() {
        spawn_piece(
            commands,
            meshes,
            materials,
            textures.material(pedestal.texture, Color::srgb(0.45, 0.42, 0.4)),
            PieceDesc {
                name: format!("Pedestal {}", pedestal.index),
                piece: EntityRef::Pedestal(pedestal.index),
                transform: pedestal.transform(),
                size: pedestal.size.as_vec3(),
            },
        );
    }

    for statue in puzzle.statues() {
        spawn_piece(
            commands,
            meshes,
            materials,
            textures.material(statue.texture, Color::srgb(0.7, 0.68, 0.62)),
            PieceDesc {
                name: format!("Statue {}", statue.name),
                piece: EntityRef::Statue(statue.id.clone()),
                transform: statue.transform(),
                size: statue.size.as_vec3(),
            },
        );
    }

    let door = puzzle.door();
    spawn_piece(
        commands,
        meshes,
        materials,
        textures.material(door.texture, Color::srgb(0.35, 0.22, 0.12)),
        PieceDesc {
            name: "Door".to_string(),
            piece: EntityRef::Door,
            transform: door.transform(),
            size: door.size.as_vec3(),
        },
    );
}

struct PieceDesc {
    name: String,
    piece: EntityRef,
    transform: Transform,
    size: Vec3,
}

fn spawn_piece(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    material: StandardMaterial,
    desc: PieceDesc,
) {
    let mesh = meshes.add(Cuboid::new(desc.size.x, desc.size.y, desc.size.z));
    let material = materials.add(material);

    // Pieces are positioned by the centre of their base; the cuboid mesh is
    // centred, so lift it by half its height.
    commands
        .spawn((
            Name::new(desc.name),
            PuzzlePiece(desc.piece),
            Highlight::default(),
            LevelEntity,
            desc.transform,
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                PieceBody,
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, desc.size.y / 2.0, 0.0),
            ));
        });
}
