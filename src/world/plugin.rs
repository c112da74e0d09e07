//! World plugin - level loading, static geometry, and camera zones.

use bevy::prelude::*;

use crate::collision::{BoundingBox, TriggerZones};
use crate::core::{CameraZoneChanged, GameState, GameplaySet};
use crate::player::{spawn_player, Player, PlayerCamera, PlayerConfig};
use crate::puzzle::{
    spawn_puzzle_pieces, ActivePuzzle, InteractionConfig, TextureHandle, TextureLookup,
};

use super::data::{load_level_definitions, CurrentLevel, LevelDefinition, LevelRegistry};
use super::textures::TextureRegistry;

/// Marker for everything spawned for the current level.
#[derive(Component)]
pub struct LevelEntity;

/// Static wall footprints of the current level.
#[derive(Resource, Debug, Default)]
pub struct LevelColliders(pub Vec<BoundingBox>);

/// Trigger zones of the current level and the camera they last selected.
#[derive(Resource, Debug, Default)]
pub struct ActiveTriggers {
    pub zones: TriggerZones,
    pub camera: Option<String>,
}

/// A fixed viewpoint, inactive until its trigger zone is entered.
#[derive(Component)]
pub struct FixedCamera {
    pub id: String,
}

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_level_definitions)
            // Leaving Loading rather than entering InGame, so unpausing does not rebuild.
            .add_systems(OnExit(GameState::Loading), setup_level)
            .add_systems(OnExit(GameState::LevelComplete), cleanup_level)
            .add_systems(Update, check_camera_zones.in_set(GameplaySet::Update))
            .add_systems(Update, switch_cameras.in_set(GameplaySet::Presentation))
            .add_systems(Update, advance_level.run_if(in_state(GameState::LevelComplete)));
    }
}

/// Set up the level from data.
#[allow(clippy::too_many_arguments)]
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    asset_server: Res<AssetServer>,
    interaction_config: Res<InteractionConfig>,
    player_config: Res<PlayerConfig>,
) {
    let Some(level) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        return;
    };

    info!("Building level: {}", level.name);

    let textures = TextureRegistry::load(&level.textures, &asset_server);

    setup_environment(&mut commands);
    build_geometry(&mut commands, &mut meshes, &mut materials, &textures, level);
    spawn_fixed_cameras(&mut commands, level);

    commands.insert_resource(LevelColliders(level.wall_colliders()));
    commands.insert_resource(ActiveTriggers {
        zones: level.trigger_zones(),
        camera: None,
    });

    match level.build_puzzle(&textures, &interaction_config) {
        Ok(Some(puzzle)) => {
            info!(
                "Puzzle ready: {} statue(s) on {} pedestal(s)",
                puzzle.statues().len(),
                puzzle.pedestals().len()
            );
            spawn_puzzle_pieces(&mut commands, &mut meshes, &mut materials, &textures, &puzzle);
            commands.insert_resource(ActivePuzzle(puzzle));
        }
        Ok(None) => {
            commands.remove_resource::<ActivePuzzle>();
        }
        Err(e) => {
            error!("Level '{}' has an invalid puzzle: {}", level.name, e);
            commands.remove_resource::<ActivePuzzle>();
        }
    }

    spawn_player(&mut commands, level.player_start(), level.player_facing, &player_config);

    commands.insert_resource(textures);
}

/// Ambient and directional light for the gallery.
fn setup_environment(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.88, 0.85),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.96, 0.9),
            illuminance: 4000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        LevelEntity,
    ));
}

fn texture_of(textures: &TextureRegistry, key: Option<&str>) -> TextureHandle {
    key.map_or(TextureHandle::NONE, |key| textures.texture(key))
}

/// Spawn the floor and wall meshes.
fn build_geometry(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &TextureRegistry,
    level: &LevelDefinition,
) {
    if let Some(floor) = &level.floor {
        let material = textures.material(
            texture_of(textures, floor.texture.as_deref()),
            Color::srgb(0.3, 0.28, 0.26),
        );
        let mesh = Plane3d::default()
            .mesh()
            .size(floor.size.0 as f32, floor.size.1 as f32);
        commands.spawn((
            Name::new("Floor"),
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(material)),
            Transform::from_xyz(floor.center.0 as f32, 0.0, floor.center.1 as f32),
            LevelEntity,
        ));
    }

    for (i, wall) in level.walls.iter().enumerate() {
        let size = Vec3::new(wall.size.0 as f32, wall.size.1 as f32, wall.size.2 as f32);
        let material = textures.material(
            texture_of(textures, wall.texture.as_deref()),
            Color::srgb(0.5, 0.48, 0.45),
        );
        commands.spawn((
            Name::new(format!("Wall {i}")),
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(material)),
            Transform::from_xyz(
                wall.position.0 as f32,
                wall.position.1 as f32 + size.y / 2.0,
                wall.position.2 as f32,
            ),
            LevelEntity,
        ));
    }
}

fn spawn_fixed_cameras(commands: &mut Commands, level: &LevelDefinition) {
    for (id, camera) in &level.cameras {
        commands.spawn((
            Name::new(format!("Camera {id}")),
            FixedCamera { id: id.clone() },
            Camera3d::default(),
            Camera {
                is_active: false,
                ..default()
            },
            camera.transform(),
            LevelEntity,
        ));
    }
}

/// Clean up level entities and resources before the next level loads.
fn cleanup_level(mut commands: Commands, level_query: Query<Entity, With<LevelEntity>>) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<ActivePuzzle>();
    commands.remove_resource::<LevelColliders>();
    commands.remove_resource::<ActiveTriggers>();
    commands.remove_resource::<TextureRegistry>();
}

/// Report when the player enters or leaves a camera zone.
fn check_camera_zones(
    triggers: Option<ResMut<ActiveTriggers>>,
    player_query: Query<&Player>,
    mut events: EventWriter<CameraZoneChanged>,
) {
    let Some(mut triggers) = triggers else {
        return;
    };
    let Ok(player) = player_query.get_single() else {
        return;
    };

    let camera = triggers.zones.active_camera(&player.aabb()).map(str::to_string);
    if camera != triggers.camera {
        debug!("Camera zone changed: {:?} -> {:?}", triggers.camera, camera);
        triggers.camera = camera.clone();
        events.send(CameraZoneChanged { camera });
    }
}

/// Activate the fixed camera named by the zone, or fall back to first person.
fn switch_cameras(
    mut zone_events: EventReader<CameraZoneChanged>,
    mut fixed_cameras: Query<(&FixedCamera, &mut Camera), Without<PlayerCamera>>,
    mut player_cameras: Query<&mut Camera, With<PlayerCamera>>,
) {
    let Some(event) = zone_events.read().last() else {
        return;
    };

    let mut fixed_active = false;
    for (fixed, mut camera) in fixed_cameras.iter_mut() {
        let active = event.camera.as_deref() == Some(fixed.id.as_str());
        fixed_active |= active;
        camera.is_active = active;
    }
    if let Some(id) = &event.camera {
        if !fixed_active {
            warn!("No camera named '{}' in this level", id);
        }
    }

    for mut camera in player_cameras.iter_mut() {
        camera.is_active = !fixed_active;
    }
}

/// Enter continues to the next level, if the finished one names one.
fn advance_level(
    keyboard: Res<ButtonInput<KeyCode>>,
    level_registry: Res<LevelRegistry>,
    mut current_level: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        advance_to_next_level(&level_registry, &mut current_level, &mut next_state);
    }
}

/// Switch to the following level and reload. Returns `false` on the last level.
pub fn advance_to_next_level(
    registry: &LevelRegistry,
    current: &mut CurrentLevel,
    next_state: &mut NextState<GameState>,
) -> bool {
    match next_level_name(registry, current) {
        Some(next) => {
            info!("Advancing to level '{}'", next);
            current.name = next;
            next_state.set(GameState::Loading);
            true
        }
        None => {
            info!("No further levels after '{}'", current.name);
            false
        }
    }
}

/// Name of the level following the current one, if it exists in the registry.
pub fn next_level_name(registry: &LevelRegistry, current: &CurrentLevel) -> Option<String> {
    let next = registry.get(&current.name)?.next_level.as_ref()?;
    if registry.get(next).is_some() {
        Some(next.clone())
    } else {
        warn!("Level '{}' names unknown next level '{}'", current.name, next);
        None
    }
}
