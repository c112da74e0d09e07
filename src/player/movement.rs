//! Tank-style player movement: W/S walk along the facing, A/D turn.

use bevy::math::DVec3;
use bevy::prelude::*;

use super::components::*;
use crate::collision::{forward, resolve, BoundingBox};
use crate::core::GameplaySet;
use crate::puzzle::ActivePuzzle;
use crate::world::{LevelColliders, LevelEntity};

/// What the keyboard asks for this frame, each axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// Positive walks forward.
    pub forward: f64,
    /// Positive turns left.
    pub turn: f64,
}

impl MovementIntent {
    pub fn from_keys(keyboard: &ButtonInput<KeyCode>) -> Self {
        let mut intent = Self::default();
        if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
            intent.forward += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
            intent.forward -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
            intent.turn += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
            intent.turn -= 1.0;
        }
        intent
    }

    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.turn == 0.0
    }
}

/// Advance the player by one frame.
///
/// Turning is applied first, then the walk along the new facing is resolved
/// against `obstacles` so the player slides along walls.
pub fn step(
    player: &mut Player,
    intent: MovementIntent,
    config: &PlayerConfig,
    delta_time: f64,
    obstacles: &[BoundingBox],
) {
    player.facing =
        (player.facing + intent.turn * config.turn_speed * delta_time).rem_euclid(360.0);

    if intent.forward == 0.0 {
        return;
    }
    let distance = intent.forward * config.move_speed * delta_time;
    let dir = forward(player.facing);
    let (dx, dz) = resolve(player.aabb(), dir.x * distance, dir.y * distance, obstacles);
    player.position += DVec3::new(dx, 0.0, dz);
}

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(Update, player_movement.in_set(GameplaySet::Movement));
}

/// Handle keyboard movement, colliding with walls and puzzle pieces.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    colliders: Option<Res<LevelColliders>>,
    puzzle: Option<Res<ActivePuzzle>>,
    mut player_query: Query<(&mut Player, &mut Transform)>,
) {
    let Ok((mut player, mut transform)) = player_query.get_single_mut() else {
        return;
    };

    let intent = MovementIntent::from_keys(&keyboard);
    if intent.is_idle() {
        return;
    }

    let mut obstacles = colliders.map(|c| c.0.clone()).unwrap_or_default();
    if let Some(puzzle) = puzzle {
        obstacles.extend(puzzle.0.obstacles());
    }

    step(&mut player, intent, &config, time.delta_secs_f64(), &obstacles);
    *transform = player.transform();
}

/// Spawn the player entity with its camera.
pub fn spawn_player(
    commands: &mut Commands,
    position: DVec3,
    facing: f64,
    config: &PlayerConfig,
) -> Entity {
    let player = Player::new(position, facing, config.half_extent);
    let transform = player.transform();

    commands
        .spawn((
            Name::new("Player"),
            player,
            LevelEntity,
            transform,
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Camera3d::default(),
                PlayerCamera,
                Transform::from_xyz(0.0, config.eye_height, 0.0),
            ));
        })
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn player_at(x: f64, z: f64, facing: f64) -> Player {
        Player::new(DVec3::new(x, 0.0, z), facing, 0.5)
    }

    fn walk() -> MovementIntent {
        MovementIntent {
            forward: 1.0,
            turn: 0.0,
        }
    }

    #[test]
    fn walks_along_facing() {
        let config = PlayerConfig::default();
        let mut player = player_at(0.0, 0.0, 0.0);
        step(&mut player, walk(), &config, 1.0, &[]);
        assert!((player.position.z - 3.0).abs() < 1e-9);
        assert!(player.position.x.abs() < 1e-9);

        let mut player = player_at(0.0, 0.0, 90.0);
        step(&mut player, walk(), &config, 1.0, &[]);
        assert!((player.position.x - 3.0).abs() < 1e-9);
    }

    #[test]
    fn backing_up_reverses_direction() {
        let config = PlayerConfig::default();
        let mut player = player_at(0.0, 0.0, 0.0);
        let back = MovementIntent {
            forward: -1.0,
            turn: 0.0,
        };
        step(&mut player, back, &config, 0.5, &[]);
        assert!((player.position.z + 1.5).abs() < 1e-9);
    }

    #[test]
    fn turning_wraps_facing() {
        let config = PlayerConfig::default();
        let mut player = player_at(0.0, 0.0, 10.0);
        let right = MovementIntent {
            forward: 0.0,
            turn: -1.0,
        };
        step(&mut player, right, &config, 0.1, &[]);
        assert!((player.facing - 355.0).abs() < 1e-9);
        assert_eq!(player.position, DVec3::ZERO);
    }

    #[test]
    fn wall_stops_the_walk() {
        let config = PlayerConfig::default();
        let wall = BoundingBox::new(DVec3::new(-5.0, 0.0, 2.0), DVec3::new(5.0, 3.0, 3.0));
        let mut player = player_at(0.0, 0.0, 0.0);

        for _ in 0..120 {
            step(&mut player, walk(), &config, FRAME, &[wall]);
        }

        assert!(player.aabb().max_z <= wall.min_z);
        assert!(player.position.z > 1.0);
    }

    #[test]
    fn slides_along_wall_when_walking_diagonally() {
        let config = PlayerConfig::default();
        let wall = BoundingBox::new(DVec3::new(-5.0, 0.0, 1.0), DVec3::new(5.0, 3.0, 2.0));
        // Just short of the wall's south face, heading north-east.
        let mut player = player_at(0.0, 0.45, 45.0);

        step(&mut player, walk(), &config, 0.5, &[wall]);

        assert_eq!(player.position.z, 0.45);
        assert!(player.position.x > 0.0);
    }

    #[test]
    fn idle_intent_changes_nothing() {
        let config = PlayerConfig::default();
        let mut player = player_at(1.0, 2.0, 45.0);
        step(&mut player, MovementIntent::default(), &config, 1.0, &[]);
        assert_eq!(player.position, DVec3::new(1.0, 0.0, 2.0));
        assert_eq!(player.facing, 45.0);
    }
}
