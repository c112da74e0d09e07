//! Player-related components.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::collision::{forward, BoundingBox};

/// The player. Position and facing live here in full precision; the
/// entity's `Transform` is derived from them.
#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Feet position on the floor plane.
    pub position: DVec3,
    /// Yaw in degrees, kept in `[0, 360)`.
    pub facing: f64,
    /// Half the width of the square footprint.
    pub half_extent: f64,
}

impl Player {
    pub fn new(position: DVec3, facing: f64, half_extent: f64) -> Self {
        Self {
            position,
            facing: facing.rem_euclid(360.0),
            half_extent,
        }
    }

    /// Footprint used for collision and trigger checks.
    pub fn aabb(&self) -> BoundingBox {
        let half = DVec3::new(self.half_extent, 0.0, self.half_extent);
        BoundingBox::new(self.position - half, self.position + half)
    }

    pub fn transform(&self) -> Transform {
        let dir = forward(self.facing);
        Transform::from_translation(self.position.as_vec3())
            .looking_to(Vec3::new(dir.x as f32, 0.0, dir.y as f32), Vec3::Y)
    }
}

/// Marker component for the player's camera.
#[derive(Component)]
pub struct PlayerCamera;

/// Tank-style movement tuning.
#[derive(Resource, Debug, Clone)]
pub struct PlayerConfig {
    /// Units per second.
    pub move_speed: f64,
    /// Degrees per second.
    pub turn_speed: f64,
    pub half_extent: f64,
    /// Camera height above the feet.
    pub eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            turn_speed: 150.0,
            half_extent: 0.5,
            eye_height: 1.6,
        }
    }
}
