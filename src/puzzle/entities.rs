//! Statues, pedestals and the door, plus the handles used to refer to them.

use bevy::color::Color;
use bevy::math::{DVec3, Quat};
use bevy::transform::components::Transform;
use serde::Deserialize;

use crate::collision::BoundingBox;

/// Identity of a statue, as written in level data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct StatueId(pub String);

impl From<&str> for StatueId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for StatueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque visual handle. The puzzle stores it for the presentation layer and
/// never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u64);

impl TextureHandle {
    /// Placeholder for entities without a texture.
    pub const NONE: Self = Self(0);
}

/// Resolves texture keys from level data into opaque handles.
pub trait TextureLookup {
    fn texture(&self, key: &str) -> TextureHandle;
}

/// Lookup for tests and headless runs: every key resolves to [`TextureHandle::NONE`].
pub struct NoTextures;

impl TextureLookup for NoTextures {
    fn texture(&self, _key: &str) -> TextureHandle {
        TextureHandle::NONE
    }
}

/// What an interaction resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Statue(StatueId),
    /// Pedestal by slot index.
    Pedestal(usize),
    Door,
}

/// What an interactable entity can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Blocks movement.
    pub has_collider: bool,
    /// Responds to the touch interaction (select, swap, open).
    pub has_interact_action: bool,
}

/// Borrowed view over any entity that can be targeted by the raycaster.
#[derive(Debug, Clone, Copy)]
pub enum Interactable<'a> {
    Statue(&'a Statue),
    Pedestal(&'a Pedestal),
    Door(&'a Door),
}

impl Interactable<'_> {
    pub fn position(&self) -> DVec3 {
        match self {
            Interactable::Statue(statue) => statue.position,
            Interactable::Pedestal(pedestal) => pedestal.position,
            Interactable::Door(door) => door.position,
        }
    }

    pub fn collider(&self) -> BoundingBox {
        match self {
            Interactable::Statue(statue) => statue.collider,
            Interactable::Pedestal(pedestal) => pedestal.collider,
            Interactable::Door(door) => door.collider,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        match self {
            Interactable::Statue(statue) => EntityRef::Statue(statue.id.clone()),
            Interactable::Pedestal(pedestal) => EntityRef::Pedestal(pedestal.index),
            Interactable::Door(_) => EntityRef::Door,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Interactable::Statue(_) | Interactable::Door(_) => Capabilities {
                has_collider: true,
                has_interact_action: true,
            },
            // Pedestals are read, not touched.
            Interactable::Pedestal(_) => Capabilities {
                has_collider: true,
                has_interact_action: false,
            },
        }
    }
}

fn yaw_transform(position: DVec3, rotation_deg: f64) -> Transform {
    Transform::from_translation(position.as_vec3())
        .with_rotation(Quat::from_rotation_y(rotation_deg.to_radians() as f32))
}

/// A movable piece of the puzzle.
#[derive(Debug, Clone)]
pub struct Statue {
    pub id: StatueId,
    pub name: String,
    /// Flavour text shown when the statue is selected.
    pub phrase: String,
    /// Centre of the statue's base.
    pub position: DVec3,
    pub size: DVec3,
    /// Yaw in degrees.
    pub rotation: f64,
    pub collider: BoundingBox,
    pub texture: TextureHandle,
    pub highlight: Option<Color>,
}

impl Statue {
    pub fn new(
        id: StatueId,
        name: String,
        phrase: String,
        position: DVec3,
        size: DVec3,
        rotation: f64,
        texture: TextureHandle,
    ) -> Self {
        Self {
            id,
            name,
            phrase,
            position,
            size,
            rotation,
            collider: BoundingBox::from_center_size(position, size),
            texture,
            highlight: None,
        }
    }

    /// Move the statue, replacing its collider to match.
    pub fn reposition(&mut self, position: DVec3) {
        self.position = position;
        self.collider = self.collider.recentered(position);
    }

    pub fn transform(&self) -> Transform {
        yaw_transform(self.position, self.rotation)
    }
}

/// A fixed receptacle expecting one particular statue.
#[derive(Debug, Clone)]
pub struct Pedestal {
    /// Slot index, matching the pedestal's position in the puzzle.
    pub index: usize,
    /// Centre of the pedestal's base.
    pub position: DVec3,
    pub size: DVec3,
    pub inscription: String,
    pub correct_statue_id: StatueId,
    pub collider: BoundingBox,
    pub texture: TextureHandle,
    pub highlight: Option<Color>,
}

impl Pedestal {
    pub fn new(
        index: usize,
        position: DVec3,
        size: DVec3,
        inscription: String,
        correct_statue_id: StatueId,
        texture: TextureHandle,
    ) -> Self {
        Self {
            index,
            position,
            size,
            inscription,
            correct_statue_id,
            collider: BoundingBox::from_center_size(position, size),
            texture,
            highlight: None,
        }
    }

    /// Where a statue stands on this pedestal: the centre of its top face.
    pub fn slot_position(&self) -> DVec3 {
        self.position + DVec3::new(0.0, self.size.y, 0.0)
    }

    pub fn transform(&self) -> Transform {
        yaw_transform(self.position, 0.0)
    }
}

/// The exit. Locked until the puzzle is solved.
#[derive(Debug, Clone)]
pub struct Door {
    pub position: DVec3,
    pub size: DVec3,
    /// Yaw in degrees.
    pub rotation: f64,
    pub collider: BoundingBox,
    pub texture: TextureHandle,
    pub highlight: Option<Color>,
    is_locked: bool,
}

impl Door {
    pub fn new(position: DVec3, size: DVec3, rotation: f64, texture: TextureHandle) -> Self {
        Self {
            position,
            size,
            rotation,
            collider: BoundingBox::from_center_size(position, size),
            texture,
            highlight: None,
            is_locked: true,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Unlock the door. There is no way to lock it again.
    pub fn unlock(&mut self) {
        self.is_locked = false;
    }

    /// Try to go through the door. Returns `true` when it can be crossed.
    pub fn interact(&self) -> bool {
        !self.is_locked
    }

    pub fn transform(&self) -> Transform {
        yaw_transform(self.position, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statue_reposition_moves_collider() {
        let mut statue = Statue::new(
            StatueId::from("owl"),
            "Owl".to_string(),
            String::new(),
            DVec3::ZERO,
            DVec3::new(1.0, 2.0, 1.0),
            90.0,
            TextureHandle::NONE,
        );
        statue.reposition(DVec3::new(4.0, 1.0, -2.0));

        assert_eq!(statue.position, DVec3::new(4.0, 1.0, -2.0));
        assert_eq!(
            statue.collider,
            BoundingBox::from_center_size(statue.position, statue.size)
        );
    }

    #[test]
    fn door_unlocks_once_and_stays_unlocked() {
        let mut door = Door::new(DVec3::ZERO, DVec3::new(2.0, 3.0, 0.2), 0.0, TextureHandle::NONE);
        assert!(door.is_locked());
        assert!(!door.interact());

        door.unlock();
        door.unlock();
        assert!(!door.is_locked());
        assert!(door.interact());
    }

    #[test]
    fn slot_sits_on_top_of_pedestal() {
        let pedestal = Pedestal::new(
            0,
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.5, 1.0),
            String::new(),
            StatueId::from("owl"),
            TextureHandle::NONE,
        );
        assert_eq!(pedestal.slot_position(), DVec3::new(1.0, 1.5, 1.0));
    }

    #[test]
    fn pedestals_cannot_be_touched() {
        let pedestal = Pedestal::new(
            2,
            DVec3::ZERO,
            DVec3::ONE,
            String::new(),
            StatueId::from("owl"),
            TextureHandle::NONE,
        );
        let view = Interactable::Pedestal(&pedestal);
        assert!(!view.capabilities().has_interact_action);
        assert_eq!(view.entity_ref(), EntityRef::Pedestal(2));
    }
}
