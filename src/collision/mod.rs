//! Collision module - 2D footprints, sliding movement, and interaction rays.
//!
//! Everything here is pure geometry on the horizontal plane. Nothing in this
//! module touches the ECS.

mod bounding_box;
mod movement;
mod raycast;
mod trigger;

pub use bounding_box::BoundingBox;
pub use movement::resolve;
pub use raycast::{forward, ray_intersects_box, InteractionRaycaster, DEFAULT_ACCEPTANCE_THRESHOLD};
pub use trigger::{TriggerVolume, TriggerZones};
