//! Invisible zones that react to the player standing in them.

use super::bounding_box::BoundingBox;

/// A zone that switches the presentation to a given camera.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerVolume {
    pub bounds: BoundingBox,
    pub camera: Option<String>,
}

impl TriggerVolume {
    pub fn new(bounds: BoundingBox, camera: Option<String>) -> Self {
        Self { bounds, camera }
    }

    /// Touching the zone counts as being inside it.
    pub fn is_inside(&self, actor_box: &BoundingBox) -> bool {
        self.bounds.overlaps(actor_box)
    }
}

/// All trigger volumes of a level.
#[derive(Debug, Clone, Default)]
pub struct TriggerZones {
    volumes: Vec<TriggerVolume>,
}

impl TriggerZones {
    pub fn new(volumes: Vec<TriggerVolume>) -> Self {
        Self { volumes }
    }

    /// Camera of the first zone containing the actor, in declaration order.
    pub fn active_camera(&self, actor_box: &BoundingBox) -> Option<&str> {
        self.volumes
            .iter()
            .find(|volume| volume.is_inside(actor_box))
            .and_then(|volume| volume.camera.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}
