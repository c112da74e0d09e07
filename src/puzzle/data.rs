//! Puzzle layout as read from level files.

use serde::Deserialize;

use super::entities::StatueId;

fn default_pedestal_size() -> (f64, f64, f64) {
    (1.0, 1.0, 1.0)
}

fn default_statue_size() -> (f64, f64, f64) {
    (1.0, 2.0, 1.0)
}

fn default_door_size() -> (f64, f64, f64) {
    (2.0, 3.0, 0.2)
}

/// One receptacle, in slot order.
#[derive(Debug, Clone, Deserialize)]
pub struct PedestalDescriptor {
    pub position: (f64, f64, f64),
    #[serde(default = "default_pedestal_size")]
    pub size: (f64, f64, f64),
    #[serde(default)]
    pub inscription: String,
    pub correct_statue_id: StatueId,
    #[serde(default)]
    pub texture: Option<String>,
}

/// One movable statue and the slot it starts on.
#[derive(Debug, Clone, Deserialize)]
pub struct StatueDescriptor {
    pub id: StatueId,
    pub name: String,
    #[serde(default)]
    pub phrase: String,
    #[serde(default = "default_statue_size")]
    pub size: (f64, f64, f64),
    /// Yaw in degrees.
    #[serde(default)]
    pub rotation: f64,
    pub initial_slot: usize,
    #[serde(default)]
    pub texture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoorDescriptor {
    pub position: (f64, f64, f64),
    #[serde(default = "default_door_size")]
    pub size: (f64, f64, f64),
    /// Yaw in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub texture: Option<String>,
}

/// Full puzzle layout.
#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleDescriptor {
    pub pedestals: Vec<PedestalDescriptor>,
    pub statues: Vec<StatueDescriptor>,
    pub door: DoorDescriptor,
}
