//! Level data structures and RON loading.

use bevy::math::DVec3;
use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::collision::{BoundingBox, TriggerVolume, TriggerZones};
use crate::puzzle::{
    InteractionConfig, NoTextures, PuzzleBuildError, PuzzleController, PuzzleDescriptor,
    TextureLookup,
};

const LEVELS_DIR: &str = "assets/data/levels";

fn vec3(v: (f64, f64, f64)) -> DVec3 {
    DVec3::new(v.0, v.1, v.2)
}

/// A solid wall block standing on `position`, centred on it horizontally.
#[derive(Debug, Clone, Deserialize)]
pub struct WallDef {
    pub position: (f64, f64, f64),
    pub size: (f64, f64, f64),
    #[serde(default)]
    pub texture: Option<String>,
}

/// A camera trigger zone given by two opposite corners.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerDef {
    pub min: (f64, f64, f64),
    pub max: (f64, f64, f64),
    #[serde(default)]
    pub camera: Option<String>,
}

/// A fixed viewpoint a trigger zone can switch to.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraDef {
    pub position: (f64, f64, f64),
    pub look_at: (f64, f64, f64),
}

impl CameraDef {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(vec3(self.position).as_vec3())
            .looking_at(vec3(self.look_at).as_vec3(), Vec3::Y)
    }
}

/// Walkable ground, centred on `center` at height zero.
#[derive(Debug, Clone, Deserialize)]
pub struct FloorDef {
    pub center: (f64, f64),
    pub size: (f64, f64),
    #[serde(default)]
    pub texture: Option<String>,
}

/// Level definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub player_start: (f64, f64, f64),
    /// Initial yaw in degrees.
    #[serde(default)]
    pub player_facing: f64,
    /// Level to load after this one is completed.
    #[serde(default)]
    pub next_level: Option<String>,
    /// Texture key -> asset path.
    #[serde(default)]
    pub textures: HashMap<String, String>,
    #[serde(default)]
    pub floor: Option<FloorDef>,
    #[serde(default)]
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
    /// Fixed cameras by id, referenced from triggers.
    #[serde(default)]
    pub cameras: HashMap<String, CameraDef>,
    #[serde(default)]
    pub puzzle: Option<PuzzleDescriptor>,
}

impl LevelDefinition {
    /// Parse and validate a level. `source` names the data in error messages.
    pub fn from_ron_str(source: &str, contents: &str) -> Result<Self, DataLoadError> {
        let level: Self = ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: source.to_string(),
            details: e.to_string(),
        })?;

        for trigger in &level.triggers {
            if let Some(camera) = &trigger.camera {
                if !level.cameras.contains_key(camera) {
                    warn!("{}: trigger refers to unknown camera '{}'", source, camera);
                }
            }
        }

        // Catch broken puzzles at load time instead of on entering the level.
        level
            .build_puzzle(&NoTextures, &InteractionConfig::default())
            .map_err(|e| DataLoadError::InvalidPuzzle {
                path: source.to_string(),
                source: e,
            })?;

        Ok(level)
    }

    /// Read, parse and validate a level file.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(DataLoadError::FileNotFound(display));
        }
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron_str(&display, &contents)
    }

    pub fn player_start(&self) -> DVec3 {
        vec3(self.player_start)
    }

    /// Footprints of every wall.
    pub fn wall_colliders(&self) -> Vec<BoundingBox> {
        self.walls
            .iter()
            .map(|wall| BoundingBox::from_center_size(vec3(wall.position), vec3(wall.size)))
            .collect()
    }

    pub fn trigger_zones(&self) -> TriggerZones {
        TriggerZones::new(
            self.triggers
                .iter()
                .map(|t| {
                    TriggerVolume::new(BoundingBox::new(vec3(t.min), vec3(t.max)), t.camera.clone())
                })
                .collect(),
        )
    }

    /// Build the level's puzzle, if it has one.
    pub fn build_puzzle(
        &self,
        textures: &impl TextureLookup,
        config: &InteractionConfig,
    ) -> Result<Option<PuzzleController>, PuzzleBuildError> {
        self.puzzle
            .as_ref()
            .map(|descriptor| PuzzleController::new(descriptor, textures, config))
            .transpose()
    }
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// Resource indicating which level to load.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "gallery".to_string(),
        }
    }
}

/// Load all level definitions from assets/data/levels/.
pub fn load_level_definitions(mut commands: Commands) {
    let mut registry = LevelRegistry::default();
    let levels_path = Path::new(LEVELS_DIR);

    if let Ok(entries) = fs::read_dir(levels_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }
            let Some(stem) = path.file_stem() else {
                continue;
            };
            let name = stem.to_string_lossy();
            let level_name = name.strip_suffix(".level").unwrap_or(&name).to_string();

            match LevelDefinition::load(&path) {
                Ok(level) => {
                    info!("Loaded level: {} ({})", level_name, level.name);
                    registry.levels.insert(level_name, level);
                }
                Err(e) => {
                    error!("Failed to load level {:?}: {}", path, e);
                }
            }
        }
    } else {
        warn!("Levels directory not found: {:?}", levels_path);
    }

    info!("Loaded {} level(s)", registry.levels.len());
    commands.insert_resource(registry);
    commands.init_resource::<CurrentLevel>();
}
