//! World module - level data, static geometry, trigger zones, and textures.

mod data;
mod error;
mod plugin;
mod textures;

pub use data::{
    load_level_definitions, CameraDef, CurrentLevel, FloorDef, LevelDefinition, LevelRegistry,
    TriggerDef, WallDef,
};
pub use error::DataLoadError;
pub use plugin::{
    advance_to_next_level, next_level_name, setup_level, ActiveTriggers, FixedCamera,
    LevelColliders, LevelEntity, WorldPlugin,
};
pub use textures::TextureRegistry;
