//! Puzzle module - statues, pedestals, the door, and the rules that tie them.

mod config;
mod controller;
mod data;
mod entities;
mod error;
mod messages;
mod plugin;

pub use config::{load_interaction_config, InteractionConfig};
pub use controller::{PuzzleController, PuzzleState};
pub use data::{DoorDescriptor, PedestalDescriptor, PuzzleDescriptor, StatueDescriptor};
pub use entities::{
    Capabilities, Door, EntityRef, Interactable, NoTextures, Pedestal, Statue, StatueId,
    TextureHandle, TextureLookup,
};
pub use error::PuzzleBuildError;
pub use messages::{MessageLog, TransientMessage};
pub use plugin::{
    spawn_puzzle_pieces, ActivePuzzle, Highlight, InteractionPrompt, PuzzlePiece, PuzzlePlugin,
};
