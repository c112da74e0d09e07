//! Core game module - states, events, and fundamental systems.

mod events;
mod plugin;
mod states;

pub use events::*;
pub use plugin::{CorePlugin, GameplaySet};
pub use states::*;
