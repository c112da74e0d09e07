//! UI module - HUD and menus.

mod hud;
mod plugin;

pub use hud::prompt_text;
pub use plugin::UiPlugin;
