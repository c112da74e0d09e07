//! Interaction tuning loaded from an external RON file.
//!
//! The cone threshold and reach only change how interaction feels, so they
//! live in data rather than in code.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::collision::DEFAULT_ACCEPTANCE_THRESHOLD;

const CONFIG_PATH: &str = "assets/data/puzzle/interaction.ron";

fn default_threshold() -> f64 {
    DEFAULT_ACCEPTANCE_THRESHOLD
}

fn default_radius() -> f64 {
    8.0
}

fn default_message_duration() -> f32 {
    3.0
}

fn default_selection_color() -> (f32, f32, f32) {
    (1.0, 0.85, 0.2)
}

fn default_solved_color() -> (f32, f32, f32) {
    (0.3, 0.9, 0.4)
}

/// Interaction configuration loaded from assets/data/puzzle/interaction.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct InteractionConfig {
    /// Minimum cosine between facing and target direction.
    #[serde(default = "default_threshold")]
    pub acceptance_threshold: f64,
    /// Reach of touch and read interactions, in world units.
    #[serde(default = "default_radius")]
    pub interaction_radius: f64,
    /// Seconds a notice stays on screen.
    #[serde(default = "default_message_duration")]
    pub message_duration: f32,
    #[serde(default = "default_selection_color")]
    pub selection_color: (f32, f32, f32),
    #[serde(default = "default_solved_color")]
    pub solved_color: (f32, f32, f32),
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: default_threshold(),
            interaction_radius: default_radius(),
            message_duration: default_message_duration(),
            selection_color: default_selection_color(),
            solved_color: default_solved_color(),
        }
    }
}

impl InteractionConfig {
    /// Load from RON file, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded interaction config from {}", CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    pub fn selection_color(&self) -> Color {
        let (r, g, b) = self.selection_color;
        Color::srgb(r, g, b)
    }

    pub fn solved_color(&self) -> Color {
        let (r, g, b) = self.solved_color;
        Color::srgb(r, g, b)
    }
}

/// System to load the interaction config at startup.
pub fn load_interaction_config(mut commands: Commands) {
    commands.insert_resource(InteractionConfig::load());
}
