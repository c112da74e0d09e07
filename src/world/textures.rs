//! Texture registry: level texture keys to image handles.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::puzzle::{TextureHandle, TextureLookup};

/// Images declared by the current level, addressed by [`TextureHandle`].
///
/// Handle `n` refers to `images[n - 1]`; `TextureHandle::NONE` is never issued.
#[derive(Resource, Default)]
pub struct TextureRegistry {
    keys: HashMap<String, TextureHandle>,
    images: Vec<Handle<Image>>,
}

impl TextureRegistry {
    /// Start loading every texture a level declares.
    pub fn load(textures: &HashMap<String, String>, asset_server: &AssetServer) -> Self {
        let mut registry = Self::default();
        let mut entries: Vec<_> = textures.iter().collect();
        // Stable handle numbering regardless of map order.
        entries.sort();
        for (key, path) in entries {
            registry.insert(key.clone(), asset_server.load(path.clone()));
        }
        registry
    }

    fn insert(&mut self, key: String, image: Handle<Image>) -> TextureHandle {
        self.images.push(image);
        let handle = TextureHandle(self.images.len() as u64);
        self.keys.insert(key, handle);
        handle
    }

    pub fn image(&self, handle: TextureHandle) -> Option<&Handle<Image>> {
        let index = usize::try_from(handle.0).ok()?.checked_sub(1)?;
        self.images.get(index)
    }

    /// Material for a textured surface, or a flat `fallback` colour.
    pub fn material(&self, handle: TextureHandle, fallback: Color) -> StandardMaterial {
        match self.image(handle) {
            Some(image) => StandardMaterial {
                base_color_texture: Some(image.clone()),
                perceptual_roughness: 0.9,
                ..default()
            },
            None => StandardMaterial {
                base_color: fallback,
                perceptual_roughness: 0.9,
                ..default()
            },
        }
    }
}

impl TextureLookup for TextureRegistry {
    fn texture(&self, key: &str) -> TextureHandle {
        match self.keys.get(key) {
            Some(handle) => *handle,
            None => {
                warn!("Unknown texture key '{}'", key);
                TextureHandle::NONE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_start_after_none() {
        let mut registry = TextureRegistry::default();
        let stone = registry.insert("stone".into(), Handle::default());
        let marble = registry.insert("marble".into(), Handle::default());

        assert_ne!(stone, TextureHandle::NONE);
        assert_eq!(registry.texture("stone"), stone);
        assert_eq!(registry.texture("marble"), marble);
        assert!(registry.image(marble).is_some());
    }

    #[test]
    fn unknown_keys_resolve_to_none() {
        let registry = TextureRegistry::default();
        assert_eq!(registry.texture("missing"), TextureHandle::NONE);
        assert!(registry.image(TextureHandle::NONE).is_none());
    }
}
