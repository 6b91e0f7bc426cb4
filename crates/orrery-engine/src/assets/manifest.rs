use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest mapping texture names to the files the host should fetch.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named textures: name → descriptor.
    #[serde(default)]
    pub textures: HashMap<String, TextureDescriptor>,
}

/// Describes a single texture image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Relative path to the image (e.g., "img/earth.jpg").
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn path_of(&self, name: &str) -> Option<&str> {
        self.textures.get(name).map(|t| t.path.as_str())
    }
}
