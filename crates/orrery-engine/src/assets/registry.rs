use std::collections::HashMap;
use serde::Serialize;
use crate::api::types::TextureHandle;
use crate::assets::manifest::AssetManifest;

/// One texture the host must fetch and bind to `handle`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureEntry {
    pub handle: TextureHandle,
    pub name: String,
    pub path: String,
}

/// Registry of named textures.
///
/// `load` hands out a handle immediately; the host streams the bytes in and
/// binds them later. An unknown name is not an error: it falls back to using
/// the name as the path, and whatever the host does with a missing file
/// (blank texture) is the degraded result.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    manifest: AssetManifest,
    by_name: HashMap<String, TextureHandle>,
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: AssetManifest) -> Self {
        Self {
            manifest,
            ..Self::default()
        }
    }

    /// Handle for `name`; loading the same name twice returns the same handle.
    pub fn load(&mut self, name: &str) -> TextureHandle {
        if let Some(&handle) = self.by_name.get(name) {
            return handle;
        }

        let path = match self.manifest.path_of(name) {
            Some(path) => path.to_owned(),
            None => {
                log::warn!("texture '{}' not in manifest, using name as path", name);
                name.to_owned()
            }
        };

        let handle = TextureHandle(self.entries.len() as u32);
        self.entries.push(TextureEntry { handle, name: name.to_owned(), path });
        self.by_name.insert(name.to_owned(), handle);
        handle
    }

    /// Six cube faces (+X, -X, +Y, -Y, +Z, -Z).
    pub fn cube_map(&mut self, faces: [&str; 6]) -> [TextureHandle; 6] {
        faces.map(|face| self.load(face))
    }

    pub fn get(&self, name: &str) -> Option<TextureHandle> {
        self.by_name.get(name).copied()
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    /// Entries as JSON for the host loader.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_through_manifest() {
        let manifest = AssetManifest::from_json(
            r#"{ "textures": { "earth": { "path": "img/earth.jpg" } } }"#,
        )
        .unwrap();
        let mut reg = TextureRegistry::from_manifest(manifest);
        let earth = reg.load("earth");
        assert_eq!(reg.entries()[earth.0 as usize].path, "img/earth.jpg");
    }

    #[test]
    fn same_name_same_handle() {
        let mut reg = TextureRegistry::new();
        let a = reg.load("stars");
        let b = reg.load("stars");
        let c = reg.load("sun");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(reg.entries().len(), 2);
    }

    #[test]
    fn unknown_name_falls_back_to_name_as_path() {
        let mut reg = TextureRegistry::new();
        let h = reg.load("img/pluto.jpg");
        assert_eq!(reg.entries()[h.0 as usize].path, "img/pluto.jpg");
        assert_eq!(reg.get("img/pluto.jpg"), Some(h));
    }

    #[test]
    fn cube_map_with_one_image_shares_a_handle() {
        let mut reg = TextureRegistry::new();
        let faces = reg.cube_map(["stars"; 6]);
        assert!(faces.iter().all(|&f| f == faces[0]));
        assert_eq!(reg.entries().len(), 1);
    }

    #[test]
    fn json_lists_entries() {
        let mut reg = TextureRegistry::new();
        reg.load("sun");
        let json = reg.to_json().unwrap();
        assert_eq!(json, r#"[{"handle":0,"name":"sun","path":"sun"}]"#);
    }
}
