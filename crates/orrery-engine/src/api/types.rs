use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Unique identifier for a node in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Opaque handle to a texture owned by the host.
/// Handles are valid as soon as they are issued; the image bytes stream in later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Wire value meaning "no texture" in a mesh instance.
    pub const NONE_WIRE: f32 = -1.0;
}

/// A game event communicated from Rust to the host via the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
