use glam::{Mat4, Quat, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;
use crate::components::transform::Transform;

/// Fat node: a single struct with an optional renderable.
/// Transform-only nodes (pivots, groups) simply have no mesh.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Hidden nodes (and their meshes) are skipped by the render pass.
    pub visible: bool,
    /// Transform relative to the parent node.
    pub local: Transform,
    /// World transform, written by `TransformGraph::propagate`.
    pub world: Mat4,
    pub mesh: Option<MeshComponent>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            local: Transform::default(),
            world: Mat4::IDENTITY,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.local.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.local.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// World-space position (translation column of the world matrix).
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }
}
