use crate::api::types::{NodeId, TextureHandle};
use crate::components::node::Node;

/// Scene background drawn behind all nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Cube-mapped sky, faces ordered +X, -X, +Y, -Y, +Z, -Z.
    CubeMap([TextureHandle; 6]),
}

/// Simple node storage using a flat Vec.
/// Designed for small node counts (tens, not thousands).
/// Hierarchy lives in `TransformGraph`; the scene only owns node data.
pub struct Scene {
    nodes: Vec<Node>,
    pub background: Option<Background>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            background: None,
        }
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterate over all nodes in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
