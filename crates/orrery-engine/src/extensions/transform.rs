// extensions/transform.rs
//
// Transform hierarchy: tracks parent-child relationships by NodeId.
// Node data (local transform, world matrix) lives in the Scene; this graph
// only knows the tree shape and composes world = parent.world * local.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.attach(Some(pivot_id), planet_id);
//   graph.propagate(&mut scene);  // Writes Node.world for every registered node

use std::collections::HashMap;
use glam::Mat4;
use crate::api::types::NodeId;
use crate::core::scene::Scene;

#[derive(Debug, Clone, Default)]
struct Link {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Transform hierarchy graph. Manages parent-child relationships.
#[derive(Debug, Default)]
pub struct TransformGraph {
    links: HashMap<NodeId, Link>,
    /// Nodes with no parent, in registration order.
    roots: Vec<NodeId>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `child` under `parent` (or at the root when `None`).
    /// Re-attaching moves the node; it never has two parents.
    pub fn attach(&mut self, parent: Option<NodeId>, child: NodeId) {
        if let Some(old) = self.links.entry(child).or_default().parent.take() {
            if let Some(old_link) = self.links.get_mut(&old) {
                old_link.children.retain(|&c| c != child);
            }
        }
        self.roots.retain(|&r| r != child);

        match parent {
            Some(p) => {
                let parent_link = self.links.entry(p).or_default();
                if !parent_link.children.contains(&child) {
                    parent_link.children.push(child);
                }
                if parent_link.parent.is_none() && !self.roots.contains(&p) {
                    self.roots.push(p);
                }
                if let Some(link) = self.links.get_mut(&child) {
                    link.parent = Some(p);
                }
            }
            None => self.roots.push(child),
        }
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.links.get(&id).and_then(|l| l.parent)
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.links.get(&id).map(|l| l.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Recompute `Node.world` for every node reachable from a root.
    /// Parents are always written before their children.
    pub fn propagate(&self, scene: &mut Scene) {
        let mut stack: Vec<(NodeId, Mat4)> =
            self.roots.iter().rev().map(|&r| (r, Mat4::IDENTITY)).collect();

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = scene.get_mut(id) else { continue };
            let world = parent_world * node.local.matrix();
            node.world = world;

            for &child in self.children_of(id).iter().rev() {
                stack.push((child, world));
            }
        }
    }

    /// World matrix of a single node, composed on demand from the root down.
    pub fn world_matrix(&self, id: NodeId, scene: &Scene) -> Option<Mat4> {
        let local = scene.get(id)?.local.matrix();
        match self.parent_of(id) {
            Some(parent) => Some(self.world_matrix(parent, scene)? * local),
            None => Some(local),
        }
    }

    /// Number of nodes in the hierarchy.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn attach_links_parent_and_child() {
        let mut graph = TransformGraph::new();
        graph.attach(None, NodeId(1));
        graph.attach(Some(NodeId(1)), NodeId(2));

        assert_eq!(graph.parent_of(NodeId(2)), Some(NodeId(1)));
        assert_eq!(graph.children_of(NodeId(1)), &[NodeId(2)]);
        assert_eq!(graph.roots(), &[NodeId(1)]);
    }

    #[test]
    fn reattach_moves_child() {
        let mut graph = TransformGraph::new();
        graph.attach(None, NodeId(1));
        graph.attach(None, NodeId(2));
        graph.attach(Some(NodeId(1)), NodeId(3));
        graph.attach(Some(NodeId(2)), NodeId(3));

        assert!(graph.children_of(NodeId(1)).is_empty());
        assert_eq!(graph.children_of(NodeId(2)), &[NodeId(3)]);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn propagate_composes_rotation_then_offset() {
        let mut scene = Scene::new();
        let mut graph = TransformGraph::new();
        let pivot = NodeId(1);
        let body = NodeId(2);

        scene.spawn(Node::new(pivot));
        scene.spawn(Node::new(body).with_translation(Vec3::new(50.0, 0.0, 0.0)));
        graph.attach(None, pivot);
        graph.attach(Some(pivot), body);

        scene.get_mut(pivot).unwrap().local.rotate_y(FRAC_PI_2);
        graph.propagate(&mut scene);

        // A quarter-turn of the pivot carries the body from +X to -Z.
        let pos = scene.get(body).unwrap().world_position();
        assert!(approx(pos, Vec3::new(0.0, 0.0, -50.0)), "got {pos:?}");
    }

    #[test]
    fn child_inherits_parent_scale() {
        let mut scene = Scene::new();
        let mut graph = TransformGraph::new();
        scene.spawn(Node::new(NodeId(1)));
        scene.spawn(Node::new(NodeId(2)).with_translation(Vec3::new(0.0, 1.0, 0.0)));
        graph.attach(None, NodeId(1));
        graph.attach(Some(NodeId(1)), NodeId(2));

        scene.get_mut(NodeId(1)).unwrap().local.set_uniform_scale(3.0);
        graph.propagate(&mut scene);

        assert!(approx(scene.get(NodeId(2)).unwrap().world_position(), Vec3::new(0.0, 3.0, 0.0)));
    }

    #[test]
    fn world_matrix_matches_propagate() {
        let mut scene = Scene::new();
        let mut graph = TransformGraph::new();
        scene.spawn(Node::new(NodeId(1)));
        scene.spawn(Node::new(NodeId(2)).with_translation(Vec3::new(10.0, 0.0, 0.0)));
        scene.spawn(Node::new(NodeId(3)).with_translation(Vec3::new(0.0, 2.0, 0.0)));
        graph.attach(None, NodeId(1));
        graph.attach(Some(NodeId(1)), NodeId(2));
        graph.attach(Some(NodeId(2)), NodeId(3));
        scene.get_mut(NodeId(1)).unwrap().local.rotate_y(0.7);

        graph.propagate(&mut scene);
        let on_demand = graph.world_matrix(NodeId(3), &scene).unwrap();
        let propagated = scene.get(NodeId(3)).unwrap().world;
        assert!(on_demand.abs_diff_eq(propagated, 1e-5));
    }
}
