use crate::api::controls::ControlSpec;
use crate::api::types::{GameEvent, NodeId};
use crate::assets::registry::TextureRegistry;
use crate::bridge::protocol::DEFAULT_MAX_LIGHTS;
use crate::components::node::Node;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial viewport width in pixels.
    pub viewport_width: f32,
    /// Initial viewport height in pixels.
    pub viewport_height: f32,
    /// Maximum number of mesh instances (default: 256).
    pub max_mesh_instances: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
    /// Maximum number of game events per frame (default: 64).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_mesh_instances: 256,
            max_lights: DEFAULT_MAX_LIGHTS,
            max_events: 64,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: build the scene, load textures, place lights and camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. Input is drained by the runner after the first step of a frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Live-editable controls the host panel should show.
    fn controls(&self) -> Vec<ControlSpec> {
        Vec::new()
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub lights: LightState,
    pub textures: TextureRegistry,
    pub camera: PerspectiveCamera,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_mesh_instances),
            graph: TransformGraph::new(),
            lights: LightState::with_capacity(config.max_lights),
            textures: TextureRegistry::new(),
            camera: PerspectiveCamera::new(
                45.0,
                config.viewport_width,
                config.viewport_height,
                0.1,
                1000.0,
            ),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Store `node` in the scene and link it under `parent` (or as a root).
    pub fn spawn(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = node.id;
        self.graph.attach(parent, id);
        self.scene.spawn(node);
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Recompute every node's world matrix from the hierarchy.
    pub fn propagate(&mut self) {
        self.graph.propagate(&mut self.scene);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn spawn_links_into_graph() {
        let mut ctx = EngineContext::new();
        let parent = ctx.next_id();
        ctx.spawn(Node::new(parent), None);
        let child = ctx.next_id();
        ctx.spawn(Node::new(child).with_translation(Vec3::new(5.0, 0.0, 0.0)), Some(parent));

        assert_eq!(ctx.scene.len(), 2);
        assert_eq!(ctx.graph.parent_of(child), Some(parent));
        assert_eq!(ctx.graph.roots(), &[parent]);

        ctx.propagate();
        let pos = ctx.scene.get(child).unwrap().world_position();
        assert!((pos - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent { kind: 1.0, a: 0.0, b: 0.0, c: 0.0 });
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn camera_matches_config_viewport() {
        let config = GameConfig { viewport_width: 800.0, viewport_height: 400.0, ..GameConfig::default() };
        let ctx = EngineContext::with_config(&config);
        assert!((ctx.camera.aspect - 2.0).abs() < 1e-6);
    }
}
