pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{NodeId, TextureHandle, GameEvent};
pub use api::controls::{ControlSpec, controls_to_json};
pub use components::node::Node;
pub use components::transform::Transform;
pub use components::mesh::{Color, Geometry, Material, MeshComponent, Shading, Side};
pub use core::scene::{Background, Scene};
pub use core::time::FrameClock;
pub use renderer::camera::{CameraUniform, PerspectiveCamera};
pub use renderer::geometry::{GeometryCache, GeometryData, MeshVertex};
pub use renderer::mesh_instance::{MeshBuffer, MeshInstance};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{TextureEntry, TextureRegistry};
pub use bridge::protocol::ProtocolLayout;
pub use bridge::protocol::{LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use systems::lighting::{PointLight, LightState};
pub use systems::render::{build_mesh_buffer, intern_scene_geometry};

// Extensions: decoupled optional systems
pub use extensions::{OrbitControls, TransformGraph};
