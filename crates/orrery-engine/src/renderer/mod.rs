pub mod camera;
pub mod geometry;
pub mod mesh_instance;

pub use camera::{CameraUniform, PerspectiveCamera};
pub use geometry::{GeometryCache, GeometryData, MeshVertex};
pub use mesh_instance::{MeshBuffer, MeshInstance};
