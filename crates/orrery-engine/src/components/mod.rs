pub mod mesh;
pub mod node;
pub mod transform;
