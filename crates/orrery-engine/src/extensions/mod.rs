// extensions/mod.rs
//
// Optional extension modules for OrreryEngine.
// These are decoupled from core Node/Scene; games opt in by creating these systems.

pub mod orbit_controls;
pub mod transform;

pub use orbit_controls::OrbitControls;
pub use transform::TransformGraph;
