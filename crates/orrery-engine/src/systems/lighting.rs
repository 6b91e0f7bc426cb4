/// Point and ambient lighting for lit materials.
///
/// Lights are persistent across frames; only per-frame data is cleared.
/// Each frame, the runner serializes active lights to the shared buffer
/// for the host renderer's lighting pass.

use glam::Vec3;
use crate::components::mesh::Color;

/// A 3D point light with position, color, intensity and range.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, distance]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Cut-off range in world units (0 = infinite).
    pub distance: f32,
}

impl PointLight {
    /// Create a new point light at the given position.
    ///
    /// - `pos`: World-space position
    /// - `color`: RGB color
    /// - `intensity`: Light strength multiplier (physically based, candela-like)
    /// - `distance`: Range after which the light contributes nothing
    pub fn new(pos: Vec3, color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            distance,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Manages active lights and ambient color for the scene.
///
/// The ambient color defaults to black, so lit meshes are dark until lights are added.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(4)
    }

    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: Color::new(0.0, 0.0, 0.0),
        }
    }

    /// Add a point light to the scene.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Get an iterator over active lights.
    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = color;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// Pointer to the lights data for shared-buffer reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
