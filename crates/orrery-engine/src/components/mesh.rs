use crate::api::types::TextureHandle;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry parameters captured at construction time.
/// Geometry is never rebuilt; size edits go through the node's scale instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Latitude/longitude UV sphere centred on the origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Flat annulus in the local XY plane, facing +Z.
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        theta_segments: u32,
    },
}

/// Hashable identity of a geometry, used to share tessellations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryKey(u8, [u32; 3]);

impl Geometry {
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere { radius, width_segments, height_segments }
    }

    pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> Self {
        Self::Ring { inner_radius, outer_radius, theta_segments }
    }

    /// Construction-time sphere radius, if this is a sphere.
    pub fn sphere_radius(&self) -> Option<f32> {
        match *self {
            Self::Sphere { radius, .. } => Some(radius),
            Self::Ring { .. } => None,
        }
    }

    pub fn key(&self) -> GeometryKey {
        match *self {
            Self::Sphere { radius, width_segments, height_segments } => {
                GeometryKey(0, [radius.to_bits(), width_segments, height_segments])
            }
            Self::Ring { inner_radius, outer_radius, theta_segments } => {
                GeometryKey(1, [inner_radius.to_bits(), outer_radius.to_bits(), theta_segments])
            }
        }
    }
}

/// How a material reacts to scene lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Diffuse/specular response to point and ambient lights.
    #[default]
    Lit,
    /// Texture * color, ignoring lights (emissive look).
    Unlit,
}

/// Which triangle faces are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub texture: Option<TextureHandle>,
    pub color: Color,
    pub side: Side,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shading: Shading::Lit,
            texture: None,
            color: Color::WHITE,
            side: Side::Front,
        }
    }
}

impl Material {
    pub fn lit(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    pub fn unlit(texture: TextureHandle) -> Self {
        Self {
            shading: Shading::Unlit,
            texture: Some(texture),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

/// Renderable attached to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_radius_only_for_spheres() {
        assert_eq!(Geometry::sphere(6.4, 30, 30).sphere_radius(), Some(6.4));
        assert_eq!(Geometry::ring(10.0, 20.0, 32).sphere_radius(), None);
    }

    #[test]
    fn color_from_hex() {
        let c = Color::from_hex(0x333333);
        assert!((c.r - 0.2).abs() < 1e-6);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
    }

    #[test]
    fn geometry_keys_distinguish_parameters() {
        assert_eq!(Geometry::sphere(6.0, 30, 30).key(), Geometry::sphere(6.0, 30, 30).key());
        assert_ne!(Geometry::sphere(6.0, 30, 30).key(), Geometry::sphere(7.0, 30, 30).key());
        assert_ne!(Geometry::sphere(10.0, 20, 32).key(), Geometry::ring(10.0, 20.0, 32).key());
    }

    #[test]
    fn unlit_material_defaults() {
        let m = Material::unlit(TextureHandle(3)).with_side(Side::Double);
        assert_eq!(m.shading, Shading::Unlit);
        assert_eq!(m.side, Side::Double);
        assert_eq!(m.texture, Some(TextureHandle(3)));
    }
}
