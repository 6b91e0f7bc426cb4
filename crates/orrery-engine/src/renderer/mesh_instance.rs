use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::api::types::TextureHandle;
use crate::components::mesh::{Material, Shading, Side};

/// Per-instance mesh render data, written to the shared buffer for the host renderer.
/// 24 floats = 96 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix.
    pub model: [f32; 16],
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Geometry id from the `GeometryCache`.
    pub geometry: f32,
    /// Texture handle, or `TextureHandle::NONE_WIRE`.
    pub texture: f32,
    /// 0 = lit, 1 = unlit.
    pub shading: f32,
    /// 0 = front faces, 1 = double-sided.
    pub side: f32,
    pub _pad0: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(world: Mat4, geometry: u32, material: &Material) -> Self {
        Self {
            model: world.to_cols_array(),
            r: material.color.r,
            g: material.color.g,
            b: material.color.b,
            geometry: geometry as f32,
            texture: material
                .texture
                .map(|TextureHandle(h)| h as f32)
                .unwrap_or(TextureHandle::NONE_WIRE),
            shading: match material.shading {
                Shading::Lit => 0.0,
                Shading::Unlit => 1.0,
            },
            side: match material.side {
                Side::Front => 0.0,
                Side::Double => 1.0,
            },
            _pad0: 0.0,
        }
    }
}

/// Buffer of mesh instances: lit instances first, unlit after `unlit_split`.
pub struct MeshBuffer {
    instances: Vec<MeshInstance>,
    pub unlit_split: u32,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            unlit_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.unlit_split = 0;
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn set_unlit_split(&mut self, split: u32) {
        self.unlit_split = split;
    }

    pub fn instances(&self) -> &[MeshInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for MeshBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::Color;
    use glam::Vec3;

    #[test]
    fn mesh_instance_is_96_bytes() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::STRIDE_BYTES);
    }

    #[test]
    fn encodes_material_flags() {
        let mat = Material::unlit(TextureHandle(5))
            .with_side(Side::Double)
            .with_color(Color::from_hex(0xf2f2f2));
        let inst = MeshInstance::new(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), 4, &mat);
        assert_eq!(inst.texture, 5.0);
        assert_eq!(inst.geometry, 4.0);
        assert_eq!(inst.shading, 1.0);
        assert_eq!(inst.side, 1.0);
        assert_eq!(&inst.model[12..15], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn untextured_material_uses_sentinel() {
        let inst = MeshInstance::new(Mat4::IDENTITY, 0, &Material::default());
        assert_eq!(inst.texture, TextureHandle::NONE_WIRE);
        assert_eq!(inst.shading, 0.0);
    }
}
