/// Tessellation of mesh geometry into indexed triangle lists.
///
/// Vertex data is produced once per distinct `Geometry` and handed to the host
/// renderer at init; per-frame traffic is only instance transforms.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::{Geometry, GeometryKey};

/// Interleaved vertex: position, normal, uv (8 floats).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const FLOATS: usize = 8;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    pub vertices: Vec<MeshVertex>,
    /// Counter-clockwise triangles.
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub fn tessellate(geometry: &Geometry) -> GeometryData {
    match *geometry {
        Geometry::Sphere { radius, width_segments, height_segments } => {
            sphere(radius, width_segments.max(3), height_segments.max(2))
        }
        Geometry::Ring { inner_radius, outer_radius, theta_segments } => {
            ring(inner_radius, outer_radius, theta_segments.max(3))
        }
    }
}

/// UV sphere: `(w + 1) * (h + 1)` vertices, with the degenerate triangles at both poles skipped.
fn sphere(radius: f32, w: u32, h: u32) -> GeometryData {
    let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    let row = w + 1;

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        // Pole vertices sit half a segment over so the texture seam looks even.
        let u_offset = if iy == 0 {
            0.5 / w as f32
        } else if iy == h {
            -0.5 / w as f32
        } else {
            0.0
        };

        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let (sin_theta, cos_theta) = (v * PI).sin_cos();
            let p = Vec3::new(-radius * cos_phi * sin_theta, radius * cos_theta, radius * sin_phi * sin_theta);
            vertices.push(MeshVertex {
                position: p.to_array(),
                normal: p.normalize_or_zero().to_array(),
                uv: [u + u_offset, 1.0 - v],
            });
        }
    }

    let mut indices = Vec::with_capacity((w * (h - 1) * 6) as usize);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    GeometryData { vertices, indices }
}

/// Single-band annulus in the XY plane facing +Z; uvs map the outer circle to the unit square.
fn ring(inner: f32, outer: f32, theta: u32) -> GeometryData {
    let mut vertices = Vec::with_capacity(((theta + 1) * 2) as usize);

    for radius in [inner, outer] {
        for i in 0..=theta {
            let (sin, cos) = (i as f32 / theta as f32 * TAU).sin_cos();
            let (x, y) = (radius * cos, radius * sin);
            vertices.push(MeshVertex {
                position: [x, y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [(x / outer + 1.0) / 2.0, (y / outer + 1.0) / 2.0],
            });
        }
    }

    let mut indices = Vec::with_capacity((theta * 6) as usize);
    for i in 0..theta {
        let a = i;
        let b = i + theta + 1;
        let c = i + theta + 2;
        let d = i + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    GeometryData { vertices, indices }
}

/// Shared tessellations, keyed by geometry parameters.
/// Ids are dense and stable in insertion order.
#[derive(Debug, Default)]
pub struct GeometryCache {
    ids: HashMap<GeometryKey, u32>,
    data: Vec<GeometryData>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `geometry`, tessellating it on first sight.
    pub fn intern(&mut self, geometry: &Geometry) -> u32 {
        let key = geometry.key();
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.data.len() as u32;
        self.data.push(tessellate(geometry));
        self.ids.insert(key, id);
        id
    }

    pub fn id_of(&self, geometry: &Geometry) -> Option<u32> {
        self.ids.get(&geometry.key()).copied()
    }

    pub fn get(&self, id: u32) -> Option<&GeometryData> {
        self.data.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
