use crate::core::scene::Scene;
use crate::components::mesh::Shading;
use crate::renderer::geometry::GeometryCache;
use crate::renderer::mesh_instance::{MeshBuffer, MeshInstance};

/// Build the mesh buffer from the scene's world transforms.
/// Groups instances by shading: lit first, then unlit. Sets `unlit_split` at the boundary.
/// Meshes whose geometry was never interned are skipped with a warning.
pub fn build_mesh_buffer(scene: &Scene, geometries: &GeometryCache, buffer: &mut MeshBuffer) {
    buffer.clear();

    let mut unlit: Vec<MeshInstance> = Vec::new();

    for node in scene.iter() {
        if !node.visible {
            continue;
        }
        let Some(mesh) = &node.mesh else { continue };

        let Some(geometry) = geometries.id_of(&mesh.geometry) else {
            log::warn!("node {:?} ({}) has no tessellated geometry", node.id, node.tag);
            continue;
        };

        let instance = MeshInstance::new(node.world, geometry, &mesh.material);
        match mesh.material.shading {
            Shading::Lit => buffer.push(instance),
            Shading::Unlit => unlit.push(instance),
        }
    }

    buffer.set_unlit_split(buffer.instance_count());
    for instance in unlit {
        buffer.push(instance);
    }
}

/// Tessellate every mesh in the scene that the cache has not seen yet.
pub fn intern_scene_geometry(scene: &Scene, geometries: &mut GeometryCache) {
    for mesh in scene.iter().filter_map(|n| n.mesh.as_ref()) {
        geometries.intern(&mesh.geometry);
    }
}
