/// Scene construction: sun, one pivot/mesh(/ring) subtree per body, lights,
/// camera and the starfield sky. Runs once at init; nothing here is rebuilt later.

use std::f32::consts::FRAC_PI_2;
use glam::{Quat, Vec3};
use orrery_engine::{
    Background, Color, EngineContext, Geometry, Material, MeshComponent, Node, NodeId,
    PerspectiveCamera, PointLight, Side, TextureRegistry,
};

use crate::bodies::{
    CelestialBodyDescriptor, LightingDescriptor, SunDescriptor, SystemConfig, RING_SEGMENTS,
    SPHERE_SEGMENTS,
};

/// Node ids of one body's subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyNodes {
    /// Transform-only node at the origin; spinning it carries the body around its orbit.
    pub pivot: NodeId,
    /// The sphere, offset from the pivot along +X by `distance`.
    pub mesh: NodeId,
    pub ring: Option<NodeId>,
    /// Sphere radius the geometry was tessellated with. Radius edits scale relative to it.
    pub base_radius: f32,
}

/// Everything the per-step systems need to find again.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneHandles {
    pub sun: NodeId,
    /// Same order as `SystemConfig::bodies`.
    pub bodies: Vec<BodyNodes>,
}

pub struct SceneGraphBuilder<'a> {
    ctx: &'a mut EngineContext,
    ring_color: Color,
}

impl<'a> SceneGraphBuilder<'a> {
    pub fn new(ctx: &'a mut EngineContext, ring_color: Color) -> Self {
        Self { ctx, ring_color }
    }

    /// Build the whole system described by `config`.
    pub fn build(ctx: &'a mut EngineContext, config: &SystemConfig) -> SceneHandles {
        ctx.textures = TextureRegistry::from_manifest(config.assets.clone());

        let mut builder = Self::new(ctx, config.ring_color);
        builder.set_starfield(&config.starfield);
        builder.add_lights(&config.lighting);
        let sun = builder.add_sun(&config.sun);
        let bodies = config.bodies.iter().map(|b| builder.add_body(b)).collect();

        let camera = &config.camera;
        let viewport = builder.ctx.camera.viewport;
        builder.ctx.camera =
            PerspectiveCamera::new(camera.fov, viewport[0], viewport[1], camera.near, camera.far)
                .with_position(camera.position());

        SceneHandles { sun, bodies }
    }

    /// Standalone unlit sphere at the origin.
    pub fn add_sun(&mut self, sun: &SunDescriptor) -> NodeId {
        let texture = self.ctx.textures.load(&sun.texture);
        let id = self.ctx.next_id();
        self.ctx.spawn(
            Node::new(id).with_tag("sun").with_mesh(MeshComponent::new(
                Geometry::sphere(sun.radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS),
                Material::unlit(texture),
            )),
            None,
        );
        id
    }

    /// Pivot at the origin → lit sphere at `distance` → optional ring lying in the orbital plane.
    pub fn add_body(&mut self, body: &CelestialBodyDescriptor) -> BodyNodes {
        let pivot = self.ctx.next_id();
        self.ctx.spawn(Node::new(pivot).with_tag(format!("{} pivot", body.name)), None);

        let texture = self.ctx.textures.load(&body.texture);
        let geometry = Geometry::sphere(body.radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
        let base_radius = geometry.sphere_radius().unwrap_or(body.radius);
        let mesh = self.ctx.next_id();
        self.ctx.spawn(
            Node::new(mesh)
                .with_tag(body.name.as_str())
                .with_translation(Vec3::new(body.distance, 0.0, 0.0))
                .with_mesh(MeshComponent::new(geometry, Material::lit(texture))),
            Some(pivot),
        );

        let ring = body.ring.as_ref().map(|ring| {
            let texture = self.ctx.textures.load(&ring.texture);
            let id = self.ctx.next_id();
            self.ctx.spawn(
                Node::new(id)
                    .with_tag(format!("{} ring", body.name))
                    .with_rotation(Quat::from_rotation_x(FRAC_PI_2))
                    .with_mesh(MeshComponent::new(
                        Geometry::ring(ring.inner_radius, ring.outer_radius, RING_SEGMENTS),
                        Material::unlit(texture)
                            .with_color(self.ring_color)
                            .with_side(Side::Double),
                    )),
                Some(mesh),
            );
            id
        });

        log::info!(
            "built {}: distance {}, radius {}{}",
            body.name,
            body.distance,
            body.radius,
            if ring.is_some() { ", ringed" } else { "" }
        );

        BodyNodes { pivot, mesh, ring, base_radius }
    }

    /// Same image on all six faces of the sky cube.
    pub fn set_starfield(&mut self, texture: &str) {
        let faces = self.ctx.textures.cube_map([texture; 6]);
        self.ctx.scene.background = Some(Background::CubeMap(faces));
    }

    /// One point light at the sun's centre plus ambient fill.
    pub fn add_lights(&mut self, lighting: &LightingDescriptor) {
        let point = &lighting.point;
        self.ctx
            .lights
            .add(PointLight::new(Vec3::ZERO, point.color, point.intensity, point.distance));
        self.ctx.lights.set_ambient(lighting.ambient);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{PLANET_COUNT, SATURN, URANUS};
    use orrery_engine::{Shading, TextureHandle};

    fn built() -> (EngineContext, SceneHandles, SystemConfig) {
        let config = SystemConfig::load();
        let mut ctx = EngineContext::new();
        let handles = SceneGraphBuilder::build(&mut ctx, &config);
        ctx.propagate();
        (ctx, handles, config)
    }

    #[test]
    fn nine_pivot_subtrees() {
        let (ctx, handles, _) = built();
        assert_eq!(handles.bodies.len(), PLANET_COUNT);

        // Roots: the sun plus one pivot per body.
        assert_eq!(ctx.graph.roots().len(), PLANET_COUNT + 1);
        for body in &handles.bodies {
            assert_eq!(ctx.graph.parent_of(body.pivot), None);
            assert_eq!(ctx.graph.children_of(body.pivot), &[body.mesh]);
            assert!(ctx.scene.get(body.pivot).unwrap().mesh.is_none());
        }
    }

    #[test]
    fn only_saturn_and_uranus_own_a_ring() {
        let (ctx, handles, _) = built();
        for (i, body) in handles.bodies.iter().enumerate() {
            let children = ctx.graph.children_of(body.mesh);
            if i == SATURN || i == URANUS {
                assert_eq!(children.len(), 1);
                assert_eq!(Some(children[0]), body.ring);
            } else {
                assert!(children.is_empty());
                assert!(body.ring.is_none());
            }
        }
    }

    #[test]
    fn meshes_sit_at_their_distance() {
        let (ctx, handles, config) = built();
        for (body, desc) in handles.bodies.iter().zip(&config.bodies) {
            let pos = ctx.scene.get(body.mesh).unwrap().world_position();
            assert!((pos - Vec3::new(desc.distance, 0.0, 0.0)).length() < 1e-4);
            assert_eq!(body.base_radius, desc.radius);
        }
    }

    #[test]
    fn materials_follow_lighting_roles() {
        let (ctx, handles, _) = built();
        let sun = ctx.scene.get(handles.sun).unwrap().mesh.unwrap();
        assert_eq!(sun.material.shading, Shading::Unlit);
        assert_eq!(sun.geometry, Geometry::sphere(16.0, 30, 30));

        for body in &handles.bodies {
            let mesh = ctx.scene.get(body.mesh).unwrap().mesh.unwrap();
            assert_eq!(mesh.material.shading, Shading::Lit);
        }

        let ring = ctx.scene.get(handles.bodies[SATURN].ring.unwrap()).unwrap().mesh.unwrap();
        assert_eq!(ring.material.shading, Shading::Unlit);
        assert_eq!(ring.material.side, Side::Double);
        assert_eq!(ring.material.color, Color::from_hex(0xf2f2f2));
        assert_eq!(ring.geometry, Geometry::ring(10.0, 20.0, 32));
    }

    #[test]
    fn ring_lies_in_the_orbital_plane() {
        let (ctx, handles, _) = built();
        let ring = ctx.scene.get(handles.bodies[SATURN].ring.unwrap()).unwrap();
        // The annulus normal (+Z locally) points along the world Y axis.
        let normal = ring.world.transform_vector3(Vec3::Z).normalize();
        assert!(normal.y.abs() > 0.999);
    }

    #[test]
    fn starfield_uses_one_texture_on_every_face() {
        let (ctx, _, _) = built();
        let Some(Background::CubeMap(faces)) = ctx.scene.background else {
            panic!("no background");
        };
        assert!(faces.iter().all(|&f| f == faces[0]));
        let stars: TextureHandle = ctx.textures.get("stars").unwrap();
        assert_eq!(faces[0], stars);
    }

    #[test]
    fn textures_resolve_through_manifest() {
        let (ctx, _, _) = built();
        let entries = ctx.textures.entries();
        // sun, stars, nine planets, two rings
        assert_eq!(entries.len(), 13);
        let earth = entries.iter().find(|e| e.name == "earth").unwrap();
        assert_eq!(earth.path, "img/earth.jpg");
    }

    #[test]
    fn lights_and_camera_configured() {
        let (ctx, _, _) = built();
        assert_eq!(ctx.lights.count(), 1);
        let light = ctx.lights.iter().next().unwrap();
        assert_eq!(light.position(), Vec3::ZERO);
        assert_eq!(light.intensity, 5000.0);
        assert_eq!(light.distance, 300.0);
        assert_eq!(ctx.lights.ambient(), Color::from_hex(0x333333));

        assert_eq!(ctx.camera.position, Vec3::new(-90.0, 140.0, 140.0));
        assert_eq!(ctx.camera.fov_y_degrees, 45.0);
        assert_eq!(ctx.camera.far, 1000.0);
    }
}
