/// Per-step animation: every pivot turns by its body's revolution speed, every
/// body mesh spins by its rotation speed, and the sun spins at a constant rate.
///
/// Angles accumulate in f64 and are wrapped into [0, 2π) before being written
/// as absolute Y rotations, so long runs at tiny speeds do not drift.

use std::f64::consts::TAU;
use glam::Quat;
use orrery_engine::{NodeId, Scene};

use crate::bodies::CelestialBodyDescriptor;
use crate::builder::SceneHandles;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct BodyAngles {
    orbit: f64,
    spin: f64,
}

#[derive(Debug, Clone)]
pub struct AnimationStepper {
    sun_spin_speed: f64,
    sun_angle: f64,
    angles: Vec<BodyAngles>,
}

impl AnimationStepper {
    pub fn new(body_count: usize, sun_spin_speed: f64) -> Self {
        Self {
            sun_spin_speed,
            sun_angle: 0.0,
            angles: vec![BodyAngles::default(); body_count],
        }
    }

    /// Advance one step. Speeds are read fresh from `bodies`, so edits made
    /// before this call take effect now.
    pub fn step(&mut self, bodies: &[CelestialBodyDescriptor], handles: &SceneHandles, scene: &mut Scene) {
        self.sun_angle = advance(self.sun_angle, self.sun_spin_speed);
        set_yaw(scene, handles.sun, self.sun_angle);

        for ((body, nodes), angles) in bodies.iter().zip(&handles.bodies).zip(&mut self.angles) {
            angles.orbit = advance(angles.orbit, body.revolution_speed);
            angles.spin = advance(angles.spin, body.rotation_speed);
            set_yaw(scene, nodes.pivot, angles.orbit);
            set_yaw(scene, nodes.mesh, angles.spin);
        }
    }

    /// Pivot angle of body `index`, in [0, 2π).
    pub fn orbit_angle(&self, index: usize) -> Option<f64> {
        self.angles.get(index).map(|a| a.orbit)
    }

    /// Self-rotation of body `index`, in [0, 2π).
    pub fn spin_angle(&self, index: usize) -> Option<f64> {
        self.angles.get(index).map(|a| a.spin)
    }

    pub fn sun_angle(&self) -> f64 {
        self.sun_angle
    }
}

fn advance(angle: f64, speed: f64) -> f64 {
    (angle + speed).rem_euclid(TAU)
}

fn set_yaw(scene: &mut Scene, id: NodeId, angle: f64) {
    if let Some(node) = scene.get_mut(id) {
        node.local.rotation = Quat::from_rotation_y(angle as f32);
    }
}
