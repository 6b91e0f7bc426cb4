// extensions/orbit_controls.rs
//
// Mouse/touch orbit controls for a PerspectiveCamera.
// The camera circles a target point on a sphere described by
// (azimuth, elevation, distance); drag orbits, wheel dollies, pan moves the target.

use glam::{Vec2, Vec3};
use crate::renderer::camera::PerspectiveCamera;

/// Pointer travel (pixels) before a press becomes a drag.
const DRAG_THRESHOLD: f32 = 3.0;
/// Radians of orbit per pixel of drag.
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Multiplicative dolly per wheel tick.
const ZOOM_STEP: f32 = 1.05;
/// Keep just shy of the poles so `look_at` never sees a degenerate up vector.
const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    azimuth: f32,
    elevation: f32,
    distance: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let distance = offset.length().max(1e-3);
        Self {
            azimuth: offset.x.atan2(offset.z),
            elevation: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
        }
    }

    fn to_offset(self) -> Vec3 {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * self.distance
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical: Spherical,
    home: (Vec3, Spherical),
    dragging: bool,
    drag_moved: bool,
    drag_start: Vec2,
    last_pointer: Vec2,
}

impl OrbitControls {
    /// Take over a camera, keeping its current position and target.
    pub fn new(camera: &PerspectiveCamera) -> Self {
        let spherical = Spherical::from_offset(camera.position - camera.target);
        Self {
            target: camera.target,
            min_distance: camera.near * 10.0,
            max_distance: camera.far * 0.9,
            spherical,
            home: (camera.target, spherical),
            dragging: false,
            drag_moved: false,
            drag_start: Vec2::ZERO,
            last_pointer: Vec2::ZERO,
        }
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.spherical.distance = self.spherical.distance.clamp(min, max);
        self
    }

    pub fn distance(&self) -> f32 {
        self.spherical.distance
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging && self.drag_moved
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.dragging = true;
        self.drag_moved = false;
        self.drag_start = pos;
        self.last_pointer = pos;
    }

    /// Returns true when the view changed.
    pub fn pointer_move(&mut self, pos: Vec2) -> bool {
        if !self.dragging {
            return false;
        }
        if !self.drag_moved && pos.distance(self.drag_start) > DRAG_THRESHOLD {
            self.drag_moved = true;
        }
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        if !self.drag_moved {
            return false;
        }
        self.rotate(-delta.x * ORBIT_SENSITIVITY, delta.y * ORBIT_SENSITIVITY);
        true
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.drag_moved = false;
    }

    /// Orbit by angle deltas (radians).
    pub fn rotate(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.spherical.azimuth += d_azimuth;
        self.spherical.elevation =
            (self.spherical.elevation + d_elevation).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Dolly toward (`direction > 0`) or away from the target.
    pub fn zoom(&mut self, direction: f32) {
        let factor = if direction > 0.0 { 1.0 / ZOOM_STEP } else { ZOOM_STEP };
        self.spherical.distance =
            (self.spherical.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Move the target in the camera's screen plane; scaled by distance for a consistent feel.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = -self.spherical.to_offset().normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.spherical.distance * 0.002;
        self.target += (right * -dx + up * dy) * scale;
    }

    pub fn reset(&mut self) {
        (self.target, self.spherical) = self.home;
    }

    /// Write the controlled pose into the camera.
    pub fn update(&self, camera: &mut PerspectiveCamera) {
        camera.target = self.target;
        camera.position = self.target + self.spherical.to_offset();
    }
}
