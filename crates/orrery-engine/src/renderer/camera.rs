use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective camera for 3D rendering.
/// The projection is derived on demand, so changing `aspect` takes effect immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    pub up: Vec3,
    /// Viewport size in pixels, mirrored to the host renderer.
    pub viewport: [f32; 2],
}

/// GPU-side uniform data for the camera (36 floats).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Eye position, w = 1.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, viewport_width: f32, viewport_height: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect: aspect_of(viewport_width, viewport_height),
            near,
            far,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            viewport: [viewport_width, viewport_height],
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Right-handed perspective projection, depth in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }

    /// Resize the viewport (e.g. on window resize): recompute aspect.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.viewport = [viewport_width, viewport_height];
        self.aspect = aspect_of(viewport_width, viewport_height);
    }
}

fn aspect_of(width: f32, height: f32) -> f32 {
    if height > 0.0 && width > 0.0 {
        width / height
    } else {
        1.0
    }
}
