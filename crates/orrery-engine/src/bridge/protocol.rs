/// Shared buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 36 floats]
/// [Mesh instances: max_mesh_instances × 24 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_MESH_INSTANCES: usize = 2;
pub const HEADER_MESH_INSTANCE_COUNT: usize = 3;
pub const HEADER_UNLIT_SPLIT: usize = 4;
pub const HEADER_MAX_LIGHTS: usize = 5;
pub const HEADER_LIGHT_COUNT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_VIEWPORT_WIDTH: usize = 9;
pub const HEADER_VIEWPORT_HEIGHT: usize = 10;
pub const HEADER_AMBIENT_R: usize = 11;
pub const HEADER_AMBIENT_G: usize = 12;
pub const HEADER_AMBIENT_B: usize = 13;
pub const HEADER_PROTOCOL_VERSION: usize = 14;
pub const HEADER_GEOMETRY_COUNT: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera uniform: view, projection, eye position.
pub const CAMERA_FLOATS: usize = 36;

/// Floats per mesh instance: model matrix, rgba, geometry, texture, shading, side, pad.
pub const MESH_INSTANCE_FLOATS: usize = 24;

/// Floats per point light: x, y, z, r, g, b, intensity, distance.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Default light capacity.
pub const DEFAULT_MAX_LIGHTS: usize = 8;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_mesh_instances: usize,
    pub max_lights: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub mesh_data_offset: usize,
    pub light_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_mesh_instances: usize, max_lights: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let mesh_data_offset = camera_offset + CAMERA_FLOATS;
        let light_data_offset = mesh_data_offset + max_mesh_instances * MESH_INSTANCE_FLOATS;
        let event_data_offset = light_data_offset + max_lights * LIGHT_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_mesh_instances,
            max_lights,
            max_events,
            camera_offset,
            mesh_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_mesh_instances, config.max_lights, config.max_events)
    }

    /// Header values the host needs before it can read any other section.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_MAX_MESH_INSTANCES] = self.max_mesh_instances as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameEvent;
    use crate::renderer::camera::CameraUniform;
    use crate::renderer::mesh_instance::MeshInstance;

    #[test]
    fn wire_sizes_match_pod_types() {
        assert_eq!(CAMERA_FLOATS, CameraUniform::FLOATS);
        assert_eq!(MESH_INSTANCE_FLOATS, MeshInstance::FLOATS);
        assert_eq!(EVENT_FLOATS, GameEvent::FLOATS);
    }

    #[test]
    fn from_default_config() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        assert_eq!(layout.max_mesh_instances, config.max_mesh_instances);
        assert_eq!(layout.max_lights, DEFAULT_MAX_LIGHTS);
        assert_eq!(layout.camera_offset, HEADER_FLOATS);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(32, 4, 16);
        let expected_total = HEADER_FLOATS + 36 + 32 * 24 + 4 * 8 + 16 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 8, 20);
        assert_eq!(layout.mesh_data_offset, layout.camera_offset + CAMERA_FLOATS);
        assert_eq!(layout.light_data_offset, layout.mesh_data_offset + 100 * MESH_INSTANCE_FLOATS);
        assert_eq!(layout.event_data_offset, layout.light_data_offset + 8 * LIGHT_FLOATS);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 20 * EVENT_FLOATS);
    }

    #[test]
    fn header_carries_capacities() {
        let header = ProtocolLayout::new(64, 2, 8).header();
        assert_eq!(header[HEADER_MAX_MESH_INSTANCES], 64.0);
        assert_eq!(header[HEADER_MAX_LIGHTS], 2.0);
        assert_eq!(header[HEADER_MAX_EVENTS], 8.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_LOCK], 0.0);
    }
}
