/// Body table and scene configuration.
///
/// Loaded from `data/solar_system.json`, embedded at compile time. Speeds are
/// radians per fixed step; distances and radii are scene units.

use glam::Vec3;
use serde::{Deserialize, Deserializer};
use orrery_engine::{AssetManifest, Color};

/// Body index constants (list order, mercury → pluto).
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLUTO: usize = 8;
pub const PLANET_COUNT: usize = 9;

// ── Editable ranges ──────────────────────────────────────────────────

pub const DISTANCE_RANGE: (f64, f64) = (10.0, 300.0);
pub const RADIUS_RANGE: (f64, f64) = (1.0, 12.0);
pub const ROTATION_SPEED_RANGE: (f64, f64) = (0.002, 0.05);
pub const REVOLUTION_SPEED_RANGE: (f64, f64) = (0.00007, 0.1);

// ── Fixed tessellation ───────────────────────────────────────────────

pub const SPHERE_SEGMENTS: u32 = 30;
pub const RING_SEGMENTS: u32 = 32;

const EMBEDDED: &str = include_str!("../data/solar_system.json");

/// One planet's visual and kinematic parameters. Mutable at runtime through the panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBodyDescriptor {
    pub name: String,
    /// Texture name, resolved through the asset manifest.
    pub texture: String,
    /// Sun centre to the body's centre, along the pivot's local +X.
    pub distance: f32,
    pub radius: f32,
    /// Radians per step about the body's own Y axis.
    pub rotation_speed: f64,
    /// Radians per step about the pivot's Y axis.
    pub revolution_speed: f64,
    #[serde(default)]
    pub ring: Option<RingDescriptor>,
}

/// Flat annulus riding on a body. Not tunable once built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingDescriptor {
    pub texture: String,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunDescriptor {
    pub texture: String,
    pub radius: f32,
    /// Constant spin per step; no control exists for it.
    pub spin_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointLightDescriptor {
    #[serde(deserialize_with = "hex_color")]
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LightingDescriptor {
    pub point: PointLightDescriptor,
    #[serde(deserialize_with = "hex_color")]
    pub ambient: Color,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraDescriptor {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl CameraDescriptor {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Everything the scene is built from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub sun: SunDescriptor,
    pub bodies: Vec<CelestialBodyDescriptor>,
    pub lighting: LightingDescriptor,
    pub camera: CameraDescriptor,
    #[serde(deserialize_with = "hex_color")]
    pub ring_color: Color,
    /// Texture used on all six faces of the sky cube.
    pub starfield: String,
    #[serde(default)]
    pub assets: AssetManifest,
}

impl SystemConfig {
    /// The embedded configuration. It ships with the binary, so a parse
    /// failure is a build defect.
    pub fn load() -> Self {
        Self::from_json(EMBEDDED).expect("embedded solar_system.json is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Parse `"#rrggbb"` into a linear color.
fn hex_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let digits = s.strip_prefix('#').unwrap_or(&s);
    if digits.len() != 6 {
        return Err(serde::de::Error::custom(format!("expected #rrggbb, got '{}'", s)));
    }
    u32::from_str_radix(digits, 16)
        .map(Color::from_hex)
        .map_err(serde::de::Error::custom)
}

// ── Tunable fields ───────────────────────────────────────────────────

/// The editable fields of a body, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tunable {
    Distance,
    Radius,
    RotationSpeed,
    RevolutionSpeed,
}

impl Tunable {
    pub const ALL: [Tunable; 4] = [
        Tunable::Distance,
        Tunable::Radius,
        Tunable::RotationSpeed,
        Tunable::RevolutionSpeed,
    ];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    /// Label shown in the panel; matches the JSON field name.
    pub fn label(self) -> &'static str {
        match self {
            Tunable::Distance => "distance",
            Tunable::Radius => "radius",
            Tunable::RotationSpeed => "rotationSpeed",
            Tunable::RevolutionSpeed => "revolutionSpeed",
        }
    }

    pub fn range(self) -> (f64, f64) {
        match self {
            Tunable::Distance => DISTANCE_RANGE,
            Tunable::Radius => RADIUS_RANGE,
            Tunable::RotationSpeed => ROTATION_SPEED_RANGE,
            Tunable::RevolutionSpeed => REVOLUTION_SPEED_RANGE,
        }
    }

    pub fn get(self, body: &CelestialBodyDescriptor) -> f64 {
        match self {
            Tunable::Distance => body.distance as f64,
            Tunable::Radius => body.radius as f64,
            Tunable::RotationSpeed => body.rotation_speed,
            Tunable::RevolutionSpeed => body.revolution_speed,
        }
    }

    pub fn set(self, body: &mut CelestialBodyDescriptor, value: f64) {
        match self {
            Tunable::Distance => body.distance = value as f32,
            Tunable::Radius => body.radius = value as f32,
            Tunable::RotationSpeed => body.rotation_speed = value,
            Tunable::RevolutionSpeed => body.revolution_speed = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = SystemConfig::load();
        assert_eq!(config.bodies.len(), PLANET_COUNT);
        assert_eq!(config.bodies[MERCURY].name, "mercury");
        assert_eq!(config.bodies[PLUTO].name, "pluto");
        assert_eq!(config.sun.radius, 16.0);
        assert_eq!(config.sun.spin_speed, 0.002);
        assert_eq!(config.lighting.point.intensity, 5000.0);
        assert_eq!(config.lighting.ambient, Color::from_hex(0x333333));
        assert_eq!(config.ring_color, Color::from_hex(0xf2f2f2));
        assert_eq!(config.camera.position(), Vec3::new(-90.0, 140.0, 140.0));
        assert_eq!(config.assets.path_of("saturn ring"), Some("img/saturn ring.png"));
    }

    #[test]
    fn only_saturn_and_uranus_have_rings() {
        let config = SystemConfig::load();
        let ringed: Vec<&str> = config
            .bodies
            .iter()
            .filter(|b| b.ring.is_some())
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(ringed, vec!["saturn", "uranus"]);

        let saturn = config.bodies[SATURN].ring.as_ref().unwrap();
        assert_eq!((saturn.inner_radius, saturn.outer_radius), (10.0, 20.0));
        let uranus = config.bodies[URANUS].ring.as_ref().unwrap();
        assert_eq!((uranus.inner_radius, uranus.outer_radius), (7.0, 12.0));
    }

    #[test]
    fn names_are_unique() {
        let config = SystemConfig::load();
        let mut names: Vec<&str> = config.bodies.iter().map(|b| b.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PLANET_COUNT);
    }

    #[test]
    fn starting_values_sit_inside_editable_ranges() {
        let config = SystemConfig::load();
        for body in &config.bodies {
            for field in Tunable::ALL {
                let (min, max) = field.range();
                let v = field.get(body);
                assert!(v >= min && v <= max, "{}.{} = {}", body.name, field.label(), v);
            }
        }
    }

    #[test]
    fn tunable_index_round_trip() {
        for (i, field) in Tunable::ALL.iter().enumerate() {
            assert_eq!(field.index(), i as u32);
            assert_eq!(Tunable::from_index(i as u32), Some(*field));
        }
        assert_eq!(Tunable::from_index(4), None);
    }

    #[test]
    fn tunable_set_writes_named_field() {
        let mut body = SystemConfig::load().bodies[EARTH].clone();
        Tunable::RevolutionSpeed.set(&mut body, 0.05);
        Tunable::Distance.set(&mut body, 90.0);
        assert_eq!(body.revolution_speed, 0.05);
        assert_eq!(body.distance, 90.0);
        assert_eq!(body.rotation_speed, 0.02);
    }

    #[test]
    fn bad_hex_color_is_a_parse_error() {
        let json = EMBEDDED.replace("\"#333333\"", "\"#33\"");
        assert!(SystemConfig::from_json(&json).is_err());
    }

    #[test]
    fn missing_ring_defaults_to_none() {
        let json = r#"{ "name": "x", "texture": "x", "distance": 20, "radius": 2,
                        "rotationSpeed": 0.01, "revolutionSpeed": 0.01 }"#;
        let body: CelestialBodyDescriptor = serde_json::from_str(json).unwrap();
        assert!(body.ring.is_none());
    }
}
