/// Parameter panel binding: four live controls per body.
///
/// Edits land in the body descriptors. Distance and radius also write the
/// mesh transform immediately; speed edits are picked up by the next step.

use std::fmt;
use orrery_engine::{ControlSpec, Scene};

use crate::bodies::{CelestialBodyDescriptor, Tunable};
use crate::builder::SceneHandles;

/// An edit that made it through validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedEdit {
    pub body: usize,
    pub field: Tunable,
    /// Value after clamping.
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditRejected {
    UnknownBody(u32),
    UnknownField(u32),
    NotFinite,
}

impl fmt::Display for EditRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditRejected::UnknownBody(i) => write!(f, "unknown body index {}", i),
            EditRejected::UnknownField(i) => write!(f, "unknown field index {}", i),
            EditRejected::NotFinite => write!(f, "value is not finite"),
        }
    }
}

pub struct ParameterPanelBinding;

impl ParameterPanelBinding {
    /// One registration per tunable field per body, grouped by body name.
    pub fn controls(bodies: &[CelestialBodyDescriptor]) -> Vec<ControlSpec> {
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, body)| {
                Tunable::ALL.into_iter().map(move |field| {
                    let (min, max) = field.range();
                    ControlSpec {
                        group: body.name.clone(),
                        group_index: i as u32,
                        field: field.label().to_owned(),
                        field_index: field.index(),
                        min,
                        max,
                        value: field.get(body),
                    }
                })
            })
            .collect()
    }

    /// Validate, clamp and apply one edit.
    pub fn apply(
        bodies: &mut [CelestialBodyDescriptor],
        handles: &SceneHandles,
        scene: &mut Scene,
        body_index: u32,
        field_index: u32,
        value: f64,
    ) -> Result<AppliedEdit, EditRejected> {
        let body = body_index as usize;
        let (Some(desc), Some(nodes)) = (bodies.get_mut(body), handles.bodies.get(body)) else {
            return Err(EditRejected::UnknownBody(body_index));
        };
        let field = Tunable::from_index(field_index).ok_or(EditRejected::UnknownField(field_index))?;
        if !value.is_finite() {
            return Err(EditRejected::NotFinite);
        }

        let (min, max) = field.range();
        let value = value.clamp(min, max);
        field.set(desc, value);

        match field {
            Tunable::Distance => {
                if let Some(mesh) = scene.get_mut(nodes.mesh) {
                    mesh.local.translation.x = desc.distance;
                }
            }
            Tunable::Radius => {
                // Relative to the construction radius, so repeated edits never compound.
                if let Some(mesh) = scene.get_mut(nodes.mesh) {
                    mesh.local.set_uniform_scale(desc.radius / nodes.base_radius);
                }
            }
            Tunable::RotationSpeed | Tunable::RevolutionSpeed => {}
        }

        Ok(AppliedEdit { body, field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{SystemConfig, EARTH, JUPITER, PLANET_COUNT, SATURN};
    use crate::builder::SceneGraphBuilder;
    use glam::Vec3;
    use orrery_engine::EngineContext;

    fn setup() -> (EngineContext, SceneHandles, SystemConfig) {
        let config = SystemConfig::load();
        let mut ctx = EngineContext::new();
        let handles = SceneGraphBuilder::build(&mut ctx, &config);
        (ctx, handles, config)
    }

    #[test]
    fn thirty_six_controls_in_panel_order() {
        let config = SystemConfig::load();
        let controls = ParameterPanelBinding::controls(&config.bodies);
        assert_eq!(controls.len(), 36);
        assert_eq!(controls.len(), PLANET_COUNT * Tunable::ALL.len());

        let first = &controls[0];
        assert_eq!((first.group.as_str(), first.field.as_str()), ("mercury", "distance"));
        assert_eq!((first.min, first.max, first.value), (10.0, 300.0, 28.0));

        let last = &controls[35];
        assert_eq!((last.group.as_str(), last.field.as_str()), ("pluto", "revolutionSpeed"));
        assert_eq!((last.group_index, last.field_index), (8, 3));
        assert_eq!((last.min, last.max), (0.00007, 0.1));
    }

    #[test]
    fn distance_edit_moves_only_that_mesh() {
        let (mut ctx, handles, mut config) = setup();
        let before: Vec<Vec3> = handles
            .bodies
            .iter()
            .map(|b| ctx.scene.get(b.mesh).unwrap().local.translation)
            .collect();
        let pivot_rotation = ctx.scene.get(handles.bodies[JUPITER].pivot).unwrap().local.rotation;

        let edit = ParameterPanelBinding::apply(
            &mut config.bodies, &handles, &mut ctx.scene, JUPITER as u32, 0, 150.0,
        )
        .unwrap();
        assert_eq!(edit.value, 150.0);
        assert_eq!(config.bodies[JUPITER].distance, 150.0);

        for (i, body) in handles.bodies.iter().enumerate() {
            let t = ctx.scene.get(body.mesh).unwrap().local.translation;
            if i == JUPITER {
                assert_eq!(t, Vec3::new(150.0, 0.0, 0.0));
            } else {
                assert_eq!(t, before[i]);
            }
        }
        assert_eq!(
            ctx.scene.get(handles.bodies[JUPITER].pivot).unwrap().local.rotation,
            pivot_rotation
        );
    }

    #[test]
    fn radius_edits_scale_from_construction_radius() {
        let (mut ctx, handles, mut config) = setup();
        let saturn = handles.bodies[SATURN];

        ParameterPanelBinding::apply(&mut config.bodies, &handles, &mut ctx.scene, SATURN as u32, 1, 5.0).unwrap();
        ParameterPanelBinding::apply(&mut config.bodies, &handles, &mut ctx.scene, SATURN as u32, 1, 12.0).unwrap();
        ParameterPanelBinding::apply(&mut config.bodies, &handles, &mut ctx.scene, SATURN as u32, 1, 2.0).unwrap();

        let mesh = ctx.scene.get(saturn.mesh).unwrap();
        assert!((mesh.local.scale - Vec3::splat(0.2)).length() < 1e-6);

        // The ring rides along through the hierarchy; its own transform is untouched.
        ctx.propagate();
        let ring = ctx.scene.get(saturn.ring.unwrap()).unwrap();
        assert_eq!(ring.local.scale, Vec3::ONE);
        assert!((ring.world.x_axis.truncate().length() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn values_are_clamped_to_range() {
        let (mut ctx, handles, mut config) = setup();
        let edit = ParameterPanelBinding::apply(
            &mut config.bodies, &handles, &mut ctx.scene, EARTH as u32, 3, 5.0,
        )
        .unwrap();
        assert_eq!(edit.value, 0.1);
        assert_eq!(config.bodies[EARTH].revolution_speed, 0.1);

        let edit = ParameterPanelBinding::apply(
            &mut config.bodies, &handles, &mut ctx.scene, EARTH as u32, 0, -40.0,
        )
        .unwrap();
        assert_eq!(edit.value, 10.0);
    }

    #[test]
    fn speed_edit_writes_descriptor_only() {
        let (mut ctx, handles, mut config) = setup();
        let mesh_before = ctx.scene.get(handles.bodies[EARTH].mesh).unwrap().local;
        ParameterPanelBinding::apply(&mut config.bodies, &handles, &mut ctx.scene, EARTH as u32, 2, 0.03).unwrap();
        assert_eq!(config.bodies[EARTH].rotation_speed, 0.03);
        assert_eq!(ctx.scene.get(handles.bodies[EARTH].mesh).unwrap().local, mesh_before);
    }

    #[test]
    fn bad_edits_are_rejected() {
        let (mut ctx, handles, mut config) = setup();
        let original = config.bodies.clone();

        let mut apply = |body, field, value| {
            ParameterPanelBinding::apply(&mut config.bodies, &handles, &mut ctx.scene, body, field, value)
        };
        assert_eq!(apply(9, 0, 50.0), Err(EditRejected::UnknownBody(9)));
        assert_eq!(apply(0, 4, 50.0), Err(EditRejected::UnknownField(4)));
        assert_eq!(apply(0, 0, f64::NAN), Err(EditRejected::NotFinite));
        assert_eq!(apply(0, 1, f64::INFINITY), Err(EditRejected::NotFinite));

        assert_eq!(config.bodies, original);
    }
}
