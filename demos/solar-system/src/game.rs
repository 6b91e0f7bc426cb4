/// Solar System: sun, nine textured planets (two ringed), a starfield sky and
/// a live parameter panel.
///
/// Each fixed step: apply queued input (panel edits, camera), then advance
/// every pivot and body by one step of its current speeds.

use glam::Vec2;
use orrery_engine::*;

use crate::bodies::SystemConfig;
use crate::builder::{SceneGraphBuilder, SceneHandles};
use crate::panel::ParameterPanelBinding;
use crate::stepper::AnimationStepper;

// ── Custom event kinds from the host ─────────────────────────────────

/// Panel edit: a = body index, b = field index, c = value.
pub const CUSTOM_SET_PARAM: u32 = 1;
/// Wheel: a = direction (+1 zoom in, -1 zoom out).
pub const CUSTOM_ZOOM: u32 = 2;
pub const CUSTOM_RESET_VIEW: u32 = 3;
/// Pan the orbit target: a = dx, b = dy in pixels.
pub const CUSTOM_PAN: u32 = 4;
/// Viewport resize: a = width, b = height.
pub const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the host ─────────────────────────────────────

/// Applied edit: a = body index, b = field index, c = clamped value.
pub const EVENT_PARAM_APPLIED: f32 = 1.0;

// ── Camera limits ────────────────────────────────────────────────────

const MIN_CAMERA_DISTANCE: f32 = 20.0;
const MAX_CAMERA_DISTANCE: f32 = 800.0;

pub struct SolarSystem {
    config: SystemConfig,
    handles: Option<SceneHandles>,
    stepper: AnimationStepper,
    controls: Option<OrbitControls>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::load())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        let stepper = AnimationStepper::new(config.bodies.len(), config.sun.spin_speed);
        Self {
            config,
            handles: None,
            stepper,
            controls: None,
        }
    }

    /// Current (possibly edited) body table.
    pub fn system(&self) -> &SystemConfig {
        &self.config
    }

    pub fn handles(&self) -> Option<&SceneHandles> {
        self.handles.as_ref()
    }

    pub fn stepper(&self) -> &AnimationStepper {
        &self.stepper
    }

    fn set_param(&mut self, ctx: &mut EngineContext, body: f32, field: f32, value: f32) {
        let Some(handles) = &self.handles else { return };
        let (Some(body_index), Some(field_index)) = (wire_index(body), wire_index(field)) else {
            log::warn!("panel: ignoring edit with bad index ({}, {})", body, field);
            return;
        };

        match ParameterPanelBinding::apply(
            &mut self.config.bodies,
            handles,
            &mut ctx.scene,
            body_index,
            field_index,
            value as f64,
        ) {
            Ok(edit) => {
                log::debug!(
                    "panel: {}.{} = {}",
                    self.config.bodies[edit.body].name,
                    edit.field.label(),
                    edit.value
                );
                ctx.emit_event(GameEvent {
                    kind: EVENT_PARAM_APPLIED,
                    a: edit.body as f32,
                    b: edit.field.index() as f32,
                    c: edit.value as f32,
                });
            }
            Err(e) => log::warn!("panel: ignoring edit: {}", e),
        }
    }

    /// Returns true when the camera pose changed.
    fn handle_camera_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) -> bool {
        let Some(controls) = &mut self.controls else { return false };
        match *event {
            InputEvent::PointerDown { x, y } => {
                controls.pointer_down(Vec2::new(x, y));
                false
            }
            InputEvent::PointerMove { x, y } => controls.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => {
                controls.pointer_up();
                false
            }
            InputEvent::Custom { kind: CUSTOM_ZOOM, a, .. } => {
                controls.zoom(a);
                true
            }
            InputEvent::Custom { kind: CUSTOM_PAN, a, b, .. } => {
                if !a.is_finite() || !b.is_finite() {
                    log::warn!("pan: ignoring ({}, {})", a, b);
                    return false;
                }
                controls.pan(a, b);
                true
            }
            InputEvent::Custom { kind: CUSTOM_RESET_VIEW, .. } => {
                controls.reset();
                true
            }
            InputEvent::Custom { kind: CUSTOM_RESIZE, a, b, .. } => {
                if a > 0.0 && b > 0.0 {
                    ctx.camera.resize(a, b);
                    log::debug!("resize: {}x{}", a, b);
                } else {
                    log::warn!("resize: ignoring {}x{}", a, b);
                }
                false
            }
            _ => false,
        }
    }
}

/// A float from the wire that names a slot: finite, whole and non-negative.
fn wire_index(x: f32) -> Option<u32> {
    (x.is_finite() && x.fract() == 0.0 && x >= 0.0 && x <= u32::MAX as f32).then_some(x as u32)
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_mesh_instances: 32,
            max_lights: 1,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let handles = SceneGraphBuilder::build(ctx, &self.config);

        let controls = OrbitControls::new(&ctx.camera)
            .with_distance_limits(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
        controls.update(&mut ctx.camera);

        log::info!(
            "solar system: {} bodies, {} nodes",
            handles.bodies.len(),
            ctx.scene.len()
        );
        self.handles = Some(handles);
        self.controls = Some(controls);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // ── Handle input ─────────────────────────────────────────────
        let mut camera_changed = false;
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind: CUSTOM_SET_PARAM, a, b, c } => {
                    self.set_param(ctx, a, b, c);
                }
                InputEvent::Custom { kind, .. }
                    if !matches!(kind, CUSTOM_ZOOM | CUSTOM_RESET_VIEW | CUSTOM_PAN | CUSTOM_RESIZE) =>
                {
                    log::warn!("input: unknown custom event kind {}", kind);
                }
                _ => camera_changed |= self.handle_camera_input(ctx, event),
            }
        }
        if camera_changed {
            if let Some(controls) = &self.controls {
                controls.update(&mut ctx.camera);
            }
        }

        // ── Advance animation ────────────────────────────────────────
        if let Some(handles) = &self.handles {
            self.stepper.step(&self.config.bodies, handles, &mut ctx.scene);
        }
    }

    fn controls(&self) -> Vec<ControlSpec> {
        ParameterPanelBinding::controls(&self.config.bodies)
    }
}
