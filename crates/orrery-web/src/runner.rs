use orrery_engine::{
    Game, GameConfig, EngineContext, InputEvent, InputQueue,
    FrameClock, ProtocolLayout, MeshBuffer, GeometryCache, CameraUniform,
    Background, controls_to_json,
};
use orrery_engine::systems::render::{build_mesh_buffer, intern_scene_geometry};
use orrery_engine::bridge::protocol::{
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_MESH_INSTANCE_COUNT, HEADER_UNLIT_SPLIT,
    HEADER_LIGHT_COUNT, HEADER_EVENT_COUNT, HEADER_VIEWPORT_WIDTH, HEADER_VIEWPORT_HEIGHT,
    HEADER_AMBIENT_R, HEADER_AMBIENT_G, HEADER_AMBIENT_B, HEADER_GEOMETRY_COUNT,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    mesh_buffer: MeshBuffer,
    geometries: GeometryCache,
    camera_uniform: CameraUniform,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Capacities plus per-frame counts, rewritten after every rebuild.
    header: [f32; HEADER_FLOATS],
    /// Wire form of the background faces; `-1` when there is no background.
    background: [f32; 6],
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let clock = FrameClock::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::with_config(&config);
        let camera_uniform = ctx.camera.uniform();
        let header = layout.header();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            mesh_buffer: MeshBuffer::with_capacity(config.max_mesh_instances),
            geometries: GeometryCache::new(),
            camera_uniform,
            clock,
            layout,
            config,
            initialized: false,
            header,
            background: [-1.0; 6],
        }
    }

    /// Initialize the game. Call once after construction.
    /// Tessellates every geometry the game spawned so the host can upload it.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        intern_scene_geometry(&self.ctx.scene, &mut self.geometries);
        if let Some(Background::CubeMap(faces)) = self.ctx.scene.background {
            self.background = faces.map(|h| h.0 as f32);
        }
        self.rebuild_frame_buffers();
        self.initialized = true;

        log::info!(
            "runner: {} nodes, {} geometries, {} textures",
            self.ctx.scene.len(),
            self.geometries.len(),
            self.ctx.textures.entries().len(),
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: advance the clock, step the game, rebuild the buffers.
    ///
    /// Queued input is seen by the first fixed step only. A frame that runs no
    /// step keeps the queue for the next frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.clock.advance(dt);
        if steps == 0 {
            return;
        }

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();
        for _ in 1..steps {
            self.game.update(&mut self.ctx, &self.input);
        }

        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "runner: {} events exceed capacity {}, dropping the rest",
                self.ctx.events.len(),
                self.layout.max_events
            );
            self.ctx.events.truncate(self.layout.max_events);
        }

        self.rebuild_frame_buffers();
    }

    fn rebuild_frame_buffers(&mut self) {
        self.ctx.propagate();
        build_mesh_buffer(&self.ctx.scene, &self.geometries, &mut self.mesh_buffer);
        self.camera_uniform = self.ctx.camera.uniform();
        self.write_header();
    }

    fn write_header(&mut self) {
        let ambient = self.ambient();
        let h = &mut self.header;
        h[HEADER_FRAME_COUNTER] += 1.0;
        h[HEADER_MESH_INSTANCE_COUNT] =
            self.mesh_buffer.instance_count().min(self.layout.max_mesh_instances as u32) as f32;
        h[HEADER_UNLIT_SPLIT] = self.mesh_buffer.unlit_split as f32;
        h[HEADER_LIGHT_COUNT] = self.ctx.lights.count().min(self.layout.max_lights) as f32;
        h[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[HEADER_VIEWPORT_WIDTH] = self.ctx.camera.viewport[0];
        h[HEADER_VIEWPORT_HEIGHT] = self.ctx.camera.viewport[1];
        h[HEADER_AMBIENT_R] = ambient[0];
        h[HEADER_AMBIENT_G] = ambient[1];
        h[HEADER_AMBIENT_B] = ambient[2];
        h[HEADER_GEOMETRY_COUNT] = self.geometries.len() as f32;
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn mesh_instances_ptr(&self) -> *const f32 {
        self.mesh_buffer.instances_ptr()
    }

    pub fn mesh_instance_count(&self) -> u32 {
        self.mesh_buffer.instance_count().min(self.layout.max_mesh_instances as u32)
    }

    pub fn unlit_split(&self) -> u32 {
        self.mesh_buffer.unlit_split
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        (self.ctx.lights.count() as u32).min(self.layout.max_lights as u32)
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient().to_array()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn background_ptr(&self) -> *const f32 {
        self.background.as_ptr()
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.camera.viewport[0]
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.camera.viewport[1]
    }

    // ---- Geometry accessors (read once at init) ----

    pub fn geometry_count(&self) -> u32 {
        self.geometries.len() as u32
    }

    pub fn geometry_vertices_ptr(&self, id: u32) -> *const f32 {
        self.geometries
            .get(id)
            .map_or(std::ptr::null(), |g| g.vertices.as_ptr() as *const f32)
    }

    pub fn geometry_vertex_count(&self, id: u32) -> u32 {
        self.geometries.get(id).map_or(0, |g| g.vertices.len() as u32)
    }

    pub fn geometry_indices_ptr(&self, id: u32) -> *const u32 {
        self.geometries.get(id).map_or(std::ptr::null(), |g| g.indices.as_ptr())
    }

    pub fn geometry_index_count(&self, id: u32) -> u32 {
        self.geometries.get(id).map_or(0, |g| g.indices.len() as u32)
    }

    // ---- JSON accessors ----

    /// Control registrations for the host parameter panel.
    pub fn controls_json(&self) -> String {
        controls_to_json(&self.game.controls()).unwrap_or_else(|e| {
            log::warn!("runner: failed to serialize controls: {}", e);
            "[]".to_owned()
        })
    }

    /// Textures the host must fetch: `[{handle, name, path}]`.
    pub fn textures_json(&self) -> String {
        self.ctx.textures.to_json().unwrap_or_else(|e| {
            log::warn!("runner: failed to serialize textures: {}", e);
            "[]".to_owned()
        })
    }

    // ---- Capacity accessors ----

    pub fn max_mesh_instances(&self) -> u32 {
        self.layout.max_mesh_instances as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_dt
    }
}
