//! Pixel Adventure: window, event loop and renderer around the simulation.
//!
//! winit drives the loop through `ApplicationHandler`; everything happens in
//! `RedrawRequested`:
//!
//!   1. `begin_frame()` feeds wall-clock time into the fixed-step clock
//!   2. the tuning file is polled and hot-reloaded at the frame boundary
//!   3. `while should_step()`: hotkeys, queued clicks, then one `Game::update`
//!   4. `Game::draw` into a `SceneFrame`, which fills the sprite batch and
//!      the text labels
//!   5. sprite pass, then the egui pass (labels and the F3 debug window)

mod frame;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use frame::{SceneFrame, WHITE_TEXTURE};
use pxa_core::input::{InputState, Key, MouseBtn};
use pxa_core::time::FrameClock;
use pxa_game::assets::AssetStore;
use pxa_game::audio::{AudioOut, SilentAudio};
use pxa_game::config::{
    load_tuning_from_path, load_tuning_or_default, FileWatcher, SCREEN_HEIGHT, SCREEN_WIDTH,
    TITLE, TUNING_PATH,
};
use pxa_game::game::{Flow, Game};
use pxa_game::player::Controls;
use pxa_overlay::{Overlay, OverlayStats, PlayerStats, TextLabel};
use pxa_platform::window::PlatformConfig;
use pxa_render::{BatchBuffers, GpuContext, ScreenCamera, SpriteBatch, SpritePipeline, Texture};

const ASSET_ROOT: &str = ".";
const STEP_HZ: f64 = 60.0;
const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

const LEFT_KEYS: [Key; 2] = [Key::Left, Key::A];
const RIGHT_KEYS: [Key; 2] = [Key::Right, Key::D];
const JUMP_KEYS: [Key; 3] = [Key::Up, Key::W, Key::Space];

struct GpuSpriteTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// Everything that needs a live window. Built in `ApplicationHandler::resumed`.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    clock: FrameClock,
    input: InputState,
    camera: ScreenCamera,
    sprite_pipeline: SpritePipeline,
    overlay: Overlay,

    assets: AssetStore,
    textures: HashMap<Arc<str>, GpuSpriteTexture>,
    game: Game,
    audio: Box<dyn AudioOut>,
    tuning_watcher: FileWatcher,
    paused: bool,
    single_step_requested: bool,

    // Rebuilt every frame by `Game::draw`.
    batch: SpriteBatch,
    labels: Vec<TextLabel>,
    buffers: BatchBuffers,
    camera_bind_group: wgpu::BindGroup,
}

impl EngineState {
    fn new(window: Arc<Window>) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let overlay = Overlay::new(&gpu.device, gpu.surface_format, &window);

        let camera = ScreenCamera::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let buffers = BatchBuffers::new(&gpu.device);

        let assets = AssetStore::open(&PathBuf::from(ASSET_ROOT));
        let tuning_path = PathBuf::from(TUNING_PATH);
        let tuning = load_tuning_or_default(&tuning_path);
        let game = Game::new(tuning, &assets);
        let audio = open_audio(&assets);

        Ok(Self {
            window,
            gpu,
            clock: FrameClock::new(STEP_HZ),
            input: InputState::new(),
            camera,
            sprite_pipeline,
            overlay,
            assets,
            textures: HashMap::new(),
            game,
            audio,
            tuning_watcher: FileWatcher::new(tuning_path),
            paused: false,
            single_step_requested: false,
            batch: SpriteBatch::new(),
            labels: Vec::new(),
            buffers,
            camera_bind_group,
        })
    }

    fn reload_tuning(&mut self) {
        let path = self.tuning_watcher.path();
        match load_tuning_from_path(path) {
            Ok(tuning) => {
                log::info!("Reloaded tuning from '{}'", path.display());
                self.game.set_tuning(tuning);
            }
            Err(err) => log::error!("Tuning reload rejected, keeping previous values: {err}"),
        }
    }

    /// Upload any texture the current batch references for the first time.
    fn ensure_textures(&mut self) {
        let missing: Vec<Arc<str>> = self
            .batch
            .draw_calls
            .iter()
            .filter(|d| !self.textures.contains_key(&d.texture_key))
            .map(|d| Arc::clone(&d.texture_key))
            .collect();

        for key in missing {
            if self.textures.contains_key(&key) {
                continue;
            }
            let texture = self.load_texture(&key);
            let bind_group = self
                .sprite_pipeline
                .create_texture_bind_group(&self.gpu.device, &texture);
            self.textures.insert(
                key,
                GpuSpriteTexture {
                    texture,
                    bind_group,
                },
            );
        }
    }

    fn load_texture(&self, key: &str) -> Texture {
        if key != WHITE_TEXTURE {
            let loaded = self
                .assets
                .image_path(key)
                .ok_or_else(|| format!("No image file for '{key}'"))
                .and_then(|path| {
                    std::fs::read(path)
                        .map_err(|e| format!("Failed to read texture '{}': {e}", path.display()))
                })
                .and_then(|bytes| Texture::from_bytes(&self.gpu.device, &self.gpu.queue, &bytes, key));
            match loaded {
                Ok(texture) => return texture,
                Err(err) => log::warn!("{err}. Drawing '{key}' as a plain quad."),
            }
        }
        Texture::from_rgba8(
            &self.gpu.device,
            &self.gpu.queue,
            &[255, 255, 255, 255],
            1,
            1,
            key,
        )
    }

    fn estimate_memory_mb(&self) -> f32 {
        let textures: usize = self.textures.values().map(|t| t.texture.byte_size()).sum();
        (textures + self.buffers.byte_size()) as f32 / (1024.0 * 1024.0)
    }

    fn overlay_stats(&self) -> OverlayStats {
        let world = self.game.world();
        OverlayStats {
            draw_calls: self.batch.draw_calls.len() as u32,
            texture_binds: self.batch.texture_binds() as u32,
            sprite_count: self.batch.sprite_count() as u32,
            memory_estimate_mb: self.estimate_memory_mb(),
            game_state: self.game.state().name().to_string(),
            sound_enabled: self.game.sound_enabled(),
            player: world.map(|w| PlayerStats {
                position: (w.player.body().pos.x, w.player.body().pos.y),
                velocity: (w.player.vx, w.player.vy),
                on_ground: w.player.on_ground,
            }),
            enemy_count: world.map_or(0, |w| w.enemies.len() as u32),
            paused: self.paused,
        }
    }

    /// Run the fixed steps for this frame. Returns `Flow::Exit` on Escape or
    /// the menu's exit button.
    fn simulate(&mut self) -> Flow {
        self.clock.begin_frame();

        if self.tuning_watcher.should_reload() {
            self.reload_tuning();
        }

        while self.clock.should_step() {
            // Edge-triggered keys stay set for the whole frame; act on them once.
            if self.clock.steps_this_frame == 1 {
                if self.input.is_just_pressed(Key::Escape) {
                    log::info!("Escape pressed, exiting.");
                    return Flow::Exit;
                }
                if self.input.is_just_pressed(Key::F3) {
                    self.overlay.toggle_debug();
                }
            }

            for click in self.input.drain_clicks() {
                if click.button != MouseBtn::Left {
                    continue;
                }
                let point = self.camera.window_to_logical(click.position, self.gpu.size);
                if self.game.click(point, &self.assets, self.audio.as_mut()) == Flow::Exit {
                    return Flow::Exit;
                }
            }

            if self.paused && !self.single_step_requested {
                continue;
            }
            self.single_step_requested = false;

            let controls = controls_from(&self.input);
            self.game.update(controls, self.audio.as_mut());
        }
        Flow::Continue
    }

    fn render(&mut self) {
        {
            let mut frame = SceneFrame::new(&self.assets, &mut self.batch, &mut self.labels);
            self.game.draw(&mut frame);
        }
        self.ensure_textures();
        self.buffers
            .upload(&self.gpu.device, &self.gpu.queue, &self.batch);

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let pixels_per_point = self.window.scale_factor() as f32;
        let points_per_logical = self.gpu.size.0 as f32 / pixels_per_point / SCREEN_WIDTH;
        let stats = self.overlay_stats();
        let (egui_primitives, egui_textures_delta, overlay_actions) = self.overlay.prepare(
            &self.window,
            &self.clock,
            &self.labels,
            points_per_logical,
            &stats,
        );

        if overlay_actions.toggle_pause {
            self.paused = !self.paused;
            log::info!(
                "Simulation {}",
                if self.paused { "PAUSED" } else { "RESUMED" }
            );
        }
        if overlay_actions.single_step {
            self.single_step_requested = true;
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if !self.batch.is_empty() {
                render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.buffers.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                let mut last_bound: Option<&Arc<str>> = None;
                for draw in &self.batch.draw_calls {
                    let Some(texture) = self.textures.get(&draw.texture_key) else {
                        continue;
                    };
                    if last_bound.is_none_or(|last| **last != *draw.texture_key) {
                        render_pass.set_bind_group(1, &texture.bind_group, &[]);
                        last_bound = Some(&draw.texture_key);
                    }
                    render_pass.draw_indexed(
                        draw.index_start..(draw.index_start + draw.index_count),
                        0,
                        0..1,
                    );
                }
            }
        }

        self.overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    config: PlatformConfig,
    state: Option<EngineState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::fixed(TITLE, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let state = pxa_platform::window::create_window(event_loop, &self.config)
            .and_then(EngineState::new);
        match state {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Startup failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state.overlay.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                state.gpu.resize(physical_size.width, physical_size.height);
            }

            // Releases are forwarded even when egui consumed them.
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => {
                                if !egui_consumed {
                                    state.input.key_down(key);
                                }
                            }
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                if let Some(button) = map_mouse_button(button) {
                    match button_state {
                        ElementState::Pressed => {
                            if !egui_consumed {
                                state.input.mouse_down(button);
                            }
                        }
                        ElementState::Released => state.input.mouse_up(button),
                    }
                }
            }

            WindowEvent::Focused(false) => {
                state.input.release_all();
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.input.cursor = Vec2::new(position.x as f32, position.y as f32);
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }
                if state.simulate() == Flow::Exit {
                    event_loop.exit();
                    return;
                }
                state.render();

                // Only clear edge-triggered input after a fixed step consumed it.
                if state.clock.steps_this_frame > 0 {
                    state.input.end_frame();
                }
            }

            _ => {}
        }
    }
}

fn controls_from(input: &InputState) -> Controls {
    Controls {
        left: input.any_held(&LEFT_KEYS),
        right: input.any_held(&RIGHT_KEYS),
        jump: input.any_held(&JUMP_KEYS),
    }
}

#[cfg(feature = "audio")]
fn open_audio(assets: &AssetStore) -> Box<dyn AudioOut> {
    match pxa_game::audio::DeviceAudio::open(assets) {
        Ok(device) => Box::new(device),
        Err(err) => {
            log::warn!("{err}; continuing without sound");
            Box::new(SilentAudio)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_audio(_assets: &AssetStore) -> Box<dyn AudioOut> {
    log::info!("Built without the `audio` feature; sound is silent");
    Box::new(SilentAudio)
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn map_mouse_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("{TITLE} starting...");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
    }
}
