//! egui layer drawn over the sprite pass.
//!
//! It carries two things: the game's own text (menu title, button labels,
//! sound status), painted on the background layer every frame, and the F3
//! debug window. egui needs a `RenderPass<'static>` while
//! `begin_render_pass` borrows the encoder, so rendering is split into
//! `prepare` / `upload` / `paint` / `cleanup`, the caller opening the egui
//! pass with `forget_lifetime()` between `upload` and `paint`.

use pxa_core::time::FrameClock;
use winit::window::Window;

/// A line of game text, in logical screen units.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub center: (f32, f32),
    pub size: f32,
    pub color: [u8; 4],
}

#[derive(Debug, Clone, Default)]
pub struct PlayerStats {
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub on_ground: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub draw_calls: u32,
    pub texture_binds: u32,
    pub sprite_count: u32,
    /// Textures plus batch buffers, in megabytes.
    pub memory_estimate_mb: f32,
    pub game_state: String,
    pub sound_enabled: bool,
    pub player: Option<PlayerStats>,
    pub enemy_count: u32,
    pub paused: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayActions {
    pub toggle_pause: bool,
    /// Advance one fixed step while paused.
    pub single_step: bool,
}

pub struct Overlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub debug_visible: bool,
}

impl Overlay {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, window: &Window) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            debug_visible: false,
        }
    }

    /// Returns true when egui wants the event for itself.
    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        self.egui_winit_state.on_window_event(window, event).consumed
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::info!(
            "Debug overlay: {}",
            if self.debug_visible { "ON" } else { "OFF" }
        );
    }

    /// Run the UI for this frame. `points_per_logical` converts logical screen
    /// units into egui points.
    pub fn prepare(
        &mut self,
        window: &Window,
        clock: &FrameClock,
        labels: &[TextLabel],
        points_per_logical: f32,
        stats: &OverlayStats,
    ) -> (
        Vec<egui::ClippedPrimitive>,
        egui::TexturesDelta,
        OverlayActions,
    ) {
        let mut actions = OverlayActions::default();
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let debug_visible = self.debug_visible;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            paint_labels(ctx, labels, points_per_logical);
            if debug_visible {
                debug_window(ctx, clock, stats, &mut actions);
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta, actions)
    }

    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn paint_labels(ctx: &egui::Context, labels: &[TextLabel], points_per_logical: f32) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    for label in labels {
        let [r, g, b, a] = label.color;
        painter.text(
            egui::pos2(
                label.center.0 * points_per_logical,
                label.center.1 * points_per_logical,
            ),
            egui::Align2::CENTER_CENTER,
            &label.text,
            egui::FontId::proportional(label.size * points_per_logical),
            egui::Color32::from_rgba_unmultiplied(r, g, b, a),
        );
    }
}

fn debug_window(
    ctx: &egui::Context,
    clock: &FrameClock,
    stats: &OverlayStats,
    actions: &mut OverlayActions,
) {
    egui::Window::new("Debug")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
            ui.label(format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms));
            ui.label(format!("Steps this frame: {}", clock.steps_this_frame));
            ui.label(format!("Total steps: {}", clock.fixed_step_count));

            ui.separator();
            ui.label(format!("State: {}", stats.game_state));
            ui.label(format!(
                "Sound: {}",
                if stats.sound_enabled { "on" } else { "off" }
            ));
            if let Some(player) = &stats.player {
                ui.label(format!(
                    "Player: ({:.1}, {:.1}) v=({:.1}, {:.1})",
                    player.position.0, player.position.1, player.velocity.0, player.velocity.1
                ));
                ui.label(format!("On ground: {}", player.on_ground));
                ui.label(format!("Enemies: {}", stats.enemy_count));
            }

            ui.separator();
            ui.label(format!("Draw calls: {}", stats.draw_calls));
            ui.label(format!("Texture binds: {}", stats.texture_binds));
            ui.label(format!("Sprites: {}", stats.sprite_count));
            ui.label(format!("Memory: {:.2} MB", stats.memory_estimate_mb));

            ui.separator();
            ui.horizontal(|ui| {
                let pause_label = if stats.paused { "Resume" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    actions.toggle_pause = true;
                }
                if stats.paused && ui.button("Step").clicked() {
                    actions.single_step = true;
                }
            });
            if stats.paused {
                ui.label("\u{23f8} PAUSED");
            }
        });
}
