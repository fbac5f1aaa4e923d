//! Top-level mode machine: title menu or a running level.
//!
//! `Game` owns every piece of mutable session state (current mode, the sound
//! flag, the live [`World`]) and is driven by three calls per frame from the
//! runtime: [`Game::click`] for each queued pointer press, [`Game::update`]
//! once per fixed step, and [`Game::draw`] once per rendered frame.
//!
//! Audio goes out through [`AudioOut`] and is gated on the sound flag here,
//! so the world and its entities never see audio at all.

use glam::Vec2;

use crate::assets::ImageCatalog;
use crate::audio::AudioOut;
use crate::config::Tuning;
use crate::draw::DrawTarget;
use crate::level::{build_world, World, WorldStep};
use crate::menu::{Menu, MenuAction};
use crate::player::Controls;

pub const JUMP_SOUND: &str = "jump";
pub const MUSIC_TRACK: &str = "music";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
}

impl GameState {
    pub fn name(self) -> &'static str {
        match self {
            GameState::Menu => "menu",
            GameState::Playing => "playing",
        }
    }
}

/// Whether the runtime should keep going after a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Game {
    state: GameState,
    sound_enabled: bool,
    tuning: Tuning,
    menu: Menu,
    world: Option<World>,
}

impl Game {
    pub fn new(tuning: Tuning, catalog: &dyn ImageCatalog) -> Self {
        Self {
            state: GameState::Menu,
            sound_enabled: true,
            tuning,
            menu: Menu::new(catalog),
            world: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning;
        if let Some(world) = self.world.as_mut() {
            world.apply_tuning(&self.tuning);
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// A pointer press at `point` in logical screen coordinates. Ignored
    /// outside the menu.
    pub fn click(
        &mut self,
        point: Vec2,
        catalog: &dyn ImageCatalog,
        audio: &mut dyn AudioOut,
    ) -> Flow {
        if self.state != GameState::Menu {
            return Flow::Continue;
        }
        let Some(action) = self.menu.hit(point) else {
            return Flow::Continue;
        };

        match action {
            MenuAction::Start => {
                self.world = Some(build_world(&self.tuning, catalog));
                self.state = GameState::Playing;
                log::info!("Game started");
                if self.sound_enabled {
                    audio.play_music(MUSIC_TRACK);
                }
                Flow::Continue
            }
            MenuAction::ToggleSound => {
                self.sound_enabled = !self.sound_enabled;
                log::info!(
                    "Sound {}",
                    if self.sound_enabled { "enabled" } else { "disabled" }
                );
                if self.sound_enabled {
                    audio.play_music(MUSIC_TRACK);
                } else {
                    audio.stop_music();
                }
                Flow::Continue
            }
            MenuAction::Exit => {
                log::info!("Exit requested from menu");
                Flow::Exit
            }
        }
    }

    /// One fixed simulation step.
    pub fn update(&mut self, controls: Controls, audio: &mut dyn AudioOut) -> Option<WorldStep> {
        if self.state != GameState::Playing {
            return None;
        }
        let world = self.world.as_mut()?;
        let step = world.step(controls, &self.tuning);

        if step.jumped && self.sound_enabled {
            audio.play_sound(JUMP_SOUND);
        }

        if !step.alive {
            log::info!("Player fell off the level");
        } else if let Some(index) = step.hit_enemy {
            log::info!("Player hit enemy {index}");
        }
        if step.player_died() {
            self.world = None;
            self.state = GameState::Menu;
        }
        Some(step)
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.clear();
        match (self.state, self.world.as_ref()) {
            (GameState::Playing, Some(world)) => {
                for entity in world.entities() {
                    let body = entity.body();
                    target.draw_sprite(&body.asset, body.rect());
                }
            }
            _ => self.menu.draw(target, self.sound_enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PlaceholderCatalog;
    use pxa_core::geometry::Rect;

    #[derive(Default)]
    struct Calls(Vec<String>);

    impl AudioOut for Calls {
        fn play_sound(&mut self, name: &str) {
            self.0.push(format!("sound:{name}"));
        }
        fn play_music(&mut self, name: &str) {
            self.0.push(format!("music:{name}"));
        }
        fn stop_music(&mut self) {
            self.0.push("stop".to_string());
        }
    }

    #[derive(Default)]
    struct Sprites(Vec<String>);

    impl DrawTarget for Sprites {
        fn clear(&mut self) {
            self.0.clear();
        }
        fn draw_sprite(&mut self, asset: &str, _rect: Rect) {
            self.0.push(asset.to_string());
        }
        fn draw_text(&mut self, _text: &str, _center: Vec2, _size: f32, _color: [u8; 4]) {}
    }

    const START: Vec2 = Vec2::new(400.0, 200.0);
    const SOUND: Vec2 = Vec2::new(400.0, 300.0);
    const EXIT: Vec2 = Vec2::new(400.0, 400.0);

    fn new_game() -> Game {
        Game::new(Tuning::default(), &PlaceholderCatalog)
    }

    fn jump_from_ground(game: &mut Game, audio: &mut Calls) {
        for _ in 0..120 {
            game.update(Controls::default(), audio);
        }
        game.update(
            Controls {
                jump: true,
                ..Controls::default()
            },
            audio,
        );
    }

    #[test]
    fn update_in_menu_is_a_no_op() {
        let mut game = new_game();
        let mut audio = Calls::default();
        assert!(game.update(Controls::default(), &mut audio).is_none());
        assert!(game.world().is_none());
    }

    #[test]
    fn clicks_while_playing_are_ignored() {
        let mut game = new_game();
        let mut audio = Calls::default();
        game.click(START, &PlaceholderCatalog, &mut audio);
        assert_eq!(
            game.click(EXIT, &PlaceholderCatalog, &mut audio),
            Flow::Continue
        );
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn exit_button_requests_exit() {
        let mut game = new_game();
        let mut audio = Calls::default();
        assert_eq!(game.click(EXIT, &PlaceholderCatalog, &mut audio), Flow::Exit);
        assert!(audio.0.is_empty());
    }

    #[test]
    fn jump_sound_follows_sound_flag() {
        let mut audio = Calls::default();
        let mut game = new_game();
        game.click(START, &PlaceholderCatalog, &mut audio);
        jump_from_ground(&mut game, &mut audio);
        assert_eq!(audio.0, vec!["music:music", "sound:jump"]);

        let mut audio = Calls::default();
        let mut game = new_game();
        game.click(SOUND, &PlaceholderCatalog, &mut audio);
        game.click(START, &PlaceholderCatalog, &mut audio);
        jump_from_ground(&mut game, &mut audio);
        assert_eq!(audio.0, vec!["stop"]);
    }

    #[test]
    fn playing_draws_platforms_then_enemies_then_player() {
        let mut game = new_game();
        let mut audio = Calls::default();
        game.click(START, &PlaceholderCatalog, &mut audio);
        let mut target = Sprites::default();
        game.draw(&mut target);
        assert_eq!(target.0.first().map(String::as_str), Some("block"));
        assert_eq!(target.0.last().map(String::as_str), Some("hero_idle_1"));
        let enemies = target.0.iter().filter(|a| a.starts_with("enemy_")).count();
        assert_eq!(enemies, 2);
    }

    #[test]
    fn tuning_changes_reach_the_live_world() {
        let mut game = new_game();
        let mut audio = Calls::default();
        game.click(START, &PlaceholderCatalog, &mut audio);
        game.set_tuning(Tuning {
            enemy_speed: 5.0,
            ..Tuning::default()
        });
        let speed = game.world().map(|w| w.enemies[0].speed);
        assert_eq!(speed, Some(5.0));
    }
}
