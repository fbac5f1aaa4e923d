use glam::Vec2;

use crate::assets::ImageCatalog;
use crate::character::{Character, FrameSet};
use crate::collision::{move_x, move_y, Contacts};
use crate::config::{Tuning, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entity::Body;

pub const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 300.0);

const IDLE_FRAMES: [&str; 2] = ["hero_idle_1", "hero_idle_2"];
const RUN_FRAMES: [&str; 2] = ["hero_run_1", "hero_run_2"];

/// Per-step input snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// What happened during one [`Player::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStep {
    /// False once the player has fallen past the bottom of the screen.
    pub alive: bool,
    /// A jump started this step; the caller decides whether to play a sound.
    pub jumped: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub character: Character,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
    pub contacts: Contacts,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: &Tuning, catalog: &dyn ImageCatalog) -> Self {
        let body = Body::new(spawn.x, spawn.y, IDLE_FRAMES[0], catalog);
        Self {
            character: Character::new(
                body,
                FrameSet::new(&IDLE_FRAMES, &RUN_FRAMES),
                tuning.animation_cadence,
                true,
            ),
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
            contacts: Contacts::default(),
        }
    }

    pub fn body(&self) -> &Body {
        &self.character.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.character.body
    }

    pub fn update(&mut self, controls: Controls, platforms: &[Body], tuning: &Tuning) -> PlayerStep {
        self.vx = 0.0;
        self.character.moving = false;

        // Right is checked first so it wins when both directions are held.
        if controls.right {
            self.vx = tuning.player_speed;
            self.character.facing_right = true;
            self.character.moving = true;
        } else if controls.left {
            self.vx = -tuning.player_speed;
            self.character.facing_right = false;
            self.character.moving = true;
        }

        let mut jumped = false;
        if controls.jump && self.on_ground {
            self.vy = tuning.jump_impulse;
            self.on_ground = false;
            jumped = true;
        }

        self.vy += tuning.gravity;

        let horizontal = move_x(&mut self.character.body, self.vx, platforms);
        let vertical = move_y(&mut self.character.body, &mut self.vy, platforms);
        self.on_ground = vertical.down;
        self.contacts = horizontal.merge(vertical);

        let rect = self.character.body.rect();
        if rect.left < 0.0 {
            self.character.body.set_left(0.0);
        }
        if rect.right() > SCREEN_WIDTH {
            self.character.body.set_right(SCREEN_WIDTH);
        }

        self.character.animate();

        PlayerStep {
            alive: self.character.body.pos.y <= SCREEN_HEIGHT + tuning.fall_margin,
            jumped,
        }
    }
}
